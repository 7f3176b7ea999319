use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error as ActixError, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn, Level};

use crate::auth::gate::RejectionKind;

/// Access log: one `request_completed` event per request.
///
/// 5xx is logged at error level, 4xx at warn, everything else at info.
/// Gate rejections are tagged with their [`RejectionKind`]; those stay at warn
/// whatever their status unless the kind is `InternalError`.
pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

pub(crate) fn level_for(status: StatusCode, rejection: Option<RejectionKind>) -> Level {
    if let Some(kind) = rejection {
        return match kind {
            RejectionKind::InternalError => Level::ERROR,
            _ => Level::WARN,
        };
    }

    if status.is_server_error() {
        Level::ERROR
    } else if status.is_client_error() {
        Level::WARN
    } else {
        Level::INFO
    }
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_string();

        let trace_id = req
            .extensions()
            .get::<String>()
            .cloned()
            .unwrap_or_else(|| "unknown".to_string());

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            let (status, rejection) = match &result {
                Ok(res) => (
                    res.status(),
                    res.response().extensions().get::<RejectionKind>().copied(),
                ),
                Err(err) => (err.as_response_error().status_code(), None),
            };

            let duration_us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);
            let status_code = status.as_u16();

            let level = level_for(status, rejection);
            if level == Level::ERROR {
                error!(http.method=%method, url.path=%path, http.status_code=%status_code, duration_us=%duration_us, trace_id=%trace_id, message="request_completed");
            } else if level == Level::WARN {
                warn!(http.method=%method, url.path=%path, http.status_code=%status_code, duration_us=%duration_us, trace_id=%trace_id, message="request_completed");
            } else {
                info!(http.method=%method, url.path=%path, http.status_code=%status_code, duration_us=%duration_us, trace_id=%trace_id, message="request_completed");
            }

            result
        })
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App, HttpResponse};
    use tracing::Level;

    use super::{level_for, StructuredLogger};
    use crate::auth::gate::RejectionKind;
    use crate::middleware::auth_gate::AuthGate;
    use crate::state::app_state::AppState;
    use crate::state::security_config::SecurityConfig;
    use crate::test_bootstrap::capture::capture_logs;

    #[::core::prelude::v1::test]
    fn status_class_picks_the_level() {
        assert_eq!(level_for(StatusCode::OK, None), Level::INFO);
        assert_eq!(level_for(StatusCode::NOT_FOUND, None), Level::WARN);
        assert_eq!(level_for(StatusCode::INTERNAL_SERVER_ERROR, None), Level::ERROR);
    }

    #[::core::prelude::v1::test]
    fn auth_failures_are_not_logged_as_errors() {
        for kind in [
            RejectionKind::Unauthenticated,
            RejectionKind::InvalidToken,
            RejectionKind::TokenExpired,
        ] {
            assert_eq!(level_for(StatusCode::UNAUTHORIZED, Some(kind)), Level::WARN);
        }
        assert_eq!(
            level_for(
                StatusCode::INTERNAL_SERVER_ERROR,
                Some(RejectionKind::ServerMisconfigured)
            ),
            Level::WARN
        );
        assert_eq!(
            level_for(
                StatusCode::INTERNAL_SERVER_ERROR,
                Some(RejectionKind::InternalError)
            ),
            Level::ERROR
        );
    }

    async fn guarded_status(state: Option<AppState>, cookie: Option<&str>) -> StatusCode {
        let mut app = App::new().wrap(StructuredLogger);
        if let Some(state) = state {
            app = app.app_data(web::Data::new(state));
        }
        let app = test::init_service(app.service(
            web::resource("/guarded")
                .route(web::get().to(HttpResponse::Ok))
                .wrap(AuthGate),
        ))
        .await;

        let mut req = test::TestRequest::get().uri("/guarded");
        if let Some(token) = cookie {
            req = req.cookie(actix_web::cookie::Cookie::new("token", token.to_string()));
        }
        test::call_service(&app, req.to_request()).await.status()
    }

    #[actix_web::test]
    async fn missing_secret_rejection_is_logged_below_error() {
        let (logs, _guard) = capture_logs();

        let status = guarded_status(
            Some(AppState::without_uploads(SecurityConfig::without_secret())),
            Some("abc"),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let completed = logs.with_message("request_completed");
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0]["level"], "WARN");
        assert_eq!(completed[0]["fields"]["http.status_code"], "500");
        assert!(logs.at_level("ERROR").is_empty(), "{:?}", logs.events());
    }

    #[actix_web::test]
    async fn internal_gate_failure_is_logged_as_error() {
        let (logs, _guard) = capture_logs();

        // No AppState registered while a credential is present.
        let status = guarded_status(None, Some("abc")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let completed = logs.with_message("request_completed");
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0]["level"], "ERROR");
    }
}
