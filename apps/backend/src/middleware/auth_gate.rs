//! Authentication gate middleware.
//!
//! Wrap any scope that needs an authenticated caller:
//!
//! ```ignore
//! web::scope("/api/v1/company").wrap(AuthGate).configure(company::configure_routes)
//! ```
//!
//! On success the resolved [`Identity`] is inserted into request extensions
//! before the downstream service runs. On rejection the downstream service is
//! never called and the response is `{ "message": ..., "success": false }`,
//! with the [`RejectionKind`](crate::auth::gate::RejectionKind) stored in the response extensions.

use std::rc::Rc;
use std::time::SystemTime;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{web, Error, HttpMessage, ResponseError};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::auth::gate::{authenticate, AuthRejection, Identity};
use crate::error::AppError;
use crate::extractors::credential::credential_from_request;
use crate::logging::security;
use crate::state::app_state::AppState;

pub struct AuthGate;

impl<S, B> Transform<S, ServiceRequest> for AuthGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGateMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthGateMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        // Everything runs inside the future so it is polled within the
        // request's trace scope and dropped cleanly if the client goes away.
        Box::pin(async move {
            let path = req.path().to_string();
            let credential = credential_from_request(req.request());

            let outcome = match req.app_data::<web::Data<AppState>>() {
                Some(state) => {
                    authenticate(credential.as_deref(), &state.security, SystemTime::now())
                }
                None if credential.is_none() => Err(AuthRejection::Unauthenticated),
                None => Err(AuthRejection::InternalError {
                    cause: "AppState not registered on the app".to_string(),
                }),
            };

            match outcome {
                Ok(identity) => {
                    security::auth_accepted(&identity.user_id, &path);
                    req.extensions_mut().insert::<Identity>(identity);

                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(rejection) => {
                    security::auth_rejected(&rejection, &path);

                    let kind = rejection.kind();
                    let mut response = AppError::from(rejection).error_response();
                    // Read back by the access log to pick the level.
                    response.extensions_mut().insert(kind);
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}
