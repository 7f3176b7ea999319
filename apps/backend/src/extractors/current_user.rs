use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::auth::gate::Identity;
use crate::error::AppError;

/// Identity of the caller, as attached to the request context by `AuthGate`.
///
/// Handlers mounted outside the gate never see an identity and get a 401.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: String,
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let identity = req.extensions().get::<Identity>().cloned();

        ready(
            identity
                .map(|id| CurrentUser {
                    user_id: id.user_id,
                })
                .ok_or(AppError::Unauthenticated),
        )
    }
}
