use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::auth::cookie::logout_cookie;
use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::middleware::auth_gate::AuthGate;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub success: bool,
}

/// Who the credential belongs to.
async fn me(current_user: CurrentUser) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(MeResponse {
        user_id: current_user.user_id,
        success: true,
    }))
}

/// Expire the `token` cookie. Works whether or not the caller is logged in.
async fn logout() -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok()
        .cookie(logout_cookie())
        .json(MessageResponse {
            message: "Logged out successfully.".to_string(),
            success: true,
        }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/logout", web::get().to(logout)).service(
        web::resource("/me")
            .route(web::get().to(me))
            .wrap(AuthGate),
    );
}
