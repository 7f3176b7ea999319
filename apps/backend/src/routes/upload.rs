use std::time::SystemTime;

use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse};
use futures_util::StreamExt;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::middleware::auth_gate::AuthGate;
use crate::state::app_state::AppState;
use crate::uploads::{storage_name, UploadError};

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    #[serde(default)]
    pub filename: String,
    pub field: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub success: bool,
    pub file: String,
}

/// Buffer the request body, stopping as soon as it grows past `limit`.
async fn read_capped(mut payload: web::Payload, limit: usize) -> Result<web::BytesMut, AppError> {
    let mut body = web::BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|e| AppError::bad_request("PAYLOAD_READ", e.to_string()))?;
        let size = body.len() + chunk.len();
        if size > limit {
            return Err(UploadError::TooLarge { size }.into());
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

/// Store the raw request body as an image file.
///
/// `Content-Type` carries the MIME type; `?filename=` the client's original name.
async fn upload_file(
    req: HttpRequest,
    current_user: CurrentUser,
    query: web::Query<UploadQuery>,
    payload: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let policy = app_state
        .uploads
        .as_ref()
        .ok_or_else(|| AppError::not_found("File uploads are not enabled"))?;

    let mime = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let field = query.field.as_deref().unwrap_or("file");

    policy.check_field(field)?;
    let body = read_capped(payload, policy.max_bytes()).await?;
    policy.check(&query.filename, mime, body.len())?;

    let stored = storage_name(field, &query.filename, SystemTime::now(), &mut rand::rng());
    tokio::fs::write(policy.path_for(&stored), &body).await?;

    info!(
        user_id = %current_user.user_id,
        file = %stored,
        bytes = body.len(),
        "stored upload"
    );

    Ok(HttpResponse::Created().json(UploadResponse {
        message: "File uploaded successfully.".to_string(),
        success: true,
        file: stored,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::post().to(upload_file))
            .wrap(AuthGate),
    );
}
