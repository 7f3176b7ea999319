use actix_web::web;

pub mod health;
pub mod upload;
pub mod user;

/// Mount every route. The gate is attached per resource, so public routes
/// (`/health`, `/api/v1/user/logout`) never pass through it.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes);

    // User routes: /api/v1/user/**
    cfg.service(web::scope("/api/v1/user").configure(user::configure_routes));

    // Upload routes: /api/v1/upload
    cfg.service(web::scope("/api/v1/upload").configure(upload::configure_routes));
}
