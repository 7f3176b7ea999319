use actix_web::{web, App, HttpServer};
use portal_backend::config::ServerConfig;
use portal_backend::middleware::cors::cors_middleware;
use portal_backend::middleware::request_trace::RequestTrace;
use portal_backend::middleware::structured_logger::StructuredLogger;
use portal_backend::middleware::trace_span::TraceSpan;
use portal_backend::routes;
use portal_backend::state::build_state;
use portal_backend::telemetry;
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let app_state = match build_state()
        .with_security(config.security.clone())
        .with_upload_dir(config.upload_dir.clone())
        .build()
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    info!(
        host = %config.host,
        port = config.port,
        upload_dir = %config.upload_dir.display(),
        "starting job portal backend"
    );

    let data = web::Data::new(app_state);
    let origins = config.cors_allowed_origins.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware(&origins))
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
