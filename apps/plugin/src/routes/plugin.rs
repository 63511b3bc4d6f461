//! Plugin RPC routes for the host release tool.
//!
//! - GET /api/plugin/info - Plugin metadata
//! - POST /api/plugin/validate - Validate a config map
//! - POST /api/plugin/execute - Run a lifecycle hook

use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::models::{ExecuteRequest, ValidateRequest};
use crate::services::SlackPlugin;

/// GET /api/plugin/info
pub async fn info(plugin: web::Data<SlackPlugin>) -> HttpResponse {
    HttpResponse::Ok().json(plugin.describe())
}

/// POST /api/plugin/validate
pub async fn validate(
    plugin: web::Data<SlackPlugin>,
    body: web::Json<ValidateRequest>,
) -> HttpResponse {
    HttpResponse::Ok().json(plugin.validate(&body.config))
}

/// POST /api/plugin/execute
///
/// Always answers 200; delivery failures are reported in the body.
pub async fn execute(
    plugin: web::Data<SlackPlugin>,
    body: web::Json<ExecuteRequest>,
) -> HttpResponse {
    let request = body.into_inner();
    log::debug!(
        "Executing hook {} (dry_run={})",
        request.hook,
        request.dry_run
    );
    HttpResponse::Ok().json(plugin.execute(request).await)
}

/// Rejects malformed JSON bodies with the standard error envelope
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(256 * 1024)
        .error_handler(|err, _req| AppError::Validation(err.to_string()).into())
}

/// Configure plugin routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/plugin")
            .app_data(json_config())
            .route("/info", web::get().to(info))
            .route("/validate", web::post().to(validate))
            .route("/execute", web::post().to(execute)),
    );
}
