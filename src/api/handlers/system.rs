// src/api/handlers/system.rs

use actix_web::{web, HttpResponse, Responder};
use log::error;

use crate::api::AppState;
use crate::api::types::{ErrorResponse, LogsResponse};
use crate::logging::LogFilter;

/// Audit log entries
///
/// Generation events recorded by the audit logger, oldest first.
#[utoipa::path(
    get,
    path = "/api/system/logs",
    tag = "System",
    params(LogFilter),
    security(
        (),
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Matching log entries", body = LogsResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Log file could not be read", body = ErrorResponse)
    )
)]
pub async fn get_logs(
    state: web::Data<AppState>,
    filter: web::Query<LogFilter>,
) -> impl Responder {
    match state.audit.get_logs(&filter) {
        Ok(entries) => HttpResponse::Ok().json(LogsResponse {
            success: true,
            entries,
        }),
        Err(e) => {
            error!("Failed to read audit log: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::new(format!("Failed to read logs: {}", e)))
        }
    }
}
