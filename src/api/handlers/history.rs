// src/api/handlers/history.rs

use actix_web::{web, HttpResponse, Responder};
use log::info;

use crate::api::AppState;
use crate::api::types::{HistoryQuery, HistoryResponse, StatsResponse, SuccessResponse};

/// Recent generation history
///
/// Most recent first. Unparseable limits fall back to the configured default.
#[utoipa::path(
    get,
    path = "/api/security/passwords/history",
    tag = "History",
    params(HistoryQuery),
    security(
        (),
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "History entries", body = HistoryResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_history(
    state: web::Data<AppState>,
    query: web::Query<HistoryQuery>,
) -> impl Responder {
    let limit = query
        .limit
        .as_deref()
        .and_then(|l| l.trim().parse::<usize>().ok())
        .unwrap_or(state.config.default_history_limit);

    HttpResponse::Ok().json(HistoryResponse {
        history: state.engine.get_history(limit),
    })
}

#[utoipa::path(
    delete,
    path = "/api/security/passwords/history",
    tag = "History",
    security(
        (),
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "History cleared", body = SuccessResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn clear_history(state: web::Data<AppState>) -> impl Responder {
    state.engine.clear_history();
    info!("Generation history cleared via API");

    HttpResponse::Ok().json(SuccessResponse {
        success: true,
        message: Some("History cleared".to_string()),
    })
}

/// Aggregate statistics over the current history
#[utoipa::path(
    get,
    path = "/api/security/passwords/stats",
    tag = "History",
    security(
        (),
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "History statistics", body = StatsResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_stats(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(StatsResponse {
        stats: state.engine.get_stats(),
    })
}
