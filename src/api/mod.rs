// src/api/mod.rs
use actix_web::{web, App, HttpServer};
use actix_cors::Cors;
use std::sync::Arc;
use utoipa::{OpenApi, Modify};
use utoipa_swagger_ui::SwaggerUi;
use utoipa_redoc::{Redoc, Servable};

use crate::core::auth::TokenVerifier;
use crate::core::config::Config;
use crate::generators::PasswordEngine;
use crate::logging::Logger;

pub mod types;
pub mod routes;
pub mod handlers;
pub mod middleware;
pub mod utils;

/// Shared state handed to every handler
pub struct AppState {
    pub engine: Arc<PasswordEngine>,
    pub config: Config,
    pub audit: Arc<Logger>,
}

#[derive(Default)]
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = &mut openapi.components {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        // Generator endpoints
        crate::api::handlers::generator::generate_password,
        crate::api::handlers::generator::generate_memorable,
        crate::api::handlers::generator::generate_with_requirements,
        crate::api::handlers::generator::generate_multiple,
        crate::api::handlers::generator::analyze_password,

        // History endpoints
        crate::api::handlers::history::get_history,
        crate::api::handlers::history::clear_history,
        crate::api::handlers::history::get_stats,

        // System endpoints
        crate::api::handlers::system::get_logs
    ),
    components(
        schemas(
            crate::api::types::GenerationRequest,
            crate::api::types::MemorableRequest,
            crate::api::types::RequirementsRequest,
            crate::api::types::MultipleRequest,
            crate::api::types::MultipleResponse,
            crate::api::types::HistoryResponse,
            crate::api::types::StatsResponse,
            crate::api::types::PasswordAnalysisResponse,
            crate::api::types::LogsResponse,
            crate::api::types::SuccessResponse,
            crate::api::types::ErrorResponse,

            crate::models::GenerationOptions,
            crate::models::MemorableOptions,
            crate::models::Requirements,
            crate::models::PasswordKind,
            crate::models::GeneratedPassword,
            crate::models::HistoryOptions,
            crate::models::HistoryEntry,
            crate::models::PasswordStats,

            crate::logging::LogEntry,
            crate::logging::LogLevel,
            crate::logging::LogFilter
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Generator", description = "Password generation endpoints"),
        (name = "History", description = "Generation history and statistics"),
        (name = "System", description = "Audit log access")
    ),
    info(
        title = "RustPassgen API",
        version = "0.1.0",
        description = "Constrained secure password generation with strength scoring",
        license(name = "MIT")
    )
)]
struct ApiDoc;

pub async fn start_server(state: AppState) -> std::io::Result<()> {
    let address = state.config.web_address.clone();
    let port = state.config.web_port;
    log::info!("Starting RustPassgen API server on {}:{}", address, port);

    let verifier = state
        .config
        .jwt_secret
        .as_deref()
        .map(|secret| Arc::new(TokenVerifier::new(secret, state.config.token_duration)));
    if !state.config.auth_enabled() {
        log::warn!("JWT_SECRET not set, API routes are unauthenticated");
    }

    let state = web::Data::new(state);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "DELETE"])
            .allowed_headers(vec![
                "Authorization",
                "Content-Type",
                "Accept",
                "X-Requested-With",
            ])
            .max_age(3600);

        let verifier = verifier.clone();

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi())
            )
            .service(Redoc::with_url("/redoc", ApiDoc::openapi()))
            .configure(move |cfg| routes::configure_routes(cfg, verifier))
    })
    .bind((address.as_str(), port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test};
    use crate::api::types::{HistoryResponse, MultipleResponse, PasswordAnalysisResponse, StatsResponse};
    use crate::crypto::seeded_random;
    use crate::models::{GeneratedPassword, GenerationOptions};
    use tempfile::TempDir;

    fn state(dir: &TempDir, config: Config) -> web::Data<AppState> {
        web::Data::new(AppState {
            engine: Arc::new(PasswordEngine::with_random(seeded_random(11))),
            config,
            audit: Arc::new(Logger::new(dir.path().to_path_buf()).unwrap()),
        })
    }

    macro_rules! app {
        ($state:expr, $verifier:expr) => {
            test::init_service(
                App::new()
                    .app_data($state.clone())
                    .configure(move |cfg| routes::configure_routes(cfg, $verifier)),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn generate_with_empty_body_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir, Config::default());
        let app = app!(state, None);

        let req = test::TestRequest::post().uri("/api/security/passwords/generate").to_request();
        let generated: GeneratedPassword = test::call_and_read_body_json(&app, req).await;
        assert_eq!(generated.password.chars().count(), 16);
        assert_eq!(state.engine.get_history(10).len(), 1);
    }

    #[actix_web::test]
    async fn generate_rejects_empty_charset() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir, Config::default());
        let app = app!(state, None);

        let req = test::TestRequest::post()
            .uri("/api/security/passwords/generate")
            .set_payload(r#"{"include_uppercase":false,"include_lowercase":false,"include_numbers":false,"include_symbols":false}"#)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn generate_rejects_out_of_range_length() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir, Config::default());
        let app = app!(state, None);

        let req = test::TestRequest::post()
            .uri("/api/security/passwords/generate")
            .set_payload(r#"{"length": 500}"#)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn unsatisfiable_requirements_are_unprocessable() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir, Config::default());
        let app = app!(state, None);

        let req = test::TestRequest::post()
            .uri("/api/security/passwords/generate-requirements")
            .set_payload(r#"{"min_length":8,"max_length":8,"min_uppercase":0,"min_lowercase":0,"min_numbers":0,"min_symbols":0,"max_consecutive":1}"#)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[actix_web::test]
    async fn requirements_with_oversized_length_are_rejected() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir, Config::default());
        let app = app!(state, None);

        let req = test::TestRequest::post()
            .uri("/api/security/passwords/generate-requirements")
            .set_payload(r#"{"min_length":200000,"max_length":0}"#)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(state.engine.get_history(10).is_empty());
    }

    #[actix_web::test]
    async fn only_requested_exclusions_earn_hygiene_bonus() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir, Config::default());
        let app = app!(state, None);

        let req = test::TestRequest::post().uri("/api/security/passwords/generate").to_request();
        let generated: GeneratedPassword = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            generated.strength,
            PasswordEngine::calculate_strength(&generated.password, &GenerationOptions::unscoped())
        );

        let req = test::TestRequest::post()
            .uri("/api/security/passwords/generate")
            .set_payload(r#"{"exclude_similar": true, "exclude_ambiguous": true}"#)
            .to_request();
        let generated: GeneratedPassword = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            generated.strength,
            PasswordEngine::calculate_strength(&generated.password, &GenerationOptions::default())
        );

        let req = test::TestRequest::post()
            .uri("/api/security/passwords/generate-requirements")
            .to_request();
        let generated: GeneratedPassword = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            generated.strength,
            PasswordEngine::calculate_strength(&generated.password, &GenerationOptions::unscoped())
        );
    }

    #[actix_web::test]
    async fn multiple_then_history_and_stats() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir, Config::default());
        let app = app!(state, None);

        let req = test::TestRequest::post()
            .uri("/api/security/passwords/generate-multiple")
            .set_payload(r#"{"count": 3, "options": {"length": 12}}"#)
            .to_request();
        let batch: MultipleResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(batch.passwords.len(), 3);
        assert!(batch.passwords.iter().all(|p| p.password.chars().count() == 12));

        let req = test::TestRequest::get()
            .uri("/api/security/passwords/history?limit=2")
            .to_request();
        let history: HistoryResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(history.history.len(), 2);
        assert_eq!(history.history[0].password, batch.passwords[2].password);

        let req = test::TestRequest::get().uri("/api/security/passwords/stats").to_request();
        let stats: StatsResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(stats.stats.total_generated, 3);
        assert_eq!(stats.stats.most_common_length, 12);

        let req = test::TestRequest::delete().uri("/api/security/passwords/history").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(state.engine.get_stats().total_generated, 0);
    }

    #[actix_web::test]
    async fn multiple_count_is_capped() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir, Config::default());
        let app = app!(state, None);

        let req = test::TestRequest::post()
            .uri("/api/security/passwords/generate-multiple")
            .set_payload(r#"{"count": 1000}"#)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn memorable_and_analysis() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir, Config::default());
        let app = app!(state, None);

        let req = test::TestRequest::post()
            .uri("/api/security/passwords/generate-memorable")
            .set_payload(r#"{"word_count": 3, "separator": "+"}"#)
            .to_request();
        let generated: GeneratedPassword = test::call_and_read_body_json(&app, req).await;
        assert_eq!(generated.password.split('+').count(), 3);

        let req = test::TestRequest::get()
            .uri("/api/security/passwords/analysis/aA1%21")
            .to_request();
        let analysis: PasswordAnalysisResponse = test::call_and_read_body_json(&app, req).await;
        assert!((analysis.entropy - 4.0 * 94f64.log2()).abs() < 1e-9);
        assert!(!analysis.feedback.is_empty());
    }

    #[actix_web::test]
    async fn bearer_token_required_when_configured() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir, Config::default());
        let verifier = Arc::new(TokenVerifier::new("secret", std::time::Duration::from_secs(60)));
        let token = verifier.issue_token("tester", None).unwrap();
        let app = app!(state, Some(Arc::clone(&verifier)));

        let req = test::TestRequest::get().uri("/api/security/passwords/stats").to_request();
        let resp = test::try_call_service(&app, req).await;
        let status = match resp {
            Ok(resp) => resp.status(),
            Err(e) => e.as_response_error().status_code(),
        };
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::get()
            .uri("/api/security/passwords/stats")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn logs_endpoint_returns_audit_entries() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir, Config::default());
        state
            .audit
            .log(crate::logging::LogLevel::Info, "Generator", "Generated standard password", None)
            .unwrap();
        let app = app!(state, None);

        let req = test::TestRequest::get()
            .uri("/api/system/logs?component=Generator")
            .to_request();
        let logs: crate::api::types::LogsResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(logs.entries.len(), 1);
    }
}
