// src/api/routes.rs
use actix_web::web;
use std::sync::Arc;
use super::handlers;
use super::middleware::auth::TokenValidator;
use crate::core::auth::TokenVerifier;

pub fn configure_routes(cfg: &mut web::ServiceConfig, verifier: Option<Arc<TokenVerifier>>) {
    // Password generator and history
    cfg.service(
        web::scope("/api/security/passwords")
            .wrap(TokenValidator::new(verifier.clone()))
            .route("/generate", web::post().to(handlers::generator::generate_password))
            .route("/generate-memorable", web::post().to(handlers::generator::generate_memorable))
            .route("/generate-requirements", web::post().to(handlers::generator::generate_with_requirements))
            .route("/generate-multiple", web::post().to(handlers::generator::generate_multiple))
            .route("/analysis/{pwd}", web::get().to(handlers::generator::analyze_password))
            .route("/history", web::get().to(handlers::history::get_history))
            .route("/history", web::delete().to(handlers::history::clear_history))
            .route("/stats", web::get().to(handlers::history::get_stats))
    );

    // Audit logs
    cfg.service(
        web::scope("/api/system")
            .wrap(TokenValidator::new(verifier))
            .route("/logs", web::get().to(handlers::system::get_logs))
    );
}
