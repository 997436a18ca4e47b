// src/api/handlers/generator.rs

use actix_web::{web, HttpResponse, Responder};
use log::{debug, info};

use crate::api::AppState;
use crate::api::types::{
    GenerationRequest, MemorableRequest, MultipleRequest, MultipleResponse, PasswordAnalysisResponse,
    RequirementsRequest,
};
use crate::api::utils::{bad_request, generator_error_response, parse_body};
use crate::generators::{strength, PasswordEngine};
use crate::models::GenerationOptions;

/// Generate a secure password
///
/// Draws a password from the character set described by the options.
#[utoipa::path(
    post,
    path = "/api/security/passwords/generate",
    tag = "Generator",
    security(
        (),
        ("bearer_auth" = [])
    ),
    request_body = GenerationRequest,
    responses(
        (status = 200, description = "Generated password", body = crate::models::GeneratedPassword),
        (status = 400, description = "Invalid options or empty character set", body = crate::api::types::ErrorResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn generate_password(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> impl Responder {
    let request: GenerationRequest = parse_body(&body);
    let options = request.to_options();

    if let Some(response) = check_length(&state, options.length) {
        return response;
    }

    match state.engine.generate_scored(&options, &request.scoring_options()) {
        Ok(generated) => HttpResponse::Ok().json(generated),
        Err(e) => generator_error_response(&e),
    }
}

/// Generate a memorable password
///
/// Joins random dictionary words, then appends an optional digit and a symbol.
#[utoipa::path(
    post,
    path = "/api/security/passwords/generate-memorable",
    tag = "Generator",
    security(
        (),
        ("bearer_auth" = [])
    ),
    request_body = MemorableRequest,
    responses(
        (status = 200, description = "Generated password", body = crate::models::GeneratedPassword),
        (status = 400, description = "Invalid word count", body = crate::api::types::ErrorResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn generate_memorable(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> impl Responder {
    let request: MemorableRequest = parse_body(&body);
    let options = request.to_options();

    if options.word_count == 0 || options.word_count > MAX_MEMORABLE_WORDS {
        return bad_request(format!("Word count must be between 1 and {}", MAX_MEMORABLE_WORDS));
    }

    let generated = state
        .engine
        .generate_memorable(options.word_count, &options.separator, options.include_numbers);
    HttpResponse::Ok().json(generated)
}

const MAX_MEMORABLE_WORDS: usize = 12;

/// Generate a password meeting requirements
///
/// Retries random generation until the requirements hold or the attempt budget is spent.
#[utoipa::path(
    post,
    path = "/api/security/passwords/generate-requirements",
    tag = "Generator",
    security(
        (),
        ("bearer_auth" = [])
    ),
    request_body = RequirementsRequest,
    responses(
        (status = 200, description = "Generated password", body = crate::models::GeneratedPassword),
        (status = 400, description = "Resulting length outside the allowed range", body = crate::api::types::ErrorResponse),
        (status = 422, description = "Requirements could not be satisfied", body = crate::api::types::ErrorResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn generate_with_requirements(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> impl Responder {
    let request: RequirementsRequest = parse_body(&body);
    let requirements = request.to_requirements();
    debug!("Requirement-driven generation: {:?}", requirements);

    if let Some(response) = check_length(&state, PasswordEngine::requirement_length(&requirements)) {
        return response;
    }

    match state.engine.generate_with_requirements(&requirements) {
        Ok(generated) => HttpResponse::Ok().json(generated),
        Err(e) => {
            info!("Requirement-driven generation failed: {}", e);
            generator_error_response(&e)
        }
    }
}

/// Generate several passwords
#[utoipa::path(
    post,
    path = "/api/security/passwords/generate-multiple",
    tag = "Generator",
    security(
        (),
        ("bearer_auth" = [])
    ),
    request_body = MultipleRequest,
    responses(
        (status = 200, description = "Generated passwords", body = MultipleResponse),
        (status = 400, description = "Invalid count or options", body = crate::api::types::ErrorResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn generate_multiple(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> impl Responder {
    let request: MultipleRequest = parse_body(&body);
    let count = request.count.unwrap_or(DEFAULT_BATCH_COUNT);
    let (options, scoring) = match &request.options {
        Some(options) => (options.to_options(), options.scoring_options()),
        None => (GenerationOptions::default(), GenerationOptions::unscoped()),
    };

    if count > state.config.max_batch_count {
        return bad_request(format!("Count must be at most {}", state.config.max_batch_count));
    }
    if let Some(response) = check_length(&state, options.length) {
        return response;
    }

    match state.engine.generate_multiple_scored(count, &options, &scoring) {
        Ok(passwords) => HttpResponse::Ok().json(MultipleResponse { passwords }),
        Err(e) => generator_error_response(&e),
    }
}

const DEFAULT_BATCH_COUNT: usize = 5;

/// Analyze password strength
///
/// Scores an arbitrary password. Nothing is stored.
#[utoipa::path(
    get,
    path = "/api/security/passwords/analysis/{pwd}",
    tag = "Generator",
    params(
        ("pwd" = String, Path, description = "URL-encoded password to analyze")
    ),
    security(
        (),
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Password analysis result", body = PasswordAnalysisResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn analyze_password(path: web::Path<String>) -> impl Responder {
    let password = path.into_inner();

    let decoded_password = match urlencoding::decode(&password) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => password,
    };

    let strength = PasswordEngine::calculate_strength(&decoded_password, &GenerationOptions::unscoped());

    HttpResponse::Ok().json(PasswordAnalysisResponse {
        success: true,
        strength,
        entropy: PasswordEngine::calculate_entropy(&decoded_password),
        feedback: strength::strength_feedback(&decoded_password, strength),
    })
}

fn check_length(state: &AppState, length: usize) -> Option<HttpResponse> {
    if state.config.length_in_range(length) {
        return None;
    }
    Some(bad_request(format!(
        "Password length must be between {} and {} characters",
        state.config.min_password_length, state.config.max_password_length
    )))
}
