// src/api/middleware/auth.rs

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use std::rc::Rc;
use std::sync::Arc;
use crate::core::auth::{parse_bearer, TokenVerifier};
use log::{debug, warn};

/// Bearer-token guard. With no verifier configured every request passes.
#[derive(Clone)]
pub struct TokenValidator {
    verifier: Option<Arc<TokenVerifier>>,
}

impl TokenValidator {
    pub fn new(verifier: Option<Arc<TokenVerifier>>) -> Self {
        Self { verifier }
    }
}

impl<S, B> Transform<S, ServiceRequest> for TokenValidator
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TokenValidatorMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TokenValidatorMiddleware {
            service: Rc::new(service),
            verifier: self.verifier.clone(),
        }))
    }
}

pub struct TokenValidatorMiddleware<S> {
    service: Rc<S>,
    verifier: Option<Arc<TokenVerifier>>,
}

impl<S, B> Service<ServiceRequest> for TokenValidatorMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        // Auth disabled, or CORS preflight
        let verifier = match &self.verifier {
            Some(verifier) if req.method() != actix_web::http::Method::OPTIONS => Arc::clone(verifier),
            _ => {
                let fut = service.call(req);
                return Box::pin(async move { fut.await });
            }
        };

        Box::pin(async move {
            let header = match req.headers().get("Authorization") {
                Some(header) => header.to_str().map_err(|_| {
                    warn!("❌ Could not convert authorization header to string");
                    actix_web::error::ErrorUnauthorized("Invalid authorization header")
                })?,
                None => {
                    warn!("❌ Missing authorization header");
                    return Err(actix_web::error::ErrorUnauthorized("Missing authorization header"));
                }
            };

            let token = parse_bearer(header).map_err(|e| {
                warn!("❌ Invalid authorization header: {}", e);
                actix_web::error::ErrorUnauthorized("Invalid authorization header format")
            })?;

            match verifier.validate_token(token) {
                Ok(claims) => {
                    debug!("✅ Token accepted for subject {}", claims.sub);
                    req.extensions_mut().insert(claims);
                    service.call(req).await
                }
                Err(e) => {
                    warn!("❌ Token validation failed: {}", e);
                    Err(actix_web::error::ErrorUnauthorized(format!("Invalid or expired token: {}", e)))
                }
            }
        })
    }
}
