// src/core/auth.rs
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Define JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    // Subject (user ID)
    pub sub: String,
    pub email: Option<String>,
    // Issued at
    pub iat: i64,
    // Expiration time
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("Session expired")]
    SessionExpired,

    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

pub type Result<T> = std::result::Result<T, AuthError>;

/// Issues and checks HS256 bearer tokens
#[derive(Clone)]
pub struct TokenVerifier {
    secret: String,
    token_duration: Duration,
}

impl TokenVerifier {
    pub fn new(secret: &str, token_duration: std::time::Duration) -> Self {
        Self {
            secret: secret.to_string(),
            token_duration: Duration::from_std(token_duration).unwrap_or_else(|_| Duration::hours(24)),
        }
    }

    pub fn issue_token(&self, subject: &str, email: Option<&str>) -> Result<String> {
        if subject.trim().is_empty() {
            return Err(AuthError::InvalidFormat("subject must not be empty".to_string()));
        }

        let now = Utc::now();
        let expires = now
            .checked_add_signed(self.token_duration)
            .ok_or_else(|| AuthError::InvalidFormat("token duration out of range".to_string()))?;
        let claims = Claims {
            sub: subject.to_string(),
            email: email.map(String::from),
            iat: now.timestamp(),
            exp: expires.timestamp(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;
        Ok(token)
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::SessionExpired,
            _ => AuthError::JwtError(e),
        })?;

        Ok(data.claims)
    }
}

/// Pulls the token out of an `Authorization: Bearer ...` header value
pub fn parse_bearer(header: &str) -> Result<&str> {
    match header.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        _ => Err(AuthError::InvalidFormat("expected 'Bearer <token>'".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verifier() -> TokenVerifier {
        TokenVerifier::new("test-secret", std::time::Duration::from_secs(3600))
    }

    #[test]
    fn issued_token_validates() {
        let verifier = verifier();
        let token = verifier.issue_token("user-1", Some("a@example.com")).unwrap();
        let claims = verifier.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.email.as_deref(), Some("a@example.com"));
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = verifier().issue_token("user-1", None).unwrap();
        let other = TokenVerifier::new("other-secret", std::time::Duration::from_secs(3600));
        assert!(matches!(other.validate_token(&token), Err(AuthError::JwtError(_))));
    }

    #[test]
    fn expired_token_is_rejected() {
        let verifier = verifier();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "user-1".to_string(),
            email: None,
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();
        assert!(matches!(verifier.validate_token(&token), Err(AuthError::SessionExpired)));
    }

    #[test]
    fn bearer_parsing() {
        assert_eq!(parse_bearer("Bearer abc.def").unwrap(), "abc.def");
        assert!(parse_bearer("Basic abc").is_err());
        assert!(parse_bearer("Bearer   ").is_err());
    }

    #[test]
    fn empty_subject_rejected() {
        assert!(matches!(verifier().issue_token(" ", None), Err(AuthError::InvalidFormat(_))));
    }

    #[test]
    fn unrepresentable_expiry_is_an_error() {
        let verifier = TokenVerifier::new("test-secret", std::time::Duration::from_secs(9_000_000_000_000));
        assert!(matches!(verifier.issue_token("user-1", None), Err(AuthError::InvalidFormat(_))));
    }
}
