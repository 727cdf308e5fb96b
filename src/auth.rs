//! API key verification for the transport layer.

use crate::errors::AppError;
use crate::handlers::AppState;
use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use sha2::{Digest, Sha256};
use std::sync::Arc;

/// Header carrying the pre-shared key (`X-API-Key`).
pub const API_KEY_HEADER: &str = "x-api-key";

/// Decides whether a presented credential is acceptable.
pub trait CredentialVerifier: Send + Sync {
    fn is_valid(&self, credential: &str) -> bool;
}

/// Verifier backed by a fixed set of pre-shared keys.
///
/// Only SHA-256 digests of the keys are kept in memory.
#[derive(Debug, Clone)]
pub struct StaticKeyVerifier {
    digests: Vec<String>,
}

impl StaticKeyVerifier {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            digests: keys.into_iter().map(|k| digest(k.as_ref())).collect(),
        }
    }
}

impl CredentialVerifier for StaticKeyVerifier {
    fn is_valid(&self, credential: &str) -> bool {
        let presented = digest(credential);
        // Check every digest so timing does not reveal which key matched.
        self.digests
            .iter()
            .fold(false, |found, d| constant_time_compare(d, &presented) | found)
    }
}

/// Hex-encoded SHA-256 of a credential.
fn digest(credential: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(credential.as_bytes());
    hex::encode(hasher.finalize())
}

/// Constant-time string comparison.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.as_bytes()
        .iter()
        .zip(b.as_bytes().iter())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

/// Checks the `X-API-Key` header against the configured verifier.
fn verify_api_key(verifier: &dyn CredentialVerifier, headers: &HeaderMap) -> Result<(), AppError> {
    let key = headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized(format!("Missing {} header", API_KEY_HEADER)))?;

    if !verifier.is_valid(key) {
        return Err(AppError::Forbidden("Invalid API key".to_string()));
    }

    Ok(())
}

/// Middleware rejecting requests without a valid API key.
pub async fn require_api_key(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    verify_api_key(state.verifier.as_ref(), request.headers())?;
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_static_keys() {
        let verifier = StaticKeyVerifier::new(["key-one", "key-two"]);
        assert!(verifier.is_valid("key-one"));
        assert!(verifier.is_valid("key-two"));
        assert!(!verifier.is_valid("key-three"));
        assert!(!verifier.is_valid(""));
    }

    #[test]
    fn test_keys_are_not_stored_in_clear() {
        let verifier = StaticKeyVerifier::new(["plain-secret"]);
        assert!(!format!("{:?}", verifier).contains("plain-secret"));
    }

    #[test]
    fn test_missing_header_is_unauthorized() {
        let verifier = StaticKeyVerifier::new(["k"]);
        let result = verify_api_key(&verifier, &HeaderMap::new());
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_wrong_key_is_forbidden() {
        let verifier = StaticKeyVerifier::new(["k"]);
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, HeaderValue::from_static("nope"));
        let result = verify_api_key(&verifier, &headers);
        assert!(matches!(result, Err(AppError::Forbidden(_))));

        headers.insert(API_KEY_HEADER, HeaderValue::from_static("k"));
        assert!(verify_api_key(&verifier, &headers).is_ok());
    }

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("abc", "abc"));
        assert!(!constant_time_compare("abc", "abd"));
        assert!(!constant_time_compare("abc", "abcd"));
    }
}
