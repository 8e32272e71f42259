//! Bearer token authentication
//!
//! Requests carry `Authorization: Bearer <token>`. Tokens are never stored in
//! clear text: the token table keys on the SHA-256 of the token, which maps
//! to the owning user id.

use sha2::{Digest, Sha256};

/// Authentication error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiAuthError {
    /// No Authorization header on the request
    MissingHeader,

    /// Header present but not of the form `Bearer <token>`
    MalformedHeader,

    /// Token not known to the token store
    UnknownToken,

    /// Database error looking up the token
    DatabaseError(String),
}

impl std::fmt::Display for ApiAuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiAuthError::MissingHeader => write!(f, "Missing Authorization header"),
            ApiAuthError::MalformedHeader => write!(f, "Authorization header is not a Bearer token"),
            ApiAuthError::UnknownToken => write!(f, "Unknown or revoked token"),
            ApiAuthError::DatabaseError(err) => write!(f, "Database error: {}", err),
        }
    }
}

impl std::error::Error for ApiAuthError {}

/// The user a request was authenticated as
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppUser {
    pub id: String,
}

/// Extract the token from an Authorization header value
///
/// # Examples
///
/// ```
/// use cdmp_common::api::auth::{parse_bearer, ApiAuthError};
///
/// assert_eq!(parse_bearer(Some("Bearer abc123")), Ok("abc123"));
/// assert_eq!(parse_bearer(Some("bearer abc123")), Ok("abc123"));
/// assert_eq!(parse_bearer(None), Err(ApiAuthError::MissingHeader));
/// assert_eq!(parse_bearer(Some("Basic abc")), Err(ApiAuthError::MalformedHeader));
/// ```
pub fn parse_bearer(header: Option<&str>) -> Result<&str, ApiAuthError> {
    let header = header.ok_or(ApiAuthError::MissingHeader)?;
    let (scheme, token) = header
        .trim()
        .split_once(' ')
        .ok_or(ApiAuthError::MalformedHeader)?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(ApiAuthError::MalformedHeader);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(ApiAuthError::MalformedHeader);
    }

    Ok(token)
}

/// SHA-256 of a token as 64 hex characters
///
/// # Examples
///
/// ```
/// use cdmp_common::api::auth::hash_token;
///
/// let hash = hash_token("secret");
/// assert_eq!(hash.len(), 64);
/// assert_eq!(hash, hash_token("secret"));
/// ```
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Generate a new random token (64 hex characters)
pub fn generate_token() -> String {
    use rand::Rng;

    let bytes: [u8; 32] = rand::thread_rng().gen();
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_with_empty_token_is_malformed() {
        assert_eq!(parse_bearer(Some("Bearer ")), Err(ApiAuthError::MalformedHeader));
        assert_eq!(parse_bearer(Some("Bearer")), Err(ApiAuthError::MalformedHeader));
    }

    #[test]
    fn test_generated_tokens_differ() {
        let a = generate_token();
        let b = generate_token();
        assert_eq!(a.len(), 64);
        assert_ne!(a, b);
        assert_ne!(hash_token(&a), hash_token(&b));
    }
}
