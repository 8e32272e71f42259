//! Shared API response types

use serde::{Deserialize, Serialize};

/// `{ "message": ... }` body returned for missing single-id lookups
///
/// # Examples
///
/// ```
/// use cdmp_common::api::types::MessageResponse;
///
/// let body = MessageResponse::new("Album ID not found");
/// let json = serde_json::to_value(&body).unwrap();
/// assert_eq!(json["message"], "Album ID not found");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// `{ "error": ... }` body returned for validation and auth failures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
