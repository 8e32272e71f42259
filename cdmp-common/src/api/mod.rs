//! API module for shared HTTP API functionality
//!
//! # Design Principle
//!
//! This module contains ONLY:
//! - Pure functions (no HTTP framework dependencies)
//! - Shared request/response types
//!
//! The API server wraps these with Axum middleware; the player client uses
//! the same types to decode responses.

pub mod auth;
pub mod types;

pub use auth::{generate_token, hash_token, parse_bearer, ApiAuthError, AppUser};
pub use types::{ErrorResponse, MessageResponse};
