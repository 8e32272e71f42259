//! # cdmp Common Library
//!
//! Shared code for the cdmp API server and playback client:
//! - Error type and Result alias
//! - Root folder / configuration resolution
//! - Database initialization, document store and bearer token store
//! - Index and playlist record types shared by server and client
//! - Stream URL helpers

pub mod api;
pub mod config;
#[cfg(feature = "sqlx")]
pub mod db;
pub mod error;
pub mod models;
pub mod stream;

pub use error::{Error, Result};
