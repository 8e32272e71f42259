//! Bearer token store
//!
//! Maps SHA-256 token hashes to user ids. The clear token is only ever
//! returned once, by [`issue_token`].

use crate::api::auth::{generate_token, hash_token, AppUser};
use crate::Result;
use sqlx::SqlitePool;
use tracing::info;

/// Create a new token for a user and return it in clear text
pub async fn issue_token(pool: &SqlitePool, user_id: &str) -> Result<String> {
    if user_id.trim().is_empty() {
        return Err(crate::Error::InvalidInput("user id must not be empty".to_string()));
    }

    let token = generate_token();
    sqlx::query("INSERT INTO api_tokens (token_hash, user_id, created_at) VALUES (?, ?, ?)")
        .bind(hash_token(&token))
        .bind(user_id)
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(pool)
        .await?;

    info!("Issued API token for user {}", user_id);
    Ok(token)
}

/// Resolve a clear-text token to its user
pub async fn resolve_token(pool: &SqlitePool, token: &str) -> Result<Option<AppUser>> {
    let row: Option<(String,)> = sqlx::query_as("SELECT user_id FROM api_tokens WHERE token_hash = ?")
        .bind(hash_token(token))
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|(id,)| AppUser { id }))
}

/// Revoke a token, returning whether it existed
pub async fn revoke_token(pool: &SqlitePool, token: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM api_tokens WHERE token_hash = ?")
        .bind(hash_token(token))
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
