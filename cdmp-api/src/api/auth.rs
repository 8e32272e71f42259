//! Bearer authentication middleware
//!
//! Resolves `Authorization: Bearer <token>` to an [`AppUser`] and stores it
//! as a request extension for the handlers. Applied to protected routes only.

use axum::{
    extract::{Request, State},
    http::header::{ToStrError, AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use cdmp_common::api::{parse_bearer, ApiAuthError, AppUser};
use cdmp_common::db::resolve_token;
use tracing::{debug, warn};

use crate::{ApiError, AppState};

/// Authentication middleware
///
/// Returns 401 Unauthorized when the header is missing, malformed, or names
/// an unknown token.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // Owned copy: the request body is not Sync, so no borrow of the request
    // may be held across the token lookup
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .map(|value| value.to_str().map(str::to_owned));

    let user = authenticate(&state, header).await.map_err(|e| {
        warn!(
            "Rejected {} {}: {}",
            request.method(),
            request.uri().path(),
            e
        );
        ApiError::Unauthorized(e)
    })?;

    debug!("Authenticated user {}", user.id);
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

async fn authenticate(
    state: &AppState,
    header: Option<Result<String, ToStrError>>,
) -> Result<AppUser, ApiAuthError> {
    let header = header
        .transpose()
        .map_err(|_| ApiAuthError::MalformedHeader)?;
    let token = parse_bearer(header.as_deref())?;

    resolve_token(state.pool(), token)
        .await
        .map_err(|e| ApiAuthError::DatabaseError(e.to_string()))?
        .ok_or(ApiAuthError::UnknownToken)
}
