//! Bearer-token extractor for write routes.

use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::instrument;

use crate::{
    AppState,
    api::models::auth::CurrentAdmin,
    auth::session,
    errors::{Error, Result},
};

/// Pull the bearer token out of the `Authorization` header.
///
/// Returns `Error::TokenMissing` when the header is absent, unreadable, uses a
/// different scheme, or carries no token after the scheme. A present-but-bad
/// token is the verifier's problem, not ours.
fn extract_bearer_token(parts: &Parts) -> Result<&str> {
    let header = parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(Error::TokenMissing)?;

    let header = header.to_str().map_err(|_| Error::TokenMissing)?;
    let token = header.strip_prefix("Bearer ").ok_or(Error::TokenMissing)?.trim();

    if token.is_empty() {
        return Err(Error::TokenMissing);
    }

    Ok(token)
}

impl FromRequestParts<AppState> for CurrentAdmin {
    type Rejection = Error;

    #[instrument(skip(parts, state))]
    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let token = extract_bearer_token(parts)?;
        let admin = session::verify_session_token(token, &state.config)?;
        tracing::trace!(user_id = admin.id, "Verified session token");
        Ok(admin)
    }
}
