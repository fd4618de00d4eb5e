use axum::{Json, extract::State};

use crate::{
    AppState,
    api::models::auth::{CurrentAdmin, LoginRequest, LoginResponse, SessionResponse},
    auth::{password, session},
    db::{errors::DbError, handlers::Users},
    errors::Error,
};

/// Exchange admin credentials for a session token.
///
/// An unknown username and a wrong password fail differently (404 vs 401),
/// matching the client's distinct handling of the two cases.
#[utoipa::path(
    post,
    path = "/login",
    tag = "authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session token issued", body = LoginResponse),
        (status = 404, description = "Unknown username"),
        (status = 401, description = "Wrong password"),
    )
)]
#[tracing::instrument(skip_all, fields(username = %request.username))]
pub async fn login(State(state): State<AppState>, Json(request): Json<LoginRequest>) -> Result<Json<LoginResponse>, Error> {
    let mut conn = state.db.acquire().await.map_err(DbError::from)?;
    let user = Users::new(&mut conn)
        .get_by_username(&request.username)
        .await?
        .ok_or_else(|| Error::CredentialNotFound {
            username: request.username.clone(),
        })?;

    // Verify on a blocking thread: argon2 is deliberately expensive
    let password = request.password;
    let hash = user.password_hash.clone();
    let valid = tokio::task::spawn_blocking(move || password::verify_string(&password, &hash))
        .await
        .map_err(|e| Error::Internal {
            operation: format!("spawn password verification task: {e}"),
        })??;

    if !valid {
        return Err(Error::CredentialInvalid);
    }

    let admin = CurrentAdmin {
        id: user.id,
        username: user.username.clone(),
    };
    let token = session::create_session_token(&admin, &state.config)?;

    Ok(Json(LoginResponse {
        auth: true,
        token,
        username: user.username,
    }))
}

/// Verify the presented session token and echo the identity it carries.
#[utoipa::path(
    get,
    path = "/session",
    tag = "authentication",
    responses(
        (status = 200, description = "Token is valid", body = SessionResponse),
        (status = 403, description = "No token provided"),
        (status = 401, description = "Token invalid or expired"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn session_info(admin: CurrentAdmin) -> Json<SessionResponse> {
    Json(SessionResponse { username: admin.username })
}
