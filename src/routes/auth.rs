// Authentication routes: password accounts, anonymous sessions, sign out

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Json,
};

use crate::app_state::{lock, SharedState};
use crate::auth::{self, bearer_token};
use crate::error::AppResult;
use crate::extract::JsonBody;
use crate::models::{AuthResponse, SignInRequest, SignUpRequest};

/// POST /auth/signup
pub async fn sign_up(
    State(state): State<SharedState>,
    JsonBody(request): JsonBody<SignUpRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let app = lock(&state)?;
    Ok((StatusCode::CREATED, Json(auth::sign_up(&app.store, request)?)))
}

/// POST /auth/signin
pub async fn sign_in(
    State(state): State<SharedState>,
    JsonBody(request): JsonBody<SignInRequest>,
) -> AppResult<Json<AuthResponse>> {
    let app = lock(&state)?;
    Ok(Json(auth::sign_in(&app.store, request)?))
}

/// POST /auth/anonymous
pub async fn sign_in_anonymous(State(state): State<SharedState>) -> AppResult<Json<AuthResponse>> {
    let app = lock(&state)?;
    Ok(Json(auth::sign_in_anonymous(&app.store)?))
}

/// POST /auth/signout
/// Always succeeds; an unknown or missing token is ignored
pub async fn sign_out(State(state): State<SharedState>, headers: HeaderMap) -> AppResult<StatusCode> {
    let app = lock(&state)?;
    if let Some(token) = bearer_token(&headers) {
        auth::sign_out(&app.store, token)?;
    }
    Ok(StatusCode::NO_CONTENT)
}
