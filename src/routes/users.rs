// User and admin routes

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Json,
};

use crate::app_state::{lock, SharedState};
use crate::auth::resolve_caller;
use crate::error::AppResult;
use crate::extract::JsonBody;
use crate::models::{CurrentUser, MakeAdminRequest};
use crate::users;

/// GET /users/me
/// `null` when the request carries no valid session
pub async fn current_user(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> AppResult<Json<Option<CurrentUser>>> {
    let app = lock(&state)?;
    let caller = resolve_caller(&app.store, &headers)?;
    Ok(Json(users::current_user(&app.store, caller.as_deref())?))
}

/// POST /users/admins
pub async fn make_admin(
    State(state): State<SharedState>,
    headers: HeaderMap,
    JsonBody(request): JsonBody<MakeAdminRequest>,
) -> AppResult<StatusCode> {
    let app = lock(&state)?;
    let caller = resolve_caller(&app.store, &headers)?;
    users::make_admin(&app.store, caller.as_deref(), &request.email)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /users/admins/init
/// `true` if the caller became the first admin
pub async fn init_first_admin(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> AppResult<Json<bool>> {
    let app = lock(&state)?;
    let caller = resolve_caller(&app.store, &headers)?;
    Ok(Json(users::init_first_admin(&app.store, caller.as_deref())?))
}
