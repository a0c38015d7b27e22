// News feed and moderation routes

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Json,
};

use crate::app_state::{lock, SharedState};
use crate::auth::resolve_caller;
use crate::error::AppResult;
use crate::extract::{JsonBody, PathParam, QueryParams};
use crate::models::{AdminCreateRequest, FeedQuery, NewsItem, SubmitNewsRequest, VerifyRequest};
use crate::news;

/// GET /news?category=slug
pub async fn list_verified(
    State(state): State<SharedState>,
    QueryParams(query): QueryParams<FeedQuery>,
) -> AppResult<Json<Vec<NewsItem>>> {
    let app = lock(&state)?;
    Ok(Json(news::list_verified(&app.store, query.category.as_deref())?))
}

/// GET /news/pending
/// Empty for anyone who is not an admin
pub async fn list_pending(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> AppResult<Json<Vec<NewsItem>>> {
    let app = lock(&state)?;
    let caller = resolve_caller(&app.store, &headers)?;
    Ok(Json(news::list_pending(&app.store, caller.as_deref())?))
}

/// POST /news
pub async fn submit_news(
    State(state): State<SharedState>,
    headers: HeaderMap,
    JsonBody(request): JsonBody<SubmitNewsRequest>,
) -> AppResult<(StatusCode, Json<NewsItem>)> {
    let app = lock(&state)?;
    let caller = resolve_caller(&app.store, &headers)?;
    let item = news::submit(&app.store, &*app.verdicts, caller.as_deref(), request)?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// POST /news/admin
pub async fn admin_create(
    State(state): State<SharedState>,
    headers: HeaderMap,
    JsonBody(request): JsonBody<AdminCreateRequest>,
) -> AppResult<(StatusCode, Json<NewsItem>)> {
    let app = lock(&state)?;
    let caller = resolve_caller(&app.store, &headers)?;
    let item = news::admin_create(&app.store, caller.as_deref(), request)?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// POST /news/:id/verify
pub async fn verify_news(
    State(state): State<SharedState>,
    PathParam(news_id): PathParam<String>,
    headers: HeaderMap,
    JsonBody(request): JsonBody<VerifyRequest>,
) -> AppResult<Json<NewsItem>> {
    let app = lock(&state)?;
    let caller = resolve_caller(&app.store, &headers)?;
    Ok(Json(news::verify(&app.store, caller.as_deref(), &news_id, request.verdict)?))
}

/// DELETE /news/:id
pub async fn delete_news(
    State(state): State<SharedState>,
    PathParam(news_id): PathParam<String>,
    headers: HeaderMap,
) -> AppResult<StatusCode> {
    let app = lock(&state)?;
    let caller = resolve_caller(&app.store, &headers)?;
    news::delete(&app.store, caller.as_deref(), &news_id)?;
    Ok(StatusCode::NO_CONTENT)
}
