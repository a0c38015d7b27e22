// Category routes

use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::app_state::{lock, SharedState};
use crate::categories;
use crate::error::AppResult;
use crate::models::Category;

/// GET /categories
pub async fn list_categories(State(state): State<SharedState>) -> AppResult<Json<Vec<Category>>> {
    let app = lock(&state)?;
    Ok(Json(categories::list(&app.store)?))
}

/// POST /categories/seed
/// Inserts the default categories when none exist
pub async fn seed_categories(State(state): State<SharedState>) -> AppResult<Json<Value>> {
    let app = lock(&state)?;
    let inserted = categories::seed(&app.store)?;
    Ok(Json(json!({ "inserted": inserted })))
}
