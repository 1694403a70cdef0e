use axum::extract::{Path, State};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};

use crate::db::databases;
use crate::error::AppError;
use crate::models::database::{RowRequest, UpdateDatabaseRequest};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(get_database).put(update_database))
        .route("/{id}/row", post(add_row))
        .route("/{id}/row/{row_id}", put(update_row).delete(delete_row))
}

fn database_not_found() -> AppError {
    AppError::not_found("Database")
}

async fn get_database(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let ws = state.db.read().await;
    let database = databases::fetch_database(&ws, &id).ok_or_else(database_not_found)?;
    Ok(Json(json!({ "database": database })))
}

async fn update_database(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateDatabaseRequest>,
) -> Result<Json<Value>, AppError> {
    let mut ws = state.db.write().await;
    let database = databases::update_database(&mut ws, &id, req).ok_or_else(database_not_found)?;
    Ok(Json(json!({ "success": true, "database": database })))
}

async fn add_row(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<RowRequest>,
) -> Result<Json<Value>, AppError> {
    let mut ws = state.db.write().await;
    let row = databases::insert_row(&mut ws, &id, req).ok_or_else(database_not_found)?;
    Ok(Json(json!({ "success": true, "row": row })))
}

async fn update_row(
    State(state): State<AppState>,
    Path((id, row_id)): Path<(String, String)>,
    Json(req): Json<RowRequest>,
) -> Result<Json<Value>, AppError> {
    let mut ws = state.db.write().await;
    let row = databases::update_row(&mut ws, &id, &row_id, req.properties)?;
    Ok(Json(json!({ "success": true, "row": row })))
}

async fn delete_row(
    State(state): State<AppState>,
    Path((id, row_id)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    let mut ws = state.db.write().await;
    if !databases::delete_row(&mut ws, &id, &row_id) {
        return Err(database_not_found());
    }
    Ok(Json(json!({ "success": true })))
}
