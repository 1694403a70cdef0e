use axum::extract::{Path, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use crate::db::folders;
use crate::error::AppError;
use crate::models::folder::{
    AddPageRequest, MoveToFolderRequest, NewFolderRequest, UpdateFolderRequest,
};
use crate::state::AppState;

/// Folder routes, mounted under `/api/folders`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_folders).post(create_folder))
        .route(
            "/{id}",
            get(get_folder).put(update_folder).delete(delete_folder),
        )
        .route("/{id}/pages", post(add_page))
        .route("/{id}/pages/{page_id}", delete(remove_page))
}

/// `/pages/{id}/move-to-folder`, mounted under `/api`.
pub fn page_router() -> Router<AppState> {
    Router::new().route("/pages/{id}/move-to-folder", post(move_to_folder))
}

fn folder_not_found() -> AppError {
    AppError::not_found("Folder")
}

async fn list_folders(State(state): State<AppState>) -> Json<Value> {
    let ws = state.db.read().await;
    Json(json!({ "success": true, "folders": folders::fetch_folders(&ws) }))
}

async fn create_folder(
    State(state): State<AppState>,
    body: Option<Json<NewFolderRequest>>,
) -> Json<Value> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let mut ws = state.db.write().await;
    let folder = folders::insert_folder(&mut ws, req);
    Json(json!({ "success": true, "folder": folder }))
}

async fn get_folder(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let ws = state.db.read().await;
    let folder = folders::fetch_folder(&ws, &id).ok_or_else(folder_not_found)?;
    Ok(Json(json!({ "success": true, "folder": folder })))
}

async fn update_folder(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateFolderRequest>,
) -> Result<Json<Value>, AppError> {
    let mut ws = state.db.write().await;
    let folder = folders::update_folder(&mut ws, &id, req).ok_or_else(folder_not_found)?;
    Ok(Json(json!({ "success": true, "folder": folder })))
}

async fn delete_folder(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let mut ws = state.db.write().await;
    if !folders::delete_folder(&mut ws, &id) {
        return Err(folder_not_found());
    }
    Ok(Json(json!({ "success": true })))
}

async fn add_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<AddPageRequest>,
) -> Result<Json<Value>, AppError> {
    let page_id = req.page_id.unwrap_or_default();
    let mut ws = state.db.write().await;
    let folder = folders::add_page(&mut ws, &id, &page_id)?;
    Ok(Json(json!({ "success": true, "folder": folder })))
}

async fn remove_page(
    State(state): State<AppState>,
    Path((id, page_id)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    let mut ws = state.db.write().await;
    if !folders::remove_page(&mut ws, &id, &page_id) {
        return Err(folder_not_found());
    }
    Ok(Json(json!({ "success": true })))
}

async fn move_to_folder(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<MoveToFolderRequest>,
) -> Result<Json<Value>, AppError> {
    let mut ws = state.db.write().await;
    let page = folders::move_page(&mut ws, &id, req.folder_id)
        .ok_or_else(|| AppError::not_found("Page"))?;
    Ok(Json(json!({ "success": true, "page": page })))
}
