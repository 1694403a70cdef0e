use axum::extract::{FromRequest, Multipart, Path, Query, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::Local;
use serde_json::{Value, json};
use tracing::info;

use super::read_upload;
use crate::db::classes;
use crate::error::AppError;
use crate::models::class::{
    ClassQuery, NewAnnouncementRequest, NewAssignmentRequest, NewClassRequest,
    NewResourceRequest, SyllabusText, UpdateAssignmentRequest, UpdateClassRequest,
};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_classes).post(create_class))
        .route(
            "/{id}",
            get(get_class).put(update_class).delete(delete_class),
        )
        .route("/{id}/syllabus", post(upload_syllabus))
        .route("/{id}/assignments", get(list_assignments).post(add_assignment))
        .route("/{id}/assignments/{assignment_id}", put(update_assignment))
        .route("/{id}/resources", post(add_resource))
        .route("/{id}/announcements", post(add_announcement))
}

fn class_not_found() -> AppError {
    AppError::not_found("Class")
}

async fn list_classes(State(state): State<AppState>, Query(query): Query<ClassQuery>) -> Json<Value> {
    let ws = state.db.read().await;
    Json(json!({
        "success": true,
        "classes": classes::fetch_classes(&ws, query.term.as_deref()),
    }))
}

async fn create_class(
    State(state): State<AppState>,
    Json(req): Json<NewClassRequest>,
) -> Json<Value> {
    let mut ws = state.db.write().await;
    let class = classes::insert_class(&mut ws, req, Local::now().date_naive());
    info!(class_id = %class.id, code = %class.code, "Class created");
    Json(json!({ "success": true, "class": class }))
}

async fn get_class(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let ws = state.db.read().await;
    let class = classes::fetch_class(&ws, &id).ok_or_else(class_not_found)?;
    let upcoming: Vec<_> = class.assignments.iter().filter(|a| !a.completed).collect();
    Ok(Json(json!({
        "success": true,
        "class": class,
        "events": classes::class_events(&ws, &id),
        "upcoming_assignments": upcoming,
    })))
}

async fn update_class(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateClassRequest>,
) -> Result<Json<Value>, AppError> {
    let mut ws = state.db.write().await;
    let class = classes::update_class(&mut ws, &id, req).ok_or_else(class_not_found)?;
    Ok(Json(json!({ "success": true, "class": class })))
}

async fn delete_class(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let mut ws = state.db.write().await;
    if !classes::delete_class(&mut ws, &id) {
        return Err(class_not_found());
    }
    Ok(Json(json!({ "success": true })))
}

/// Reads the syllabus from a multipart `file` field, or from a JSON
/// `{"text": ...}` body. Anything else counts as an empty syllabus.
async fn syllabus_text(state: &AppState, request: Request) -> Result<String, AppError> {
    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"));

    if is_multipart {
        let multipart = Multipart::from_request(request, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        let upload = read_upload(multipart).await?;
        return String::from_utf8(upload.data)
            .map_err(|_| AppError::BadRequest("Syllabus must be UTF-8 text".to_string()));
    }

    Ok(Json::<SyllabusText>::from_request(request, state)
        .await
        .map(|Json(body)| body.text)
        .unwrap_or_default())
}

async fn upload_syllabus(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Request,
) -> Result<Json<Value>, AppError> {
    {
        let ws = state.db.read().await;
        classes::fetch_class(&ws, &id).ok_or_else(class_not_found)?;
    }
    let text = syllabus_text(&state, request).await?;

    let mut ws = state.db.write().await;
    let parsed = classes::apply_syllabus(&mut ws, &id, text).ok_or_else(class_not_found)?;
    info!(
        class_id = %id,
        assignments = parsed.assignments.len(),
        events = parsed.events.len(),
        "Syllabus parsed"
    );
    Ok(Json(json!({
        "success": true,
        "assignments_added": parsed.assignments.len(),
        "events_added": parsed.events.len(),
        "parsed": parsed,
    })))
}

async fn list_assignments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let ws = state.db.read().await;
    let class = classes::fetch_class(&ws, &id).ok_or_else(class_not_found)?;
    Ok(Json(json!({ "success": true, "assignments": class.assignments })))
}

async fn add_assignment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<NewAssignmentRequest>,
) -> Result<Json<Value>, AppError> {
    let mut ws = state.db.write().await;
    let assignment = classes::insert_assignment(&mut ws, &id, req).ok_or_else(class_not_found)?;
    Ok(Json(json!({ "success": true, "assignment": assignment })))
}

async fn update_assignment(
    State(state): State<AppState>,
    Path((id, assignment_id)): Path<(String, String)>,
    Json(req): Json<UpdateAssignmentRequest>,
) -> Result<Json<Value>, AppError> {
    let mut ws = state.db.write().await;
    let assignment = classes::update_assignment(&mut ws, &id, &assignment_id, req)?;
    Ok(Json(json!({ "success": true, "assignment": assignment })))
}

async fn add_resource(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<NewResourceRequest>,
) -> Result<Json<Value>, AppError> {
    let mut ws = state.db.write().await;
    let resource = classes::insert_resource(&mut ws, &id, req).ok_or_else(class_not_found)?;
    Ok(Json(json!({ "success": true, "resource": resource })))
}

async fn add_announcement(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<NewAnnouncementRequest>,
) -> Result<Json<Value>, AppError> {
    let mut ws = state.db.write().await;
    let announcement =
        classes::insert_announcement(&mut ws, &id, req).ok_or_else(class_not_found)?;
    Ok(Json(json!({ "success": true, "announcement": announcement })))
}
