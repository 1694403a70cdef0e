use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Local;
use serde_json::{Value, json};

use crate::db::calendar;
use crate::error::AppError;
use crate::models::calendar::{
    EventQuery, NewEventRequest, UpcomingQuery, UpdateEventRequest, WeekQuery,
};
use crate::state::AppState;

const DEFAULT_UPCOMING_LIMIT: usize = 10;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route(
            "/events/{id}",
            get(get_event).put(update_event).delete(delete_event),
        )
        .route("/today", get(today))
        .route("/upcoming", get(upcoming))
        .route("/week", get(week))
}

fn event_not_found() -> AppError {
    AppError::not_found("Event")
}

async fn list_events(State(state): State<AppState>, Query(query): Query<EventQuery>) -> Json<Value> {
    let ws = state.db.read().await;
    Json(json!({ "success": true, "events": calendar::fetch_events(&ws, &query) }))
}

async fn create_event(
    State(state): State<AppState>,
    Json(req): Json<NewEventRequest>,
) -> Result<Json<Value>, AppError> {
    let mut ws = state.db.write().await;
    let event = calendar::insert_event(&mut ws, req)?;
    Ok(Json(json!({ "success": true, "event": event })))
}

async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let ws = state.db.read().await;
    let event = calendar::fetch_event(&ws, &id).ok_or_else(event_not_found)?;
    Ok(Json(json!({ "success": true, "event": event })))
}

async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateEventRequest>,
) -> Result<Json<Value>, AppError> {
    let mut ws = state.db.write().await;
    let event = calendar::update_event(&mut ws, &id, req).ok_or_else(event_not_found)?;
    Ok(Json(json!({ "success": true, "event": event })))
}

async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let mut ws = state.db.write().await;
    if !calendar::delete_event(&mut ws, &id) {
        return Err(event_not_found());
    }
    Ok(Json(json!({ "success": true })))
}

async fn today(State(state): State<AppState>) -> Json<Value> {
    let date = Local::now().format("%Y-%m-%d").to_string();
    let ws = state.db.read().await;
    Json(json!({
        "success": true,
        "events": calendar::events_on(&ws, &date),
        "date": date,
    }))
}

async fn upcoming(
    State(state): State<AppState>,
    Query(query): Query<UpcomingQuery>,
) -> Json<Value> {
    let now = Local::now().format("%Y-%m-%dT%H:%M:%S").to_string();
    let limit = query.limit.unwrap_or(DEFAULT_UPCOMING_LIMIT);
    let ws = state.db.read().await;
    Json(json!({ "success": true, "events": calendar::upcoming_events(&ws, &now, limit) }))
}

async fn week(
    State(state): State<AppState>,
    Query(query): Query<WeekQuery>,
) -> Result<Json<Value>, AppError> {
    let (start, end) =
        calendar::week_bounds(Local::now().date_naive(), query.offset.unwrap_or(0))
            .ok_or_else(|| AppError::BadRequest("Invalid week offset".to_string()))?;
    let (start, end) = (start.to_string(), end.to_string());
    let ws = state.db.read().await;
    Ok(Json(json!({
        "success": true,
        "events": calendar::events_between(&ws, &start, &end),
        "week_start": start,
        "week_end": end,
    })))
}
