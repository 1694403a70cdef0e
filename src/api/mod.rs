mod ai;
mod auth;
mod calendar;
mod classes;
mod databases;
mod folders;
mod pages;

use std::collections::HashMap;

use axum::extract::{DefaultBodyLimit, Multipart};
use axum::http::{Method, StatusCode, header};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true);

    Router::new()
        .route("/health", get(health))
        .nest("/auth/api", auth::router())
        .nest(
            "/api",
            pages::router()
                .merge(folders::page_router())
                .nest("/folders", folders::router())
                .nest("/database", databases::router())
                .nest("/calendar", calendar::router())
                .nest("/classes", classes::router())
                .nest("/ai", ai::router()),
        )
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

/// A multipart upload: the `file` part plus any plain text fields.
pub(crate) struct Upload {
    pub filename: String,
    pub data: Vec<u8>,
    fields: HashMap<String, String>,
}

impl Upload {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// Drains the form. Fails with `400 No file provided` when no part is named
/// `file`.
pub(crate) async fn read_upload(mut multipart: Multipart) -> Result<Upload, AppError> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut fields = HashMap::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Multipart error: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read file: {}", e)))?;
            file = Some((filename, data.to_vec()));
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read field {}: {}", name, e)))?;
            fields.insert(name, value);
        }
    }

    let (filename, data) =
        file.ok_or_else(|| AppError::BadRequest("No file provided".to_string()))?;
    Ok(Upload {
        filename,
        data,
        fields,
    })
}
