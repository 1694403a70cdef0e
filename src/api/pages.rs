use axum::extract::{Multipart, Path, Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::{info, warn};

use super::read_upload;
use crate::db::{IdKind, pages};
use crate::error::AppError;
use crate::models::ai::TranscribeUrlRequest;
use crate::models::page::{
    Block, BlockType, NewBlockRequest, NewCommentRequest, NewPageRequest, ReorderBlocksRequest,
    ReorderPagesRequest, ReplaceBlocksRequest, UpdatePageRequest,
};
use crate::services::markdown::{self, ExportFormat};
use crate::services::templates;
use crate::state::AppState;

const DEMO_TRANSCRIPTION: &str = "[Demo mode: Set OPENAI_API_KEY environment variable for real transcription.] This is where your transcribed audio would appear.";
const DEMO_URL_TRANSCRIPTION: &str = "[Demo mode: Set OPENAI_API_KEY for real transcription.]";

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: String,
    #[serde(default = "default_filter")]
    filter: String,
}

fn default_filter() -> String {
    "all".to_string()
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pages", get(list_pages).post(create_page))
        .route("/pages/reorder", post(reorder_pages))
        .route("/templates", get(list_templates))
        .route("/favorites", get(list_favorites))
        .route("/page/{id}", get(get_page).put(update_page).delete(trash_page))
        .route("/page/{id}/duplicate", post(duplicate_page))
        .route("/page/{id}/blocks", put(replace_blocks))
        .route("/page/{id}/blocks/reorder", post(reorder_blocks))
        .route("/page/{id}/block", post(add_block))
        .route("/page/{id}/block/{block_id}", put(update_block).delete(delete_block))
        .route("/page/{id}/comments", get(list_comments))
        .route("/page/{id}/comment", post(add_comment))
        .route("/page/{id}/comment/{comment_id}", delete(delete_comment))
        .route("/page/{id}/history", get(get_history))
        .route("/trash", get(list_trash))
        .route("/page/{id}/restore", post(restore_page))
        .route("/page/{id}/permanent", delete(purge_page))
        .route("/search", get(search))
        .route("/import", post(import_file))
        .route("/page/{id}/export/{format}", get(export_page))
        .route("/page/{id}/transcribe", post(transcribe_to_page))
        .route("/page/{id}/transcribe-url", post(transcribe_url_to_page))
}

fn page_not_found() -> AppError {
    AppError::not_found("Page")
}

async fn list_pages(State(state): State<AppState>) -> Json<Value> {
    let ws = state.db.read().await;
    Json(json!({ "pages": pages::fetch_pages(&ws) }))
}

async fn create_page(
    State(state): State<AppState>,
    body: Option<Json<NewPageRequest>>,
) -> Json<Value> {
    let name = body.and_then(|Json(req)| req.template).unwrap_or_default();
    let template = templates::find(&name);

    let mut ws = state.db.write().await;
    let page = pages::insert_page(&mut ws, template.title, template.icon, template.blocks, "Created page");
    info!(page_id = %page.id, template = template.name, "Page created");
    Json(json!({ "success": true, "page": page }))
}

async fn list_templates() -> Json<Value> {
    Json(json!({ "templates": templates::all() }))
}

async fn reorder_pages(
    State(state): State<AppState>,
    Json(req): Json<ReorderPagesRequest>,
) -> Json<Value> {
    let mut ws = state.db.write().await;
    pages::reorder_pages(&mut ws, &req.page_ids);
    Json(json!({ "success": true }))
}

async fn list_favorites(State(state): State<AppState>) -> Json<Value> {
    let ws = state.db.read().await;
    Json(json!({ "pages": pages::fetch_favorites(&ws) }))
}

async fn get_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let ws = state.db.read().await;
    let page = pages::fetch_page(&ws, &id).ok_or_else(page_not_found)?;
    Ok(Json(json!({ "page": page })))
}

async fn update_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdatePageRequest>,
) -> Result<Json<Value>, AppError> {
    let mut ws = state.db.write().await;
    let page = pages::update_page(&mut ws, &id, req).ok_or_else(page_not_found)?;
    Ok(Json(json!({ "success": true, "page": page })))
}

async fn trash_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let mut ws = state.db.write().await;
    if !pages::trash_page(&mut ws, &id) {
        return Err(page_not_found());
    }
    Ok(Json(json!({ "success": true })))
}

async fn duplicate_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let mut ws = state.db.write().await;
    let page = pages::duplicate_page(&mut ws, &id).ok_or_else(page_not_found)?;
    Ok(Json(json!({ "success": true, "page": page })))
}

async fn replace_blocks(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ReplaceBlocksRequest>,
) -> Result<Json<Value>, AppError> {
    let mut ws = state.db.write().await;
    let page = pages::replace_blocks(&mut ws, &id, req.blocks).ok_or_else(page_not_found)?;
    Ok(Json(json!({ "success": true, "page": page })))
}

async fn reorder_blocks(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ReorderBlocksRequest>,
) -> Result<Json<Value>, AppError> {
    let mut ws = state.db.write().await;
    if !pages::reorder_blocks(&mut ws, &id, &req.block_ids) {
        return Err(page_not_found());
    }
    Ok(Json(json!({ "success": true })))
}

async fn add_block(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<NewBlockRequest>,
) -> Result<Json<Value>, AppError> {
    let mut ws = state.db.write().await;
    let block = pages::insert_block(&mut ws, &id, req).ok_or_else(page_not_found)?;
    Ok(Json(json!({ "success": true, "block": block })))
}

async fn update_block(
    State(state): State<AppState>,
    Path((id, block_id)): Path<(String, String)>,
    Json(patch): Json<Map<String, Value>>,
) -> Result<Json<Value>, AppError> {
    let mut ws = state.db.write().await;
    let block = pages::update_block(&mut ws, &id, &block_id, patch)?;
    Ok(Json(json!({ "success": true, "block": block })))
}

async fn delete_block(
    State(state): State<AppState>,
    Path((id, block_id)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    let mut ws = state.db.write().await;
    if !pages::delete_block(&mut ws, &id, &block_id) {
        return Err(page_not_found());
    }
    Ok(Json(json!({ "success": true })))
}

async fn list_comments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let ws = state.db.read().await;
    let page = pages::fetch_page(&ws, &id).ok_or_else(page_not_found)?;
    Ok(Json(json!({ "comments": page.comments })))
}

async fn add_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<NewCommentRequest>,
) -> Result<Json<Value>, AppError> {
    let mut ws = state.db.write().await;
    let comment = pages::insert_comment(&mut ws, &id, req).ok_or_else(page_not_found)?;
    Ok(Json(json!({ "success": true, "comment": comment })))
}

async fn delete_comment(
    State(state): State<AppState>,
    Path((id, comment_id)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    let mut ws = state.db.write().await;
    if !pages::delete_comment(&mut ws, &id, &comment_id) {
        return Err(page_not_found());
    }
    Ok(Json(json!({ "success": true })))
}

async fn get_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let ws = state.db.read().await;
    let page = pages::fetch_page(&ws, &id).ok_or_else(page_not_found)?;
    Ok(Json(json!({ "history": page.history })))
}

async fn list_trash(State(state): State<AppState>) -> Json<Value> {
    let ws = state.db.read().await;
    Json(json!({ "pages": pages::fetch_trash(&ws) }))
}

async fn restore_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let mut ws = state.db.write().await;
    if !pages::restore_page(&mut ws, &id) {
        return Err(page_not_found());
    }
    Ok(Json(json!({ "success": true })))
}

async fn purge_page(State(state): State<AppState>, Path(id): Path<String>) -> Json<Value> {
    let mut ws = state.db.write().await;
    pages::purge_page(&mut ws, &id);
    Json(json!({ "success": true }))
}

async fn search(State(state): State<AppState>, Query(query): Query<SearchQuery>) -> Json<Value> {
    let ws = state.db.read().await;
    Json(json!({ "results": pages::search(&ws, &query.q, &query.filter) }))
}

async fn import_file(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let upload = read_upload(multipart).await?;
    let content = String::from_utf8(upload.data)
        .map_err(|_| AppError::BadRequest("File must be UTF-8 text".to_string()))?;

    let blocks = markdown::import_blocks(&upload.filename, &content);
    let title = markdown::title_from_filename(&upload.filename);

    let mut ws = state.db.write().await;
    let page = pages::insert_page(&mut ws, title, "📄", blocks, "Imported from file");
    info!(page_id = %page.id, filename = %upload.filename, "Imported page");
    Ok(Json(json!({ "success": true, "page_id": page.id })))
}

async fn export_page(
    State(state): State<AppState>,
    Path((id, format)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let ws = state.db.read().await;
    let page = pages::fetch_page(&ws, &id).ok_or_else(page_not_found)?;
    let format: ExportFormat = format.parse()?;
    let body = markdown::export(page, format)?;

    let disposition = format!(
        "attachment; filename=\"{}.{}\"",
        download_name(&page.title),
        format.extension()
    );
    Ok((
        [
            (CONTENT_TYPE, format.content_type().to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}

/// The page title made safe for a quoted `Content-Disposition` filename.
fn download_name(title: &str) -> String {
    let name: String = title
        .chars()
        .map(|c| match c {
            '"' => '\'',
            c if c.is_control() => ' ',
            c => c,
        })
        .collect();
    let name = name.trim();
    if name.is_empty() {
        "export".to_string()
    } else {
        name.to_string()
    }
}

/// Inserts a purple callout naming the source file followed by one text
/// block per non-blank line of the transcription.
async fn transcribe_to_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    {
        let ws = state.db.read().await;
        pages::fetch_page(&ws, &id).ok_or_else(page_not_found)?;
    }

    let upload = read_upload(multipart).await?;
    let position = upload.field("position").unwrap_or("end").to_string();

    let text = match state.ai.transcribe(&upload.filename, upload.data).await {
        Ok(transcription) => transcription.text,
        Err(AppError::AiUnavailable) => DEMO_TRANSCRIPTION.to_string(),
        Err(e) => {
            warn!("Transcription for page {} failed: {}", id, e);
            format!("[Transcription failed: {}. Set OPENAI_API_KEY for real transcription.]", e)
        }
    };

    let mut blocks = vec![Block::callout(
        format!("🎙️ Transcription from: {}", upload.filename),
        "🎙️",
        "purple",
    )];
    blocks.extend(
        text.split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| Block::new(BlockType::Text, line)),
    );

    let mut ws = state.db.write().await;
    let blocks: Vec<Block> = blocks
        .into_iter()
        .map(|mut block| {
            block.id = ws.next_id(IdKind::Block);
            block
        })
        .collect();
    let added = blocks.len();
    let page = pages::fetch_page_mut(&mut ws, &id).ok_or_else(page_not_found)?;
    pages::insert_blocks_after(page, &position, blocks);

    Ok(Json(json!({
        "success": true,
        "blocks_added": added,
        "transcribed_text": text,
    })))
}

async fn transcribe_url_to_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<TranscribeUrlRequest>,
) -> Result<Json<Value>, AppError> {
    {
        let ws = state.db.read().await;
        pages::fetch_page(&ws, &id).ok_or_else(page_not_found)?;
    }
    let url = req
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("No URL provided".to_string()))?;

    let text = match state.ai.transcribe_url(&url).await {
        Ok(transcription) => transcription.text,
        Err(AppError::AiUnavailable) => DEMO_URL_TRANSCRIPTION.to_string(),
        Err(e) => return Err(e),
    };

    let mut ws = state.db.write().await;
    let mut block = Block::new(BlockType::Text, text.clone());
    block.id = ws.next_id(IdKind::Block);
    let page = pages::fetch_page_mut(&mut ws, &id).ok_or_else(page_not_found)?;
    page.blocks.push(block);
    page.touch();

    Ok(Json(json!({ "success": true, "transcribed_text": text })))
}
