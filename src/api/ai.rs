use axum::extract::{Multipart, Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tracing::{info, warn};

use super::read_upload;
use crate::ai::complete_json;
use crate::db::{pages, transcripts};
use crate::error::AppError;
use crate::models::ai::{
    AnalyzeRequest, AskPageRequest, AutoCompleteRequest, BrainstormRequest, ChatRequest,
    ContinueWritingRequest, ExpandRequest, FlashcardsRequest, GenerateTemplateRequest,
    InsightsQuery, PageTextRequest, QuizRequest, RewriteRequest, ShortenRequest,
    SmartSearchQuery, SpeakerQuery, SummarizeRequest, TextRequest,
};
use crate::models::page::Page;
use crate::models::transcript::{NewSegmentRequest, StartMeetingRequest};
use crate::services::{assistant, clip, knowledge, study, writing};
use crate::state::AppState;

const INSIGHTS_SYSTEM_PROMPT: &str = "You analyze transcripts and extract key information. \
Respond in JSON format with 'summary' (2-3 sentences) and 'action_items' (array of strings).";
const INSIGHTS_INPUT_CHARS: usize = 4000;
const INSIGHTS_FALLBACK: &str = "Transcript processed successfully.";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/chat", post(chat))
        .route(
            "/conversation/{id}",
            get(get_conversation).delete(clear_conversation),
        )
        .route("/transcribe", post(transcribe))
        .route("/meeting/start", post(start_meeting))
        .route("/meeting/{id}/segment", post(add_segment))
        .route("/meeting/{id}/stop", post(stop_meeting))
        .route("/transcripts", get(list_transcripts))
        .route("/transcript/{id}", get(get_transcript))
        .route("/transcript/{id}/to-page", post(transcript_to_page))
        .route("/speaker-analytics", get(speaker_analytics))
        .route("/analyze", post(analyze))
        .route("/rewrite", post(rewrite))
        .route("/fix-grammar", post(fix_grammar))
        .route("/expand", post(expand))
        .route("/shorten", post(shorten))
        .route("/auto-complete", post(auto_complete))
        .route("/continue-writing", post(continue_writing))
        .route("/brainstorm", post(brainstorm))
        .route("/smart-search", get(smart_search))
        .route("/auto-tag", post(auto_tag))
        .route("/categorize", post(categorize))
        .route("/extract-knowledge", post(extract_knowledge))
        .route("/ask-page", post(ask_page))
        .route("/generate-template", post(generate_template))
        .route("/insights", get(insights))
        .route("/flashcards", post(flashcards))
        .route("/quiz", post(quiz))
        .route("/study-guide", post(study_guide))
        .route("/summarize", post(summarize))
}

fn transcript_not_found() -> AppError {
    AppError::not_found("Transcript")
}

/// The block text of the referenced page when it exists, otherwise the
/// text sent with the request.
async fn source_text(state: &AppState, page_id: Option<&str>, text: String) -> String {
    let Some(page_id) = page_id else {
        return text;
    };
    let ws = state.db.read().await;
    pages::fetch_page(&ws, page_id)
        .map(Page::block_text)
        .unwrap_or(text)
}

async fn chat(State(state): State<AppState>, Json(req): Json<ChatRequest>) -> Json<Value> {
    let context = match &req.page_id {
        Some(page_id) => {
            let ws = state.db.read().await;
            pages::fetch_page(&ws, page_id)
                .map(assistant::page_context)
                .unwrap_or_default()
        }
        None => String::new(),
    };

    let response = match req.action.as_str() {
        "summarize" => assistant::summarize_context(&context),
        "generate" => assistant::generate_content(&req.message),
        "explain" => assistant::explain(),
        "improve" => assistant::improve_writing(&req.message),
        "translate" => assistant::translate(&req.message, &req.target_language),
        "action_items" => assistant::action_items(),
        _ => {
            let prompt = if context.is_empty() {
                req.message.clone()
            } else {
                format!("{}\n\n{}", context, req.message)
            };
            match state.ai.complete(assistant::CHAT_SYSTEM_PROMPT, &prompt, false).await {
                Ok(reply) => reply,
                Err(AppError::AiUnavailable) => assistant::chat_reply(&req.message, &context),
                Err(e) => {
                    warn!("Chat completion failed, using canned reply: {}", e);
                    assistant::chat_reply(&req.message, &context)
                }
            }
        }
    };

    let mut ws = state.db.write().await;
    transcripts::append_exchange(&mut ws, &req.conversation_id, &req.message, &response);

    Json(json!({
        "success": true,
        "response": response,
        "conversation_id": req.conversation_id,
    }))
}

async fn get_conversation(State(state): State<AppState>, Path(id): Path<String>) -> Json<Value> {
    let ws = state.db.read().await;
    Json(json!({ "messages": transcripts::fetch_conversation(&ws, &id) }))
}

async fn clear_conversation(State(state): State<AppState>, Path(id): Path<String>) -> Json<Value> {
    let mut ws = state.db.write().await;
    transcripts::clear_conversation(&mut ws, &id);
    Json(json!({ "success": true }))
}

/// Summary and action items for a finished transcription.
async fn transcript_insights(state: &AppState, text: &str) -> (String, Vec<String>) {
    let user = format!(
        "Analyze this transcript and provide a summary and action items:\n\n{}",
        clip(text, INSIGHTS_INPUT_CHARS)
    );
    match complete_json(state.ai.as_ref(), INSIGHTS_SYSTEM_PROMPT, &user).await {
        Ok(reply) => {
            let summary = reply
                .get("summary")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            let action_items = reply
                .get("action_items")
                .and_then(Value::as_array)
                .map(|items| {
                    items
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();
            (summary, action_items)
        }
        Err(e) => {
            warn!("Transcript insights unavailable: {}", e);
            (INSIGHTS_FALLBACK.to_string(), Vec::new())
        }
    }
}

async fn transcribe(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let upload = read_upload(multipart).await?;
    let filename = upload.filename;

    let transcript = match state.ai.transcribe(&filename, upload.data).await {
        Ok(transcription) => {
            let (summary, action_items) = transcript_insights(&state, &transcription.text).await;
            let mut ws = state.db.write().await;
            transcripts::insert_transcription(&mut ws, &filename, transcription, summary, action_items)
        }
        Err(e) => {
            if !matches!(e, AppError::AiUnavailable) {
                warn!("Transcription of {} failed, storing demo transcript: {}", filename, e);
            }
            let mut ws = state.db.write().await;
            transcripts::insert_demo_transcript(&mut ws, &filename)
        }
    };

    info!(transcript_id = %transcript.id, source = %transcript.source, "Transcript stored");
    Ok(Json(json!({ "success": true, "transcript": transcript })))
}

async fn start_meeting(
    State(state): State<AppState>,
    body: Option<Json<StartMeetingRequest>>,
) -> Json<Value> {
    let name = body.and_then(|Json(req)| req.name);
    let mut ws = state.db.write().await;
    let transcript = transcripts::start_meeting(&mut ws, name);
    Json(json!({
        "success": true,
        "transcript_id": transcript.id,
        "transcript": transcript,
    }))
}

async fn add_segment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<NewSegmentRequest>,
) -> Result<Json<Value>, AppError> {
    let mut ws = state.db.write().await;
    let segment = transcripts::add_segment(&mut ws, &id, req).ok_or_else(transcript_not_found)?;
    Ok(Json(json!({ "success": true, "segment": segment })))
}

async fn stop_meeting(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let mut ws = state.db.write().await;
    let transcript = transcripts::stop_meeting(&mut ws, &id).ok_or_else(transcript_not_found)?;
    Ok(Json(json!({ "success": true, "transcript": transcript })))
}

async fn list_transcripts(State(state): State<AppState>) -> Json<Value> {
    let ws = state.db.read().await;
    Json(json!({ "transcripts": transcripts::fetch_transcripts(&ws) }))
}

async fn get_transcript(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let ws = state.db.read().await;
    let transcript = transcripts::fetch_transcript(&ws, &id).ok_or_else(transcript_not_found)?;
    Ok(Json(json!({ "transcript": transcript })))
}

async fn transcript_to_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let mut ws = state.db.write().await;
    let page = transcripts::convert_to_page(&mut ws, &id).ok_or_else(transcript_not_found)?;
    Ok(Json(json!({ "success": true, "page_id": page.id })))
}

async fn speaker_analytics(
    State(state): State<AppState>,
    Query(query): Query<SpeakerQuery>,
) -> Result<Json<Value>, AppError> {
    let ws = state.db.read().await;
    let transcript = query
        .transcript_id
        .as_deref()
        .and_then(|id| transcripts::fetch_transcript(&ws, id))
        .ok_or_else(transcript_not_found)?;
    Ok(Json(json!({
        "success": true,
        "analytics": knowledge::speaker_analytics(transcript),
    })))
}

async fn analyze(Json(req): Json<AnalyzeRequest>) -> Json<Value> {
    Json(json!({
        "success": true,
        "analysis": writing::analyze(&req.text, &req.kind),
    }))
}

async fn rewrite(Json(req): Json<RewriteRequest>) -> Json<Value> {
    let rewritten = writing::rewrite(&req.text, &req.style);
    Json(json!({
        "success": true,
        "original": req.text,
        "rewritten": rewritten,
        "style": req.style,
    }))
}

async fn fix_grammar(Json(req): Json<TextRequest>) -> Json<Value> {
    Json(json!({
        "success": true,
        "original": req.text,
        "corrected": req.text,
        "changes": writing::grammar_changes(),
    }))
}

async fn expand(Json(req): Json<ExpandRequest>) -> Json<Value> {
    let expanded = writing::expand(&req.text);
    Json(json!({ "success": true, "original": req.text, "expanded": expanded }))
}

async fn shorten(Json(req): Json<ShortenRequest>) -> Json<Value> {
    let shortened = writing::shorten(&req.text, req.target);
    Json(json!({ "success": true, "original": req.text, "shortened": shortened }))
}

async fn auto_complete(Json(req): Json<AutoCompleteRequest>) -> Json<Value> {
    Json(json!({
        "success": true,
        "suggestions": writing::completions(&req.text, req.count),
    }))
}

async fn continue_writing(Json(req): Json<ContinueWritingRequest>) -> Json<Value> {
    Json(json!({
        "success": true,
        "continuation": writing::continue_writing(&req.length),
    }))
}

async fn brainstorm(Json(req): Json<BrainstormRequest>) -> Json<Value> {
    let ideas = writing::brainstorm(&req.topic, req.count, &req.format);
    Json(json!({ "success": true, "topic": req.topic, "ideas": ideas }))
}

async fn smart_search(
    State(state): State<AppState>,
    Query(query): Query<SmartSearchQuery>,
) -> Json<Value> {
    let ws = state.db.read().await;
    let results = knowledge::smart_search(&ws.pages, &query.q, &query.kind);
    Json(json!({ "success": true, "query": query.q, "results": results }))
}

async fn auto_tag(Json(_): Json<PageTextRequest>) -> Json<Value> {
    Json(json!({ "success": true, "tags": knowledge::tags() }))
}

async fn categorize(Json(_): Json<PageTextRequest>) -> Json<Value> {
    Json(json!({ "success": true, "categories": knowledge::categories() }))
}

async fn extract_knowledge(Json(_): Json<PageTextRequest>) -> Json<Value> {
    Json(json!({ "success": true, "knowledge": knowledge::extract_knowledge() }))
}

async fn ask_page(
    State(state): State<AppState>,
    Json(req): Json<AskPageRequest>,
) -> Result<Json<Value>, AppError> {
    let ws = state.db.read().await;
    let page = req
        .page_id
        .as_deref()
        .and_then(|id| pages::fetch_page(&ws, id))
        .ok_or_else(|| AppError::not_found("Page"))?;
    let answer = knowledge::answer_question(&req.question, page);
    Ok(Json(json!({
        "success": true,
        "question": req.question,
        "answer": answer,
    })))
}

async fn generate_template(Json(req): Json<GenerateTemplateRequest>) -> Json<Value> {
    Json(json!({
        "success": true,
        "template": knowledge::custom_template(&req.description, &req.kind),
    }))
}

async fn insights(Query(query): Query<InsightsQuery>) -> Json<Value> {
    Json(json!({ "success": true, "insights": knowledge::insights(&query.kind) }))
}

async fn flashcards(
    State(state): State<AppState>,
    Json(req): Json<FlashcardsRequest>,
) -> Json<Value> {
    let text = source_text(&state, req.page_id.as_deref(), req.text).await;
    let cards = study::flashcards(state.ai.as_ref(), &text, req.count).await;
    Json(json!({ "success": true, "flashcards": cards }))
}

async fn quiz(State(state): State<AppState>, Json(req): Json<QuizRequest>) -> Json<Value> {
    let text = source_text(&state, req.page_id.as_deref(), req.text).await;
    let quiz = study::quiz(state.ai.as_ref(), &text, req.count).await;
    Json(json!({ "success": true, "quiz": quiz }))
}

async fn study_guide(
    State(state): State<AppState>,
    Json(req): Json<PageTextRequest>,
) -> Json<Value> {
    let text = source_text(&state, req.page_id.as_deref(), req.text).await;
    let guide = study::study_guide(state.ai.as_ref(), &text).await;
    Json(json!({ "success": true, "guide": guide }))
}

async fn summarize(
    State(state): State<AppState>,
    Json(req): Json<SummarizeRequest>,
) -> Json<Value> {
    let text = source_text(&state, req.page_id.as_deref(), req.text).await;
    let summary = study::summarize(state.ai.as_ref(), &text, &req.length).await;
    Json(json!({ "success": true, "summary": summary }))
}
