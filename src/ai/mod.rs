pub mod dto;

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde_json::Value;

use crate::error::AppError;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TRANSCRIBE_MODEL: &str = "whisper-1";
const REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Clone, Debug)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub chat_model: String,
    pub transcribe_model: String,
}

impl OpenAiConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        let api_key = env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AppError::BadRequest("OPENAI_API_KEY is not set".to_string()))?;
        let base_url = env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let chat_model =
            env::var("OPENAI_CHAT_MODEL").unwrap_or_else(|_| DEFAULT_CHAT_MODEL.to_string());
        let transcribe_model = env::var("OPENAI_TRANSCRIBE_MODEL")
            .unwrap_or_else(|_| DEFAULT_TRANSCRIBE_MODEL.to_string());

        Ok(Self {
            api_key,
            base_url,
            chat_model,
            transcribe_model,
        })
    }
}

/// A span of transcribed speech, times in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedText {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transcription {
    pub text: String,
    pub duration: Option<f64>,
    pub segments: Vec<TimedText>,
}

#[async_trait]
pub trait AiClient: Send + Sync {
    async fn complete(&self, system: &str, user: &str, json_mode: bool) -> Result<String, AppError>;
    async fn transcribe(&self, filename: &str, audio: Vec<u8>) -> Result<Transcription, AppError>;
    async fn transcribe_url(&self, url: &str) -> Result<Transcription, AppError>;
}

/// Runs a JSON-mode completion and parses the reply.
pub async fn complete_json(ai: &dyn AiClient, system: &str, user: &str) -> Result<Value, AppError> {
    let raw = ai.complete(system, user, true).await?;
    serde_json::from_str(&raw)
        .map_err(|e| AppError::Upstream(format!("Failed to parse completion as JSON: {}", e)))
}

pub struct OpenAiHttpClient {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiHttpClient {
    pub fn new(config: OpenAiConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::BadRequest(format!("Failed to build http client: {}", e)))?;
        Ok(Self { client, config })
    }

    async fn check(response: reqwest::Response, what: &str) -> Result<reqwest::Response, AppError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(AppError::Upstream(format!("{} failed with {}: {}", what, status, body)))
    }
}

#[async_trait]
impl AiClient for OpenAiHttpClient {
    async fn complete(&self, system: &str, user: &str, json_mode: bool) -> Result<String, AppError> {
        let url = format!("{}/chat/completions", self.config.base_url);
        let request_body = dto::ChatCompletionRequest {
            model: &self.config.chat_model,
            messages: vec![
                dto::ChatMessage { role: "system", content: system },
                dto::ChatMessage { role: "user", content: user },
            ],
            response_format: json_mode.then_some(dto::ResponseFormat { kind: "json_object" }),
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Completion request failed: {}", e)))?;
        let response = Self::check(response, "Completion").await?;

        let parsed: dto::ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to parse completion response: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AppError::Upstream("Completion returned no content".to_string()))
    }

    async fn transcribe(&self, filename: &str, audio: Vec<u8>) -> Result<Transcription, AppError> {
        let url = format!("{}/audio/transcriptions", self.config.base_url);
        let form = Form::new()
            .text("model", self.config.transcribe_model.clone())
            .text("response_format", "verbose_json")
            .text("timestamp_granularities[]", "segment")
            .part("file", Part::bytes(audio).file_name(filename.to_string()));

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Transcription request failed: {}", e)))?;
        let response = Self::check(response, "Transcription").await?;

        let parsed: dto::TranscriptionResponse = response.json().await.map_err(|e| {
            AppError::Upstream(format!("Failed to parse transcription response: {}", e))
        })?;

        tracing::info!(
            "transcribed {} ({} segments)",
            filename,
            parsed.segments.len()
        );

        Ok(Transcription {
            text: parsed.text,
            duration: parsed.duration,
            segments: parsed
                .segments
                .into_iter()
                .map(|s| TimedText {
                    start: s.start,
                    end: s.end,
                    text: s.text,
                })
                .collect(),
        })
    }

    async fn transcribe_url(&self, url: &str) -> Result<Transcription, AppError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Audio download failed: {}", e)))?;
        let response = Self::check(response, "Audio download").await?;
        let audio = response
            .bytes()
            .await
            .map_err(|e| AppError::Upstream(format!("Audio download failed: {}", e)))?;

        self.transcribe("audio.mp3", audio.to_vec()).await
    }
}

/// Stand-in used when no API key is configured; every call reports
/// [`AppError::AiUnavailable`] so callers fall back to canned output.
pub struct NoopAiClient;

#[async_trait]
impl AiClient for NoopAiClient {
    async fn complete(&self, _system: &str, _user: &str, _json_mode: bool) -> Result<String, AppError> {
        Err(AppError::AiUnavailable)
    }

    async fn transcribe(&self, _filename: &str, _audio: Vec<u8>) -> Result<Transcription, AppError> {
        Err(AppError::AiUnavailable)
    }

    async fn transcribe_url(&self, _url: &str) -> Result<Transcription, AppError> {
        Err(AppError::AiUnavailable)
    }
}
