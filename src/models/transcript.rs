use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptStatus {
    Recording,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: String,
    pub end: String,
    pub speaker: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    pub duration: String,
    pub status: TranscriptStatus,
    pub segments: Vec<Segment>,
    pub full_text: Option<String>,
    pub summary: Option<String>,
    pub action_items: Vec<String>,
    pub speakers: Vec<String>,
    pub source: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
}

impl Transcript {
    /// Meeting name, else the uploaded filename.
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .or_else(|| self.filename.clone())
            .unwrap_or_else(|| "Transcript".to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StartMeetingRequest {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewSegmentRequest {
    pub start: Option<String>,
    pub end: Option<String>,
    pub speaker: Option<String>,
    #[serde(default)]
    pub text: String,
}
