use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::double_option;

pub const DEFAULT_PAGE_ICON: &str = "📄";
pub const DEFAULT_COVER_POSITION: i64 = 50;

/// Block kinds the server knows how to render. Any other tag the editor
/// sends is kept verbatim in `Other`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    #[default]
    Text,
    Heading1,
    Heading2,
    Heading3,
    Bullet,
    Numbered,
    Todo,
    Toggle,
    Quote,
    Divider,
    Callout,
    Code,
    Image,
    Bookmark,
    Database,
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: BlockType,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_id: Option<String>,
    /// Client-defined keys the editor attaches to a block.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Block {
    pub fn new(kind: BlockType, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn callout(content: impl Into<String>, icon: &str, color: &str) -> Self {
        Self {
            icon: Some(icon.to_string()),
            color: Some(color.to_string()),
            ..Self::new(BlockType::Callout, content)
        }
    }

    pub fn todo(content: impl Into<String>, checked: bool) -> Self {
        Self {
            checked: Some(checked),
            ..Self::new(BlockType::Todo, content)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub author: String,
    pub text: String,
    pub block_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub author: String,
    pub action: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub cover: Option<String>,
    pub cover_position: i64,
    pub parent_id: Option<String>,
    pub is_favorite: bool,
    pub is_deleted: bool,
    pub full_width: bool,
    pub small_text: bool,
    pub blocks: Vec<Block>,
    pub comments: Vec<Comment>,
    pub history: Vec<HistoryEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
    pub folder_id: Option<String>,
}

impl Page {
    pub fn new(id: String, title: impl Into<String>, icon: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: title.into(),
            icon: icon.into(),
            cover: None,
            cover_position: DEFAULT_COVER_POSITION,
            parent_id: None,
            is_favorite: false,
            is_deleted: false,
            full_width: false,
            small_text: false,
            blocks: Vec::new(),
            comments: Vec::new(),
            history: Vec::new(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
            folder_id: None,
        }
    }

    /// Prepends a history entry; the log is kept newest first.
    pub fn record(&mut self, action: &str) {
        let entry = HistoryEntry {
            id: format!("h{}", self.history.len() + 1),
            author: "You".to_string(),
            action: action.to_string(),
            created_at: Utc::now(),
        };
        self.history.insert(0, entry);
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn summary(&self) -> PageSummary {
        PageSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            icon: self.icon.clone(),
        }
    }

    /// Title and block contents joined by newlines, the text the AI tools read.
    pub fn plain_text(&self) -> String {
        let mut text = self.title.clone();
        for block in &self.blocks {
            text.push('\n');
            text.push_str(&block.content);
        }
        text
    }

    pub fn block_text(&self) -> String {
        self.blocks
            .iter()
            .map(|b| b.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSummary {
    pub id: String,
    pub title: String,
    pub icon: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub id: String,
    pub title: String,
    pub icon: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "match")]
    pub matched: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewPageRequest {
    pub template: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePageRequest {
    pub title: Option<String>,
    pub icon: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub cover: Option<Option<String>>,
    pub cover_position: Option<i64>,
    #[serde(default, deserialize_with = "double_option")]
    pub parent_id: Option<Option<String>>,
    pub is_favorite: Option<bool>,
    pub full_width: Option<bool>,
    pub small_text: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewBlockRequest {
    #[serde(rename = "type", default)]
    pub kind: BlockType,
    #[serde(default)]
    pub content: String,
    pub position: Option<i64>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub language: Option<String>,
    pub url: Option<String>,
    pub checked: Option<bool>,
    pub children: Option<Vec<Value>>,
    pub database_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReplaceBlocksRequest {
    #[serde(default)]
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReorderBlocksRequest {
    #[serde(default)]
    pub block_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReorderPagesRequest {
    #[serde(default)]
    pub page_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewCommentRequest {
    pub author: Option<String>,
    #[serde(default)]
    pub text: String,
    pub block_id: Option<String>,
}
