use serde::Deserialize;

fn default_conversation() -> String {
    "default".to_string()
}

fn default_action() -> String {
    "chat".to_string()
}

fn default_language() -> String {
    "Spanish".to_string()
}

fn default_full() -> String {
    "full".to_string()
}

fn default_style() -> String {
    "professional".to_string()
}

fn default_medium() -> String {
    "medium".to_string()
}

fn default_all() -> String {
    "all".to_string()
}

fn default_general() -> String {
    "general".to_string()
}

fn default_match() -> String {
    "match".to_string()
}

fn default_paragraph() -> String {
    "paragraph".to_string()
}

fn default_list() -> String {
    "list".to_string()
}

fn default_brief() -> String {
    "brief".to_string()
}

fn default_shorten_target() -> u32 {
    50
}

fn default_three() -> usize {
    3
}

fn default_five() -> usize {
    5
}

fn default_ten() -> usize {
    10
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    pub page_id: Option<String>,
    #[serde(default = "default_conversation")]
    pub conversation_id: String,
    #[serde(default = "default_action")]
    pub action: String,
    #[serde(default = "default_language")]
    pub target_language: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub text: String,
    #[serde(rename = "type", default = "default_full")]
    pub kind: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RewriteRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_style")]
    pub style: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExpandRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_medium")]
    pub length: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShortenRequest {
    #[serde(default)]
    pub text: String,
    /// Percentage of the original length to keep.
    #[serde(default = "default_shorten_target")]
    pub target: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AutoCompleteRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub context: String,
    #[serde(default = "default_three")]
    pub count: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SmartSearchQuery {
    #[serde(default)]
    pub q: String,
    #[serde(rename = "type", default = "default_all")]
    pub kind: String,
}

/// Body shared by the tools that read either raw text or a stored page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageTextRequest {
    #[serde(default)]
    pub text: String,
    pub page_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateTemplateRequest {
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default = "default_general")]
    pub kind: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsightsQuery {
    pub page_id: Option<String>,
    #[serde(rename = "type", default = "default_all")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpeakerQuery {
    pub transcript_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AskPageRequest {
    #[serde(default)]
    pub question: String,
    pub page_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContinueWritingRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_match")]
    pub style: String,
    #[serde(default = "default_paragraph")]
    pub length: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BrainstormRequest {
    #[serde(default)]
    pub topic: String,
    #[serde(default = "default_ten")]
    pub count: usize,
    #[serde(default = "default_list")]
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FlashcardsRequest {
    #[serde(default)]
    pub text: String,
    pub page_id: Option<String>,
    #[serde(default = "default_ten")]
    pub count: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuizRequest {
    #[serde(default)]
    pub text: String,
    pub page_id: Option<String>,
    #[serde(default = "default_five")]
    pub count: usize,
    #[serde(default = "default_medium")]
    pub difficulty: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_brief")]
    pub length: String,
    pub page_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TranscribeUrlRequest {
    pub url: Option<String>,
}
