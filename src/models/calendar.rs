use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::double_option;

pub const DEFAULT_EVENT_COLOR: &str = "#2383e2";
pub const DEFAULT_REMINDER_MINUTES: i64 = 15;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recurrence {
    pub frequency: String,
    #[serde(default)]
    pub days: Vec<String>,
}

/// Start and end are ISO-8601 local date-times kept as text; filters compare
/// them lexicographically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub description: String,
    pub start: String,
    pub end: Option<String>,
    pub all_day: bool,
    pub color: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub class_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignment_id: Option<String>,
    pub recurrence: Option<Recurrence>,
    pub reminder: i64,
    pub location: Option<String>,
    pub attendees: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl CalendarEvent {
    pub fn new(id: String, title: impl Into<String>, start: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            start: start.into(),
            end: None,
            all_day: false,
            color: DEFAULT_EVENT_COLOR.to_string(),
            kind: "event".to_string(),
            class_id: None,
            assignment_id: None,
            recurrence: None,
            reminder: DEFAULT_REMINDER_MINUTES,
            location: None,
            attendees: Vec::new(),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// The `YYYY-MM-DD` prefix of the start time.
    pub fn start_date(&self) -> &str {
        self.start.get(..10).unwrap_or(&self.start)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub all_day: Option<bool>,
    pub color: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub class_id: Option<String>,
    pub recurrence: Option<Recurrence>,
    pub reminder: Option<i64>,
    pub location: Option<String>,
    pub attendees: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub end: Option<Option<String>>,
    pub all_day: Option<bool>,
    pub color: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub class_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub recurrence: Option<Option<Recurrence>>,
    pub reminder: Option<i64>,
    #[serde(default, deserialize_with = "double_option")]
    pub location: Option<Option<String>>,
    pub attendees: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventQuery {
    pub start: Option<String>,
    pub end: Option<String>,
    pub class_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpcomingQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeekQuery {
    pub offset: Option<i64>,
}
