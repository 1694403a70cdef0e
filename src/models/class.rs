use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::double_option;

pub const DEFAULT_CLASS_COLOR: &str = "#6940a5";
pub const DEFAULT_CLASS_ICON: &str = "📚";
pub const DEFAULT_TERM: &str = "Spring 2024";
pub const DEFAULT_CREDITS: u32 = 3;
pub const DEFAULT_POINTS: i64 = 100;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Instructor {
    pub name: String,
    pub email: String,
    pub office: String,
    pub office_hours: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Schedule {
    pub days: Vec<String>,
    pub start_time: String,
    pub end_time: String,
    pub location: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub due_date: Option<String>,
    pub points: i64,
    pub weight: Option<f64>,
    pub completed: bool,
    pub grade: Option<f64>,
    pub notes: String,
    pub attachments: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    pub page_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Announcement {
    pub id: String,
    pub title: String,
    pub content: String,
    pub important: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Class {
    pub id: String,
    pub name: String,
    pub code: String,
    pub color: String,
    pub icon: String,
    pub instructor: Instructor,
    pub schedule: Schedule,
    pub syllabus: Option<String>,
    pub syllabus_parsed: bool,
    pub grade: Option<String>,
    pub credits: u32,
    pub term: String,
    pub description: String,
    pub resources: Vec<Resource>,
    /// Newest first.
    pub announcements: Vec<Announcement>,
    pub assignments: Vec<Assignment>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewClassRequest {
    pub name: Option<String>,
    pub code: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub instructor: Option<Instructor>,
    pub schedule: Option<Schedule>,
    pub credits: Option<u32>,
    pub term: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateClassRequest {
    pub name: Option<String>,
    pub code: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub instructor: Option<Instructor>,
    pub schedule: Option<Schedule>,
    #[serde(default, deserialize_with = "double_option")]
    pub grade: Option<Option<String>>,
    pub credits: Option<u32>,
    pub term: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassQuery {
    pub term: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewAssignmentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub due_date: Option<String>,
    pub points: Option<i64>,
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAssignmentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub due_date: Option<Option<String>>,
    pub points: Option<i64>,
    #[serde(default, deserialize_with = "double_option")]
    pub weight: Option<Option<f64>>,
    pub completed: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub grade: Option<Option<f64>>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewResourceRequest {
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub url: String,
    pub page_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewAnnouncementRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub important: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SyllabusText {
    #[serde(default)]
    pub text: String,
}
