pub mod ai;
pub mod calendar;
pub mod class;
pub mod database;
pub mod folder;
pub mod page;
pub mod transcript;
pub mod user;

use serde::{Deserialize, Deserializer};

pub use calendar::{CalendarEvent, NewEventRequest, Recurrence, UpdateEventRequest};
pub use class::{
    Announcement, Assignment, Class, Instructor, NewAnnouncementRequest, NewAssignmentRequest,
    NewClassRequest, NewResourceRequest, Resource, Schedule, UpdateAssignmentRequest,
    UpdateClassRequest,
};
pub use database::{DatabaseBlock, PropertyDef, Row, RowRequest, UpdateDatabaseRequest};
pub use folder::{Folder, FolderWithPages, NewFolderRequest, UpdateFolderRequest};
pub use page::{
    Block, BlockType, Comment, HistoryEntry, NewBlockRequest, NewCommentRequest, Page,
    PageSummary, SearchHit, UpdatePageRequest,
};
pub use transcript::{ChatMessage, Segment, Transcript, TranscriptStatus};
pub use user::{AuthProvider, User};

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
pub(crate) fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}
