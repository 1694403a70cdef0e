use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Folder {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub page_ids: Vec<String>,
    pub expanded: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A folder together with the pages it currently lists.
#[derive(Debug, Clone, Serialize)]
pub struct FolderWithPages<P: Serialize> {
    #[serde(flatten)]
    pub folder: Folder,
    pub pages: Vec<P>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewFolderRequest {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateFolderRequest {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub expanded: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddPageRequest {
    pub page_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MoveToFolderRequest {
    pub folder_id: Option<String>,
}
