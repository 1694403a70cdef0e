use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyDef {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Row {
    pub id: String,
    pub properties: Map<String, Value>,
}

/// Tabular view embedded in a page through a `database` block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseBlock {
    pub id: String,
    pub name: String,
    pub properties: Vec<PropertyDef>,
    pub rows: Vec<Row>,
    pub current_view: String,
    pub filters: Vec<Value>,
    pub sorts: Vec<Value>,
    pub created_at: DateTime<Utc>,
}

impl DatabaseBlock {
    pub fn new(id: String, name: impl Into<String>) -> Self {
        let properties = [
            ("Name", "title"),
            ("Status", "select"),
            ("Tags", "multi_select"),
            ("Date", "date"),
        ]
        .into_iter()
        .map(|(name, kind)| PropertyDef {
            name: name.to_string(),
            kind: kind.to_string(),
        })
        .collect();

        Self {
            id,
            name: name.into(),
            properties,
            rows: Vec::new(),
            current_view: "table".to_string(),
            filters: Vec::new(),
            sorts: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDatabaseRequest {
    pub name: Option<String>,
    pub current_view: Option<String>,
    pub filters: Option<Vec<Value>>,
    pub sorts: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RowRequest {
    #[serde(default)]
    pub properties: Map<String, Value>,
}
