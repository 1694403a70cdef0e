use serde_json::{Map, Value};

use super::{IdKind, Workspace};
use crate::error::AppError;
use crate::models::database::{DatabaseBlock, Row, RowRequest, UpdateDatabaseRequest};

pub fn fetch_database<'a>(ws: &'a Workspace, id: &str) -> Option<&'a DatabaseBlock> {
    ws.databases.iter().find(|d| d.id == id)
}

fn fetch_database_mut<'a>(ws: &'a mut Workspace, id: &str) -> Option<&'a mut DatabaseBlock> {
    ws.databases.iter_mut().find(|d| d.id == id)
}

pub fn update_database(
    ws: &mut Workspace,
    id: &str,
    req: UpdateDatabaseRequest,
) -> Option<DatabaseBlock> {
    let db = fetch_database_mut(ws, id)?;
    if let Some(name) = req.name {
        db.name = name;
    }
    if let Some(view) = req.current_view {
        db.current_view = view;
    }
    if let Some(filters) = req.filters {
        db.filters = filters;
    }
    if let Some(sorts) = req.sorts {
        db.sorts = sorts;
    }
    Some(db.clone())
}

pub fn insert_row(ws: &mut Workspace, id: &str, req: RowRequest) -> Option<Row> {
    fetch_database(ws, id)?;
    let row = Row {
        id: ws.next_id(IdKind::Row),
        properties: req.properties,
    };
    fetch_database_mut(ws, id)?.rows.push(row.clone());
    Some(row)
}

pub fn update_row(
    ws: &mut Workspace,
    id: &str,
    row_id: &str,
    properties: Map<String, Value>,
) -> Result<Row, AppError> {
    let db = fetch_database_mut(ws, id).ok_or_else(|| AppError::not_found("Database"))?;
    let row = db
        .rows
        .iter_mut()
        .find(|r| r.id == row_id)
        .ok_or_else(|| AppError::not_found("Row"))?;
    row.properties.extend(properties);
    Ok(row.clone())
}

pub fn delete_row(ws: &mut Workspace, id: &str, row_id: &str) -> bool {
    let Some(db) = fetch_database_mut(ws, id) else {
        return false;
    };
    db.rows.retain(|r| r.id != row_id);
    true
}
