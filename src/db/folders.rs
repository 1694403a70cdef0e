use chrono::Utc;

use super::{IdKind, Workspace, pages};
use crate::error::AppError;
use crate::models::folder::{Folder, FolderWithPages, NewFolderRequest, UpdateFolderRequest};
use crate::models::page::{Page, PageSummary};

pub const DEFAULT_FOLDER_NAME: &str = "New Folder";
pub const DEFAULT_FOLDER_ICON: &str = "📁";
pub const DEFAULT_FOLDER_COLOR: &str = "#6940a5";

fn live_pages<'a>(ws: &'a Workspace, folder: &'a Folder) -> impl Iterator<Item = &'a Page> {
    folder
        .page_ids
        .iter()
        .filter_map(|id| pages::fetch_page(ws, id))
        .filter(|p| !p.is_deleted)
}

fn fetch_folder_mut<'a>(ws: &'a mut Workspace, id: &str) -> Option<&'a mut Folder> {
    ws.folders.iter_mut().find(|f| f.id == id)
}

/// Drops the page from every folder's listing.
fn detach(ws: &mut Workspace, page_id: &str) {
    for folder in ws.folders.iter_mut() {
        folder.page_ids.retain(|p| p != page_id);
    }
}

pub fn fetch_folders(ws: &Workspace) -> Vec<FolderWithPages<PageSummary>> {
    ws.folders
        .iter()
        .map(|folder| FolderWithPages {
            folder: folder.clone(),
            pages: live_pages(ws, folder).map(Page::summary).collect(),
        })
        .collect()
}

pub fn fetch_folder(ws: &Workspace, id: &str) -> Option<FolderWithPages<Page>> {
    let folder = ws.folders.iter().find(|f| f.id == id)?;
    Some(FolderWithPages {
        folder: folder.clone(),
        pages: live_pages(ws, folder).cloned().collect(),
    })
}

pub fn insert_folder(ws: &mut Workspace, req: NewFolderRequest) -> Folder {
    let now = Utc::now();
    let folder = Folder {
        id: ws.next_id(IdKind::Folder),
        name: req.name.unwrap_or_else(|| DEFAULT_FOLDER_NAME.to_string()),
        icon: req.icon.unwrap_or_else(|| DEFAULT_FOLDER_ICON.to_string()),
        color: req.color.unwrap_or_else(|| DEFAULT_FOLDER_COLOR.to_string()),
        page_ids: Vec::new(),
        expanded: true,
        created_at: now,
        updated_at: now,
    };
    ws.folders.push(folder.clone());
    folder
}

pub fn update_folder(ws: &mut Workspace, id: &str, req: UpdateFolderRequest) -> Option<Folder> {
    let folder = fetch_folder_mut(ws, id)?;
    if let Some(name) = req.name {
        folder.name = name;
    }
    if let Some(icon) = req.icon {
        folder.icon = icon;
    }
    if let Some(color) = req.color {
        folder.color = color;
    }
    if let Some(expanded) = req.expanded {
        folder.expanded = expanded;
    }
    folder.updated_at = Utc::now();
    Some(folder.clone())
}

/// Deletes the folder; its pages stay but lose their folder reference.
pub fn delete_folder(ws: &mut Workspace, id: &str) -> bool {
    let Some(idx) = ws.folders.iter().position(|f| f.id == id) else {
        return false;
    };
    let folder = ws.folders.remove(idx);
    for page in ws.pages.iter_mut() {
        if page.folder_id.as_deref() == Some(id) || folder.page_ids.contains(&page.id) {
            page.folder_id = None;
        }
    }
    true
}

pub fn add_page(ws: &mut Workspace, folder_id: &str, page_id: &str) -> Result<Folder, AppError> {
    if !ws.folders.iter().any(|f| f.id == folder_id) {
        return Err(AppError::not_found("Folder"));
    }
    let page = pages::fetch_page_mut(ws, page_id).ok_or_else(|| AppError::not_found("Page"))?;
    page.folder_id = Some(folder_id.to_string());

    detach(ws, page_id);
    let folder = fetch_folder_mut(ws, folder_id).ok_or_else(|| AppError::not_found("Folder"))?;
    folder.page_ids.push(page_id.to_string());
    folder.updated_at = Utc::now();
    Ok(folder.clone())
}

pub fn remove_page(ws: &mut Workspace, folder_id: &str, page_id: &str) -> bool {
    let Some(folder) = fetch_folder_mut(ws, folder_id) else {
        return false;
    };
    folder.page_ids.retain(|p| p != page_id);
    folder.updated_at = Utc::now();
    if let Some(page) = pages::fetch_page_mut(ws, page_id) {
        if page.folder_id.as_deref() == Some(folder_id) {
            page.folder_id = None;
        }
    }
    true
}

/// Moves a page into `folder_id`, or out of every folder when it is `None`
/// or names no folder.
pub fn move_page(ws: &mut Workspace, page_id: &str, folder_id: Option<String>) -> Option<Page> {
    pages::fetch_page(ws, page_id)?;
    detach(ws, page_id);

    let target = folder_id.filter(|id| ws.folders.iter().any(|f| &f.id == id));
    if let Some(id) = &target {
        if let Some(folder) = fetch_folder_mut(ws, id) {
            folder.page_ids.push(page_id.to_string());
            folder.updated_at = Utc::now();
        }
    }

    let page = pages::fetch_page_mut(ws, page_id)?;
    page.folder_id = target;
    Some(page.clone())
}
