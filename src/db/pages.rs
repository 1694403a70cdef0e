use chrono::Utc;
use serde_json::{Map, Value};

use super::{IdKind, Workspace};
use crate::error::AppError;
use crate::models::page::{
    Block, BlockType, Comment, NewBlockRequest, NewCommentRequest, Page, SearchHit,
    UpdatePageRequest,
};
use crate::models::DatabaseBlock;

const PREVIEW_CHARS: usize = 100;

fn position(ws: &Workspace, id: &str) -> Option<usize> {
    ws.pages.iter().position(|p| p.id == id)
}

pub fn fetch_page<'a>(ws: &'a Workspace, id: &str) -> Option<&'a Page> {
    ws.pages.iter().find(|p| p.id == id)
}

pub fn fetch_page_mut<'a>(ws: &'a mut Workspace, id: &str) -> Option<&'a mut Page> {
    ws.pages.iter_mut().find(|p| p.id == id)
}

pub fn fetch_pages(ws: &Workspace) -> Vec<Page> {
    ws.pages.iter().filter(|p| !p.is_deleted).cloned().collect()
}

pub fn fetch_favorites(ws: &Workspace) -> Vec<Page> {
    ws.pages
        .iter()
        .filter(|p| p.is_favorite && !p.is_deleted)
        .cloned()
        .collect()
}

pub fn fetch_trash(ws: &Workspace) -> Vec<Page> {
    ws.trash
        .iter()
        .filter_map(|id| fetch_page(ws, id))
        .cloned()
        .collect()
}

/// Stores a new page, giving every block a fresh id, and logs `action` as its
/// first history entry.
pub fn insert_page(
    ws: &mut Workspace,
    title: impl Into<String>,
    icon: impl Into<String>,
    blocks: Vec<Block>,
    action: &str,
) -> Page {
    let id = ws.next_id(IdKind::Page);
    let mut page = Page::new(id, title, icon);
    page.blocks = blocks
        .into_iter()
        .map(|mut block| {
            block.id = ws.next_id(IdKind::Block);
            block
        })
        .collect();
    page.record(action);
    ws.pages.push(page.clone());
    page
}

pub fn update_page(ws: &mut Workspace, id: &str, req: UpdatePageRequest) -> Option<Page> {
    let page = fetch_page_mut(ws, id)?;

    if let Some(title) = req.title {
        page.title = title;
    }
    if let Some(icon) = req.icon {
        page.icon = icon;
    }
    if let Some(cover) = req.cover {
        page.cover = cover;
    }
    if let Some(cover_position) = req.cover_position {
        page.cover_position = cover_position;
    }
    if let Some(parent_id) = req.parent_id {
        page.parent_id = parent_id;
    }
    if let Some(is_favorite) = req.is_favorite {
        page.is_favorite = is_favorite;
    }
    if let Some(full_width) = req.full_width {
        page.full_width = full_width;
    }
    if let Some(small_text) = req.small_text {
        page.small_text = small_text;
    }

    page.touch();
    page.record("Updated page");
    Some(page.clone())
}

/// Soft-deletes a page into the trash.
pub fn trash_page(ws: &mut Workspace, id: &str) -> bool {
    let Some(page) = fetch_page_mut(ws, id) else {
        return false;
    };
    page.is_deleted = true;
    page.deleted_at = Some(Utc::now());
    if !ws.trash.iter().any(|t| t == id) {
        ws.trash.push(id.to_string());
    }
    true
}

pub fn restore_page(ws: &mut Workspace, id: &str) -> bool {
    let Some(page) = fetch_page_mut(ws, id) else {
        return false;
    };
    page.is_deleted = false;
    page.deleted_at = None;
    ws.trash.retain(|t| t != id);
    true
}

/// Removes a page for good, along with its trash entry and folder membership.
pub fn purge_page(ws: &mut Workspace, id: &str) {
    ws.pages.retain(|p| p.id != id);
    ws.trash.retain(|t| t != id);
    for folder in ws.folders.iter_mut() {
        folder.page_ids.retain(|p| p != id);
    }
}

pub fn duplicate_page(ws: &mut Workspace, id: &str) -> Option<Page> {
    let source = fetch_page(ws, id)?.clone();

    let mut blocks = Vec::with_capacity(source.blocks.len());
    for mut block in source.blocks {
        if let Some(db_id) = block.database_id.clone() {
            block.database_id = copy_database(ws, &db_id).or(Some(db_id));
        }
        blocks.push(block);
    }

    let page = insert_page(
        ws,
        format!("{} (Copy)", source.title),
        source.icon,
        blocks,
        "Created from duplicate",
    );

    let stored = fetch_page_mut(ws, &page.id)?;
    stored.cover = source.cover;
    stored.cover_position = source.cover_position;
    stored.parent_id = source.parent_id;
    stored.full_width = source.full_width;
    stored.small_text = source.small_text;
    Some(stored.clone())
}

fn copy_database(ws: &mut Workspace, db_id: &str) -> Option<String> {
    let mut copy = ws.databases.iter().find(|d| d.id == db_id)?.clone();
    copy.id = ws.next_id(IdKind::Database);
    for row in copy.rows.iter_mut() {
        row.id = ws.next_id(IdKind::Row);
    }
    copy.created_at = Utc::now();
    let new_id = copy.id.clone();
    ws.databases.push(copy);
    Some(new_id)
}

/// Moves the listed pages to the front in the given order; the rest keep
/// their relative order.
pub fn reorder_pages(ws: &mut Workspace, page_ids: &[String]) {
    let mut remaining = std::mem::take(&mut ws.pages);
    let mut ordered = Vec::with_capacity(remaining.len());
    for id in page_ids {
        if let Some(idx) = remaining.iter().position(|p| &p.id == id) {
            ordered.push(remaining.remove(idx));
        }
    }
    ordered.extend(remaining);
    ws.pages = ordered;
}

pub fn replace_blocks(ws: &mut Workspace, id: &str, blocks: Vec<Block>) -> Option<Page> {
    let idx = position(ws, id)?;
    let blocks = blocks
        .into_iter()
        .map(|mut block| {
            if block.id.is_empty() {
                block.id = ws.next_id(IdKind::Block);
            }
            block
        })
        .collect();

    let page = &mut ws.pages[idx];
    page.blocks = blocks;
    page.touch();
    Some(page.clone())
}

pub fn insert_block(ws: &mut Workspace, id: &str, req: NewBlockRequest) -> Option<Block> {
    let idx = position(ws, id)?;

    let mut block = Block::new(req.kind, req.content);
    block.id = ws.next_id(IdKind::Block);
    block.icon = req.icon;
    block.color = req.color;
    block.language = req.language;
    block.url = req.url;
    block.checked = req.checked;
    block.children = req.children;
    block.database_id = req.database_id;

    if block.kind == BlockType::Database && block.database_id.is_none() {
        let name = if block.content.trim().is_empty() {
            "Untitled Database".to_string()
        } else {
            block.content.clone()
        };
        let database = DatabaseBlock::new(ws.next_id(IdKind::Database), name);
        block.database_id = Some(database.id.clone());
        ws.databases.push(database);
    }

    let page = &mut ws.pages[idx];
    match req.position {
        Some(pos) if pos >= 0 && (pos as usize) <= page.blocks.len() => {
            page.blocks.insert(pos as usize, block.clone())
        }
        _ => page.blocks.push(block.clone()),
    }
    page.touch();
    Some(block)
}

/// Inserts `blocks` after the block with id `after`, or at the end when
/// `after` is `end` or names no block.
pub fn insert_blocks_after(page: &mut Page, after: &str, blocks: Vec<Block>) {
    let at = page
        .blocks
        .iter()
        .position(|b| b.id == after)
        .map(|i| i + 1)
        .unwrap_or(page.blocks.len());
    page.blocks.splice(at..at, blocks);
    page.touch();
}

/// Merges every supplied key except `id` into the block.
pub fn update_block(
    ws: &mut Workspace,
    page_id: &str,
    block_id: &str,
    patch: Map<String, Value>,
) -> Result<Block, AppError> {
    let page = fetch_page_mut(ws, page_id).ok_or_else(|| AppError::not_found("Page"))?;
    let block = page
        .blocks
        .iter_mut()
        .find(|b| b.id == block_id)
        .ok_or_else(|| AppError::not_found("Block"))?;

    let mut merged = match serde_json::to_value(&*block) {
        Ok(Value::Object(map)) => map,
        _ => return Err(AppError::InternalServerError),
    };
    for (key, value) in patch {
        if key != "id" {
            merged.insert(key, value);
        }
    }
    let updated: Block = serde_json::from_value(Value::Object(merged))
        .map_err(|e| AppError::BadRequest(format!("Invalid block: {}", e)))?;

    *block = updated.clone();
    page.touch();
    Ok(updated)
}

pub fn delete_block(ws: &mut Workspace, page_id: &str, block_id: &str) -> bool {
    let Some(page) = fetch_page_mut(ws, page_id) else {
        return false;
    };
    page.blocks.retain(|b| b.id != block_id);
    page.touch();
    true
}

/// Rebuilds the block list from `block_ids`; unknown ids are skipped and
/// unlisted blocks dropped.
pub fn reorder_blocks(ws: &mut Workspace, page_id: &str, block_ids: &[String]) -> bool {
    let Some(page) = fetch_page_mut(ws, page_id) else {
        return false;
    };
    let mut old = std::mem::take(&mut page.blocks);
    page.blocks = block_ids
        .iter()
        .filter_map(|id| {
            let idx = old.iter().position(|b| &b.id == id)?;
            Some(old.remove(idx))
        })
        .collect();
    page.touch();
    true
}

pub fn insert_comment(ws: &mut Workspace, page_id: &str, req: NewCommentRequest) -> Option<Comment> {
    let idx = position(ws, page_id)?;
    let comment = Comment {
        id: ws.next_id(IdKind::Comment),
        author: req.author.unwrap_or_else(|| "You".to_string()),
        text: req.text,
        block_id: req.block_id,
        created_at: Utc::now(),
    };
    ws.pages[idx].comments.push(comment.clone());
    Some(comment)
}

pub fn delete_comment(ws: &mut Workspace, page_id: &str, comment_id: &str) -> bool {
    let Some(page) = fetch_page_mut(ws, page_id) else {
        return false;
    };
    page.comments.retain(|c| c.id != comment_id);
    true
}

/// Case-insensitive search over live pages. A title match wins; otherwise the
/// first matching block is reported unless `filter` is `title`.
pub fn search(ws: &Workspace, query: &str, filter: &str) -> Vec<SearchHit> {
    let query = query.to_lowercase();
    let search_content = matches!(filter, "all" | "content");

    let mut hits = Vec::new();
    for page in ws.pages.iter().filter(|p| !p.is_deleted) {
        if page.title.to_lowercase().contains(&query) {
            hits.push(SearchHit {
                id: page.id.clone(),
                title: page.title.clone(),
                icon: page.icon.clone(),
                kind: "page".to_string(),
                matched: "title".to_string(),
                preview: None,
            });
            continue;
        }

        if !search_content {
            continue;
        }
        if let Some(block) = page
            .blocks
            .iter()
            .find(|b| b.content.to_lowercase().contains(&query))
        {
            hits.push(SearchHit {
                id: page.id.clone(),
                title: page.title.clone(),
                icon: page.icon.clone(),
                kind: "page".to_string(),
                matched: "content".to_string(),
                preview: Some(block.content.chars().take(PREVIEW_CHARS).collect()),
            });
        }
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Folder;

    fn workspace_with(titles: &[&str]) -> Workspace {
        let mut ws = Workspace::default();
        for title in titles {
            insert_page(&mut ws, *title, "📄", vec![], "Created page");
        }
        ws
    }

    #[test]
    fn trash_and_restore_round_trip() {
        let mut ws = workspace_with(&["A", "B"]);
        assert!(trash_page(&mut ws, "1"));
        assert!(trash_page(&mut ws, "1"));
        assert_eq!(ws.trash, vec!["1".to_string()]);
        assert_eq!(fetch_pages(&ws).len(), 1);

        assert!(restore_page(&mut ws, "1"));
        assert!(ws.trash.is_empty());
        assert_eq!(fetch_pages(&ws).len(), 2);
        assert!(!restore_page(&mut ws, "99"));
    }

    #[test]
    fn purge_unlinks_folder_membership() {
        let mut ws = workspace_with(&["A"]);
        let now = Utc::now();
        ws.folders.push(Folder {
            id: "folder-1".into(),
            name: "F".into(),
            icon: "📁".into(),
            color: "#6940a5".into(),
            page_ids: vec!["1".into()],
            expanded: true,
            created_at: now,
            updated_at: now,
        });
        trash_page(&mut ws, "1");
        purge_page(&mut ws, "1");
        purge_page(&mut ws, "1");
        assert!(ws.pages.is_empty());
        assert!(ws.trash.is_empty());
        assert!(ws.folders[0].page_ids.is_empty());
    }

    #[test]
    fn reorder_moves_listed_pages_first() {
        let mut ws = workspace_with(&["A", "B", "C"]);
        reorder_pages(&mut ws, &["3".to_string(), "missing".to_string(), "1".to_string()]);
        let order: Vec<_> = ws.pages.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(order, vec!["3", "1", "2"]);
    }

    #[test]
    fn duplicate_copies_embedded_databases() {
        let mut ws = workspace_with(&["Tracker"]);
        let req = NewBlockRequest {
            kind: BlockType::Database,
            content: "Tasks".into(),
            ..Default::default()
        };
        let block = insert_block(&mut ws, "1", req).unwrap();
        let original_db = block.database_id.clone().unwrap();

        let copy = duplicate_page(&mut ws, "1").unwrap();
        assert_eq!(copy.title, "Tracker (Copy)");
        assert_ne!(copy.blocks[0].id, block.id);
        let copied_db = copy.blocks[0].database_id.clone().unwrap();
        assert_ne!(copied_db, original_db);
        assert_eq!(ws.databases.len(), 2);
        assert_eq!(copy.history[0].action, "Created from duplicate");
    }

    #[test]
    fn update_block_ignores_id_and_keeps_extra_keys() {
        let mut ws = workspace_with(&["A"]);
        let block = insert_block(&mut ws, "1", NewBlockRequest::default()).unwrap();

        let patch = serde_json::json!({"id": "hijack", "content": "hello", "checked": true, "width": 3});
        let Value::Object(patch) = patch else { unreachable!() };
        let updated = update_block(&mut ws, "1", &block.id, patch).unwrap();

        assert_eq!(updated.id, block.id);
        assert_eq!(updated.content, "hello");
        assert_eq!(updated.checked, Some(true));
        assert_eq!(updated.extra.get("width"), Some(&serde_json::json!(3)));
    }

    #[test]
    fn search_prefers_title_then_content() {
        let mut ws = workspace_with(&["Rust notes", "Groceries"]);
        insert_block(
            &mut ws,
            "2",
            NewBlockRequest {
                content: "buy rust remover".into(),
                ..Default::default()
            },
        );

        let hits = search(&ws, "RUST", "all");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].matched, "title");
        assert_eq!(hits[1].matched, "content");
        assert_eq!(hits[1].preview.as_deref(), Some("buy rust remover"));

        let hits = search(&ws, "rust", "title");
        assert_eq!(hits.len(), 1);
    }
}
