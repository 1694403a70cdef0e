mod common;

use axum::http::StatusCode;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use serde_json::{Value, json};

use common::{app, multipart, seeded_app};

fn ids(pages: &Value) -> Vec<String> {
    pages
        .as_array()
        .expect("array of pages")
        .iter()
        .map(|p| p["id"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[tokio::test]
async fn new_page_has_defaults() {
    let app = app();

    let res = app.post("/api/pages", json!({})).await;
    assert_eq!(res.status, StatusCode::OK);
    let page = &res.json()["page"];
    assert_eq!(page["id"], "1");
    assert_eq!(page["title"], "Untitled");
    assert_eq!(page["icon"], "📄");
    assert_eq!(page["cover_position"], 50);
    assert_eq!(page["is_deleted"], false);
    assert_eq!(page["blocks"].as_array().unwrap().len(), 0);
    assert_eq!(page["history"][0]["action"], "Created page");

    let second = app.post("/api/pages", json!({"template": "meeting"})).await.json();
    assert_eq!(second["page"]["id"], "2");
    assert_eq!(second["page"]["title"], "Meeting Notes");
    assert_eq!(second["page"]["blocks"][0]["type"], "heading1");
}

#[tokio::test]
async fn update_ignores_unknown_fields() {
    let app = app();
    app.post("/api/pages", json!({})).await;

    let res = app
        .put(
            "/api/page/1",
            json!({"title": "Renamed", "is_favorite": true, "id": "99", "is_deleted": true}),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    let page = &res.json()["page"];
    assert_eq!(page["id"], "1");
    assert_eq!(page["title"], "Renamed");
    assert_eq!(page["is_deleted"], false);
    assert_eq!(page["history"][0]["action"], "Updated page");

    let favorites = app.get("/api/favorites").await.json();
    assert_eq!(ids(&favorites["pages"]), vec!["1"]);
}

#[tokio::test]
async fn missing_page_is_404() {
    let app = app();
    let res = app.get("/api/page/404").await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.json()["message"], "Page not found");
}

#[tokio::test]
async fn trash_and_restore() {
    let app = seeded_app();
    app.post("/api/pages", json!({})).await;

    let res = app.delete("/api/page/1").await;
    assert_eq!(res.status, StatusCode::OK);

    assert_eq!(ids(&app.get("/api/pages").await.json()["pages"]), vec!["2"]);
    assert_eq!(ids(&app.get("/api/trash").await.json()["pages"]), vec!["1"]);

    app.delete("/api/page/1").await;
    assert_eq!(ids(&app.get("/api/trash").await.json()["pages"]), vec!["1"]);

    app.post("/api/page/1/restore", json!({})).await;
    assert_eq!(ids(&app.get("/api/pages").await.json()["pages"]), vec!["1", "2"]);
    assert!(ids(&app.get("/api/trash").await.json()["pages"]).is_empty());

    app.delete("/api/page/2").await;
    app.delete("/api/page/2/permanent").await;
    assert_eq!(app.get("/api/page/2").await.status, StatusCode::NOT_FOUND);
    assert!(ids(&app.get("/api/trash").await.json()["pages"]).is_empty());
}

#[tokio::test]
async fn duplicate_copies_blocks_with_fresh_ids() {
    let app = seeded_app();

    let res = app.post("/api/page/1/duplicate", json!({})).await.json();
    let copy = &res["page"];
    assert_eq!(copy["title"], "Welcome (Copy)");
    assert_eq!(copy["cover"], "gradient-purple");
    assert_eq!(copy["blocks"].as_array().unwrap().len(), 10);
    assert_ne!(copy["blocks"][0]["id"], "b1");
    assert_eq!(copy["history"][0]["action"], "Created from duplicate");
}

#[tokio::test]
async fn block_lifecycle() {
    let app = app();
    app.post("/api/pages", json!({})).await;

    let first = app
        .post("/api/page/1/block", json!({"type": "text", "content": "first"}))
        .await
        .json();
    let first_id = first["block"]["id"].as_str().unwrap().to_string();

    let heading = app
        .post(
            "/api/page/1/block",
            json!({"type": "heading2", "content": "top", "position": 0}),
        )
        .await
        .json();
    let heading_id = heading["block"]["id"].as_str().unwrap().to_string();

    let page = app.get("/api/page/1").await.json();
    assert_eq!(page["page"]["blocks"][0]["content"], "top");

    let res = app
        .put(
            &format!("/api/page/1/block/{}", first_id),
            json!({"content": "edited", "id": "hijack", "color": "red"}),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    let block = &res.json()["block"];
    assert_eq!(block["id"], first_id.as_str());
    assert_eq!(block["content"], "edited");
    assert_eq!(block["color"], "red");

    let res = app.put("/api/page/1/block/nope", json!({"content": "x"})).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.json()["message"], "Block not found");

    app.post(
        "/api/page/1/blocks/reorder",
        json!({"block_ids": [first_id, heading_id]}),
    )
    .await;
    let page = app.get("/api/page/1").await.json();
    assert_eq!(page["page"]["blocks"][0]["content"], "edited");

    app.delete(&format!("/api/page/1/block/{}", first_id)).await;
    let page = app.get("/api/page/1").await.json();
    assert_eq!(page["page"]["blocks"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn database_block_creates_a_database() {
    let app = app();
    app.post("/api/pages", json!({})).await;

    let res = app
        .post("/api/page/1/block", json!({"type": "database", "content": "Reading list"}))
        .await
        .json();
    let db_id = res["block"]["database_id"].as_str().unwrap().to_string();

    let db = app.get(&format!("/api/database/{}", db_id)).await.json();
    assert_eq!(db["database"]["name"], "Reading list");

    let row = app
        .post(
            &format!("/api/database/{}/row", db_id),
            json!({"properties": {"Name": "Dune"}}),
        )
        .await
        .json();
    let row_id = row["row"]["id"].as_str().unwrap().to_string();

    let updated = app
        .put(
            &format!("/api/database/{}/row/{}", db_id, row_id),
            json!({"properties": {"Status": "Done"}}),
        )
        .await
        .json();
    assert_eq!(updated["row"]["properties"]["Name"], "Dune");
    assert_eq!(updated["row"]["properties"]["Status"], "Done");

    let res = app
        .put(&format!("/api/database/{}/row/missing", db_id), json!({"properties": {}}))
        .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    assert_eq!(app.get("/api/database/db404").await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn comments_and_history() {
    let app = app();
    app.post("/api/pages", json!({})).await;

    let res = app
        .post("/api/page/1/comment", json!({"text": "Looks good"}))
        .await
        .json();
    assert_eq!(res["comment"]["author"], "You");
    let comment_id = res["comment"]["id"].as_str().unwrap().to_string();

    let comments = app.get("/api/page/1/comments").await.json();
    assert_eq!(comments["comments"].as_array().unwrap().len(), 1);

    app.delete(&format!("/api/page/1/comment/{}", comment_id)).await;
    let comments = app.get("/api/page/1/comments").await.json();
    assert!(comments["comments"].as_array().unwrap().is_empty());

    let history = app.get("/api/page/1/history").await.json();
    assert_eq!(history["history"][0]["action"], "Created page");
}

#[tokio::test]
async fn search_matches_titles_and_content() {
    let app = seeded_app();

    let res = app.get("/api/search?q=welcome").await.json();
    assert_eq!(res["results"][0]["match"], "title");

    let res = app.get("/api/search?q=numbered").await.json();
    assert_eq!(res["results"][0]["match"], "content");
    assert!(res["results"][0]["preview"].as_str().unwrap().contains("numbered"));

    let res = app.get("/api/search?q=numbered&filter=title").await.json();
    assert!(res["results"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn import_markdown_file() {
    let app = app();
    let markdown = "# Plan\n\nSome intro\n- [ ] write tests\n- [x] ship\n- bullet\n> quoted\n---\n";

    let res = app.upload("/api/import", "plan.md", markdown.as_bytes()).await;
    assert_eq!(res.status, StatusCode::OK);
    let page_id = res.json()["page_id"].as_str().unwrap().to_string();

    let page = app.get(&format!("/api/page/{}", page_id)).await.json();
    let page = &page["page"];
    assert_eq!(page["title"], "plan");
    let kinds: Vec<&str> = page["blocks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["type"].as_str().unwrap())
        .collect();
    assert_eq!(
        kinds,
        vec!["heading1", "text", "todo", "todo", "bullet", "quote", "divider"]
    );
    assert_eq!(page["blocks"][3]["checked"], true);
    assert_eq!(page["history"][0]["action"], "Imported from file");
}

#[tokio::test]
async fn import_requires_a_file() {
    let app = app();
    let mut req = multipart("/api/import", "x.txt", b"", &[]);
    *req.body_mut() = axum::body::Body::from(format!("--{}--\r\n", common::BOUNDARY));
    let res = app.send(req).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn export_formats() {
    let app = seeded_app();

    let res = app.get("/api/page/1/export/md").await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.text.starts_with("# Welcome\n\n# Welcome to Your Workspace"));
    assert_eq!(
        res.headers.get(CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=\"Welcome.md\""
    );

    let res = app.get("/api/page/1/export/html").await;
    assert!(res.headers.get(CONTENT_TYPE).unwrap().to_str().unwrap().starts_with("text/html"));
    assert!(res.text.contains("&lt;b&gt;"));

    let res = app.get("/api/page/1/export/json").await;
    let page: Value = serde_json::from_str(&res.text).unwrap();
    assert_eq!(page["id"], "1");

    let res = app.get("/api/page/1/export/pdf").await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn export_filename_drops_line_breaks() {
    let app = seeded_app();
    app.put("/api/page/1", json!({"title": "Line\r\nBreak \"quoted\""})).await;

    let res = app.get("/api/page/1/export/md").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(
        res.headers.get(CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=\"Line  Break 'quoted'.md\""
    );

    app.put("/api/page/1", json!({"title": "\n"})).await;
    let res = app.get("/api/page/1/export/json").await;
    assert_eq!(
        res.headers.get(CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=\"export.json\""
    );
}

#[tokio::test]
async fn unknown_block_types_are_kept() {
    let app = app();
    app.post("/api/pages", json!({})).await;

    let res = app
        .post("/api/page/1/block", json!({"type": "columns", "content": "x"}))
        .await
        .json();
    assert_eq!(res["block"]["type"], "columns");

    app.put(
        "/api/page/1/blocks",
        json!({"blocks": [{"id": "b9", "type": "kanban", "content": ""}]}),
    )
    .await;
    let page = app.get("/api/page/1").await.json();
    assert_eq!(page["page"]["blocks"][0]["type"], "kanban");
}

#[tokio::test]
async fn transcribe_without_ai_inserts_demo_text() {
    let app = seeded_app();

    let res = app
        .send(multipart(
            "/api/page/1/transcribe",
            "lecture.mp3",
            b"not really audio",
            &[("position", "b1")],
        ))
        .await;
    assert_eq!(res.status, StatusCode::OK);
    let body = res.json();
    assert_eq!(body["blocks_added"], 2);
    assert!(body["transcribed_text"].as_str().unwrap().starts_with("[Demo mode"));

    let page = app.get("/api/page/1").await.json();
    let blocks = page["page"]["blocks"].as_array().unwrap();
    assert_eq!(blocks.len(), 12);
    assert_eq!(blocks[1]["type"], "callout");
    assert_eq!(blocks[1]["content"], "🎙️ Transcription from: lecture.mp3");
    assert_eq!(blocks[2]["type"], "text");
}

#[tokio::test]
async fn transcribe_url_needs_a_url() {
    let app = seeded_app();

    let res = app.post("/api/page/1/transcribe-url", json!({})).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json()["message"], "No URL provided");

    let res = app
        .post("/api/page/1/transcribe-url", json!({"url": "https://example.com/a.mp3"}))
        .await;
    assert_eq!(res.status, StatusCode::OK);
    let page = app.get("/api/page/1").await.json();
    assert_eq!(page["page"]["blocks"].as_array().unwrap().len(), 11);
}

#[tokio::test]
async fn reorder_pages_moves_listed_pages_first() {
    let app = app();
    for _ in 0..3 {
        app.post("/api/pages", json!({})).await;
    }
    app.post("/api/pages/reorder", json!({"page_ids": ["3", "1"]})).await;
    assert_eq!(ids(&app.get("/api/pages").await.json()["pages"]), vec!["3", "1", "2"]);
}

#[tokio::test]
async fn templates_are_listed() {
    let app = app();
    let res = app.get("/api/templates").await.json();
    assert!(
        res["templates"]
            .as_array()
            .unwrap()
            .iter()
            .any(|t| t["name"] == "meeting")
    );
}
