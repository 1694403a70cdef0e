use tracing::info;
use uuid::Uuid;

use super::{Workspace, pages, users};
use crate::models::page::{Block, BlockType};
use crate::models::user::User;

pub const DEMO_EMAIL: &str = "demo@example.com";
pub const DEMO_PASSWORD: &str = "password123";

/// Adds the demo account and the Welcome page to an empty workspace.
pub fn seed_demo_data(ws: &mut Workspace) {
    let mut user = User::new(
        Uuid::new_v4().to_string(),
        DEMO_EMAIL.to_string(),
        "Demo User".to_string(),
    );
    user.password_hash = Some(users::hash_password(DEMO_PASSWORD));
    user.school = Some("Stanford University".to_string());
    user.major = Some("Computer Science".to_string());
    user.year = Some("Junior".to_string());
    user.bio = "Just a demo user exploring this awesome app!".to_string();
    user.onboarding_complete = true;
    users::insert_user(ws, user);

    let blocks = vec![
        Block::new(BlockType::Heading1, "Welcome to Your Workspace"),
        Block::new(
            BlockType::Text,
            "Start taking notes, organizing your thoughts, and boosting your productivity.",
        ),
        Block::new(BlockType::Divider, ""),
        Block::new(BlockType::Heading2, "Quick Tips"),
        Block::new(BlockType::Bullet, "Type <b>*</b> or <b>-</b> then space to create a bullet point"),
        Block::new(BlockType::Bullet, "Type <b>1.</b> then space to create a numbered list"),
        Block::new(BlockType::Bullet, "Type <b>/</b> to see all block types"),
        Block::new(BlockType::Bullet, "Press <b>Tab</b> to indent"),
        Block::new(BlockType::Divider, ""),
        Block::callout(
            "Use the Study Tools button (graduation cap) to generate flashcards and quizzes from your notes!",
            "🎓",
            "blue",
        ),
    ];

    let welcome = pages::insert_page(ws, "Welcome", "👋", blocks, "Created page");
    if let Some(page) = pages::fetch_page_mut(ws, &welcome.id) {
        page.cover = Some("gradient-purple".to_string());
        page.is_favorite = true;
        page.history.clear();
    }

    info!(email = DEMO_EMAIL, page_id = %welcome.id, "Seeded demo workspace");
}
