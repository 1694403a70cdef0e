use serde::Serialize;

use crate::models::page::{Block, BlockType, DEFAULT_PAGE_ICON};

pub const TEMPLATE_NAMES: [&str; 6] = ["blank", "meeting", "todo", "journal", "project", "wiki"];

/// A page blueprint; block ids are assigned when the page is created.
#[derive(Debug, Clone)]
pub struct PageTemplate {
    pub name: &'static str,
    pub title: &'static str,
    pub icon: &'static str,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplateInfo {
    pub name: &'static str,
    pub title: &'static str,
    pub icon: &'static str,
    pub block_count: usize,
}

impl PageTemplate {
    pub fn info(&self) -> TemplateInfo {
        TemplateInfo {
            name: self.name,
            title: self.title,
            icon: self.icon,
            block_count: self.blocks.len(),
        }
    }
}

fn heading1(text: &str) -> Block {
    Block::new(BlockType::Heading1, text)
}

fn heading2(text: &str) -> Block {
    Block::new(BlockType::Heading2, text)
}

fn empty(kind: BlockType) -> Block {
    Block::new(kind, "")
}

/// Looks a template up by name; unknown names fall back to `blank`.
pub fn find(name: &str) -> PageTemplate {
    match name {
        "meeting" => PageTemplate {
            name: "meeting",
            title: "Meeting Notes",
            icon: "📅",
            blocks: vec![
                heading1("Meeting Notes"),
                Block::new(BlockType::Text, "Date: "),
                heading2("Attendees"),
                empty(BlockType::Bullet),
                heading2("Agenda"),
                empty(BlockType::Numbered),
                heading2("Discussion"),
                empty(BlockType::Text),
                heading2("Action Items"),
                empty(BlockType::Todo),
            ],
        },
        "todo" => PageTemplate {
            name: "todo",
            title: "To-do List",
            icon: "✅",
            blocks: vec![
                heading1("To-do List"),
                heading2("Today"),
                empty(BlockType::Todo),
                heading2("This Week"),
                empty(BlockType::Todo),
                heading2("Later"),
                empty(BlockType::Todo),
            ],
        },
        "journal" => PageTemplate {
            name: "journal",
            title: "Journal Entry",
            icon: "📖",
            blocks: vec![
                heading1("Journal Entry"),
                Block::new(BlockType::Text, "Date: "),
                heading2("Today's Highlights"),
                empty(BlockType::Bullet),
                heading2("Reflections"),
                empty(BlockType::Text),
                heading2("Tomorrow's Goals"),
                empty(BlockType::Todo),
            ],
        },
        "project" => PageTemplate {
            name: "project",
            title: "Project Plan",
            icon: "🚀",
            blocks: vec![
                heading1("Project Plan"),
                Block::callout("Project overview", "🚀", "blue"),
                heading2("Goals"),
                empty(BlockType::Bullet),
                heading2("Timeline"),
                empty(BlockType::Text),
                heading2("Resources"),
                empty(BlockType::Bullet),
                heading2("Tasks"),
                empty(BlockType::Todo),
            ],
        },
        "wiki" => PageTemplate {
            name: "wiki",
            title: "Wiki Page",
            icon: "📚",
            blocks: vec![
                heading1("Wiki Page"),
                Block::callout("Overview of the topic", "📚", "purple"),
                heading2("Introduction"),
                empty(BlockType::Text),
                heading2("Details"),
                empty(BlockType::Text),
                heading2("Related Topics"),
                empty(BlockType::Bullet),
            ],
        },
        _ => PageTemplate {
            name: "blank",
            title: "Untitled",
            icon: DEFAULT_PAGE_ICON,
            blocks: Vec::new(),
        },
    }
}

pub fn all() -> Vec<TemplateInfo> {
    TEMPLATE_NAMES.iter().map(|name| find(name).info()).collect()
}
