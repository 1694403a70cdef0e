pub mod calendar;
pub mod classes;
pub mod databases;
pub mod folders;
pub mod pages;
pub mod seed;
pub mod transcripts;
pub mod users;

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::{
    CalendarEvent, ChatMessage, Class, DatabaseBlock, Folder, Page, Transcript, User,
};

/// Shared handle to the in-memory workspace.
pub type Database = Arc<RwLock<Workspace>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdKind {
    Page,
    Block,
    Comment,
    Database,
    Row,
    Folder,
    Event,
    Class,
    Assignment,
    Transcript,
}

impl IdKind {
    fn format(self, n: u64) -> String {
        match self {
            IdKind::Page => n.to_string(),
            IdKind::Block => format!("b{}", n),
            IdKind::Comment => format!("c{}", n),
            IdKind::Database => format!("db{}", n),
            IdKind::Row => format!("r{}", n),
            IdKind::Folder => format!("folder-{}", n),
            IdKind::Event => format!("e{}", n),
            IdKind::Class => format!("c{}", n),
            IdKind::Assignment => format!("a{}", n),
            IdKind::Transcript => format!("t{}", n),
        }
    }
}

/// One monotonically increasing counter per kind of identifier.
#[derive(Debug, Default)]
pub struct IdSequence {
    counters: HashMap<IdKind, u64>,
}

impl IdSequence {
    pub fn next(&mut self, kind: IdKind) -> String {
        let counter = self.counters.entry(kind).or_insert(0);
        *counter += 1;
        kind.format(*counter)
    }
}

#[derive(Debug, Default)]
pub struct Workspace {
    pub users: Vec<User>,
    /// Session token to user id.
    pub sessions: HashMap<String, String>,
    pub pages: Vec<Page>,
    /// Ids of soft-deleted pages in the order they were trashed.
    pub trash: Vec<String>,
    pub databases: Vec<DatabaseBlock>,
    pub folders: Vec<Folder>,
    pub events: Vec<CalendarEvent>,
    pub classes: Vec<Class>,
    pub transcripts: Vec<Transcript>,
    pub conversations: HashMap<String, Vec<ChatMessage>>,
    ids: IdSequence,
}

impl Workspace {
    pub fn next_id(&mut self, kind: IdKind) -> String {
        self.ids.next(kind)
    }
}

pub fn new_database(workspace: Workspace) -> Database {
    Arc::new(RwLock::new(workspace))
}
