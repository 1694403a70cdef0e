use std::sync::Arc;

use crate::ai::AiClient;
use crate::config::AppConfig;
use crate::db::Database;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub ai: Arc<dyn AiClient>,
    pub config: Arc<AppConfig>,
}
