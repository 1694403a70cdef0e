use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use notespace::ai::{AiClient, NoopAiClient, OpenAiConfig, OpenAiHttpClient};
use notespace::api::router;
use notespace::config::AppConfig;
use notespace::db::{self, Workspace, seed};
use notespace::state::AppState;

fn ai_client() -> Arc<dyn AiClient> {
    let config = match OpenAiConfig::new_from_env() {
        Ok(config) => config,
        Err(e) => {
            warn!("{}; AI endpoints will use canned responses", e);
            return Arc::new(NoopAiClient);
        }
    };
    info!(chat_model = %config.chat_model, "External AI client enabled");
    match OpenAiHttpClient::new(config) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            warn!("{}; AI endpoints will use canned responses", e);
            Arc::new(NoopAiClient)
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "notespace=debug,tower_http=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    let mut workspace = Workspace::default();
    if config.seed_demo_data {
        seed::seed_demo_data(&mut workspace);
    }

    let addr = config.bind_addr;
    let state = AppState {
        db: db::new_database(workspace),
        ai: ai_client(),
        config: Arc::new(config),
    };

    let app = router(state);

    info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
