pub mod api;
pub mod client;
pub mod embed;
pub mod error;
pub mod state;
pub mod storage;

use tracing_subscriber::{EnvFilter, fmt::time::ChronoLocal};

use crate::{embed::EmbeddingClient, state::AppState};

pub async fn run() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S%.3f".to_string()))
        .with_env_filter(EnvFilter::from_env("NEWSDESK_LOG"))
        .init();

    let app = AppState::new(
        storage::init_db_from_env().await,
        EmbeddingClient::from_env(),
    );

    api::run_server(app).await
}
