//! Polling dashboard process: fetch, diff, group, plan, and surface
//! stock-level alerts through the process log.

use std::time::Duration;

use partsdash_client::StoreClient;
use partsdash_engine::{RefreshEngine, TracingSink, DEFAULT_POLL_INTERVAL};

#[tokio::main]
async fn main() {
    partsdash_observability::init();

    let api_url = std::env::var("PARTSDASH_API_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:8080".to_string());

    let interval = std::env::var("PARTSDASH_POLL_SECONDS")
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_POLL_INTERVAL);

    tracing::info!(%api_url, interval_secs = interval.as_secs(), "starting dashboard poller");

    let engine = RefreshEngine::new(StoreClient::new(api_url));

    // The store client serves both snapshots and settings.
    engine
        .run_forever(engine.source(), &TracingSink, interval)
        .await
}
