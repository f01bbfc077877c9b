use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use partsdash_server::routes::AppState;
use partsdash_server::{build_app, JsonStore, SettingsStore, MAX_BACKUPS};

const BACKUP_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let log_file = std::env::var("PARTSDASH_LOG_FILE").ok().map(PathBuf::from);
    match &log_file {
        Some(path) => partsdash_observability::init_to_file(path)?,
        None => partsdash_observability::init(),
    }

    let data_dir = std::env::var("PARTSDASH_DATA_DIR").unwrap_or_else(|_| "data".to_string());
    std::fs::create_dir_all(&data_dir)?;

    let records = JsonStore::open(format!("{data_dir}/inventory.json"))?;
    let settings = SettingsStore::open(format!("{data_dir}/dashboard_settings.json"));
    let state = Arc::new(AppState {
        records,
        settings,
        log_file,
    });

    let backup_dir = std::env::var("PARTSDASH_BACKUP_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(&data_dir).join("backups"));
    let backup_state = Arc::clone(&state);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(BACKUP_INTERVAL);
        loop {
            ticker.tick().await;
            if let Err(err) = backup_state.records.backup(&backup_dir, MAX_BACKUPS) {
                tracing::error!(%err, "store backup failed");
            }
        }
    });

    let app = build_app(state);

    let addr = std::env::var("PARTSDASH_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
