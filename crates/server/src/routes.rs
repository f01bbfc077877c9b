//! HTTP surface for the record and settings stores.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use partsdash_core::{NewRecord, RecordId, RecordPatch};
use partsdash_engine::DisplaySettings;

use crate::logs;
use crate::store::{AddOutcome, JsonStore, SettingsStore, StoreError};

/// Shared handler state: both stores plus the optional log file the
/// log viewer reads.
pub struct AppState {
    pub records: JsonStore,
    pub settings: SettingsStore,
    pub log_file: Option<PathBuf>,
}

pub fn build_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/inventory", get(list_records).post(add_record))
        .route(
            "/api/inventory/:id",
            patch(update_record).delete(delete_record),
        )
        .route("/api/inventory/:id/subtract", post(subtract))
        .route("/api/settings", get(get_settings).post(save_settings))
        .route("/api/logs", get(get_logs))
        .route("/health", get(health))
        .layer(Extension(state))
}

async fn health() -> axum::response::Response {
    (StatusCode::OK, Json(json!({ "status": "ok" }))).into_response()
}

async fn list_records(Extension(state): Extension<Arc<AppState>>) -> axum::response::Response {
    (StatusCode::OK, Json(state.records.list())).into_response()
}

async fn add_record(
    Extension(state): Extension<Arc<AppState>>,
    Json(body): Json<NewRecord>,
) -> axum::response::Response {
    match state.records.add_or_merge(body) {
        Ok((item, AddOutcome::Added)) => (
            StatusCode::CREATED,
            Json(json!({ "message": "Item added", "item": item })),
        )
            .into_response(),
        Ok((item, AddOutcome::Merged)) => (
            StatusCode::OK,
            Json(json!({ "message": "Quantity updated", "item": item })),
        )
            .into_response(),
        Err(err) => store_error_to_response(err),
    }
}

async fn update_record(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(body): Json<RecordPatch>,
) -> axum::response::Response {
    match state.records.patch(RecordId(id), body) {
        Ok(item) => (
            StatusCode::OK,
            Json(json!({ "message": "Item updated", "item": item })),
        )
            .into_response(),
        Err(err) => store_error_to_response(err),
    }
}

async fn delete_record(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<u64>,
) -> axum::response::Response {
    match state.records.delete(RecordId(id)) {
        Ok(()) => (StatusCode::OK, Json(json!({ "message": "Item deleted" }))).into_response(),
        Err(err) => store_error_to_response(err),
    }
}

#[derive(Debug, Deserialize)]
struct SubtractRequest {
    #[serde(default = "default_subtract_quantity")]
    quantity: u32,
}

fn default_subtract_quantity() -> u32 {
    1
}

async fn subtract(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(body): Json<SubtractRequest>,
) -> axum::response::Response {
    match state.records.subtract(RecordId(id), body.quantity) {
        Ok(item) => (
            StatusCode::OK,
            Json(json!({ "message": "Quantity subtracted", "item": item })),
        )
            .into_response(),
        Err(err) => store_error_to_response(err),
    }
}

#[derive(Debug, Deserialize)]
struct LogsQuery {
    #[serde(default = "default_log_lines")]
    lines: usize,
    #[serde(default = "default_log_page")]
    page: usize,
}

fn default_log_lines() -> usize {
    1000
}

fn default_log_page() -> usize {
    1
}

async fn get_logs(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<LogsQuery>,
) -> axum::response::Response {
    let Some(path) = &state.log_file else {
        return json_error(StatusCode::NOT_FOUND, "not_found", "no log file configured");
    };
    if query.lines == 0 || query.page == 0 {
        return json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "lines and page must be at least 1",
        );
    }

    match logs::read_page(path, query.lines, query.page) {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(err) => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "log_read_error",
            err.to_string(),
        ),
    }
}

async fn get_settings(Extension(state): Extension<Arc<AppState>>) -> axum::response::Response {
    (StatusCode::OK, Json(state.settings.get())).into_response()
}

async fn save_settings(
    Extension(state): Extension<Arc<AppState>>,
    Json(body): Json<DisplaySettings>,
) -> axum::response::Response {
    match state.settings.save(body) {
        Ok(saved) => (
            StatusCode::OK,
            Json(json!({ "message": "Settings saved", "settings": saved })),
        )
            .into_response(),
        Err(err) => store_error_to_response(err),
    }
}

fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "item not found"),
        StoreError::Validation(msg) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", msg)
        }
        StoreError::Io(e) => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "store_error",
            e.to_string(),
        ),
    }
}

fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
