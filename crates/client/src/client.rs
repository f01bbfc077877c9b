//! Client for the inventory record store and settings store.

use serde::Deserialize;

use partsdash_core::{
    InventoryRecord, NewRecord, RecordId, RecordPatch, Snapshot, WireRecord,
};
use partsdash_engine::{DisplaySettings, RefreshError, SettingsSource, SnapshotSource};

use crate::error::ClientError;

/// Mutating responses wrap the affected record next to a message.
#[derive(Debug, Deserialize)]
struct ItemEnvelope {
    item: WireRecord,
}

/// HTTP client for the record store's read/write endpoints.
pub struct StoreClient {
    base_url: String,
    http: reqwest::Client,
}

impl StoreClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        if resp.status().is_success() {
            return Ok(resp);
        }
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        Err(ClientError::Api(status, body))
    }

    /// Fetch the full record set and normalize it into a snapshot.
    pub async fn list_records(&self) -> Result<Snapshot, ClientError> {
        let resp = self
            .http
            .get(self.url("/api/inventory"))
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        let wire: Vec<WireRecord> = Self::check(resp)
            .await?
            .json()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))?;

        let snapshot = Snapshot::from_wire(wire);
        for record in &snapshot {
            if record.thresholds_inverted() {
                tracing::warn!(
                    record_id = %record.id,
                    low = record.low_status,
                    high = record.high_status,
                    "record has inverted thresholds; classifying with high precedence"
                );
            }
        }
        Ok(snapshot)
    }

    /// Create a record (or merge quantities into an existing
    /// family/part pair, at the store's discretion).
    pub async fn add_record(&self, new: &NewRecord) -> Result<InventoryRecord, ClientError> {
        let resp = self
            .http
            .post(self.url("/api/inventory"))
            .json(new)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        Self::item_from(resp).await
    }

    /// Apply a partial field update to one record.
    pub async fn update_record(
        &self,
        id: RecordId,
        patch: &RecordPatch,
    ) -> Result<InventoryRecord, ClientError> {
        let resp = self
            .http
            .patch(self.url(&format!("/api/inventory/{id}")))
            .json(patch)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        Self::item_from(resp).await
    }

    /// Decrement a record's quantity; the store clamps at zero.
    pub async fn subtract(
        &self,
        id: RecordId,
        quantity: u32,
    ) -> Result<InventoryRecord, ClientError> {
        let resp = self
            .http
            .post(self.url(&format!("/api/inventory/{id}/subtract")))
            .json(&serde_json::json!({ "quantity": quantity }))
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        Self::item_from(resp).await
    }

    pub async fn delete_record(&self, id: RecordId) -> Result<(), ClientError> {
        let resp = self
            .http
            .delete(self.url(&format!("/api/inventory/{id}")))
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        Self::check(resp).await?;
        Ok(())
    }

    /// Current display settings, or store defaults when none are saved.
    pub async fn get_settings(&self) -> Result<DisplaySettings, ClientError> {
        let resp = self
            .http
            .get(self.url("/api/settings"))
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        Self::check(resp)
            .await?
            .json()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))
    }

    /// Persist a full settings object.
    pub async fn save_settings(&self, settings: &DisplaySettings) -> Result<(), ClientError> {
        let resp = self
            .http
            .post(self.url("/api/settings"))
            .json(settings)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        Self::check(resp).await?;
        Ok(())
    }

    async fn item_from(resp: reqwest::Response) -> Result<InventoryRecord, ClientError> {
        let envelope: ItemEnvelope = Self::check(resp)
            .await?
            .json()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))?;
        Ok(envelope.item.normalize())
    }
}

impl SnapshotSource for StoreClient {
    async fn fetch_snapshot(&self) -> Result<Snapshot, RefreshError> {
        self.list_records().await.map_err(RefreshError::from)
    }
}

impl SettingsSource for StoreClient {
    async fn fetch_settings(&self) -> Result<DisplaySettings, RefreshError> {
        self.get_settings().await.map_err(RefreshError::from)
    }
}
