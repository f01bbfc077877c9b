//! File-backed record and settings stores.
//!
//! State lives in memory behind an `RwLock` and is persisted to a JSON
//! file after every mutation, via a temp-file-then-rename so a crash
//! mid-write never leaves a truncated store on disk. The write lock is
//! held across the whole read-modify-persist sequence.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use chrono::Local;
use thiserror::Error;

use partsdash_core::record::{DEFAULT_HIGH_STATUS, DEFAULT_LOW_STATUS};
use partsdash_core::{normalize_brand, InventoryRecord, NewRecord, RecordId, RecordPatch};
use partsdash_engine::DisplaySettings;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("store I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// How many timestamped store backups to keep before pruning.
pub const MAX_BACKUPS: usize = 5;

/// Outcome of a `POST`: a brand-new record or a quantity merge into an
/// existing family/part pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    Merged,
}

/// The inventory record store.
pub struct JsonStore {
    path: PathBuf,
    state: RwLock<Vec<InventoryRecord>>,
}

impl JsonStore {
    /// Open the store, loading existing records if the file is present.
    ///
    /// A malformed file is logged and treated as empty rather than
    /// refusing to start; the next successful persist replaces it.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let records = match fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice::<Vec<InventoryRecord>>(&bytes) {
                Ok(records) => records,
                Err(err) => {
                    tracing::error!(path = %path.display(), %err, "record store unreadable; starting empty");
                    Vec::new()
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(err) => return Err(err.into()),
        };

        tracing::info!(path = %path.display(), records = records.len(), "record store opened");
        Ok(Self {
            path,
            state: RwLock::new(records),
        })
    }

    pub fn list(&self) -> Vec<InventoryRecord> {
        self.state.read().expect("store lock poisoned").clone()
    }

    pub fn get(&self, id: RecordId) -> Option<InventoryRecord> {
        self.state
            .read()
            .expect("store lock poisoned")
            .iter()
            .find(|r| r.id == id)
            .cloned()
    }

    /// Create a record, or merge quantities when the same family/part
    /// pair already exists. Ids are assigned as max + 1.
    pub fn add_or_merge(
        &self,
        new: NewRecord,
    ) -> Result<(InventoryRecord, AddOutcome), StoreError> {
        validate_thresholds(new.low_status, new.high_status)?;
        if new.product_family.trim().is_empty() || new.spare_part.trim().is_empty() {
            return Err(StoreError::Validation(
                "product_family and spare_part cannot be empty".to_string(),
            ));
        }

        let mut records = self.state.write().expect("store lock poisoned");

        if let Some(existing) = records
            .iter_mut()
            .find(|r| r.product_family == new.product_family && r.spare_part == new.spare_part)
        {
            existing.quantity = existing.quantity.saturating_add(new.quantity);
            let merged = existing.clone();
            persist(&self.path, &records)?;
            tracing::info!(record_id = %merged.id, quantity = merged.quantity, "merged quantity into existing record");
            return Ok((merged, AddOutcome::Merged));
        }

        let id = RecordId(records.iter().map(|r| r.id.0).max().unwrap_or(0) + 1);
        let record = InventoryRecord {
            id,
            brand: normalize_brand(new.brand),
            product_family: new.product_family,
            spare_part: new.spare_part,
            quantity: new.quantity,
            low_status: new.low_status.unwrap_or(DEFAULT_LOW_STATUS),
            high_status: new.high_status.unwrap_or(DEFAULT_HIGH_STATUS),
        };
        records.push(record.clone());
        persist(&self.path, &records)?;
        tracing::info!(record_id = %record.id, brand = %record.brand, "record added");
        Ok((record, AddOutcome::Added))
    }

    /// Apply a partial update. Threshold edits must keep `low < high`.
    pub fn patch(&self, id: RecordId, patch: RecordPatch) -> Result<InventoryRecord, StoreError> {
        let mut records = self.state.write().expect("store lock poisoned");
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound)?;

        let low = patch.low_status.unwrap_or(record.low_status);
        let high = patch.high_status.unwrap_or(record.high_status);
        validate_thresholds(Some(low), Some(high))?;

        if let Some(brand) = patch.brand {
            record.brand = normalize_brand(Some(brand));
        }
        if let Some(family) = patch.product_family {
            record.product_family = family;
        }
        if let Some(part) = patch.spare_part {
            record.spare_part = part;
        }
        if let Some(quantity) = patch.quantity {
            record.quantity = quantity;
        }
        record.low_status = low;
        record.high_status = high;

        let updated = record.clone();
        persist(&self.path, &records)?;
        tracing::info!(record_id = %updated.id, "record updated");
        Ok(updated)
    }

    /// Decrement quantity, clamped at zero.
    pub fn subtract(&self, id: RecordId, quantity: u32) -> Result<InventoryRecord, StoreError> {
        let mut records = self.state.write().expect("store lock poisoned");
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound)?;

        let old = record.quantity;
        record.quantity = record.quantity.saturating_sub(quantity);
        let updated = record.clone();
        persist(&self.path, &records)?;
        tracing::info!(
            record_id = %updated.id,
            old_quantity = old,
            new_quantity = updated.quantity,
            tier = %updated.tier(),
            "quantity subtracted"
        );
        Ok(updated)
    }

    pub fn delete(&self, id: RecordId) -> Result<(), StoreError> {
        let mut records = self.state.write().expect("store lock poisoned");
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(StoreError::NotFound);
        }
        persist(&self.path, &records)?;
        tracing::info!(record_id = %id, "record deleted");
        Ok(())
    }

    /// Copy the persisted store file into `backup_dir` as a timestamped
    /// snapshot, pruning the oldest copies beyond `max_backups`.
    ///
    /// Nothing persisted yet means nothing to back up; that returns
    /// `None` rather than an error.
    pub fn backup(
        &self,
        backup_dir: &Path,
        max_backups: usize,
    ) -> Result<Option<PathBuf>, StoreError> {
        // Read lock so a persist can't swap the file mid-copy.
        let _records = self.state.read().expect("store lock poisoned");
        if !self.path.exists() {
            tracing::warn!("no store file to back up yet");
            return Ok(None);
        }

        fs::create_dir_all(backup_dir)?;
        let stamp = Local::now().format("%Y-%m-%d-%H%M");
        let backup_path = backup_dir.join(format!("inventory-{stamp}.json"));
        fs::copy(&self.path, &backup_path)?;
        tracing::info!(path = %backup_path.display(), "store backup created");

        prune_backups(backup_dir, max_backups)?;
        Ok(Some(backup_path))
    }
}

fn prune_backups(backup_dir: &Path, max_backups: usize) -> Result<(), StoreError> {
    let mut backups: Vec<PathBuf> = fs::read_dir(backup_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("inventory-") && n.ends_with(".json"))
        })
        .collect();
    if backups.len() <= max_backups {
        return Ok(());
    }

    // Timestamped names sort chronologically.
    backups.sort();
    for old in &backups[..backups.len() - max_backups] {
        fs::remove_file(old)?;
        tracing::info!(path = %old.display(), "old backup pruned");
    }
    Ok(())
}

/// The dashboard settings store.
pub struct SettingsStore {
    path: PathBuf,
    state: RwLock<DisplaySettings>,
}

impl SettingsStore {
    /// Open the store; a missing or unreadable file yields defaults.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let settings = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|err| {
                tracing::error!(path = %path.display(), %err, "settings unreadable; using defaults");
                DisplaySettings::default()
            }),
            Err(_) => DisplaySettings::default(),
        };
        Self {
            path,
            state: RwLock::new(settings),
        }
    }

    pub fn get(&self) -> DisplaySettings {
        self.state.read().expect("settings lock poisoned").clone()
    }

    /// Clamp and persist a full settings object; returns what was saved.
    pub fn save(&self, settings: DisplaySettings) -> Result<DisplaySettings, StoreError> {
        let clamped = settings.clamped();
        let mut state = self.state.write().expect("settings lock poisoned");
        write_atomic(&self.path, &serde_json::to_vec_pretty(&clamped).expect("settings serialize"))?;
        *state = clamped.clone();
        tracing::info!(?clamped, "dashboard settings saved");
        Ok(clamped)
    }
}

fn validate_thresholds(low: Option<u32>, high: Option<u32>) -> Result<(), StoreError> {
    if let (Some(low), Some(high)) = (low, high) {
        if low >= high {
            return Err(StoreError::Validation(format!(
                "low threshold ({low}) must be below high threshold ({high})"
            )));
        }
    }
    Ok(())
}

fn persist(path: &Path, records: &[InventoryRecord]) -> Result<(), StoreError> {
    let bytes = serde_json::to_vec_pretty(records).expect("record serialize");
    write_atomic(path, &bytes)?;
    Ok(())
}

fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)
}
