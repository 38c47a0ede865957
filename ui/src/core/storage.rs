//! Durable client-side storage.
//!
//! The substrate is a keyed string store that survives reloads: browser
//! `localStorage` on wasm, a JSON file in the platform data directory on
//! native builds. On top of it sits the local fallback store for reports,
//! which keeps the records a submission could not deliver to the server.

use api::Report;
use thiserror::Error;

const REPORTS_KEY: &str = "fixline.reports.v1";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("durable storage is unavailable")]
    Unavailable,
    #[error("storage backend failed: {0}")]
    Backend(String),
    #[error("stored data is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

// --- keyed substrate ---------------------------------------------------

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .and_then(|win| win.local_storage().ok().flatten())
        .ok_or(StorageError::Unavailable)
}

#[cfg(target_arch = "wasm32")]
pub fn get_value(key: &str) -> Result<Option<String>, StorageError> {
    local_storage()?
        .get_item(key)
        .map_err(|_| StorageError::Backend(format!("read of {key} rejected")))
}

#[cfg(target_arch = "wasm32")]
pub fn set_value(key: &str, value: &str) -> Result<(), StorageError> {
    local_storage()?
        .set_item(key, value)
        .map_err(|_| StorageError::Backend(format!("write of {key} rejected")))
}

#[cfg(not(target_arch = "wasm32"))]
mod file_store {
    use std::collections::BTreeMap;
    use std::path::{Path, PathBuf};

    use super::StorageError;

    pub(super) fn store_path() -> Result<PathBuf, StorageError> {
        let dirs = directories::ProjectDirs::from("org", "Fixline", "Fixline")
            .ok_or(StorageError::Unavailable)?;
        Ok(dirs.data_dir().join("store.json"))
    }

    pub(super) fn read_map(path: &Path) -> Result<BTreeMap<String, String>, StorageError> {
        match std::fs::read_to_string(path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(StorageError::Backend(err.to_string())),
        }
    }

    pub(super) fn write_map(
        path: &Path,
        map: &BTreeMap<String, String>,
    ) -> Result<(), StorageError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|err| StorageError::Backend(err.to_string()))?;
        }
        let raw = serde_json::to_string(map)?;
        std::fs::write(path, raw).map_err(|err| StorageError::Backend(err.to_string()))
    }

    pub(super) fn get_value_at(path: &Path, key: &str) -> Result<Option<String>, StorageError> {
        Ok(read_map(path)?.get(key).cloned())
    }

    pub(super) fn set_value_at(path: &Path, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = read_map(path)?;
        map.insert(key.to_string(), value.to_string());
        write_map(path, &map)
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn get_value(key: &str) -> Result<Option<String>, StorageError> {
    file_store::get_value_at(&file_store::store_path()?, key)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn set_value(key: &str, value: &str) -> Result<(), StorageError> {
    file_store::set_value_at(&file_store::store_path()?, key, value)
}

// --- local fallback store ----------------------------------------------

fn decode_reports(raw: Option<&str>) -> Result<Vec<Report>, StorageError> {
    match raw {
        Some(raw) if !raw.trim().is_empty() => Ok(serde_json::from_str(raw)?),
        _ => Ok(Vec::new()),
    }
}

fn encode_reports(reports: &[Report]) -> Result<String, StorageError> {
    Ok(serde_json::to_string(reports)?)
}

/// Handle to the substrate location holding the fallback collection.
/// [`open`](Self::open) targets the platform store; on native builds,
/// [`at`](Self::at) points the same operations at any file, which is how
/// the tests stay out of the real data directory.
#[derive(Debug, Clone)]
pub struct ReportStore {
    #[cfg(not(target_arch = "wasm32"))]
    path: std::path::PathBuf,
}

impl ReportStore {
    pub fn open() -> Result<Self, StorageError> {
        #[cfg(not(target_arch = "wasm32"))]
        {
            Ok(Self {
                path: file_store::store_path()?,
            })
        }
        #[cfg(target_arch = "wasm32")]
        {
            Ok(Self {})
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn at(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        #[cfg(not(target_arch = "wasm32"))]
        return file_store::get_value_at(&self.path, key);
        #[cfg(target_arch = "wasm32")]
        get_value(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        #[cfg(not(target_arch = "wasm32"))]
        return file_store::set_value_at(&self.path, key, value);
        #[cfg(target_arch = "wasm32")]
        set_value(key, value)
    }

    /// Full fallback collection in insertion order.
    pub fn load_reports(&self) -> Result<Vec<Report>, StorageError> {
        decode_reports(self.get(REPORTS_KEY)?.as_deref())
    }

    /// Appends one record. Id freshness is the caller's concern; nothing
    /// else is enforced here.
    pub fn append_report(&self, report: &Report) -> Result<(), StorageError> {
        let mut reports = self.load_reports()?;
        reports.push(report.clone());
        self.set(REPORTS_KEY, &encode_reports(&reports)?)
    }

    /// Seeds the demonstration dataset, but only into an empty
    /// collection. Returns whether seeding happened; existing data is
    /// never overwritten.
    pub fn seed_if_empty(&self, samples: &[Report]) -> Result<bool, StorageError> {
        if self.load_reports()?.is_empty() {
            self.set(REPORTS_KEY, &encode_reports(samples)?)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

pub fn load_reports() -> Result<Vec<Report>, StorageError> {
    ReportStore::open()?.load_reports()
}

pub fn append_report(report: &Report) -> Result<(), StorageError> {
    ReportStore::open()?.append_report(report)
}

pub fn seed_if_empty(samples: &[Report]) -> Result<bool, StorageError> {
    ReportStore::open()?.seed_if_empty(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::seed;

    fn sample(id: &str) -> Report {
        Report {
            id: id.to_string(),
            title: "Leaky tap".into(),
            description: "Water tap near the canteen entrance keeps dripping.".into(),
            category: "Infrastructure".into(),
            department: None,
            location: Some("Main Canteen".into()),
            priority: None,
            status: api::ReportStatus::Pending,
            created_at: "2026-08-01T10:00:00Z".into(),
            images: Vec::new(),
            reporter: None,
        }
    }

    #[test]
    fn decode_of_missing_raw_is_empty() {
        assert!(decode_reports(None).unwrap().is_empty());
        assert!(decode_reports(Some("  ")).unwrap().is_empty());
    }

    #[test]
    fn encode_decode_preserves_insertion_order() {
        let reports = vec![sample("_a"), sample("_b"), sample("_c")];
        let raw = encode_reports(&reports).unwrap();
        let back = decode_reports(Some(&raw)).unwrap();
        let ids: Vec<&str> = back.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["_a", "_b", "_c"]);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn file_substrate_round_trips_values() {
        let path = std::env::temp_dir().join(format!("fixline-store-{}.json", uuid::Uuid::new_v4()));

        assert_eq!(file_store::get_value_at(&path, "theme").unwrap(), None);
        file_store::set_value_at(&path, "theme", "dark").unwrap();
        file_store::set_value_at(&path, "lang", "en").unwrap();
        assert_eq!(
            file_store::get_value_at(&path, "theme").unwrap().as_deref(),
            Some("dark")
        );

        std::fs::remove_file(&path).ok();
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn scratch_store() -> (std::path::PathBuf, ReportStore) {
        let path = std::env::temp_dir().join(format!("fixline-store-{}.json", uuid::Uuid::new_v4()));
        let store = ReportStore::at(&path);
        (path, store)
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn seeding_fills_an_empty_store_exactly_once() {
        let (path, store) = scratch_store();
        let samples = seed::sample_reports();

        assert!(store.seed_if_empty(&samples).unwrap());
        assert_eq!(store.load_reports().unwrap().len(), samples.len());

        // A second seed is a no-op.
        assert!(!store.seed_if_empty(&samples).unwrap());
        assert_eq!(store.load_reports().unwrap().len(), samples.len());

        std::fs::remove_file(&path).ok();
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn seeding_never_overwrites_existing_records() {
        let (path, store) = scratch_store();
        store.append_report(&sample("_kept")).unwrap();

        assert!(!store.seed_if_empty(&seed::sample_reports()).unwrap());

        let ids: Vec<String> = store
            .load_reports()
            .unwrap()
            .iter()
            .map(|report| report.id.clone())
            .collect();
        assert_eq!(ids, ["_kept"]);

        std::fs::remove_file(&path).ok();
    }
}
