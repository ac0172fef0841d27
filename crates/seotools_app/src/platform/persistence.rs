use std::path::Path;

use seotools_engine::{ensure_storage_dir, FileKeyValueStore, HistoryStore};
use seotools_logging::{client_error, client_info};

/// Opens the history kept under `storage_dir`, creating the directory if
/// needed.
///
/// An unusable directory is logged and the store is returned anyway: reads
/// come back empty and writes are logged and dropped.
pub(crate) fn open_history_store(storage_dir: &Path) -> HistoryStore<FileKeyValueStore> {
    match ensure_storage_dir(storage_dir) {
        Ok(()) => client_info!("Using storage directory {:?}", storage_dir),
        Err(err) => client_error!(
            "History unavailable, storage {:?} is unusable: {}",
            storage_dir,
            err
        ),
    }
    HistoryStore::new(FileKeyValueStore::new(storage_dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use seotools_core::{HistoryEntry, TaskStatus};
    use tempfile::TempDir;

    #[test]
    fn creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("state").join("seotools");
        let store = open_history_store(&nested);
        assert!(nested.is_dir());
        assert!(store.get_all().is_empty());
    }

    #[test]
    fn file_in_place_of_directory_degrades_to_empty_history() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("occupied");
        std::fs::write(&file, "x").unwrap();

        let store = open_history_store(&file);
        assert!(store.get_all().is_empty());

        store.add(HistoryEntry {
            task_id: "t-1".to_string(),
            tool: "robots-check".to_string(),
            url: "https://example.com".to_string(),
            status: TaskStatus::Pending,
            timestamp: "2024-05-01T10:00:00Z".to_string(),
        });
        store.discard();
        assert!(store.get_all().is_empty());
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "x");
    }
}
