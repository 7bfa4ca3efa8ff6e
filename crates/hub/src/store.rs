//! JSON file persistence of the in-memory backend.

use std::path::{Path, PathBuf};

use hub_domain::memory::Snapshot;
use hub_domain::MemoryBackend;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StoreError {
	#[error("I/O error on {path}: {error}")]
	Io { path: PathBuf, error: std::io::Error },

	/// The data file could not be decoded, or the snapshot encoded.
	#[error("corrupt data file {path}: {error}")]
	Json { path: PathBuf, error: serde_json::Error },
}

/// Data file holding one [`Snapshot`].
#[derive(Debug, Clone)]
pub struct JsonStore {
	path: PathBuf,
}

impl JsonStore {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn exists(&self) -> bool {
		self.path.exists()
	}

	/// Reads the snapshot; a missing file is an empty one.
	pub fn load(&self) -> Result<Snapshot, StoreError> {
		let text = match std::fs::read_to_string(&self.path) {
			Ok(text) => text,
			Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
				debug!(path = %self.path.display(), "no data file, starting empty");
				return Ok(Snapshot::default());
			}
			Err(error) => return Err(self.io(error)),
		};
		serde_json::from_str(&text).map_err(|error| StoreError::Json {
			path: self.path.clone(),
			error,
		})
	}

	pub fn open(&self) -> Result<MemoryBackend, StoreError> {
		self.load().map(MemoryBackend::from_snapshot)
	}

	/// Writes the snapshot through a sibling temp file so a crash never leaves
	/// a truncated data file.
	pub fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
		if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
			std::fs::create_dir_all(parent).map_err(|e| self.io(e))?;
		}
		let text = serde_json::to_string_pretty(snapshot).map_err(|error| StoreError::Json {
			path: self.path.clone(),
			error,
		})?;
		let tmp = self.path.with_extension("json.tmp");
		std::fs::write(&tmp, text).map_err(|e| self.io(e))?;
		std::fs::rename(&tmp, &self.path).map_err(|e| self.io(e))?;
		debug!(path = %self.path.display(), users = snapshot.users.len(), "data saved");
		Ok(())
	}

	fn io(&self, error: std::io::Error) -> StoreError {
		StoreError::Io {
			path: self.path.clone(),
			error,
		}
	}
}

#[cfg(test)]
mod tests {
	use hub_domain::model::CollectionStatus;
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn missing_file_loads_empty() {
		let dir = tempfile::tempdir().unwrap();
		let store = JsonStore::new(dir.path().join("hub.json"));
		assert!(!store.exists());
		assert_eq!(store.load().unwrap(), Snapshot::default());
	}

	#[test]
	fn save_then_open_restores_state() {
		let dir = tempfile::tempdir().unwrap();
		let store = JsonStore::new(dir.path().join("nested").join("hub.json"));

		let backend = MemoryBackend::new();
		let lead = backend.add_user("lead@uni.edu", Some("researcher-pass"), true);
		backend.add_collection(lead, "Sleep study", "Nightly logs", CollectionStatus::active(), chrono::Utc::now());
		store.save(&backend.snapshot()).unwrap();

		let reopened = store.open().unwrap();
		assert_eq!(reopened.snapshot(), backend.snapshot());
		assert!(!dir.path().join("nested").join("hub.json.tmp").exists());
	}

	#[test]
	fn corrupt_file_is_reported() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("hub.json");
		std::fs::write(&path, "{ not json").unwrap();
		let err = JsonStore::new(&path).load().unwrap_err();
		assert!(matches!(err, StoreError::Json { .. }));
	}
}
