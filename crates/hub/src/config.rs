//! TOML configuration.

use std::path::{Path, PathBuf};

use hub_tags::{DEFAULT_SEPARATOR, WindowConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming the configuration file.
pub const ENV_CONFIG: &str = "HUB_CONFIG";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// The file is not valid TOML or has unknown keys.
	#[error("invalid config {path}: {error}")]
	Parse {
		/// Path to the offending file.
		path: PathBuf,
		/// The underlying parse error.
		error: toml::de::Error,
	},
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HubConfig {
	pub data: DataConfig,
	pub tags: TagsConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataConfig {
	/// JSON data file; the user data dir when unset.
	pub path: Option<PathBuf>,
}

/// Tag input tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TagsConfig {
	pub baseline: usize,
	pub scroll_increment: usize,
	pub fill_increment: usize,
	pub scroll_threshold: f32,
	pub separator: char,
}

impl Default for TagsConfig {
	fn default() -> Self {
		let window = WindowConfig::default();
		Self {
			baseline: window.baseline,
			scroll_increment: window.scroll_increment,
			fill_increment: window.fill_increment,
			scroll_threshold: window.scroll_threshold,
			separator: DEFAULT_SEPARATOR,
		}
	}
}

impl TagsConfig {
	pub fn window(&self) -> WindowConfig {
		WindowConfig {
			baseline: self.baseline,
			scroll_increment: self.scroll_increment.max(1),
			fill_increment: self.fill_increment.max(1),
			scroll_threshold: self.scroll_threshold,
		}
	}
}

impl HubConfig {
	/// Loads configuration.
	///
	/// An explicit path (argument or [`ENV_CONFIG`]) must exist; the default
	/// location falls back to built-in defaults when absent.
	pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
		let explicit = explicit.map(Path::to_path_buf).or_else(|| std::env::var_os(ENV_CONFIG).map(PathBuf::from));
		match explicit {
			Some(path) => Self::read(&path),
			None => match default_config_path() {
				Some(path) if path.exists() => Self::read(&path),
				_ => Ok(Self::default()),
			},
		}
	}

	pub fn read(path: &Path) -> Result<Self, ConfigError> {
		let text = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		toml::from_str(&text).map_err(|error| ConfigError::Parse {
			path: path.to_path_buf(),
			error,
		})
	}

	pub fn data_path(&self) -> PathBuf {
		self.data.path.clone().unwrap_or_else(default_data_path)
	}
}

pub fn default_config_path() -> Option<PathBuf> {
	dirs::config_dir().map(|dir| dir.join("participation-hub").join("config.toml"))
}

pub fn default_data_path() -> PathBuf {
	dirs::data_dir()
		.unwrap_or_else(|| PathBuf::from("."))
		.join("participation-hub")
		.join("hub.json")
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn empty_file_yields_defaults() {
		let config: HubConfig = toml::from_str("").unwrap();
		assert_eq!(config, HubConfig::default());
		assert_eq!(config.tags.window(), WindowConfig::default());
	}

	#[test]
	fn partial_tags_section_keeps_other_defaults() {
		let config: HubConfig = toml::from_str("[tags]\nbaseline = 50\nseparator = \";\"\n").unwrap();
		assert_eq!(config.tags.baseline, 50);
		assert_eq!(config.tags.separator, ';');
		assert_eq!(config.tags.scroll_increment, WindowConfig::DEFAULT_SCROLL_INCREMENT);
	}

	#[test]
	fn zero_increments_are_raised() {
		let tags = TagsConfig {
			scroll_increment: 0,
			fill_increment: 0,
			..TagsConfig::default()
		};
		assert_eq!(tags.window().scroll_increment, 1);
		assert_eq!(tags.window().fill_increment, 1);
	}

	#[test]
	fn reads_file_and_reports_errors_with_path() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "[data]\npath = \"/tmp/hub.json\"").unwrap();
		let config = HubConfig::read(file.path()).unwrap();
		assert_eq!(config.data_path(), PathBuf::from("/tmp/hub.json"));

		let mut bad = tempfile::NamedTempFile::new().unwrap();
		writeln!(bad, "[tags]\nunknown = 1").unwrap();
		let err = HubConfig::read(bad.path()).unwrap_err();
		assert!(matches!(err, ConfigError::Parse { .. }));
		assert!(err.to_string().contains(&bad.path().display().to_string()));
	}

	#[test]
	fn explicit_missing_file_is_an_error() {
		let dir = tempfile::tempdir().unwrap();
		let err = HubConfig::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
		assert!(matches!(err, ConfigError::Io { .. }));
	}
}
