use std::fs::OpenOptions;
use std::path::PathBuf;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Filter override, in `EnvFilter` syntax.
pub const ENV_LOG: &str = "HUB_LOG";
/// Directory for per-process log files instead of stderr.
pub const ENV_LOG_DIR: &str = "HUB_LOG_DIR";

pub fn setup_tracing(verbose: bool) {
	let filter = || {
		EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| {
			if verbose {
				EnvFilter::new("participation_hub=debug,hub_domain=debug,hub_tags=trace,info")
			} else {
				EnvFilter::new("participation_hub=info,warn")
			}
		})
	};

	if let Some(log_dir) = std::env::var_os(ENV_LOG_DIR).map(PathBuf::from)
		&& std::fs::create_dir_all(&log_dir).is_ok()
	{
		let log_path = log_dir.join(format!("participation-hub.{}.log", std::process::id()));
		if let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_path) {
			let file_layer = tracing_subscriber::fmt::layer().with_writer(file).with_ansi(false).with_target(true);
			tracing_subscriber::registry().with(filter()).with(file_layer).init();
			tracing::debug!(path = ?log_path, "tracing initialized");
			return;
		}
	}

	tracing_subscriber::registry()
		.with(filter())
		.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
		.init();
}
