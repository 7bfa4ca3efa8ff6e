//! Participation Hub command-line front end.

mod cli;
mod commands;
mod compose;
mod config;
mod demo;
mod logging;
mod store;

use anyhow::{Context, bail};
use clap::Parser;
use tracing::{debug, info};

use crate::cli::{Cli, Command};
use crate::compose::ComposeView;
use crate::config::HubConfig;
use crate::store::JsonStore;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	logging::setup_tracing(cli.verbose);

	let config = HubConfig::load(cli.config.as_deref())?;
	let store = JsonStore::new(cli.data.clone().unwrap_or_else(|| config.data_path()));
	debug!(data = %store.path().display(), "starting");

	match cli.command {
		Command::Demo { force } => {
			if store.exists() && !force {
				bail!("{} already exists, pass --force to replace it", store.path().display());
			}
			let backend = hub_domain::MemoryBackend::new();
			demo::seed(&backend).await?;
			store.save(&backend.snapshot())?;
			println!(
				"Demo data written to {}.\nSign in as {} or {} with password {}.",
				store.path().display(),
				demo::RESEARCHER_EMAIL,
				demo::PARTICIPANT_EMAIL,
				demo::PASSWORD
			);
		}
		Command::Compose { collection } => {
			let backend = store.open()?;
			let auth = commands::resolve_auth(&backend).await?;
			auth.require_researcher()?;

			let form = commands::invite_form(collection, &config.tags);
			let mut view = ComposeView::new(form, 24);
			let sent = compose::terminal::run(&mut view, &backend).await.context("terminal error")?;
			if !sent.is_empty() {
				store.save(&backend.snapshot())?;
				info!(%collection, "invitations saved");
			}
			let links: Vec<_> = sent.into_iter().flat_map(|outcome| outcome.links).collect();
			if !links.is_empty() {
				println!("{}", commands::render_links(&links));
			}
		}
		command => {
			let backend = store.open()?;
			let output = commands::run(command, &backend, &config.tags).await?;
			if output.dirty {
				store.save(&backend.snapshot())?;
			}
			println!("{}", output.text);
		}
	}
	Ok(())
}
