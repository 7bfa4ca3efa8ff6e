//! Subcommand handlers.
//!
//! Each handler takes the backend and the resolved [`AuthState`] explicitly
//! and returns the text to print. Persisting the backend is left to the
//! caller, guided by [`Output::dirty`].

use std::fmt::Write as _;

use chrono::Utc;
use hub_domain::forms::{FormErrors, ImageForm, InviteForm, LoginForm, PaperForm, SignUpForm};
use hub_domain::model::{CollectionDetail, InviteLink, NewPaper};
use hub_domain::repo::{
	AuthRepository, CollectionRepository, ConsentRepository, ImageRepository, PaperRepository, ParticipantRepository,
};
use hub_domain::{AccessError, AuthState, CollectionId, Landing, MemoryBackend, RepoError};
use hub_tags::{InputOutcome, Rejection};
use thiserror::Error;
use tracing::{debug, info};
use unicode_width::UnicodeWidthStr;

use crate::cli::{AddImageArgs, AddPaperArgs, Command};
use crate::config::TagsConfig;

#[derive(Debug, Error)]
pub enum CommandError {
	#[error(transparent)]
	Access(#[from] AccessError),

	#[error(transparent)]
	Repo(#[from] RepoError),

	#[error("{0}")]
	Form(#[from] FormErrors),

	/// An invitation batch item failed validation.
	#[error("{}", .0.describe())]
	Input(Rejection),

	/// The command is handled outside this module.
	#[error("`{0}` is not available here")]
	Unsupported(&'static str),
}

pub type Result<T> = std::result::Result<T, CommandError>;

/// Printed text plus whether the backend changed.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Output {
	pub text: String,
	pub dirty: bool,
}

impl Output {
	fn read(text: impl Into<String>) -> Self {
		Self {
			text: text.into(),
			dirty: false,
		}
	}

	fn changed(text: impl Into<String>) -> Self {
		Self {
			text: text.into(),
			dirty: true,
		}
	}
}

/// Resolves the stored session into an explicit state.
pub async fn resolve_auth(backend: &MemoryBackend) -> Result<AuthState> {
	Ok(AuthState::from(backend.current_session().await?))
}

pub async fn run(command: Command, backend: &MemoryBackend, tags: &TagsConfig) -> Result<Output> {
	let auth = resolve_auth(backend).await?;
	debug!(landing = ?auth.landing(), "auth resolved");
	match command {
		Command::Login { email, password } => login(backend, &email, &password).await,
		Command::Accept { email, token } => accept(backend, &email, &token).await,
		Command::Signup { password, confirm } => signup(backend, &auth, &password, &confirm).await,
		Command::Logout => {
			backend.sign_out().await?;
			Ok(Output::changed("Signed out."))
		}
		Command::Whoami => Ok(Output::read(whoami(&auth))),
		Command::Collections { limit } => collections(backend, &auth, limit).await,
		Command::Studies => studies(backend, &auth).await,
		Command::Show { collection } => show(backend, &auth, collection).await,
		Command::Stats => stats(backend, &auth).await,
		Command::Consent {
			collection,
			grant,
			revoke,
		} => {
			let change = match (grant, revoke) {
				(true, _) => Some(true),
				(_, true) => Some(false),
				_ => None,
			};
			consent(backend, &auth, collection, change).await
		}
		Command::Participants { collection } => participants(backend, &auth, collection).await,
		Command::Invite { collection, emails } => invite(backend, &auth, collection, &emails, tags).await,
		Command::AddPaper(args) => add_paper(backend, &auth, args).await,
		Command::AddImage(args) => add_image(backend, &auth, args).await,
		Command::Compose { .. } => Err(CommandError::Unsupported("compose")),
		Command::Demo { .. } => Err(CommandError::Unsupported("demo")),
	}
}

async fn login(backend: &MemoryBackend, email: &str, password: &str) -> Result<Output> {
	let payload = LoginForm::new(email, password).validate()?;
	let session = backend.sign_in(&payload.email, &payload.password).await?;
	info!(user = %session.user, "signed in");
	let auth = AuthState::Authenticated(session);
	Ok(Output::changed(format!("Signed in. {}", landing_hint(auth.landing()))))
}

async fn accept(backend: &MemoryBackend, email: &str, token: &str) -> Result<Output> {
	let session = backend.accept_invite(email, token).await?;
	info!(user = %session.user, "invitation accepted");
	let auth = AuthState::Authenticated(session);
	Ok(Output::changed(format!("Invitation accepted. {}", landing_hint(auth.landing()))))
}

async fn signup(backend: &MemoryBackend, auth: &AuthState, password: &str, confirm: &str) -> Result<Output> {
	auth.require_session()?;
	let password = SignUpForm::new(password, confirm).validate()?;
	let session = backend.sign_up(&password).await?;
	let auth = AuthState::Authenticated(session);
	Ok(Output::changed(format!("Password set. {}", landing_hint(auth.landing()))))
}

fn landing_hint(landing: Landing) -> &'static str {
	match landing {
		Landing::Wait => "Verifying access...",
		Landing::SignIn => "Sign in to continue.",
		Landing::SetPassword => "Choose a password with `signup` to finish setting up your account.",
		Landing::Admin => "Researcher dashboard: try `studies`.",
		Landing::Dashboard => "Participant dashboard: try `collections`.",
	}
}

pub fn whoami(auth: &AuthState) -> String {
	match auth.session() {
		Some(session) => format!(
			"{} ({:?})\n{}",
			session.email,
			session.role,
			landing_hint(auth.landing())
		),
		None => format!("Not signed in.\n{}", landing_hint(auth.landing())),
	}
}

async fn collections(backend: &MemoryBackend, auth: &AuthState, limit: Option<usize>) -> Result<Output> {
	let session = auth.require_session()?;
	let collections = backend.user_collections(session.user, limit).await?;
	if collections.is_empty() {
		return Ok(Output::read("You are not part of any collection yet."));
	}
	let rows = collections
		.iter()
		.map(|c| {
			vec![
				c.id.to_string(),
				c.title.clone(),
				c.status.label.clone(),
				c.created_at.format("%Y-%m-%d").to_string(),
			]
		})
		.collect();
	Ok(Output::read(table(&["ID", "TITLE", "STATUS", "CREATED"], rows)))
}

async fn studies(backend: &MemoryBackend, auth: &AuthState) -> Result<Output> {
	let session = auth.require_researcher()?;
	let summaries = backend.researcher_collections(session.user).await?;
	if summaries.is_empty() {
		return Ok(Output::read("No collections yet."));
	}
	let rows = summaries
		.iter()
		.map(|s| {
			vec![
				s.collection.id.to_string(),
				s.collection.title.clone(),
				s.collection.status.label.clone(),
				s.papers.to_string(),
				s.images.to_string(),
			]
		})
		.collect();
	Ok(Output::read(table(&["ID", "TITLE", "STATUS", "PAPERS", "IMAGES"], rows)))
}

async fn show(backend: &MemoryBackend, auth: &AuthState, id: CollectionId) -> Result<Output> {
	auth.require_session()?;
	let detail = backend.collection(id).await?;
	Ok(Output::read(render_detail(&detail)))
}

pub fn render_detail(detail: &CollectionDetail) -> String {
	let c = &detail.collection;
	let mut out = String::new();
	let _ = writeln!(out, "{} [{}]", c.title, c.status.label);
	let _ = writeln!(out, "{}", c.description);
	let _ = writeln!(out, "Created {}", c.created_at.format("%Y-%m-%d"));

	let _ = writeln!(out, "\nPapers ({})", detail.papers.len());
	for paper in &detail.papers {
		let _ = writeln!(out, "  {} ({})", paper.title, paper.published_at);
		let _ = writeln!(out, "    {}. {}", paper.authors, paper.journal);
		let _ = writeln!(out, "    {}", paper.link);
	}

	let _ = writeln!(out, "\nImages ({})", detail.images.len());
	for image in &detail.images {
		let _ = writeln!(out, "  {}: {}", image.title, image.url);
	}
	out.truncate(out.trim_end().len());
	out
}

async fn stats(backend: &MemoryBackend, auth: &AuthState) -> Result<Output> {
	let session = auth.require_session()?;
	let stats = backend.quick_stats(session.user).await?;
	Ok(Output::read(format!(
		"Total collections: {}\nActive collections: {}",
		stats.total_collections, stats.active_collections
	)))
}

async fn consent(backend: &MemoryBackend, auth: &AuthState, collection: CollectionId, change: Option<bool>) -> Result<Output> {
	let session = auth.require_session()?;
	let current = backend.consent(session.user, collection).await?;
	let Some(granted) = change else {
		return Ok(Output::read(format!(
			"Consent: {} (updated {})",
			current.status(),
			current.updated_at.format("%Y-%m-%d %H:%M")
		)));
	};
	let updated = backend.update_consent(current.profile, collection, granted).await?;
	info!(%collection, granted, "consent updated");
	Ok(Output::changed(format!("Consent is now {}.", updated.status())))
}

async fn participants(backend: &MemoryBackend, auth: &AuthState, collection: CollectionId) -> Result<Output> {
	auth.require_researcher()?;
	let participants = backend.participants(collection).await?;
	if participants.is_empty() {
		return Ok(Output::read("No participants yet."));
	}
	let rows = participants
		.iter()
		.map(|p| {
			vec![
				p.email.clone(),
				p.consent_label().to_owned(),
				p.joined_at.format("%Y-%m-%d").to_string(),
			]
		})
		.collect();
	Ok(Output::read(table(&["EMAIL", "CONSENT", "JOINED"], rows)))
}

/// Builds the invitation form for `collection` from the tag settings.
pub fn invite_form(collection: CollectionId, tags: &TagsConfig) -> InviteForm {
	InviteForm::with_options(collection, tags.window(), tags.separator)
}

async fn invite(
	backend: &MemoryBackend,
	auth: &AuthState,
	collection: CollectionId,
	emails: &str,
	tags: &TagsConfig,
) -> Result<Output> {
	auth.require_researcher()?;
	let mut form = invite_form(collection, tags);
	let input = form.emails_mut();
	let outcome = match input.set_pending(emails) {
		InputOutcome::Edited => input.commit(),
		other => other,
	};
	if let InputOutcome::Rejected(rejection) = outcome {
		return Err(CommandError::Input(rejection));
	}
	let outcome = form.submit(backend).await?;
	let mut text = outcome.summary();
	if outcome.already_enrolled > 0 {
		let _ = write!(text, " {} already enrolled.", outcome.already_enrolled);
	}
	if !outcome.links.is_empty() {
		let _ = write!(text, "\n{}", render_links(&outcome.links));
	}
	Ok(Output::changed(text))
}

/// One `accept` command line per invitation, for the researcher to pass on.
pub fn render_links(links: &[InviteLink]) -> String {
	links
		.iter()
		.map(|link| format!("  participation-hub accept --email {} --token {}", link.email, link.token))
		.collect::<Vec<_>>()
		.join("\n")
}

async fn add_paper(backend: &MemoryBackend, auth: &AuthState, args: AddPaperArgs) -> Result<Output> {
	auth.require_researcher()?;
	let form = PaperForm {
		title: args.title,
		authors: args.authors,
		journal: args.journal,
		description: args.description,
		published_at: args.published,
		link: args.link,
	};
	let paper: NewPaper = form.validate(Utc::now().date_naive())?;
	let paper = backend.add_paper(args.collection, paper).await?;
	Ok(Output::changed(format!("Added paper \"{}\" ({}).", paper.title, paper.id)))
}

async fn add_image(backend: &MemoryBackend, auth: &AuthState, args: AddImageArgs) -> Result<Output> {
	auth.require_researcher()?;
	let form = ImageForm {
		title: args.title,
		description: args.description,
		url: args.url,
	};
	let image = backend.add_image(args.collection, form.validate()?).await?;
	Ok(Output::changed(format!("Added image \"{}\" ({}).", image.title, image.id)))
}

/// Left-aligned columns sized by display width.
pub fn table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
	let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
	for row in &rows {
		for (width, cell) in widths.iter_mut().zip(row) {
			*width = (*width).max(cell.width());
		}
	}

	let mut out = String::new();
	let header: Vec<String> = headers.iter().map(|h| (*h).to_owned()).collect();
	for row in std::iter::once(&header).chain(&rows) {
		let mut line = String::new();
		for (i, (cell, width)) in row.iter().zip(&widths).enumerate() {
			if i > 0 {
				line.push_str("  ");
			}
			line.push_str(cell);
			if i + 1 < row.len() {
				line.extend(std::iter::repeat_n(' ', width - cell.width()));
			}
		}
		out.push_str(line.trim_end());
		out.push('\n');
	}
	out.pop();
	out
}
