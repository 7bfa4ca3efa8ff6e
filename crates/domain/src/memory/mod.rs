//! In-memory backend implementing every repository trait.
//!
//! State lives in a [`Snapshot`] behind a lock so front ends can persist it
//! between runs and tests can seed it directly.

mod snapshot;
#[cfg(test)]
mod tests;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::debug;
use uuid::Uuid;

pub use self::snapshot::{CollectionRecord, Invitation, Membership, Snapshot, UserRecord};
use crate::error::{RepoError, Result};
use crate::ids::{CollectionId, ImageId, PaperId, ProfileId, UserId};
use crate::model::{
	Collection, CollectionDetail, CollectionStatus, CollectionSummary, Consent, Image, InviteLink, InviteOutcome, NewImage,
	NewPaper, Paper, Participant, QuickStats,
};
use crate::repo::{
	AuthRepository, CollectionRepository, ConsentRepository, ImageRepository, PaperRepository, ParticipantRepository,
};
use crate::session::{Role, Session};

#[derive(Debug, Default)]
pub struct MemoryBackend {
	state: RwLock<Snapshot>,
}

impl MemoryBackend {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn from_snapshot(snapshot: Snapshot) -> Self {
		Self {
			state: RwLock::new(snapshot),
		}
	}

	pub fn snapshot(&self) -> Snapshot {
		self.state.read().clone()
	}

	/// Registers an account. `password: None` models an invited account.
	pub fn add_user(&self, email: &str, password: Option<&str>, researcher: bool) -> UserId {
		let mut state = self.state.write();
		let id = UserId::new();
		let profile = state.next_profile_id();
		state.users.push(UserRecord {
			id,
			profile,
			email: email.to_owned(),
			password: password.map(str::to_owned),
			researcher,
		});
		id
	}

	pub fn add_collection(
		&self,
		researcher: UserId,
		title: &str,
		description: &str,
		status: CollectionStatus,
		created_at: DateTime<Utc>,
	) -> CollectionId {
		let id = CollectionId::new();
		self.state.write().collections.push(CollectionRecord {
			collection: Collection {
				id,
				title: title.to_owned(),
				description: description.to_owned(),
				status,
				participants: 0,
				created_at,
			},
			researcher,
			papers: Vec::new(),
			images: Vec::new(),
		});
		id
	}

	/// Adds `user` to `collection`. Returns false if either is unknown.
	pub fn enroll(&self, user: UserId, collection: CollectionId, consent: bool) -> bool {
		let mut state = self.state.write();
		let Some(profile) = state.user(user).map(|u| u.profile) else {
			return false;
		};
		if state.record(collection).is_none() {
			return false;
		}
		if !state.is_member(profile, collection) {
			let now = Utc::now();
			state.memberships.push(Membership {
				profile,
				collection,
				consent,
				consent_updated_at: now,
				joined_at: now,
			});
		}
		true
	}

	fn session_for(record: &UserRecord) -> Session {
		Session {
			user: record.id,
			email: record.email.clone(),
			role: if record.researcher { Role::Researcher } else { Role::Participant },
			has_password: record.password.is_some(),
		}
	}

	fn profile_of(state: &Snapshot, user: UserId) -> Result<ProfileId> {
		state.user(user).map(|u| u.profile).ok_or_else(|| RepoError::not_found("user", user))
	}
}

#[async_trait]
impl AuthRepository for MemoryBackend {
	async fn current_session(&self) -> Result<Option<Session>> {
		let state = self.state.read();
		Ok(state.session.and_then(|id| state.user(id)).map(Self::session_for))
	}

	async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
		let mut state = self.state.write();
		let record = state
			.user_by_email(email.trim())
			.filter(|u| u.password.as_deref() == Some(password))
			.ok_or(RepoError::InvalidCredentials)?;
		let session = Self::session_for(record);
		state.session = Some(session.user);
		debug!(user = %session.user, "signed in");
		Ok(session)
	}

	async fn accept_invite(&self, email: &str, token: &str) -> Result<Session> {
		let mut state = self.state.write();
		let email = email.trim();
		let token = token.trim();
		let invitation = state
			.invitations
			.iter_mut()
			.find(|i| i.email.eq_ignore_ascii_case(email) && i.token.as_deref() == Some(token))
			.ok_or(RepoError::InvalidCredentials)?;
		invitation.token = None;
		let record = state.user_by_email(email).ok_or(RepoError::InvalidCredentials)?;
		let session = Self::session_for(record);
		state.session = Some(session.user);
		debug!(user = %session.user, "invitation accepted");
		Ok(session)
	}

	async fn sign_up(&self, password: &str) -> Result<Session> {
		let mut state = self.state.write();
		let user = state.session.ok_or(RepoError::Unauthorized)?;
		let record = state
			.users
			.iter_mut()
			.find(|u| u.id == user)
			.ok_or_else(|| RepoError::not_found("user", user))?;
		record.password = Some(password.to_owned());
		Ok(Self::session_for(record))
	}

	async fn sign_out(&self) -> Result<()> {
		self.state.write().session = None;
		Ok(())
	}

	async fn is_researcher(&self, user: UserId) -> Result<bool> {
		Ok(self.state.read().user(user).is_some_and(|u| u.researcher))
	}
}

#[async_trait]
impl CollectionRepository for MemoryBackend {
	async fn user_collections(&self, user: UserId, limit: Option<usize>) -> Result<Vec<Collection>> {
		let state = self.state.read();
		let profile = Self::profile_of(&state, user)?;
		let mut collections: Vec<Collection> = state
			.memberships
			.iter()
			.filter(|m| m.profile == profile)
			.filter_map(|m| state.record(m.collection))
			.map(|r| r.collection.clone())
			.collect();
		collections.sort_by(|a, b| b.created_at.cmp(&a.created_at));
		collections.truncate(limit.unwrap_or(usize::MAX));
		Ok(collections)
	}

	async fn researcher_collections(&self, researcher: UserId) -> Result<Vec<CollectionSummary>> {
		let state = self.state.read();
		let mut summaries: Vec<CollectionSummary> = state
			.collections
			.iter()
			.filter(|r| r.researcher == researcher)
			.map(|r| CollectionSummary {
				collection: r.collection.clone(),
				papers: r.papers.len(),
				images: r.images.len(),
			})
			.collect();
		summaries.sort_by(|a, b| b.collection.created_at.cmp(&a.collection.created_at));
		Ok(summaries)
	}

	async fn collection(&self, id: CollectionId) -> Result<CollectionDetail> {
		let state = self.state.read();
		let record = state.record(id).ok_or_else(|| RepoError::not_found("collection", id))?;
		let mut papers = record.papers.clone();
		papers.sort_by(|a, b| b.published_at.cmp(&a.published_at));
		Ok(CollectionDetail {
			collection: record.collection.clone(),
			papers,
			images: record.images.clone(),
		})
	}

	async fn quick_stats(&self, user: UserId) -> Result<QuickStats> {
		let state = self.state.read();
		let profile = Self::profile_of(&state, user)?;
		let joined: Vec<&CollectionRecord> = state
			.memberships
			.iter()
			.filter(|m| m.profile == profile)
			.filter_map(|m| state.record(m.collection))
			.collect();
		Ok(QuickStats {
			total_collections: joined.len(),
			active_collections: joined.iter().filter(|r| r.collection.status.is_active()).count(),
		})
	}
}

#[async_trait]
impl ConsentRepository for MemoryBackend {
	async fn consent(&self, user: UserId, collection: CollectionId) -> Result<Consent> {
		let state = self.state.read();
		let profile = Self::profile_of(&state, user)?;
		state
			.memberships
			.iter()
			.find(|m| m.profile == profile && m.collection == collection)
			.map(|m| Consent {
				profile,
				granted: m.consent,
				updated_at: m.consent_updated_at,
			})
			.ok_or_else(|| RepoError::not_found("consent", collection))
	}

	async fn update_consent(&self, profile: ProfileId, collection: CollectionId, granted: bool) -> Result<Consent> {
		let mut state = self.state.write();
		let membership = state
			.membership_mut(profile, collection)
			.ok_or_else(|| RepoError::not_found("consent", collection))?;
		membership.consent = granted;
		membership.consent_updated_at = Utc::now();
		debug!(%profile, %collection, granted, "consent updated");
		Ok(Consent {
			profile,
			granted,
			updated_at: membership.consent_updated_at,
		})
	}
}

#[async_trait]
impl PaperRepository for MemoryBackend {
	async fn add_paper(&self, collection: CollectionId, paper: NewPaper) -> Result<Paper> {
		let mut state = self.state.write();
		let id = PaperId(state.next_paper_id());
		let record = state
			.record_mut(collection)
			.ok_or_else(|| RepoError::not_found("collection", collection))?;
		let paper = Paper {
			id,
			title: paper.title,
			authors: paper.authors,
			journal: paper.journal,
			description: paper.description,
			published_at: paper.published_at,
			link: paper.link,
		};
		record.papers.push(paper.clone());
		Ok(paper)
	}
}

#[async_trait]
impl ImageRepository for MemoryBackend {
	async fn add_image(&self, collection: CollectionId, image: NewImage) -> Result<Image> {
		let mut state = self.state.write();
		let id = ImageId(state.next_image_id());
		let record = state
			.record_mut(collection)
			.ok_or_else(|| RepoError::not_found("collection", collection))?;
		let image = Image {
			id,
			title: image.title,
			description: image.description,
			url: image.url,
		};
		record.images.push(image.clone());
		Ok(image)
	}
}

#[async_trait]
impl ParticipantRepository for MemoryBackend {
	async fn participants(&self, collection: CollectionId) -> Result<Vec<Participant>> {
		let state = self.state.read();
		if state.record(collection).is_none() {
			return Err(RepoError::not_found("collection", collection));
		}
		Ok(state
			.memberships
			.iter()
			.filter(|m| m.collection == collection)
			.filter_map(|m| {
				state.user_by_profile(m.profile).map(|u| Participant {
					profile: m.profile,
					email: u.email.clone(),
					consent: m.consent,
					joined_at: m.joined_at,
				})
			})
			.collect())
	}

	async fn invite(&self, collection: CollectionId, emails: &[String]) -> Result<InviteOutcome> {
		if emails.is_empty() {
			return Err(RepoError::Rejected("no email addresses to invite".into()));
		}
		let mut state = self.state.write();
		if state.record(collection).is_none() {
			return Err(RepoError::not_found("collection", collection));
		}

		let now = Utc::now();
		let mut outcome = InviteOutcome::default();
		for email in emails {
			let existing = state.user_by_email(email).map(|u| u.profile);
			let profile = match existing {
				Some(profile) => profile,
				None => {
					let profile = state.next_profile_id();
					state.users.push(UserRecord {
						id: UserId::new(),
						profile,
						email: email.clone(),
						password: None,
						researcher: false,
					});
					profile
				}
			};
			if state.is_member(profile, collection) {
				outcome.already_enrolled += 1;
				continue;
			}
			state.memberships.push(Membership {
				profile,
				collection,
				consent: false,
				consent_updated_at: now,
				joined_at: now,
			});
			let token = Uuid::new_v4().simple().to_string();
			state.invitations.push(Invitation {
				collection,
				email: email.clone(),
				sent_at: now,
				token: Some(token.clone()),
			});
			outcome.links.push(InviteLink {
				email: email.clone(),
				token,
			});
			outcome.invited += 1;
		}
		debug!(%collection, invited = outcome.invited, already_enrolled = outcome.already_enrolled, "invitations recorded");
		Ok(outcome)
	}
}
