use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{CollectionId, ProfileId, UserId};
use crate::model::{Collection, Image, Paper};

/// Serializable state of a [`super::MemoryBackend`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
	pub users: Vec<UserRecord>,
	pub collections: Vec<CollectionRecord>,
	pub memberships: Vec<Membership>,
	pub invitations: Vec<Invitation>,
	/// Signed-in account.
	pub session: Option<UserId>,
}

/// Account plus participant profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
	pub id: UserId,
	pub profile: ProfileId,
	pub email: String,
	/// `None` until an invited account picks a password.
	#[serde(default)]
	pub password: Option<String>,
	#[serde(default)]
	pub researcher: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionRecord {
	pub collection: Collection,
	pub researcher: UserId,
	#[serde(default)]
	pub papers: Vec<Paper>,
	#[serde(default)]
	pub images: Vec<Image>,
}

/// Participation of a profile in a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
	pub profile: ProfileId,
	pub collection: CollectionId,
	pub consent: bool,
	pub consent_updated_at: DateTime<Utc>,
	pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitation {
	pub collection: CollectionId,
	pub email: String,
	pub sent_at: DateTime<Utc>,
	/// Single-use secret of the invitation link; taken once accepted.
	#[serde(default)]
	pub token: Option<String>,
}

impl Snapshot {
	pub(crate) fn user(&self, id: UserId) -> Option<&UserRecord> {
		self.users.iter().find(|u| u.id == id)
	}

	pub(crate) fn user_by_email(&self, email: &str) -> Option<&UserRecord> {
		self.users.iter().find(|u| u.email.eq_ignore_ascii_case(email))
	}

	pub(crate) fn user_by_profile(&self, profile: ProfileId) -> Option<&UserRecord> {
		self.users.iter().find(|u| u.profile == profile)
	}

	pub(crate) fn record(&self, id: CollectionId) -> Option<&CollectionRecord> {
		self.collections.iter().find(|c| c.collection.id == id)
	}

	pub(crate) fn record_mut(&mut self, id: CollectionId) -> Option<&mut CollectionRecord> {
		self.collections.iter_mut().find(|c| c.collection.id == id)
	}

	pub(crate) fn membership_mut(&mut self, profile: ProfileId, collection: CollectionId) -> Option<&mut Membership> {
		self.memberships.iter_mut().find(|m| m.profile == profile && m.collection == collection)
	}

	pub(crate) fn is_member(&self, profile: ProfileId, collection: CollectionId) -> bool {
		self.memberships.iter().any(|m| m.profile == profile && m.collection == collection)
	}

	pub(crate) fn next_profile_id(&self) -> ProfileId {
		ProfileId(self.users.iter().map(|u| u.profile.0).max().unwrap_or(0) + 1)
	}

	pub(crate) fn next_paper_id(&self) -> i64 {
		self.collections.iter().flat_map(|c| c.papers.iter()).map(|p| p.id.0).max().unwrap_or(0) + 1
	}

	pub(crate) fn next_image_id(&self) -> i64 {
		self.collections.iter().flat_map(|c| c.images.iter()).map(|i| i.id.0).max().unwrap_or(0) + 1
	}
}
