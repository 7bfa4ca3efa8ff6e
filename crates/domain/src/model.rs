//! Entities returned by the repositories.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{CollectionId, ImageId, PaperId, ProfileId};

/// Lifecycle status of a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionStatus {
	pub id: i32,
	pub label: String,
}

impl CollectionStatus {
	pub const ACTIVE_ID: i32 = 1;

	pub fn active() -> Self {
		Self {
			id: Self::ACTIVE_ID,
			label: "Active".to_string(),
		}
	}

	pub fn is_active(&self) -> bool {
		self.id == Self::ACTIVE_ID
	}
}

/// A research study.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
	pub id: CollectionId,
	pub title: String,
	pub description: String,
	pub status: CollectionStatus,
	/// Target participant count set by the researcher.
	pub participants: u32,
	pub created_at: DateTime<Utc>,
}

/// Collection row of the researcher overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSummary {
	pub collection: Collection,
	pub papers: usize,
	pub images: usize,
}

/// Collection with its papers (newest publication first) and images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionDetail {
	pub collection: Collection,
	pub papers: Vec<Paper>,
	pub images: Vec<Image>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paper {
	pub id: PaperId,
	pub title: String,
	pub authors: String,
	pub journal: String,
	pub description: String,
	pub published_at: NaiveDate,
	pub link: String,
}

/// Validated paper payload, see [`crate::forms::PaperForm`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPaper {
	pub title: String,
	pub authors: String,
	pub journal: String,
	pub description: String,
	pub published_at: NaiveDate,
	pub link: String,
}

/// Validated image payload, see [`crate::forms::ImageForm`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewImage {
	pub title: String,
	pub description: String,
	pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
	pub id: ImageId,
	pub title: String,
	pub description: String,
	pub url: String,
}

/// A participant's consent for one collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consent {
	pub profile: ProfileId,
	pub granted: bool,
	pub updated_at: DateTime<Utc>,
}

impl Consent {
	pub fn status(&self) -> ConsentStatus {
		if self.granted { ConsentStatus::Active } else { ConsentStatus::Revoked }
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentStatus {
	Active,
	Revoked,
}

impl fmt::Display for ConsentStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Active => "Active",
			Self::Revoked => "Revoked",
		})
	}
}

/// Participant row of a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
	pub profile: ProfileId,
	pub email: String,
	pub consent: bool,
	pub joined_at: DateTime<Utc>,
}

impl Participant {
	pub fn consent_label(&self) -> &'static str {
		if self.consent { "Agreed" } else { "Revoked" }
	}
}

/// Dashboard counters for a participant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickStats {
	pub total_collections: usize,
	pub active_collections: usize,
}

/// Result of an invitation dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InviteOutcome {
	/// Invitations sent.
	pub invited: usize,
	/// Addresses that were already enrolled in the collection.
	pub already_enrolled: usize,
	/// One link per invitation sent, in batch order.
	#[serde(default)]
	pub links: Vec<InviteLink>,
}

/// What an invitee needs to accept: their address and the link token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InviteLink {
	pub email: String,
	pub token: String,
}

impl InviteOutcome {
	pub fn summary(&self) -> String {
		let plural = if self.invited == 1 { "" } else { "s" };
		format!("Invitations sent to {} participant{plural}.", self.invited)
	}
}
