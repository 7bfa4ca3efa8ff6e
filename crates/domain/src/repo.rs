//! Narrow repository interfaces, one per entity.
//!
//! Forms and front ends depend only on these traits; any backend that
//! implements them can be substituted.

use async_trait::async_trait;

use crate::error::Result;
use crate::ids::{CollectionId, ProfileId, UserId};
use crate::model::{
	Collection, CollectionDetail, CollectionSummary, Consent, Image, InviteOutcome, NewImage, NewPaper, Paper,
	Participant, QuickStats,
};
use crate::session::Session;

#[async_trait]
pub trait AuthRepository: Send + Sync {
	/// Session restored from storage, if any.
	async fn current_session(&self) -> Result<Option<Session>>;

	async fn sign_in(&self, email: &str, password: &str) -> Result<Session>;

	/// Signs in through an invitation link. Each token works once.
	async fn accept_invite(&self, email: &str, token: &str) -> Result<Session>;

	/// Sets the password of the signed-in (invited) account.
	async fn sign_up(&self, password: &str) -> Result<Session>;

	async fn sign_out(&self) -> Result<()>;

	async fn is_researcher(&self, user: UserId) -> Result<bool>;
}

#[async_trait]
pub trait CollectionRepository: Send + Sync {
	/// Collections the user participates in, newest first.
	async fn user_collections(&self, user: UserId, limit: Option<usize>) -> Result<Vec<Collection>>;

	/// Collections owned by the researcher, newest first.
	async fn researcher_collections(&self, researcher: UserId) -> Result<Vec<CollectionSummary>>;

	async fn collection(&self, id: CollectionId) -> Result<CollectionDetail>;

	async fn quick_stats(&self, user: UserId) -> Result<QuickStats>;
}

#[async_trait]
pub trait ConsentRepository: Send + Sync {
	async fn consent(&self, user: UserId, collection: CollectionId) -> Result<Consent>;

	/// Records the new consent value, stamped with the current time.
	async fn update_consent(&self, profile: ProfileId, collection: CollectionId, granted: bool) -> Result<Consent>;
}

#[async_trait]
pub trait PaperRepository: Send + Sync {
	async fn add_paper(&self, collection: CollectionId, paper: NewPaper) -> Result<Paper>;
}

#[async_trait]
pub trait ImageRepository: Send + Sync {
	async fn add_image(&self, collection: CollectionId, image: NewImage) -> Result<Image>;
}

#[async_trait]
pub trait ParticipantRepository: Send + Sync {
	async fn participants(&self, collection: CollectionId) -> Result<Vec<Participant>>;

	/// Dispatches invitations to `emails`.
	async fn invite(&self, collection: CollectionId, emails: &[String]) -> Result<InviteOutcome>;
}
