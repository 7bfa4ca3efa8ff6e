use hub_tags::{DEFAULT_SEPARATOR, Email, TagInput, WindowConfig};
use tracing::{info, warn};

use crate::error::{RepoError, Result};
use crate::ids::CollectionId;
use crate::model::InviteOutcome;
use crate::repo::ParticipantRepository;

/// "Invite participants" dialog: an email tag input bound to one collection.
#[derive(Debug)]
pub struct InviteForm {
	collection: CollectionId,
	emails: TagInput,
}

impl InviteForm {
	pub const DESCRIPTION: &'static str = "Enter one or more email addresses, separated by commas";

	pub fn new(collection: CollectionId) -> Self {
		Self::with_options(collection, WindowConfig::default(), DEFAULT_SEPARATOR)
	}

	pub fn with_options(collection: CollectionId, window: WindowConfig, separator: char) -> Self {
		Self {
			collection,
			emails: TagInput::with_rule(Email::new())
				.window(window)
				.separator(separator)
				.description(Self::DESCRIPTION),
		}
	}

	pub fn collection(&self) -> CollectionId {
		self.collection
	}

	pub fn emails(&self) -> &TagInput {
		&self.emails
	}

	pub fn emails_mut(&mut self) -> &mut TagInput {
		&mut self.emails
	}

	pub fn can_submit(&self) -> bool {
		!self.emails.is_empty()
	}

	/// Label of the submit button.
	pub fn submit_label(&self) -> String {
		format!("Send Invitations ({})", self.emails.tags().len())
	}

	/// Sends the committed emails and clears the input on success.
	///
	/// On failure the emails stay in place so the user can retry.
	pub async fn submit(&mut self, repo: &dyn ParticipantRepository) -> Result<InviteOutcome> {
		if !self.can_submit() {
			return Err(RepoError::Rejected("add at least one email address".into()));
		}
		let emails = self.emails.committed();
		match repo.invite(self.collection, &emails).await {
			Ok(outcome) => {
				info!(collection = %self.collection, invited = outcome.invited, "invitations sent");
				self.emails.reset();
				Ok(outcome)
			}
			Err(err) => {
				warn!(collection = %self.collection, count = emails.len(), error = %err, "invitation dispatch failed");
				Err(err)
			}
		}
	}
}
