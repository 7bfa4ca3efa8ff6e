//! Explicit authentication state passed to handlers that need it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::UserId;

/// What a signed-in user may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
	/// Manages collections, papers and invitations.
	Researcher,
	/// Views collections and manages their own consent.
	Participant,
}

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
	pub user: UserId,
	pub email: String,
	pub role: Role,
	/// False for invited accounts that have not chosen a password yet.
	pub has_password: bool,
}

impl Session {
	pub fn is_researcher(&self) -> bool {
		self.role == Role::Researcher
	}

	pub fn needs_password(&self) -> bool {
		!self.has_password
	}
}

/// Authentication state of the application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthState {
	/// The stored session has not been checked yet.
	#[default]
	Loading,
	Authenticated(Session),
	Unauthenticated,
}

/// Where a user lands after authentication resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landing {
	/// Still verifying access.
	Wait,
	SignIn,
	/// Invited account without a password.
	SetPassword,
	Admin,
	Dashboard,
}

/// Reason a gated view refused access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessError {
	#[error("still verifying access")]
	Loading,
	#[error("you don't have permission to view this page, please sign in to continue")]
	SignedOut,
	#[error("researcher access required")]
	NotResearcher,
}

impl From<Option<Session>> for AuthState {
	fn from(session: Option<Session>) -> Self {
		match session {
			Some(session) => Self::Authenticated(session),
			None => Self::Unauthenticated,
		}
	}
}

impl AuthState {
	pub fn session(&self) -> Option<&Session> {
		match self {
			Self::Authenticated(session) => Some(session),
			Self::Loading | Self::Unauthenticated => None,
		}
	}

	pub fn is_loading(&self) -> bool {
		matches!(self, Self::Loading)
	}

	/// Gate for participant views.
	pub fn require_session(&self) -> Result<&Session, AccessError> {
		match self {
			Self::Loading => Err(AccessError::Loading),
			Self::Unauthenticated => Err(AccessError::SignedOut),
			Self::Authenticated(session) => Ok(session),
		}
	}

	/// Gate for researcher views.
	pub fn require_researcher(&self) -> Result<&Session, AccessError> {
		let session = self.require_session()?;
		if session.is_researcher() {
			Ok(session)
		} else {
			Err(AccessError::NotResearcher)
		}
	}

	pub fn landing(&self) -> Landing {
		match self {
			Self::Loading => Landing::Wait,
			Self::Unauthenticated => Landing::SignIn,
			Self::Authenticated(session) if session.needs_password() => Landing::SetPassword,
			Self::Authenticated(session) if session.is_researcher() => Landing::Admin,
			Self::Authenticated(_) => Landing::Dashboard,
		}
	}
}
