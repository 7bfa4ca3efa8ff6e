//! Error types for repository access.

use thiserror::Error;

/// Errors returned by repository implementations.
#[derive(Debug, Error)]
pub enum RepoError {
	/// The requested row does not exist or is not visible to the caller.
	#[error("{entity} not found: {id}")]
	NotFound {
		/// Entity kind (e.g., "collection").
		entity: &'static str,
		/// Identifier that was looked up.
		id: String,
	},

	/// The operation requires a signed-in session.
	#[error("not signed in")]
	Unauthorized,

	/// Email/password pair did not match an account.
	#[error("invalid login credentials")]
	InvalidCredentials,

	/// The backend refused the request.
	#[error("{0}")]
	Rejected(String),

	/// Transport or storage failure.
	#[error("backend error: {0}")]
	Backend(String),
}

impl RepoError {
	pub(crate) fn not_found(entity: &'static str, id: impl ToString) -> Self {
		Self::NotFound {
			entity,
			id: id.to_string(),
		}
	}
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepoError>;
