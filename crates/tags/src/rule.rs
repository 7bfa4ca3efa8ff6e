use std::sync::{Arc, LazyLock};

use regex::Regex;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[A-Za-z0-9_'+\-]+(\.[A-Za-z0-9_'+\-]+)*@([A-Za-z0-9]([A-Za-z0-9\-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}$")
		.expect("email pattern is valid")
});

/// Validation applied to a single candidate value.
///
/// Returns the human-readable failure message on rejection. Rules are shared
/// between the tag input and field-level form validation, so they must be
/// cheap to call and free of side effects.
pub trait Rule: Send + Sync {
	fn check(&self, candidate: &str) -> Result<(), String>;
}

impl<R: Rule + ?Sized> Rule for Arc<R> {
	fn check(&self, candidate: &str) -> Result<(), String> {
		(**self).check(candidate)
	}
}

impl<R: Rule + ?Sized> Rule for &R {
	fn check(&self, candidate: &str) -> Result<(), String> {
		(**self).check(candidate)
	}
}

/// Syntactic email address check.
#[derive(Debug, Clone)]
pub struct Email {
	message: String,
}

impl Email {
	pub fn new() -> Self {
		Self::with_message("Invalid email address")
	}

	pub fn with_message(message: impl Into<String>) -> Self {
		Self { message: message.into() }
	}
}

impl Default for Email {
	fn default() -> Self {
		Self::new()
	}
}

impl Rule for Email {
	fn check(&self, candidate: &str) -> Result<(), String> {
		if EMAIL_PATTERN.is_match(candidate) {
			Ok(())
		} else {
			Err(self.message.clone())
		}
	}
}

/// Absolute `http`/`https` URL with a host.
#[derive(Debug, Clone)]
pub struct HttpUrl {
	message: String,
}

impl HttpUrl {
	pub fn new() -> Self {
		Self::with_message("Invalid URL")
	}

	pub fn with_message(message: impl Into<String>) -> Self {
		Self { message: message.into() }
	}
}

impl Default for HttpUrl {
	fn default() -> Self {
		Self::new()
	}
}

impl Rule for HttpUrl {
	fn check(&self, candidate: &str) -> Result<(), String> {
		match url::Url::parse(candidate) {
			Ok(url) if matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|h| !h.is_empty()) => Ok(()),
			_ => Err(self.message.clone()),
		}
	}
}

/// Minimum length in characters.
#[derive(Debug, Clone)]
pub struct MinLength {
	min: usize,
	message: String,
}

impl MinLength {
	pub fn new(min: usize, message: impl Into<String>) -> Self {
		Self {
			min,
			message: message.into(),
		}
	}

	/// At least one character.
	pub fn required(message: impl Into<String>) -> Self {
		Self::new(1, message)
	}
}

impl Rule for MinLength {
	fn check(&self, candidate: &str) -> Result<(), String> {
		if candidate.chars().count() >= self.min {
			Ok(())
		} else {
			Err(self.message.clone())
		}
	}
}

/// Adapts a closure into a [`Rule`].
pub struct FnRule<F>(pub F);

impl<F> Rule for FnRule<F>
where
	F: Fn(&str) -> Result<(), String> + Send + Sync,
{
	fn check(&self, candidate: &str) -> Result<(), String> {
		(self.0)(candidate)
	}
}
