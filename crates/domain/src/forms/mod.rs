//! Form validation.
//!
//! Each form holds raw field text and validates it field by field with
//! [`Rule`]s, yielding either a typed payload or [`FormErrors`]. Only the
//! first failing rule of each field is reported.

mod image;
mod invite;
mod login;
mod paper;
mod signup;

use std::fmt;

use hub_tags::Rule;
use thiserror::Error;

pub use image::ImageForm;
pub use invite::InviteForm;
pub use login::{LoginForm, LoginPayload};
pub use paper::PaperForm;
pub use signup::SignUpForm;

/// A failed field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
	pub field: &'static str,
	pub message: String,
}

impl fmt::Display for FieldError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}: {}", self.field, self.message)
	}
}

/// Failed fields of one validation pass, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", display_errors(.errors))]
pub struct FormErrors {
	errors: Vec<FieldError>,
}

fn display_errors(errors: &[FieldError]) -> String {
	errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

impl FormErrors {
	pub fn is_empty(&self) -> bool {
		self.errors.is_empty()
	}

	pub fn len(&self) -> usize {
		self.errors.len()
	}

	pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
		self.errors.iter()
	}

	/// Message reported for `field`, if it failed.
	pub fn get(&self, field: &str) -> Option<&str> {
		self.errors.iter().find(|e| e.field == field).map(|e| e.message.as_str())
	}

	/// Runs `rules` against `value` in order, recording the first failure.
	///
	/// Returns whether the field passed.
	pub(crate) fn check(&mut self, field: &'static str, value: &str, rules: &[&dyn Rule]) -> bool {
		for rule in rules {
			if let Err(message) = rule.check(value) {
				self.push(field, message);
				return false;
			}
		}
		true
	}

	pub(crate) fn push(&mut self, field: &'static str, message: impl Into<String>) {
		self.errors.push(FieldError {
			field,
			message: message.into(),
		});
	}

	pub(crate) fn finish<T>(self, payload: impl FnOnce() -> T) -> Result<T, FormErrors> {
		if self.is_empty() { Ok(payload()) } else { Err(self) }
	}
}
