use hub_tags::{Email, MinLength};

use super::FormErrors;

pub const PASSWORD_MIN_LEN: usize = 8;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
	pub email: String,
	pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginPayload {
	pub email: String,
	pub password: String,
}

impl LoginForm {
	pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
		Self {
			email: email.into(),
			password: password.into(),
		}
	}

	pub fn validate(&self) -> Result<LoginPayload, FormErrors> {
		let mut errors = FormErrors::default();
		let email = self.email.trim();
		errors.check("email", email, &[&Email::new()]);
		errors.check(
			"password",
			&self.password,
			&[&MinLength::new(PASSWORD_MIN_LEN, "Password must be at least 8 characters")],
		);
		errors.finish(|| LoginPayload {
			email: email.to_owned(),
			password: self.password.clone(),
		})
	}
}
