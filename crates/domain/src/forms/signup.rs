use hub_tags::MinLength;

use super::FormErrors;
use super::login::PASSWORD_MIN_LEN;

/// Password selection for an invited account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignUpForm {
	pub password: String,
	pub confirm_password: String,
}

impl SignUpForm {
	pub fn new(password: impl Into<String>, confirm_password: impl Into<String>) -> Self {
		Self {
			password: password.into(),
			confirm_password: confirm_password.into(),
		}
	}

	/// Returns the chosen password.
	pub fn validate(&self) -> Result<String, FormErrors> {
		let mut errors = FormErrors::default();
		let password_ok = errors.check(
			"password",
			&self.password,
			&[&MinLength::new(PASSWORD_MIN_LEN, "Password must be at least 8 characters")],
		);
		let confirm_ok = errors.check(
			"confirm_password",
			&self.confirm_password,
			&[&MinLength::new(PASSWORD_MIN_LEN, "Please confirm your password")],
		);
		if password_ok && confirm_ok && self.password != self.confirm_password {
			errors.push("confirm_password", "Passwords do not match");
		}
		errors.finish(|| self.password.clone())
	}
}
