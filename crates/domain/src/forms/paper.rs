use chrono::NaiveDate;
use hub_tags::{HttpUrl, MinLength};

use super::FormErrors;
use crate::model::NewPaper;

/// Raw input of the "add research paper" dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaperForm {
	pub title: String,
	pub authors: String,
	pub journal: String,
	pub description: String,
	/// `YYYY-MM-DD`.
	pub published_at: String,
	pub link: String,
}

impl PaperForm {
	pub const DATE_FORMAT: &'static str = "%Y-%m-%d";

	/// Validates against `today`, which bounds the publication date.
	pub fn validate(&self, today: NaiveDate) -> Result<NewPaper, FormErrors> {
		let mut errors = FormErrors::default();
		errors.check("title", &self.title, &[&MinLength::required("Title is required")]);
		errors.check("authors", &self.authors, &[&MinLength::required("Authors are required")]);
		errors.check("journal", &self.journal, &[&MinLength::required("Journal is required")]);
		errors.check("description", &self.description, &[&MinLength::required("Description is required")]);

		let published_at = NaiveDate::parse_from_str(self.published_at.trim(), Self::DATE_FORMAT).ok();
		match published_at {
			None => errors.push("published_at", "Invalid date"),
			Some(date) if date > today => errors.push("published_at", "Published date cannot be in the future"),
			Some(_) => {}
		}

		errors.check("link", self.link.trim(), &[&HttpUrl::new()]);

		errors.finish(|| NewPaper {
			title: self.title.clone(),
			authors: self.authors.clone(),
			journal: self.journal.clone(),
			description: self.description.clone(),
			published_at: published_at.unwrap_or(today),
			link: self.link.trim().to_owned(),
		})
	}
}
