use hub_tags::{FnRule, HttpUrl, MinLength};

use super::FormErrors;
use crate::model::NewImage;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "svg", "avif"];

/// Raw input of the "upload image" dialog; the image is referenced by URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageForm {
	pub title: String,
	pub description: String,
	pub url: String,
}

impl ImageForm {
	pub fn validate(&self) -> Result<NewImage, FormErrors> {
		let mut errors = FormErrors::default();
		errors.check("title", &self.title, &[&MinLength::required("Title is required")]);
		errors.check("description", &self.description, &[&MinLength::required("Description is required")]);

		let is_image = FnRule(|url: &str| -> Result<(), String> {
			if has_image_extension(url) {
				Ok(())
			} else {
				Err("Please upload an image file".into())
			}
		});
		errors.check("url", self.url.trim(), &[&HttpUrl::new(), &is_image]);

		errors.finish(|| NewImage {
			title: self.title.clone(),
			description: self.description.clone(),
			url: self.url.trim().to_owned(),
		})
	}
}

fn has_image_extension(url: &str) -> bool {
	let path = url.split(['?', '#']).next().unwrap_or_default();
	let file = path.rsplit('/').next().unwrap_or_default();
	file.rsplit_once('.')
		.is_some_and(|(_, ext)| IMAGE_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
}
