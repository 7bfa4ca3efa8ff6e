//! Demo data set for trying the CLI locally.

use chrono::{Duration, NaiveDate, Utc};
use hub_domain::model::{CollectionStatus, NewPaper};
use hub_domain::repo::PaperRepository;
use hub_domain::{MemoryBackend, Result};

pub const RESEARCHER_EMAIL: &str = "researcher@example.edu";
pub const PARTICIPANT_EMAIL: &str = "participant@example.edu";
pub const PASSWORD: &str = "demo-password";

/// Seeds a researcher, a participant and two collections.
pub async fn seed(backend: &MemoryBackend) -> Result<()> {
	let now = Utc::now();
	let researcher = backend.add_user(RESEARCHER_EMAIL, Some(PASSWORD), true);
	let participant = backend.add_user(PARTICIPANT_EMAIL, Some(PASSWORD), false);

	let sleep = backend.add_collection(
		researcher,
		"Sleep and study habits",
		"Nightly sleep logs paired with weekly study diaries.",
		CollectionStatus::active(),
		now - Duration::days(30),
	);
	let screen = backend.add_collection(
		researcher,
		"Screen time in adolescence",
		"Phone usage exports collected over one semester.",
		CollectionStatus {
			id: 2,
			label: "Completed".into(),
		},
		now - Duration::days(400),
	);
	backend.enroll(participant, sleep, true);
	backend.enroll(participant, screen, false);

	if let Some(published_at) = NaiveDate::from_ymd_opt(2023, 9, 14) {
		backend
			.add_paper(
				screen,
				NewPaper {
					title: "Evening screen use and sleep onset".into(),
					authors: "Smith, J., Doe, A.".into(),
					journal: "Journal of Adolescent Health".into(),
					description: "Findings from the screen time collection.".into(),
					published_at,
					link: "https://doi.org/10.1000/182".into(),
				},
			)
			.await?;
	}
	Ok(())
}
