use chrono::{Duration, NaiveDate, TimeZone, Utc};
use pretty_assertions::assert_eq;

use super::*;

struct Fixture {
	backend: MemoryBackend,
	researcher: UserId,
	participant: UserId,
	older: CollectionId,
	newer: CollectionId,
}

fn fixture() -> Fixture {
	let backend = MemoryBackend::new();
	let researcher = backend.add_user("lead@uni.edu", Some("researcher-pass"), true);
	let participant = backend.add_user("john.doe@example.com", Some("participant-pass"), false);
	let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
	let older = backend.add_collection(researcher, "Sleep Patterns", "Sleep and performance", CollectionStatus::active(), base);
	let newer = backend.add_collection(
		researcher,
		"Digital Wellbeing",
		"Screen time survey",
		CollectionStatus {
			id: 2,
			label: "Closed".into(),
		},
		base + Duration::days(30),
	);
	assert!(backend.enroll(participant, older, true));
	assert!(backend.enroll(participant, newer, false));
	Fixture {
		backend,
		researcher,
		participant,
		older,
		newer,
	}
}

fn paper(title: &str, published: NaiveDate) -> NewPaper {
	NewPaper {
		title: title.into(),
		authors: "Smith, J.".into(),
		journal: "Journal of Sleep".into(),
		description: "Findings".into(),
		published_at: published,
		link: "https://doi.org/10.1000/1".into(),
	}
}

#[tokio::test]
async fn sign_in_sets_session_and_sign_out_clears_it() {
	let f = fixture();
	assert_eq!(f.backend.current_session().await.unwrap(), None);

	let err = f.backend.sign_in("lead@uni.edu", "wrong").await.unwrap_err();
	assert!(matches!(err, RepoError::InvalidCredentials));

	let session = f.backend.sign_in(" LEAD@uni.edu ", "researcher-pass").await.unwrap();
	assert_eq!(session.user, f.researcher);
	assert_eq!(session.role, Role::Researcher);
	assert_eq!(f.backend.current_session().await.unwrap(), Some(session));

	f.backend.sign_out().await.unwrap();
	assert_eq!(f.backend.current_session().await.unwrap(), None);
}

#[tokio::test]
async fn invited_account_cannot_sign_in_until_password_set() {
	let f = fixture();
	f.backend.invite(f.older, &["new@example.com".to_string()]).await.unwrap();
	assert!(f.backend.sign_in("new@example.com", "").await.is_err());

	assert!(matches!(f.backend.sign_up("longenough").await, Err(RepoError::Unauthorized)));
}

#[tokio::test]
async fn sign_up_marks_password_set() {
	let f = fixture();
	let invited = f.backend.add_user("invitee@example.com", None, false);
	f.backend.state.write().session = Some(invited);
	assert!(f.backend.current_session().await.unwrap().unwrap().needs_password());

	let session = f.backend.sign_up("brand-new-pass").await.unwrap();
	assert!(session.has_password);
	f.backend.sign_out().await.unwrap();
	assert!(f.backend.sign_in("invitee@example.com", "brand-new-pass").await.is_ok());
}

#[tokio::test]
async fn user_collections_are_newest_first_and_limited() {
	let f = fixture();
	let all = f.backend.user_collections(f.participant, None).await.unwrap();
	assert_eq!(all.iter().map(|c| c.id).collect::<Vec<_>>(), vec![f.newer, f.older]);

	let limited = f.backend.user_collections(f.participant, Some(1)).await.unwrap();
	assert_eq!(limited.len(), 1);
	assert_eq!(limited[0].id, f.newer);
}

#[tokio::test]
async fn quick_stats_counts_active_collections() {
	let f = fixture();
	let stats = f.backend.quick_stats(f.participant).await.unwrap();
	assert_eq!(
		stats,
		QuickStats {
			total_collections: 2,
			active_collections: 1,
		}
	);
}

#[tokio::test]
async fn researcher_overview_counts_papers() {
	let f = fixture();
	let date = NaiveDate::from_ymd_opt(2023, 5, 1).unwrap();
	f.backend.add_paper(f.older, paper("A", date)).await.unwrap();
	f.backend.add_paper(f.older, paper("B", date)).await.unwrap();

	let summaries = f.backend.researcher_collections(f.researcher).await.unwrap();
	assert_eq!(summaries.len(), 2);
	assert_eq!(summaries[0].collection.id, f.newer);
	assert_eq!(summaries[1].papers, 2);
	assert!(f.backend.researcher_collections(f.participant).await.unwrap().is_empty());
}

#[tokio::test]
async fn collection_detail_sorts_papers_by_publication() {
	let f = fixture();
	let first = f.backend.add_paper(f.older, paper("Old", NaiveDate::from_ymd_opt(2020, 1, 1).unwrap())).await.unwrap();
	let second = f.backend.add_paper(f.older, paper("New", NaiveDate::from_ymd_opt(2023, 1, 1).unwrap())).await.unwrap();
	assert_ne!(first.id, second.id);

	let detail = f.backend.collection(f.older).await.unwrap();
	assert_eq!(detail.papers.iter().map(|p| p.title.as_str()).collect::<Vec<_>>(), vec!["New", "Old"]);

	let missing = f.backend.collection(CollectionId::new()).await.unwrap_err();
	assert!(matches!(missing, RepoError::NotFound { entity: "collection", .. }));
}

#[tokio::test]
async fn images_are_numbered_and_counted() {
	let f = fixture();
	let image = |title: &str| NewImage {
		title: title.into(),
		description: "Chart".into(),
		url: format!("https://cdn.uni.edu/{title}.png"),
	};
	let first = f.backend.add_image(f.newer, image("hours")).await.unwrap();
	let second = f.backend.add_image(f.newer, image("naps")).await.unwrap();
	assert_eq!((first.id, second.id), (ImageId(1), ImageId(2)));

	let summaries = f.backend.researcher_collections(f.researcher).await.unwrap();
	assert_eq!(summaries[0].images, 2);
	assert_eq!(f.backend.collection(f.newer).await.unwrap().images, vec![first, second]);

	let missing = f.backend.add_image(CollectionId::new(), image("x")).await.unwrap_err();
	assert!(matches!(missing, RepoError::NotFound { .. }));
}

#[tokio::test]
async fn consent_round_trip() {
	let f = fixture();
	let consent = f.backend.consent(f.participant, f.older).await.unwrap();
	assert!(consent.granted);

	let updated = f.backend.update_consent(consent.profile, f.older, false).await.unwrap();
	assert!(!updated.granted);
	assert!(updated.updated_at >= consent.updated_at);
	assert!(!f.backend.consent(f.participant, f.older).await.unwrap().granted);

	assert!(f.backend.consent(f.researcher, f.older).await.is_err());
	assert!(f.backend.update_consent(ProfileId(999), f.older, true).await.is_err());
}

#[tokio::test]
async fn invite_enrolls_new_addresses_and_skips_members() {
	let f = fixture();
	let emails = vec!["john.doe@example.com".to_string(), "jane.smith@example.com".to_string()];
	let outcome = f.backend.invite(f.older, &emails).await.unwrap();
	assert_eq!((outcome.invited, outcome.already_enrolled), (1, 1));
	assert_eq!(outcome.links.len(), 1);
	assert_eq!(outcome.links[0].email, "jane.smith@example.com");

	let participants = f.backend.participants(f.older).await.unwrap();
	let jane = participants.iter().find(|p| p.email == "jane.smith@example.com").unwrap();
	assert!(!jane.consent);
	assert_eq!(jane.consent_label(), "Revoked");
	assert_eq!(f.backend.snapshot().invitations.len(), 1);
}

#[tokio::test]
async fn accept_invite_signs_in_once_per_token() {
	let f = fixture();
	let outcome = f.backend.invite(f.older, &["Jane.Smith@example.com".to_string()]).await.unwrap();
	let token = outcome.links[0].token.clone();

	let wrong = f.backend.accept_invite("jane.smith@example.com", "nope").await;
	assert!(matches!(wrong, Err(RepoError::InvalidCredentials)));
	let other = f.backend.accept_invite("john.doe@example.com", &token).await;
	assert!(matches!(other, Err(RepoError::InvalidCredentials)));
	assert_eq!(f.backend.current_session().await.unwrap(), None);

	let session = f.backend.accept_invite(" jane.smith@example.com ", &token).await.unwrap();
	assert!(!session.has_password);
	assert_eq!(f.backend.current_session().await.unwrap(), Some(session));
	assert_eq!(f.backend.snapshot().invitations[0].token, None);

	f.backend.sign_out().await.unwrap();
	let reused = f.backend.accept_invite("jane.smith@example.com", &token).await;
	assert!(matches!(reused, Err(RepoError::InvalidCredentials)));
}

#[tokio::test]
async fn each_invitation_gets_its_own_token() {
	let f = fixture();
	let emails = vec!["a@example.com".to_string(), "b@example.com".to_string()];
	let first = f.backend.invite(f.older, &emails).await.unwrap();
	let second = f.backend.invite(f.newer, &emails).await.unwrap();
	let mut tokens: Vec<_> = first.links.iter().chain(&second.links).map(|l| l.token.clone()).collect();
	tokens.sort();
	tokens.dedup();
	assert_eq!(tokens.len(), 4);

	// any pending invitation of the address works
	assert!(f.backend.accept_invite("b@example.com", &second.links[1].token).await.is_ok());
}

#[tokio::test]
async fn invite_rejects_empty_batches_and_unknown_collections() {
	let f = fixture();
	assert!(matches!(f.backend.invite(f.older, &[]).await, Err(RepoError::Rejected(_))));
	assert!(matches!(
		f.backend.invite(CollectionId::new(), &["a@x.com".to_string()]).await,
		Err(RepoError::NotFound { .. })
	));
}

#[test]
fn snapshot_restores_state() {
	let f = fixture();
	let restored = MemoryBackend::from_snapshot(f.backend.snapshot());
	assert_eq!(restored.snapshot(), f.backend.snapshot());
}
