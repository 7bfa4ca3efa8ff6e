use pretty_assertions::assert_eq;

use super::*;
use crate::rule::Email;

fn email_input() -> TagInput {
	TagInput::with_rule(Email::new()).description("Enter one or more email addresses, separated by commas")
}

fn type_str(input: &mut TagInput, text: &str) {
	for c in text.chars() {
		input.handle_key(InputKey::Char(c));
	}
}

#[test]
fn typing_then_enter_commits() {
	let mut input = email_input();
	type_str(&mut input, "a@x.com");
	assert_eq!(input.pending(), "a@x.com");
	assert_eq!(input.handle_key(InputKey::Enter), InputOutcome::Committed { added: 1 });
	assert_eq!(input.pending(), "");
	assert_eq!(input.committed(), vec!["a@x.com"]);
	assert_eq!(input.state(), InputState::Idle);
}

#[test]
fn separator_key_commits_without_inserting() {
	let mut input = email_input();
	type_str(&mut input, "a@x.com");
	assert_eq!(input.handle_key(InputKey::Char(',')), InputOutcome::Committed { added: 1 });
	assert_eq!(input.pending(), "");
}

#[test]
fn paste_with_separator_commits_whole_batch() {
	let mut input = email_input();
	assert_eq!(input.paste("a@x.com, b@x.com,c@x.com"), InputOutcome::Committed { added: 3 });
	assert_eq!(input.committed(), vec!["a@x.com", "b@x.com", "c@x.com"]);
}

#[test]
fn paste_without_separator_only_edits() {
	let mut input = email_input();
	assert_eq!(input.paste("a@x.com"), InputOutcome::Edited);
	assert!(input.is_empty());
	assert_eq!(input.pending(), "a@x.com");
}

#[test]
fn invalid_item_rejects_whole_batch_and_keeps_pending() {
	let mut input = email_input();
	let outcome = input.set_pending("a@x.com, bad-email, c@x.com");
	let InputOutcome::Rejected(rejection) = outcome else {
		panic!("expected rejection, got {outcome:?}");
	};
	assert_eq!(rejection.item, "bad-email");
	assert_eq!(rejection.index, 1);
	assert!(input.is_empty());
	assert_eq!(input.pending(), "a@x.com, bad-email, c@x.com");
	assert_eq!(input.state(), InputState::Error);
	assert_eq!(input.hint(), Some("Invalid email address"));
}

#[test]
fn rejection_does_not_touch_existing_tags() {
	let mut input = email_input();
	input.paste("a@x.com,b@x.com");
	input.set_pending("c@x.com,nope");
	assert_eq!(input.committed(), vec!["a@x.com", "b@x.com"]);
}

#[test]
fn fixing_pending_clears_error() {
	let mut input = email_input();
	input.set_pending("bad-email,");
	assert_eq!(input.state(), InputState::Error);

	// no separator left, so the error stays until the next commit
	input.handle_key(InputKey::Backspace);
	assert_eq!(input.state(), InputState::Error);

	input.set_pending("good@x.com");
	assert_eq!(input.handle_key(InputKey::Enter), InputOutcome::Committed { added: 1 });
	assert_eq!(input.state(), InputState::Idle);
	assert_eq!(input.error(), None);
	assert_eq!(input.hint(), Some("Enter one or more email addresses, separated by commas"));
}

#[test]
fn editing_a_rejected_batch_retries_the_commit() {
	let mut input = email_input();
	let outcome = input.paste("a@x.com,b@x.c");
	assert!(matches!(outcome, InputOutcome::Rejected(ref r) if r.item == "b@x.c"));

	assert_eq!(input.handle_key(InputKey::Char('o')), InputOutcome::Committed { added: 2 });
	assert_eq!(input.committed(), vec!["a@x.com", "b@x.co"]);
	assert_eq!(input.pending(), "");
	assert_eq!(input.state(), InputState::Idle);
}

#[test]
fn backspace_into_a_valid_batch_commits_it() {
	let mut input = email_input();
	assert!(matches!(input.paste("a@x.com,b@x.comm"), InputOutcome::Rejected(_)));
	assert_eq!(input.handle_key(InputKey::Backspace), InputOutcome::Committed { added: 2 });
	assert_eq!(input.committed(), vec!["a@x.com", "b@x.com"]);
	assert_eq!(input.state(), InputState::Idle);
}

#[test]
fn repeated_batches_are_deduplicated() {
	let mut input = email_input();
	input.paste("a@x.com,b@x.com");
	assert_eq!(input.paste("a@x.com,c@x.com"), InputOutcome::Committed { added: 1 });
	assert_eq!(input.committed(), vec!["a@x.com", "b@x.com", "c@x.com"]);
}

#[test]
fn empty_commit_is_a_noop() {
	let mut input = email_input();
	assert_eq!(input.handle_key(InputKey::Enter), InputOutcome::Ignored);
	input.set_pending("   ");
	assert_eq!(input.handle_key(InputKey::Enter), InputOutcome::Ignored);
	assert_eq!(input.state(), InputState::Idle);
	assert_eq!(input.pending(), "   ");
}

#[test]
fn trailing_separator_yields_empty_item_for_rule() {
	let mut input = email_input();
	let outcome = input.paste("a@x.com,");
	assert!(matches!(outcome, InputOutcome::Rejected(ref r) if r.item.is_empty()));
}

#[test]
fn no_rule_accepts_free_text() {
	let mut input = TagInput::new();
	assert_eq!(input.paste("alpha, beta gamma,"), InputOutcome::Committed { added: 3 });
	assert_eq!(input.committed(), vec!["alpha", "beta gamma", ""]);
}

#[test]
fn backspace_edits_pending_then_removes_last_tag() {
	let mut input = email_input();
	input.paste("a@x.com,b@x.com");
	type_str(&mut input, "c");
	assert_eq!(input.handle_key(InputKey::Backspace), InputOutcome::Edited);
	assert_eq!(input.pending(), "");
	assert_eq!(input.handle_key(InputKey::Backspace), InputOutcome::Removed("b@x.com".into()));
	assert_eq!(input.committed(), vec!["a@x.com"]);
}

#[test]
fn backspace_on_empty_store_is_ignored() {
	let mut input = email_input();
	assert_eq!(input.handle_key(InputKey::Backspace), InputOutcome::Ignored);
}

#[test]
fn remove_keeps_pending_and_error() {
	let mut input = email_input();
	input.paste("a@x.com,b@x.com");
	input.set_pending("oops,");
	assert_eq!(input.remove("a@x.com"), InputOutcome::Removed("a@x.com".into()));
	assert_eq!(input.remove("a@x.com"), InputOutcome::Ignored);
	assert_eq!(input.pending(), "oops,");
	assert_eq!(input.state(), InputState::Error);
	assert_eq!(input.committed(), vec!["b@x.com"]);
}

#[test]
fn reset_clears_everything() {
	let mut input = email_input();
	input.paste("a@x.com,b@x.com");
	input.set_pending("bad,");
	input.reset();
	assert!(input.is_empty());
	assert_eq!(input.pending(), "");
	assert_eq!(input.state(), InputState::Idle);
	assert_eq!(input.window_size(), 0);
}

#[test]
fn large_batch_renders_baseline_then_grows_on_scroll() {
	let mut input = email_input();
	let batch = (0..250).map(|i| format!("user{i}@example.com")).collect::<Vec<_>>().join(",");
	assert_eq!(input.paste(&batch), InputOutcome::Committed { added: 250 });
	assert_eq!(input.visible_tags().len(), 200);
	assert_eq!(input.overflow_label().as_deref(), Some("+50 more (scroll to load)"));

	assert!(input.on_scroll(ScrollMetrics::new(1950.0, 2000.0, 40.0)));
	assert_eq!(input.visible_tags().len(), 250);
	assert_eq!(input.overflow_label(), None);
}

#[test]
fn removing_below_window_clamps_visible_tags() {
	let mut input = TagInput::new().window(WindowConfig {
		baseline: 2,
		..WindowConfig::default()
	});
	input.paste("a,b,c,d");
	assert_eq!(input.visible_tags().len(), 2);
	input.remove("a");
	input.remove("b");
	input.remove("c");
	assert_eq!(input.window_size(), 1);
	assert_eq!(input.visible_tags().iter().collect::<Vec<_>>(), vec!["d"]);
}

#[test]
fn custom_separator() {
	let mut input = TagInput::with_rule(Email::new()).separator(';');
	assert_eq!(input.paste("a@x.com;b@x.com"), InputOutcome::Committed { added: 2 });
	assert_eq!(input.handle_key(InputKey::Char(',')), InputOutcome::Edited);
	assert_eq!(input.pending(), ",");
}
