//! Tag input surface.
//!
//! Owns the pending text, the committed [`TagStore`], the visible
//! [`TagWindow`] and the error from the last commit attempt. All
//! transitions happen synchronously inside one call; the owner feeds key,
//! paste and scroll events in and renders from the accessors.

#[cfg(test)]
mod tests;

use std::fmt;
use std::sync::Arc;

use indexmap::set::Slice;
use tracing::{debug, trace};

use crate::batch::{Rejection, split_batch, validate_batch};
use crate::rule::Rule;
use crate::store::TagStore;
use crate::window::{ScrollMetrics, TagWindow, WindowConfig, overflow_label};

/// Separator between items of a batch.
pub const DEFAULT_SEPARATOR: char = ',';

/// Key events understood by the input surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
	/// Printable character. The separator commits instead of being inserted;
	/// any other character retries the commit if the pending text already
	/// holds a separator.
	Char(char),
	/// Explicit commit.
	Enter,
	/// Deletes the last pending character, or the last tag when nothing is
	/// pending. Edited text holding a separator is committed again.
	Backspace,
}

/// Display state of the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputState {
	/// No error shown.
	Idle,
	/// The last commit attempt was rejected; pending text is retained.
	Error,
}

/// What a single event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
	/// Pending text changed; nothing was committed.
	Edited,
	/// The pending batch was merged into the store.
	Committed {
		/// Tags that were not already present.
		added: usize,
	},
	/// The pending batch failed validation and was left untouched.
	Rejected(Rejection),
	/// A tag was removed from the store.
	Removed(String),
	/// The event had no effect.
	Ignored,
}

/// Multi-value text input committing comma-separated batches into a
/// duplicate-free tag list.
pub struct TagInput {
	store: TagStore,
	window: TagWindow,
	pending: String,
	error: Option<Rejection>,
	rule: Option<Arc<dyn Rule>>,
	separator: char,
	description: Option<String>,
}

impl fmt::Debug for TagInput {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TagInput")
			.field("tags", &self.store.len())
			.field("window", &self.window.size())
			.field("pending", &self.pending)
			.field("error", &self.error)
			.field("has_rule", &self.rule.is_some())
			.field("separator", &self.separator)
			.finish_non_exhaustive()
	}
}

impl Default for TagInput {
	fn default() -> Self {
		Self::new()
	}
}

impl TagInput {
	/// Creates an input that accepts every item.
	pub fn new() -> Self {
		Self {
			store: TagStore::new(),
			window: TagWindow::default(),
			pending: String::new(),
			error: None,
			rule: None,
			separator: DEFAULT_SEPARATOR,
			description: None,
		}
	}

	/// Creates an input validating every item with `rule`.
	pub fn with_rule(rule: impl Rule + 'static) -> Self {
		Self::new().rule(Arc::new(rule))
	}

	pub fn rule(mut self, rule: Arc<dyn Rule>) -> Self {
		self.rule = Some(rule);
		self
	}

	pub fn window(mut self, config: WindowConfig) -> Self {
		self.window = TagWindow::new(config);
		self.window.sync(self.store.len());
		self
	}

	pub fn separator(mut self, separator: char) -> Self {
		self.separator = separator;
		self
	}

	/// Help text shown while no error is pending.
	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	pub fn handle_key(&mut self, key: InputKey) -> InputOutcome {
		match key {
			InputKey::Enter => self.commit(),
			InputKey::Char(c) if c == self.separator => self.commit(),
			InputKey::Char(c) => {
				self.pending.push(c);
				self.commit_if_separated()
			}
			InputKey::Backspace => self.backspace(),
		}
	}

	/// Appends pasted text, committing immediately if it contains the separator.
	pub fn paste(&mut self, text: &str) -> InputOutcome {
		self.pending.push_str(text);
		self.commit_if_separated()
	}

	/// Replaces the pending text, committing immediately if it contains the separator.
	pub fn set_pending(&mut self, text: impl Into<String>) -> InputOutcome {
		self.pending = text.into();
		self.commit_if_separated()
	}

	/// Validates the pending text as one batch and merges it on success.
	///
	/// Blank pending text is not a commit attempt and leaves the state as is.
	pub fn commit(&mut self) -> InputOutcome {
		if self.pending.trim().is_empty() {
			return InputOutcome::Ignored;
		}

		let items = split_batch(&self.pending, self.separator);
		if let Err(rejection) = validate_batch(&items, self.rule.as_deref()) {
			debug!(item = %rejection.item, index = rejection.index, message = %rejection.message, "tag batch rejected");
			self.error = Some(rejection.clone());
			return InputOutcome::Rejected(rejection);
		}

		let before = self.store.len();
		let after = self.store.add_batch(items).len();
		self.window.sync(after);
		self.pending.clear();
		self.error = None;
		debug!(added = after - before, total = after, "tag batch committed");
		InputOutcome::Committed { added: after - before }
	}

	/// Removes `tag`, leaving pending text and error untouched.
	pub fn remove(&mut self, tag: &str) -> InputOutcome {
		if self.store.remove_one(tag) {
			self.window.sync(self.store.len());
			InputOutcome::Removed(tag.to_owned())
		} else {
			InputOutcome::Ignored
		}
	}

	/// Clears tags, pending text and error.
	pub fn reset(&mut self) {
		self.store.reset();
		self.pending.clear();
		self.error = None;
		self.window.sync(0);
		trace!("tag input reset");
	}

	/// Forwards a scroll event to the window.
	pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> bool {
		self.window.on_scroll(metrics, self.store.len())
	}

	/// Forwards a layout pass to the window.
	pub fn on_layout(&mut self, metrics: ScrollMetrics) -> bool {
		self.window.on_layout(metrics, self.store.len())
	}

	pub fn tags(&self) -> &TagStore {
		&self.store
	}

	/// Committed tags, in store order, for hand-off to a submission.
	pub fn committed(&self) -> Vec<String> {
		self.store.to_vec()
	}

	pub fn is_empty(&self) -> bool {
		self.store.is_empty()
	}

	/// The rendered prefix of the store.
	pub fn visible_tags(&self) -> &Slice<String> {
		&self.store.as_slice()[..self.window.size()]
	}

	pub fn window_size(&self) -> usize {
		self.window.size()
	}

	/// Number of tags below the visible window.
	pub fn overflow(&self) -> usize {
		self.window.overflow(self.store.len())
	}

	pub fn overflow_label(&self) -> Option<String> {
		overflow_label(self.overflow())
	}

	pub fn pending(&self) -> &str {
		&self.pending
	}

	pub fn error(&self) -> Option<&Rejection> {
		self.error.as_ref()
	}

	pub fn state(&self) -> InputState {
		if self.error.is_some() { InputState::Error } else { InputState::Idle }
	}

	/// Line shown under the input: the error message, else the description.
	pub fn hint(&self) -> Option<&str> {
		match &self.error {
			Some(rejection) => Some(rejection.message.as_str()),
			None => self.description.as_deref(),
		}
	}

	fn backspace(&mut self) -> InputOutcome {
		if self.pending.pop().is_some() {
			return self.commit_if_separated();
		}
		match self.store.remove_last() {
			Some(tag) => {
				self.window.sync(self.store.len());
				InputOutcome::Removed(tag)
			}
			None => InputOutcome::Ignored,
		}
	}

	fn commit_if_separated(&mut self) -> InputOutcome {
		if self.pending.contains(self.separator) {
			self.commit()
		} else {
			InputOutcome::Edited
		}
	}
}
