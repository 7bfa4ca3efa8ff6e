//! Interactive invitation composer.
//!
//! [`ComposeView`] maps terminal events onto the invitation form and renders
//! plain lines; [`terminal`] drives it against a real terminal.

pub mod terminal;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use hub_domain::forms::InviteForm;
use hub_tags::{InputKey, InputOutcome, ScrollMetrics};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Height of one tag row in [`ScrollMetrics`] units.
pub const ROW_HEIGHT: f32 = 20.0;

/// Lines above the tag list: title, input, hint, blank.
const HEADER_ROWS: usize = 4;

/// What the driver should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
	Continue,
	Submit,
	Quit,
}

#[derive(Debug)]
pub struct ComposeView {
	form: InviteForm,
	/// Tag list rows on screen.
	rows: usize,
	/// First tag row on screen.
	offset: usize,
	status: Option<String>,
}

impl ComposeView {
	pub fn new(form: InviteForm, screen_rows: usize) -> Self {
		let mut view = Self {
			form,
			rows: 1,
			offset: 0,
			status: None,
		};
		view.resize(screen_rows);
		view
	}

	pub fn form_mut(&mut self) -> &mut InviteForm {
		&mut self.form
	}

	/// Message shown in the footer until the next edit.
	pub fn set_status(&mut self, status: impl Into<String>) {
		self.status = Some(status.into());
	}

	pub fn resize(&mut self, screen_rows: usize) {
		// Overflow label, blank line and status line.
		self.rows = screen_rows.saturating_sub(HEADER_ROWS + 3).max(1);
		self.layout();
	}

	pub fn handle_event(&mut self, event: &Event) -> Action {
		match event {
			Event::Key(key) => self.handle_key(*key),
			Event::Paste(text) => {
				let outcome = self.form.emails_mut().paste(text);
				self.after_edit(&outcome);
				Action::Continue
			}
			Event::Resize(_, rows) => {
				self.resize(usize::from(*rows));
				Action::Continue
			}
			_ => Action::Continue,
		}
	}

	pub fn handle_key(&mut self, key: KeyEvent) -> Action {
		if key.kind == KeyEventKind::Release {
			return Action::Continue;
		}
		let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
		let input_key = match key.code {
			KeyCode::Esc => return Action::Quit,
			KeyCode::Char('c') if ctrl => return Action::Quit,
			KeyCode::Char('s') if ctrl => {
				return if self.form.can_submit() { Action::Submit } else { Action::Continue };
			}
			KeyCode::Char('r') if ctrl => {
				self.form.emails_mut().reset();
				self.offset = 0;
				self.status = None;
				self.layout();
				return Action::Continue;
			}
			KeyCode::Down => return self.scroll(1),
			KeyCode::Up => return self.scroll(-1),
			KeyCode::PageDown => return self.scroll(self.rows as isize),
			KeyCode::PageUp => return self.scroll(-(self.rows as isize)),
			KeyCode::Char(_) if ctrl => return Action::Continue,
			KeyCode::Char(c) => InputKey::Char(c),
			KeyCode::Enter => InputKey::Enter,
			KeyCode::Backspace => InputKey::Backspace,
			_ => return Action::Continue,
		};
		let outcome = self.form.emails_mut().handle_key(input_key);
		self.after_edit(&outcome);
		Action::Continue
	}

	fn after_edit(&mut self, outcome: &InputOutcome) {
		if !matches!(outcome, InputOutcome::Ignored) {
			self.status = None;
		}
		if matches!(outcome, InputOutcome::Committed { .. } | InputOutcome::Removed(_)) {
			self.layout();
		}
	}

	fn metrics(&self) -> ScrollMetrics {
		let content = self.form.emails().window_size() as f32 * ROW_HEIGHT;
		ScrollMetrics::new(self.offset as f32 * ROW_HEIGHT, content, self.rows as f32 * ROW_HEIGHT)
	}

	/// Fills the viewport, then keeps the offset inside the rendered rows.
	pub fn layout(&mut self) {
		loop {
			let metrics = self.metrics();
			if !self.form.emails_mut().on_layout(metrics) {
				break;
			}
		}
		self.clamp_offset();
	}

	fn scroll(&mut self, delta: isize) -> Action {
		self.offset = self.offset.saturating_add_signed(delta);
		self.clamp_offset();
		let metrics = self.metrics();
		self.form.emails_mut().on_scroll(metrics);
		Action::Continue
	}

	fn clamp_offset(&mut self) {
		let max = self.form.emails().window_size().saturating_sub(self.rows);
		self.offset = self.offset.min(max);
	}

	/// Screen lines, each fitted to `width` columns.
	pub fn render(&self, width: usize) -> Vec<String> {
		let input = self.form.emails();
		let mut lines = vec![
			format!("Invite participants to {}", self.form.collection()),
			format!("> {}_", input.pending()),
			match input.error() {
				Some(rejection) => format!("! {}", rejection.describe()),
				None => input.hint().unwrap_or_default().to_owned(),
			},
			String::new(),
		];

		let visible = input.visible_tags();
		let end = (self.offset + self.rows).min(visible.len());
		for (i, tag) in visible[self.offset..end].iter().enumerate() {
			lines.push(format!("{:>4}. {tag}", self.offset + i + 1));
		}
		if let Some(label) = input.overflow_label() {
			lines.push(label);
		}

		lines.push(String::new());
		lines.push(match &self.status {
			Some(status) => status.clone(),
			None => format!(
				"[{}]  ctrl-s send  ctrl-r clear  esc quit",
				self.form.submit_label()
			),
		});
		lines.into_iter().map(|line| fit(&line, width)).collect()
	}
}

/// Truncates `line` to at most `width` display columns.
fn fit(line: &str, width: usize) -> String {
	if line.width() <= width {
		return line.to_owned();
	}
	let mut used = 0;
	line.chars()
		.take_while(|c| {
			used += c.width().unwrap_or(0);
			used <= width
		})
		.collect()
}
