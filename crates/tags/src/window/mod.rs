//! Visible window over a long tag list.
//!
//! Only a prefix of the store is rendered. The prefix grows in fixed steps
//! when the surface scrolls near its end ([`TagWindow::on_scroll`]) or when
//! the rendered prefix does not fill the viewport ([`TagWindow::on_layout`]),
//! and is clamped down only when the store shrinks below it.


use tracing::trace;

/// Tuning knobs for window growth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowConfig {
	/// Items shown as soon as the store holds them.
	pub baseline: usize,
	/// Growth per scroll threshold crossing.
	pub scroll_increment: usize,
	/// Growth per layout pass that found the viewport unfilled.
	pub fill_increment: usize,
	/// Remaining scroll distance below which the window grows, in the
	/// surface's own units (pixels, rows).
	pub scroll_threshold: f32,
}

impl WindowConfig {
	pub const DEFAULT_BASELINE: usize = 200;
	pub const DEFAULT_SCROLL_INCREMENT: usize = 200;
	pub const DEFAULT_FILL_INCREMENT: usize = 100;
	pub const DEFAULT_SCROLL_THRESHOLD: f32 = 100.0;
}

impl Default for WindowConfig {
	fn default() -> Self {
		Self {
			baseline: Self::DEFAULT_BASELINE,
			scroll_increment: Self::DEFAULT_SCROLL_INCREMENT,
			fill_increment: Self::DEFAULT_FILL_INCREMENT,
			scroll_threshold: Self::DEFAULT_SCROLL_THRESHOLD,
		}
	}
}

/// Scroll geometry of the surface rendering the window.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
	/// Distance scrolled from the top.
	pub offset: f32,
	/// Total extent of the rendered content.
	pub content: f32,
	/// Visible extent of the container.
	pub viewport: f32,
}

impl ScrollMetrics {
	pub fn new(offset: f32, content: f32, viewport: f32) -> Self {
		Self { offset, content, viewport }
	}

	/// Distance left to scroll before reaching the end.
	pub fn remaining(&self) -> f32 {
		(self.content - self.offset - self.viewport).max(0.0)
	}

	/// True when the content is taller than the viewport, i.e. scrolling is possible.
	pub fn overflows(&self) -> bool {
		self.content > self.viewport
	}
}

/// Number of store entries currently rendered.
///
/// Invariant: `size() <= len` for the `len` last passed to [`Self::sync`].
#[derive(Debug, Clone)]
pub struct TagWindow {
	config: WindowConfig,
	size: usize,
}

impl Default for TagWindow {
	fn default() -> Self {
		Self::new(WindowConfig::default())
	}
}

impl TagWindow {
	pub fn new(config: WindowConfig) -> Self {
		Self { config, size: 0 }
	}

	pub fn config(&self) -> &WindowConfig {
		&self.config
	}

	pub fn size(&self) -> usize {
		self.size
	}

	/// Reconciles the window with a new store length.
	///
	/// Clamps down when the store shrank below the window, otherwise raises
	/// the window to the baseline (bounded by `len`). Returns whether the
	/// size changed.
	pub fn sync(&mut self, len: usize) -> bool {
		let before = self.size;
		if len < self.size {
			self.size = len;
		} else {
			self.size = self.size.max(self.config.baseline.min(len));
		}
		if before != self.size {
			trace!(before, after = self.size, len, "tag window synced");
		}
		before != self.size
	}

	/// Grows by one scroll increment when the surface is near its end.
	pub fn on_scroll(&mut self, metrics: ScrollMetrics, len: usize) -> bool {
		if metrics.remaining() < self.config.scroll_threshold {
			self.grow(self.config.scroll_increment, len)
		} else {
			false
		}
	}

	/// Grows by one fill increment when the content does not fill the viewport.
	///
	/// Without a scrollbar [`Self::on_scroll`] can never fire, so the owner
	/// calls this after mount and after every store change.
	pub fn on_layout(&mut self, metrics: ScrollMetrics, len: usize) -> bool {
		if metrics.overflows() {
			false
		} else {
			self.grow(self.config.fill_increment, len)
		}
	}

	/// Entries not yet rendered.
	pub fn overflow(&self, len: usize) -> usize {
		len.saturating_sub(self.size)
	}

	fn grow(&mut self, by: usize, len: usize) -> bool {
		if by == 0 || self.size >= len {
			return false;
		}
		let before = self.size;
		self.size = self.size.saturating_add(by).min(len);
		trace!(before, after = self.size, len, "tag window grew");
		true
	}
}

/// Indicator text for entries hidden below the window.
pub fn overflow_label(remaining: usize) -> Option<String> {
	(remaining > 0).then(|| format!("+{remaining} more (scroll to load)"))
}
