//! Tag-collection input: batch validation, ordered storage, incremental rendering.
//!
//! * [`TagInput`]: input surface composing the pieces below
//! * [`TagStore`]: ordered, duplicate-free tag storage
//! * [`TagWindow`]: visible-prefix bookkeeping for long tag lists
//! * [`Rule`] / [`validate_batch`]: per-item validation with all-or-nothing batches

/// Batch splitting and validation.
pub mod batch;
/// Input surface state machine.
pub mod input;
/// Per-item validation rules.
pub mod rule;
/// Ordered, duplicate-free tag storage.
pub mod store;
/// Visible window growth and clamping.
pub mod window;

pub use batch::{Rejection, split_batch, validate_batch};
pub use input::{DEFAULT_SEPARATOR, InputKey, InputOutcome, InputState, TagInput};
pub use rule::{Email, FnRule, HttpUrl, MinLength, Rule};
pub use store::TagStore;
pub use window::{ScrollMetrics, TagWindow, WindowConfig, overflow_label};
