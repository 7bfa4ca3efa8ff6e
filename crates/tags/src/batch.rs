use thiserror::Error;

use crate::rule::Rule;

/// First failing item of a rejected batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct Rejection {
	/// Position of the failing item within the batch.
	pub index: usize,
	/// The failing item, trimmed.
	pub item: String,
	/// Message produced by the rule.
	pub message: String,
}

impl Rejection {
	/// Message followed by the failing item. Blank items are named by their
	/// 1-based position, since printing them shows nothing.
	pub fn describe(&self) -> String {
		if self.item.is_empty() {
			format!("{}: (empty entry #{})", self.message, self.index + 1)
		} else {
			format!("{}: {}", self.message, self.item)
		}
	}
}

/// Splits raw input on `separator` and trims each piece.
///
/// Empty pieces are kept; rejecting them is the rule's decision.
pub fn split_batch(input: &str, separator: char) -> Vec<String> {
	input.split(separator).map(|piece| piece.trim().to_owned()).collect()
}

/// Validates every item of `items` against `rule`.
///
/// The batch is accepted only if every item passes. Without a rule every
/// batch is accepted.
pub fn validate_batch<S: AsRef<str>>(items: &[S], rule: Option<&dyn Rule>) -> Result<(), Rejection> {
	let Some(rule) = rule else {
		return Ok(());
	};
	for (index, item) in items.iter().enumerate() {
		let item = item.as_ref();
		if let Err(message) = rule.check(item) {
			return Err(Rejection {
				index,
				item: item.to_owned(),
				message,
			});
		}
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::rule::Email;

	#[test]
	fn split_trims_and_keeps_empty_pieces() {
		assert_eq!(split_batch(" a@x.com ,b@x.com,, ", ','), vec!["a@x.com", "b@x.com", "", ""]);
		assert_eq!(split_batch("single", ','), vec!["single"]);
	}

	#[test]
	fn reports_first_failing_item() {
		let items = split_batch("a@x.com, bad-email, also bad", ',');
		let err = validate_batch(&items, Some(&Email::new())).unwrap_err();
		assert_eq!(
			err,
			Rejection {
				index: 1,
				item: "bad-email".into(),
				message: "Invalid email address".into(),
			}
		);
		assert_eq!(err.describe(), "Invalid email address: bad-email");
	}

	#[test]
	fn empty_piece_is_rejected_by_rule() {
		let items = split_batch("a@x.com,", ',');
		let err = validate_batch(&items, Some(&Email::new())).unwrap_err();
		assert_eq!(err.index, 1);
		assert_eq!(err.item, "");
		assert_eq!(err.describe(), "Invalid email address: (empty entry #2)");
	}

	#[test]
	fn no_rule_accepts_anything() {
		let items = split_batch("not an email,,", ',');
		assert_eq!(validate_batch(&items, None), Ok(()));
	}
}
