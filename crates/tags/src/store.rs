use indexmap::IndexSet;
use indexmap::set::Slice;

/// Ordered, duplicate-free collection of accepted tags.
///
/// Equality is exact and case-sensitive. New tags are appended after every
/// existing tag, in the order first encountered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagStore {
	tags: IndexSet<String>,
}

impl TagStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Merges `items`, silently dropping values already present.
	pub fn add_batch<I, S>(&mut self, items: I) -> &Slice<String>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.tags.extend(items.into_iter().map(Into::into));
		self.tags.as_slice()
	}

	/// Removes `item` if present, preserving the order of the rest.
	pub fn remove_one(&mut self, item: &str) -> bool {
		self.tags.shift_remove(item)
	}

	/// Removes and returns the last tag in store order.
	pub fn remove_last(&mut self) -> Option<String> {
		self.tags.pop()
	}

	pub fn reset(&mut self) {
		self.tags.clear();
	}

	pub fn len(&self) -> usize {
		self.tags.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tags.is_empty()
	}

	pub fn contains(&self, item: &str) -> bool {
		self.tags.contains(item)
	}

	pub fn iter(&self) -> impl ExactSizeIterator<Item = &str> {
		self.tags.iter().map(String::as_str)
	}

	pub fn as_slice(&self) -> &Slice<String> {
		self.tags.as_slice()
	}

	pub fn to_vec(&self) -> Vec<String> {
		self.tags.iter().cloned().collect()
	}

	pub fn into_vec(self) -> Vec<String> {
		self.tags.into_iter().collect()
	}
}

impl<S: Into<String>> FromIterator<S> for TagStore {
	fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
		let mut store = Self::new();
		store.add_batch(iter);
		store
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn add_batch_is_set_union_in_first_seen_order() {
		let mut store = TagStore::new();
		store.add_batch(["a@x.com", "b@x.com"]);
		let tags = store.add_batch(["a@x.com", "c@x.com", "c@x.com"]);
		assert_eq!(tags.len(), 3);
		assert_eq!(store.to_vec(), vec!["a@x.com", "b@x.com", "c@x.com"]);
	}

	#[test]
	fn equality_is_case_sensitive() {
		let store: TagStore = ["A@x.com", "a@x.com"].into_iter().collect();
		assert_eq!(store.len(), 2);
	}

	#[test]
	fn remove_one_keeps_order_and_ignores_missing() {
		let mut store: TagStore = ["a", "b", "c"].into_iter().collect();
		assert!(store.remove_one("b"));
		assert!(!store.remove_one("zzz"));
		assert_eq!(store.to_vec(), vec!["a", "c"]);
	}

	#[test]
	fn remove_last_pops_in_store_order() {
		let mut store: TagStore = ["a", "b"].into_iter().collect();
		assert_eq!(store.remove_last().as_deref(), Some("b"));
		assert_eq!(store.remove_last().as_deref(), Some("a"));
		assert_eq!(store.remove_last(), None);
	}

	#[test]
	fn reset_empties() {
		let mut store: TagStore = ["a", "b"].into_iter().collect();
		store.reset();
		assert!(store.is_empty());
		assert!(!store.contains("a"));
	}
}
