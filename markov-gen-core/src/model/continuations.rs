use std::collections::HashMap;

use rand::Rng;

/// Observed continuations of a single key.
///
/// Conceptually, this is the set of outgoing edges of a node in a Markov
/// chain, each weighted by its number of observations.
///
/// ## Responsibilities:
/// - Accumulate continuation occurrences during training
/// - Pick the next continuation using weighted random sampling
///
/// ## Invariants
/// - Each continuation occurrence count is strictly positive
/// - Entries keep their first-seen order, which is the sampling scan order
/// - The empty continuation (end of a corpus) is recorded but never picked
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Continuations {
	/// Continuations and their occurrence count, in first-seen order.
	/// Example: [("sat on", 2), ("ran", 1)]
	entries: Vec<(String, usize)>,
	/// Position of each continuation in `entries`.
	index: HashMap<String, usize>,
}

impl Continuations {
	/// Records an occurrence of `continuation`.
	///
	/// - If the continuation already exists, its occurrence count is increased.
	/// - Otherwise, a new entry is appended with an initial count of 1.
	pub fn add(&mut self, continuation: &str) {
		match self.index.get(continuation) {
			Some(&position) => self.entries[position].1 += 1,
			None => {
				self.index.insert(continuation.to_owned(), self.entries.len());
				self.entries.push((continuation.to_owned(), 1));
			}
		}
	}

	/// Returns how many times `continuation` was observed (0 if never).
	pub fn count(&self, continuation: &str) -> usize {
		self.index
			.get(continuation)
			.map_or(0, |&position| self.entries[position].1)
	}

	/// Number of distinct continuations, the empty one included.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterates over `(continuation, count)` in first-seen order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
		self.entries.iter().map(|(text, count)| (text.as_str(), *count))
	}

	/// Sum of every recorded count, the empty continuation included.
	pub fn observations(&self) -> usize {
		self.entries.iter().map(|(_, count)| count).sum()
	}

	/// Sum of the counts of the continuations that `pick` may return.
	pub fn total(&self) -> usize {
		self.selectable().map(|(_, count)| count).sum()
	}

	fn selectable(&self) -> impl Iterator<Item = (&str, usize)> {
		self.iter().filter(|(text, _)| !text.is_empty())
	}

	/// Picks a continuation using weighted random sampling.
	///
	/// The probability of selecting a continuation is proportional to its
	/// occurrence count. A draw `r` in `[0, total)` selects the first entry
	/// whose cumulative count exceeds `r`.
	///
	/// Returns `None` if nothing can follow (no entry, or only the empty one).
	pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
		let total = self.total();
		if total == 0 {
			return None;
		}

		let mut r = rng.random_range(0..total);
		for (text, count) in self.selectable() {
			if r < count {
				return Some(text);
			}
			r -= count;
		}

		// Unreachable while `total` and the scan see the same entries
		None
	}
}
