use super::continuations::Continuations;
use crate::error::{MarkovError, Result};
use log::{debug, trace};
use rand::Rng;
use std::collections::HashMap;

/// Represents a trained word n-gram model.
///
/// The `FrequencyTable` maps every key (up to `chain_length` words joined by
/// a single space) to the continuations observed right after it.
///
/// # Responsibilities
/// - Store keys in an ordered, index-addressable list
/// - Store the continuations of each key with their counts
/// - Run weighted random walks over the chain
///
/// # Invariants
/// - `chain_length` is always >= 1
/// - `keys` and `entries` hold exactly the same keys, each once
/// - The table is never mutated by generation
///
/// Tables are built by [`Trainer`](super::trainer::Trainer) only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrequencyTable {
	/// Number of words in a key and in a continuation
	chain_length: usize,

	/// Keys in first-seen order
	keys: Vec<String>,

	/// Mapping from a key to its observed continuations
	entries: HashMap<String, Continuations>,
}

impl FrequencyTable {
	/// Creates an empty table.
	///
	/// # Errors
	/// Returns an error if `chain_length` is 0.
	pub(crate) fn new(chain_length: usize) -> Result<Self> {
		if chain_length == 0 {
			return Err(MarkovError::InvalidArgument("chain length must be >= 1".to_owned()));
		}
		Ok(Self { chain_length, keys: Vec::new(), entries: HashMap::new() })
	}

	/// Records that `continuation` followed `key` once.
	///
	/// The key is appended to the key list the first time it is seen.
	pub(crate) fn record(&mut self, key: &str, continuation: &str) {
		if !self.entries.contains_key(key) {
			self.keys.push(key.to_owned());
		}
		self.entries.entry(key.to_owned()).or_default().add(continuation);
	}

	/// Number of words in a key.
	pub fn chain_length(&self) -> usize {
		self.chain_length
	}

	/// Number of distinct keys.
	pub fn len(&self) -> usize {
		self.keys.len()
	}

	pub fn is_empty(&self) -> bool {
		self.keys.is_empty()
	}

	/// Keys in a stable order (the order they were first seen in).
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.keys.iter().map(String::as_str)
	}

	/// Returns the continuations observed after `key`, if the key is known.
	pub fn continuations(&self, key: &str) -> Option<&Continuations> {
		self.entries.get(key)
	}

	/// Total number of recorded (key, continuation) observations.
	///
	/// Equal to the number of words the table was trained on.
	pub fn observations(&self) -> usize {
		self.entries.values().map(Continuations::observations).sum()
	}

	/// Returns a uniformly random key, regardless of how many
	/// continuations it has.
	///
	/// Returns `None` if the table is empty.
	pub fn random_key<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
		if self.keys.is_empty() {
			return None;
		}
		Some(self.keys[rng.random_range(0..self.keys.len())].as_str())
	}

	/// Generates text using the thread-local random generator.
	///
	/// See [`generate_with`](Self::generate_with).
	pub fn generate(&self, word_count: usize) -> Result<String> {
		self.generate_with(&mut rand::rng(), word_count)
	}

	/// Generates text by a weighted random walk over the table.
	///
	/// # Behavior
	/// - Starts from a uniformly random key, which opens the output.
	/// - Performs up to `word_count / chain_length` steps, each appending a
	///   continuation picked proportionally to its count, which then becomes
	///   the current key.
	/// - Stops early when the current key has nothing to follow; the text
	///   produced so far is returned.
	///
	/// The output never holds more than
	/// `chain_length * (1 + word_count / chain_length)` words.
	///
	/// # Errors
	/// Returns [`MarkovError::Uninitialized`] if the table is empty.
	pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R, word_count: usize) -> Result<String> {
		let seed = self.random_key(rng).ok_or(MarkovError::Uninitialized)?;

		let mut text = seed.to_owned();
		let mut current = seed;
		let steps = word_count / self.chain_length;

		for step in 0..steps {
			let picked = match self.entries.get(current) {
				Some(continuations) => continuations.pick(rng),
				None => None,
			};
			let next = match picked {
				Some(next) => next,
				None => {
					trace!("walk exhausted after {} of {} steps at {:?}", step, steps, current);
					break;
				}
			};
			text.push(' ');
			text.push_str(next);
			current = next;
		}

		debug!("generated {} words from a {}-key table", text.split(' ').count(), self.len());
		Ok(text)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn table(chain_length: usize, pairs: &[(&str, &str)]) -> FrequencyTable {
		let mut table = FrequencyTable::new(chain_length).unwrap();
		for (key, continuation) in pairs {
			table.record(key, continuation);
		}
		table
	}

	#[test]
	fn zero_chain_length_is_rejected() {
		assert!(matches!(FrequencyTable::new(0), Err(MarkovError::InvalidArgument(_))));
	}

	#[test]
	fn keys_keep_first_seen_order() {
		let table = table(1, &[("b", "a"), ("a", "b"), ("b", "c")]);

		assert_eq!(table.len(), 2);
		assert_eq!(table.keys().collect::<Vec<_>>(), vec!["b", "a"]);
		assert_eq!(table.continuations("b").unwrap().count("c"), 1);
		assert_eq!(table.observations(), 3);
	}

	#[test]
	fn empty_table_is_uninitialized() {
		let table = FrequencyTable::new(3).unwrap();
		assert!(matches!(table.generate(10), Err(MarkovError::Uninitialized)));
	}

	#[test]
	fn every_key_can_seed_a_walk() {
		let table = table(1, &[("a", "b"), ("b", "c"), ("c", "a"), ("d", "")]);
		let mut rng = StdRng::seed_from_u64(3);

		let mut seeds: Vec<&str> = (0..500).filter_map(|_| table.random_key(&mut rng)).collect();
		seeds.sort();
		seeds.dedup();
		assert_eq!(seeds, vec!["a", "b", "c", "d"]);
	}

	#[test]
	fn walk_follows_the_only_path() {
		let table = table(1, &[("a", "b"), ("b", "c"), ("c", "")]);
		let mut rng = StdRng::seed_from_u64(11);

		for _ in 0..50 {
			let text = table.generate_with(&mut rng, 10).unwrap();
			assert!(["a b c", "b c", "c"].contains(&text.as_str()), "{}", text);
		}
	}

	#[test]
	fn word_count_below_chain_length_returns_the_seed() {
		let table = table(3, &[("a b c", "d e f"), ("d e f", "")]);
		let mut rng = StdRng::seed_from_u64(5);

		let text = table.generate_with(&mut rng, 2).unwrap();
		assert!(text == "a b c" || text == "d e f");
	}

	#[test]
	fn unknown_continuation_ends_the_walk() {
		let table = table(1, &[("a", "z")]);
		let text = table.generate_with(&mut StdRng::seed_from_u64(0), 10).unwrap();
		assert_eq!(text, "a z");
	}
}
