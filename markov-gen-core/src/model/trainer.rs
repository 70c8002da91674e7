use super::frequency_table::FrequencyTable;
use crate::error::Result;
use log::debug;

/// Chain length used when the caller does not pick one.
pub const DEFAULT_CHAIN_LENGTH: usize = 3;

/// Builds a [`FrequencyTable`] from one or more texts.
///
/// # Behavior
/// - Each fed text is split on single spaces.
/// - A window of `chain_length` words slides over every word position; the
///   window is the key and the next `chain_length` words its continuation.
/// - Near the end of a text keys and continuations are truncated; the last
///   continuation is the empty string.
/// - Windows never span two fed texts.
///
/// Once [`finish`](Self::finish) returns, the table is frozen.
#[derive(Debug)]
pub struct Trainer {
	table: FrequencyTable,
}

impl Trainer {
	/// Creates a trainer producing keys of `chain_length` words.
	///
	/// # Errors
	/// Returns [`InvalidArgument`](crate::MarkovError::InvalidArgument) if `chain_length` is 0.
	pub fn new(chain_length: usize) -> Result<Self> {
		Ok(Self { table: FrequencyTable::new(chain_length)? })
	}

	/// Continues training on top of an already trained table.
	pub fn resume(table: FrequencyTable) -> Self {
		Self { table }
	}

	/// Adds every window of `text` to the table.
	///
	/// An empty text adds nothing.
	pub fn feed(&mut self, text: &str) {
		if text.is_empty() {
			return;
		}

		let words: Vec<&str> = text.split(' ').collect();
		let n = self.table.chain_length();
		let len = words.len();

		for i in 0..len {
			let middle = i.saturating_add(n).min(len);
			let end = middle.saturating_add(n).min(len);
			let key = words[i..middle].join(" ");
			let continuation = words[middle..end].join(" ");
			self.table.record(&key, &continuation);
		}

		debug!("trained on {} words, table has {} keys", len, self.table.len());
	}

	/// Returns the trained table.
	pub fn finish(self) -> FrequencyTable {
		self.table
	}
}

/// Trains a table on a single text.
///
/// # Errors
/// Returns [`InvalidArgument`](crate::MarkovError::InvalidArgument) if `chain_length` is 0.
pub fn train(text: &str, chain_length: usize) -> Result<FrequencyTable> {
	let mut trainer = Trainer::new(chain_length)?;
	trainer.feed(text);
	Ok(trainer.finish())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::MarkovError;

	#[test]
	fn sliding_window_with_tail_keys() {
		let table = train("a b c d e", 2).unwrap();

		assert_eq!(table.keys().collect::<Vec<_>>(), vec!["a b", "b c", "c d", "d e", "e"]);
		assert_eq!(table.continuations("a b").unwrap().count("c d"), 1);
		assert_eq!(table.continuations("b c").unwrap().count("d e"), 1);
		assert_eq!(table.continuations("c d").unwrap().count("e"), 1);
		assert_eq!(table.continuations("d e").unwrap().count(""), 1);
		assert_eq!(table.continuations("e").unwrap().count(""), 1);
	}

	#[test]
	fn repeated_pairs_are_counted() {
		let table = train("a a a a a a", 1).unwrap();

		assert_eq!(table.len(), 1);
		let continuations = table.continuations("a").unwrap();
		assert_eq!(continuations.count("a"), 5);
		assert_eq!(continuations.count(""), 1);
	}

	#[test]
	fn empty_text_gives_an_empty_table() {
		let table = train("", 3).unwrap();
		assert!(table.is_empty());
		assert_eq!(table.observations(), 0);
	}

	#[test]
	fn zero_chain_length_is_invalid() {
		assert!(matches!(train("a b", 0), Err(MarkovError::InvalidArgument(_))));
		assert!(matches!(Trainer::new(0), Err(MarkovError::InvalidArgument(_))));
	}

	#[test]
	fn chain_longer_than_text() {
		let table = train("one two", 5).unwrap();
		assert_eq!(table.keys().collect::<Vec<_>>(), vec!["one two", "two"]);
		assert_eq!(table.continuations("one two").unwrap().count(""), 1);
	}

	#[test]
	fn huge_chain_length_keeps_whole_text_as_key() {
		let table = train("a b c", usize::MAX).unwrap();
		assert_eq!(table.keys().collect::<Vec<_>>(), vec!["a b c", "b c", "c"]);
		assert_eq!(table.continuations("a b c").unwrap().count(""), 1);

		let table = train("a b c", usize::MAX / 2 + 1).unwrap();
		assert_eq!(table.observations(), 3);
	}

	#[test]
	fn windows_do_not_span_fed_texts() {
		let mut trainer = Trainer::new(1).unwrap();
		trainer.feed("x y");
		trainer.feed("y z");
		let table = trainer.finish();

		let after_y = table.continuations("y").unwrap();
		assert_eq!(after_y.count("z"), 1);
		assert_eq!(after_y.count(""), 1);
		assert_eq!(table.observations(), 4);
	}

	#[test]
	fn resume_accumulates() {
		let table = train("a b", 1).unwrap();
		let mut trainer = Trainer::resume(table);
		trainer.feed("a b");
		let table = trainer.finish();

		assert_eq!(table.continuations("a").unwrap().count("b"), 2);
		assert_eq!(table.len(), 2);
	}

	#[test]
	fn double_spaces_yield_empty_words() {
		let table = train("a  b", 1).unwrap();
		assert_eq!(table.keys().collect::<Vec<_>>(), vec!["a", "", "b"]);
	}
}
