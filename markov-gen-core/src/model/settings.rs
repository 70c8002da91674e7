use serde::{Deserialize, Serialize};

use super::trainer::DEFAULT_CHAIN_LENGTH;
use crate::error::{MarkovError, Result};

/// Number of words generated when the caller does not ask for a count.
pub const DEFAULT_WORD_COUNT: usize = 30;

/// Generation parameters of a [`Generator`](super::generator::Generator).
///
/// Missing fields take their default value when deserialized, so partial
/// input (query strings, JSON bodies) is accepted.
///
/// # Invariants
/// - `chain_length` is always >= 1 once validated
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Settings {
	/// Number of words in a key and in a continuation.
	#[serde(default = "default_chain_length")]
	chain_length: usize,

	/// Number of words requested by `Generator::generate`.
	#[serde(default = "default_word_count")]
	word_count: usize,
}

fn default_chain_length() -> usize {
	DEFAULT_CHAIN_LENGTH
}

fn default_word_count() -> usize {
	DEFAULT_WORD_COUNT
}

impl Default for Settings {
	fn default() -> Self {
		Self { chain_length: DEFAULT_CHAIN_LENGTH, word_count: DEFAULT_WORD_COUNT }
	}
}

impl Settings {
	/// Creates validated settings.
	///
	/// # Errors
	/// Returns an error if `chain_length` is 0.
	pub fn new(chain_length: usize, word_count: usize) -> Result<Self> {
		let settings = Self { chain_length, word_count };
		settings.validate()?;
		Ok(settings)
	}

	/// Returns the chain length.
	pub fn chain_length(&self) -> usize {
		self.chain_length
	}

	/// Returns the number of words `Generator::generate` asks for.
	pub fn word_count(&self) -> usize {
		self.word_count
	}

	/// Sets the number of words `Generator::generate` asks for.
	pub fn set_word_count(&mut self, word_count: usize) {
		self.word_count = word_count;
	}

	/// Sets the chain length.
	///
	/// # Errors
	/// Returns an error if `chain_length` is 0.
	pub fn set_chain_length(&mut self, chain_length: usize) -> Result<()> {
		if chain_length == 0 {
			return Err(MarkovError::InvalidArgument("chain length must be >= 1".to_owned()));
		}
		self.chain_length = chain_length;
		Ok(())
	}

	/// Checks deserialized settings.
	pub fn validate(&self) -> Result<()> {
		if self.chain_length == 0 {
			return Err(MarkovError::InvalidArgument("chain length must be >= 1".to_owned()));
		}
		Ok(())
	}
}
