use std::io;

/// Errors raised by training, generation and corpus loading.
///
/// An exhausted random walk is not an error: generation returns the text
/// produced so far instead.
#[derive(Debug, thiserror::Error)]
pub enum MarkovError {
	/// Generation was requested before any text was trained,
	/// or on a table without a single key.
	#[error("not initialized: no text has been loaded")]
	Uninitialized,

	/// A parameter is out of its valid range (ex. a chain length of 0).
	#[error("invalid argument: {0}")]
	InvalidArgument(String),

	/// A corpus file or folder could not be read.
	#[error("I/O error: {0}")]
	Io(#[from] io::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, MarkovError>;
