//! Word-level Markov chain text generation library.
//!
//! This crate provides:
//! - A frequency table of word n-grams and their observed continuations
//! - A trainer sliding a fixed-size window over whitespace-split text
//! - Weighted random walks over a trained table
//! - A generator handle owning its settings and its trained table
//! - Small I/O helpers to feed corpus files
//!
//! ```
//! use markov_gen_core::model::trainer::train;
//!
//! let table = train("the cat sat on the mat the cat ran", 2).unwrap();
//! let text = table.generate(4).unwrap();
//! assert!(!text.is_empty());
//! ```

/// Error type shared by every operation of the crate.
pub mod error;

/// Frequency table, trainer, generator and settings.
pub mod model;

/// I/O utilities (file loading, folder listing, path helpers).
pub mod io;

pub use error::{MarkovError, Result};
