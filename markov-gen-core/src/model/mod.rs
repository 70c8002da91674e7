//! Top-level module for the Markov chain generation system.
//!
//! This module provides:
//! - The trained model (`FrequencyTable`) and its per-key distribution (`Continuations`)
//! - Table construction (`Trainer`, `train`)
//! - Generation parameters (`Settings`)
//! - A high-level generation interface (`Generator`)

/// High-level interface owning settings and a trained table.
///
/// Exposes text, file and folder loading and word generation.
pub mod generator;

/// Word n-gram table mapping each key to its observed continuations.
///
/// Supports uniform key selection and weighted random walks.
pub mod frequency_table;

/// Sliding-window construction of a `FrequencyTable`.
pub mod trainer;

/// Observed continuations of a single key.
///
/// Tracks occurrence counts and supports weighted random sampling.
pub mod continuations;

/// Generation parameters (chain length, default word count).
pub mod settings;
