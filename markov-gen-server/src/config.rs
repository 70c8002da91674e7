use std::env;
use std::path::PathBuf;

use markov_gen_core::model::settings::{Settings, DEFAULT_WORD_COUNT};
use markov_gen_core::model::trainer::DEFAULT_CHAIN_LENGTH;

/// Server configuration, read from `MARKOV_*` environment variables.
///
/// | variable                | default          |
/// |-------------------------|------------------|
/// | `MARKOV_BIND`           | `127.0.0.1:5000` |
/// | `MARKOV_DATA_DIR`       | `./data`         |
/// | `MARKOV_CORPORA`        | none             |
/// | `MARKOV_CHAIN_LENGTH`   | `3`              |
/// | `MARKOV_WORD_COUNT`     | `30`             |
/// | `MARKOV_MAX_WORD_COUNT` | `10000`          |
#[derive(Clone, Debug)]
pub struct ServerConfig {
	/// Address the HTTP server listens on.
	pub bind: String,
	/// Folder holding the `<name>.txt` corpora.
	pub data_dir: PathBuf,
	/// Corpora trained at startup.
	pub corpora: Vec<String>,
	/// Default generation settings.
	pub settings: Settings,
	/// Largest `word_count` a single generation may ask for.
	pub max_word_count: usize,
}

/// Upper bound on generated words when `MARKOV_MAX_WORD_COUNT` is unset.
pub const DEFAULT_MAX_WORD_COUNT: usize = 10_000;

impl ServerConfig {
	/// Reads the configuration from the process environment.
	pub fn from_env() -> Result<Self, String> {
		Self::from_lookup(|key| env::var(key).ok())
	}

	/// Reads the configuration through `lookup`, which returns the value of a variable if set.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
	where
		F: Fn(&str) -> Option<String>,
	{
		let chain_length = parse_number(&lookup, "MARKOV_CHAIN_LENGTH", DEFAULT_CHAIN_LENGTH)?;
		let word_count = parse_number(&lookup, "MARKOV_WORD_COUNT", DEFAULT_WORD_COUNT)?;
		let settings = Settings::new(chain_length, word_count).map_err(|e| format!("MARKOV_CHAIN_LENGTH: {e}"))?;
		let max_word_count = parse_number(&lookup, "MARKOV_MAX_WORD_COUNT", DEFAULT_MAX_WORD_COUNT)?;
		if word_count > max_word_count {
			return Err(format!("MARKOV_WORD_COUNT ({word_count}) exceeds MARKOV_MAX_WORD_COUNT ({max_word_count})"));
		}

		Ok(Self {
			bind: lookup("MARKOV_BIND").unwrap_or_else(|| "127.0.0.1:5000".to_owned()),
			data_dir: PathBuf::from(lookup("MARKOV_DATA_DIR").unwrap_or_else(|| "./data".to_owned())),
			corpora: lookup("MARKOV_CORPORA").map(|s| split_names(&s)).unwrap_or_default(),
			settings,
			max_word_count,
		})
	}
}

/// Splits a comma separated list, dropping blank entries.
pub fn split_names(names: &str) -> Vec<String> {
	names
		.split(',')
		.map(str::trim)
		.filter(|s| !s.is_empty())
		.map(str::to_owned)
		.collect()
}

fn parse_number<F>(lookup: &F, key: &str, default: usize) -> Result<usize, String>
where
	F: Fn(&str) -> Option<String>,
{
	match lookup(key) {
		None => Ok(default),
		Some(value) => value
			.trim()
			.parse::<usize>()
			.map_err(|_| format!("{key} must be a positive integer, got {value:?}")),
	}
}
