use crate::error::{MarkovError, Result};
use crate::io;
use crate::model::frequency_table::FrequencyTable;
use crate::model::settings::Settings;
use crate::model::trainer::Trainer;
use log::{debug, info};
use rand::Rng;
use std::path::Path;

/// High-level generator owning its settings and its trained table.
///
/// # Responsibilities
/// - Train (and keep training) a `FrequencyTable` from texts, files or folders
/// - Remember which corpora were loaded
/// - Generate text, failing with `Uninitialized` until something was loaded
///
/// The table only grows through `&mut self` methods, so it is never modified
/// while generation borrows it.
#[derive(Debug, Default)]
pub struct Generator {
	settings: Settings,
	table: Option<FrequencyTable>,
	source_names: Vec<String>,
}

impl Generator {
	/// Creates an untrained generator.
	///
	/// # Errors
	/// Returns an error if the settings are invalid.
	pub fn new(settings: Settings) -> Result<Self> {
		settings.validate()?;
		Ok(Self { settings, table: None, source_names: Vec::new() })
	}

	/// Returns the generation settings.
	pub fn settings(&self) -> &Settings {
		&self.settings
	}

	/// Returns the trained table, if any text was loaded.
	pub fn table(&self) -> Option<&FrequencyTable> {
		self.table.as_ref()
	}

	/// Returns the names of the loaded corpora, in load order.
	pub fn source_names(&self) -> &[String] {
		&self.source_names
	}

	/// Trains on `text`, on top of everything loaded before.
	///
	/// # Errors
	/// Returns an error if the configured chain length is invalid.
	pub fn load_text(&mut self, text: &str) -> Result<()> {
		let mut trainer = match self.table.take() {
			Some(table) => Trainer::resume(table),
			None => Trainer::new(self.settings.chain_length())?,
		};
		trainer.feed(text);
		self.table = Some(trainer.finish());
		Ok(())
	}

	/// Trains on a text file.
	///
	/// Lines are joined with spaces; the file stem is recorded as source name.
	///
	/// # Errors
	/// Returns an error if the file cannot be read.
	pub fn load_file<P: AsRef<Path>>(&mut self, filepath: P) -> Result<()> {
		let path = filepath.as_ref();
		let name = io::get_filename(path)?;
		let text = io::read_corpus(path)?;
		self.load_text(&text)?;
		info!("loaded corpus {} from {}", name, path.display());
		self.source_names.push(name);
		Ok(())
	}

	/// Trains on every file with the given extension in a directory.
	///
	/// # Parameters
	/// - `folder`: Directory path. Both `"folder"` and `"folder/"` are accepted,
	///   `"."` is the current directory.
	/// - `extension`: Extension of the corpus files, without the dot.
	///
	/// # Errors
	/// - Returns an error if the path is not a directory.
	/// - Returns an error if a file fails to load.
	///
	/// # Notes
	/// - Files are loaded in name order; subdirectories are ignored.
	pub fn load_folder<P: AsRef<Path>>(&mut self, folder: P, extension: &str) -> Result<()> {
		let string_path = folder
			.as_ref()
			.to_str()
			.ok_or_else(|| MarkovError::InvalidArgument("invalid folder path".to_owned()))?;
		let folder = io::normalize_folder(string_path);

		if !folder.is_dir() {
			return Err(MarkovError::InvalidArgument(format!(
				"expected a directory, got: {}",
				folder.display()
			)));
		}

		for file in io::list_files(&folder, extension)? {
			self.load_file(folder.join(&file))?;
		}
		Ok(())
	}

	/// Generates `settings.word_count()` words.
	pub fn generate(&self) -> Result<String> {
		self.generate_words(self.settings.word_count())
	}

	/// Generates up to `count` words with the thread-local random generator.
	pub fn generate_words(&self, count: usize) -> Result<String> {
		self.generate_words_with(&mut rand::rng(), count)
	}

	/// Generates up to `count` words with the given random generator.
	///
	/// # Errors
	/// Returns [`MarkovError::Uninitialized`] if nothing was loaded, or if the
	/// loaded texts were all empty.
	pub fn generate_words_with<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Result<String> {
		let table = self.table.as_ref().ok_or(MarkovError::Uninitialized)?;
		debug!("generating {} words", count);
		table.generate_with(rng, count)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;
	use std::{env, fs};

	#[test]
	fn generate_before_load_is_uninitialized() {
		let generator = Generator::default();
		assert!(matches!(generator.generate(), Err(MarkovError::Uninitialized)));
		assert!(generator.table().is_none());
	}

	#[test]
	fn empty_text_stays_uninitialized() {
		let mut generator = Generator::default();
		generator.load_text("").unwrap();
		assert!(matches!(generator.generate_words(5), Err(MarkovError::Uninitialized)));
	}

	#[test]
	fn huge_chain_length_trains_without_overflow() {
		let mut settings = Settings::default();
		settings.set_chain_length(usize::MAX / 2 + 1).unwrap();
		let mut generator = Generator::new(settings).unwrap();
		generator.load_text("a b c").unwrap();

		let text = generator.generate_words_with(&mut StdRng::seed_from_u64(4), 100).unwrap();
		assert!(["a b c", "b c", "c"].contains(&text.as_str()), "{}", text);
	}

	#[test]
	fn load_text_accumulates() {
		let mut generator = Generator::new(Settings::new(1, 10).unwrap()).unwrap();
		generator.load_text("a b").unwrap();
		generator.load_text("a c").unwrap();

		let table = generator.table().unwrap();
		assert_eq!(table.continuations("a").unwrap().count("b"), 1);
		assert_eq!(table.continuations("a").unwrap().count("c"), 1);
		assert_eq!(table.len(), 3);
	}

	#[test]
	fn generate_uses_settings_word_count() {
		let mut generator = Generator::new(Settings::new(1, 3).unwrap()).unwrap();
		generator.load_text("a a a a a a a a a a").unwrap();

		let text = generator.generate_words_with(&mut StdRng::seed_from_u64(9), 3).unwrap();
		assert!(text.split(' ').count() <= 4);
		assert!(text.split(' ').all(|word| word == "a"));
		assert!(generator.generate().is_ok());
	}

	#[test]
	fn load_folder_reads_every_corpus() {
		let dir = env::temp_dir().join(format!("markov-gen-folder-{}", std::process::id()));
		let _ = fs::remove_dir_all(&dir);
		fs::create_dir_all(&dir).unwrap();
		fs::write(dir.join("second.txt"), "y z").unwrap();
		fs::write(dir.join("first.txt"), "x y\n").unwrap();
		fs::write(dir.join("ignored.md"), "q").unwrap();

		let mut generator = Generator::new(Settings::new(1, 5).unwrap()).unwrap();
		generator.load_folder(&dir, "txt").unwrap();

		assert_eq!(generator.source_names(), ["first", "second"]);
		let table = generator.table().unwrap();
		assert!(table.continuations("q").is_none());
		assert_eq!(table.observations(), 4);
	}

	#[test]
	fn load_folder_rejects_files() {
		let mut generator = Generator::default();
		let missing = env::temp_dir().join("markov-gen-no-such-folder");
		assert!(matches!(
			generator.load_folder(&missing, "txt"),
			Err(MarkovError::InvalidArgument(_))
		));
	}

	#[test]
	fn load_missing_file_is_io_error() {
		let mut generator = Generator::default();
		let missing = env::temp_dir().join("markov-gen-no-such-file.txt");
		assert!(matches!(generator.load_file(&missing), Err(MarkovError::Io(_))));
		assert!(generator.source_names().is_empty());
	}
}
