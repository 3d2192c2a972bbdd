use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::frequency_table::FrequencyTable;
use crate::error::{ModelError, Result};
use crate::io::CorpusReader;

/// Bytes of consumed corpus kept in the sliding buffer before it is compacted.
const COMPACT_THRESHOLD: usize = 4096;

/// Seed used when reproducible output is requested without an explicit value.
pub const DEFAULT_SEED: u64 = 20;

/// How the model's random source is initialized.
///
/// # Variants
/// - `Fixed(u64)`: reproducible output, same seed gives the same text.
/// - `Entropy`: seeded from the operating system, different on every run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Seed {
	Fixed(u64),
	Entropy,
}

/// A fixed-order character Markov model.
///
/// Maps every window of `window_length` characters seen in the corpus
/// to the table of characters that followed it.
///
/// # Responsibilities
/// - Slide a window over a corpus and accumulate transition counts
/// - Turn counts into probabilities once training is over
/// - Own the random source used for generation
///
/// # Invariants
/// - `window_length` is always >= 1
/// - Every key of `tables` is exactly `window_length` characters long
/// - Training is additive: counts are never reset
#[derive(Debug)]
pub struct LanguageModel {
	window_length: usize,
	pub(super) tables: HashMap<String, FrequencyTable>,
	pub(super) rng: StdRng,
	finalized: bool,
}

impl LanguageModel {
	/// Creates an empty model.
	///
	/// # Errors
	/// Returns an error if `window_length` is 0.
	pub fn new(window_length: usize, seed: Seed) -> Result<Self> {
		if window_length == 0 {
			return Err(ModelError::InvalidWindowLength(window_length));
		}
		let rng = match seed {
			Seed::Fixed(value) => StdRng::seed_from_u64(value),
			Seed::Entropy => StdRng::from_os_rng(),
		};
		Ok(Self { window_length, tables: HashMap::new(), rng, finalized: true })
	}

	/// Trains on a corpus file, then finalizes.
	///
	/// # Errors
	/// Returns an error if the corpus cannot be read. Nothing is recorded
	/// in that case.
	pub fn train_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
		let reader = CorpusReader::open(path)?;
		self.train(reader);
		Ok(())
	}

	/// Runs one full training pass over `corpus`, then finalizes.
	pub fn train<I: IntoIterator<Item = char>>(&mut self, corpus: I) {
		self.accumulate(corpus);
		self.finalize();
	}

	/// Accumulates transition counts from `corpus` without finalizing.
	///
	/// The first `window_length` characters seed the window; every
	/// following character is recorded against the current window, which
	/// then slides by one.
	///
	/// Returns the number of observations recorded. A corpus shorter than
	/// `window_length + 1` records nothing.
	pub fn accumulate<I: IntoIterator<Item = char>>(&mut self, corpus: I) -> usize {
		let mut chars = corpus.into_iter();
		let mut buffer: String = chars.by_ref().take(self.window_length).collect();
		if buffer.chars().count() < self.window_length {
			log::warn!(
				"corpus shorter than window length {}, nothing recorded",
				self.window_length
			);
			return 0;
		}

		let tables_before = self.tables.len();
		// The window is `buffer[window_start..]`
		let mut window_start = 0;
		let mut observed = 0;
		for c in chars {
			let window = &buffer[window_start..];
			match self.tables.get_mut(window) {
				Some(table) => table.record(c),
				None => {
					let mut table = FrequencyTable::new();
					table.record(c);
					self.tables.insert(window.to_owned(), table);
				}
			}
			window_start += window.chars().next().map_or(0, char::len_utf8);
			buffer.push(c);
			if window_start >= COMPACT_THRESHOLD {
				buffer.drain(..window_start);
				window_start = 0;
			}
			observed += 1;
		}

		if observed == 0 {
			log::warn!(
				"corpus shorter than window length {} + 1, nothing recorded",
				self.window_length
			);
		} else {
			self.finalized = false;
		}
		log::info!(
			"recorded {} observations, {} new windows ({} total)",
			observed,
			self.tables.len() - tables_before,
			self.tables.len()
		);
		observed
	}

	/// Computes probabilities for every table from the current counts.
	///
	/// Must be called again after any further training.
	pub fn finalize(&mut self) {
		for table in self.tables.values_mut() {
			table.calculate_probabilities();
		}
		self.finalized = true;
		log::debug!("finalized {} windows", self.tables.len());
	}

	/// Returns `true` when probabilities reflect every recorded count.
	pub fn is_finalized(&self) -> bool {
		self.finalized
	}

	pub fn window_length(&self) -> usize {
		self.window_length
	}

	/// Number of distinct windows learned.
	pub fn len(&self) -> usize {
		self.tables.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tables.is_empty()
	}

	/// Returns the table learned for `window`, if any.
	pub fn table(&self, window: &str) -> Option<&FrequencyTable> {
		self.tables.get(window)
	}

	/// Iterates over every learned window, in no particular order.
	pub fn windows(&self) -> impl Iterator<Item = &str> {
		self.tables.keys().map(String::as_str)
	}
}

/// One line per window, sorted by window:
/// `"<window> : (c count p cp) ..."`.
impl fmt::Display for LanguageModel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut windows: Vec<&String> = self.tables.keys().collect();
		windows.sort();

		for window in windows {
			write!(f, "{window} :")?;
			for o in self.tables[window].observations() {
				write!(f, " ({} {} {} {})", o.character, o.count, o.p, o.cp)?;
			}
			writeln!(f)?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn zero_window_is_rejected() {
		assert!(matches!(
			LanguageModel::new(0, Seed::Fixed(1)),
			Err(ModelError::InvalidWindowLength(0))
		));
	}

	#[test]
	fn sliding_window_records_followers() {
		let mut model = LanguageModel::new(2, Seed::Fixed(DEFAULT_SEED)).unwrap();
		let observed = model.accumulate("abcab".chars());

		assert_eq!(observed, 3);
		assert_eq!(model.len(), 3);
		assert_eq!(model.table("ab").unwrap().get('c').unwrap().count, 1);
		assert_eq!(model.table("bc").unwrap().get('a').unwrap().count, 1);
		assert_eq!(model.table("ca").unwrap().get('b').unwrap().count, 1);
		assert!(model.table("ab").unwrap().get('a').is_none());
	}

	#[test]
	fn accumulate_clears_finalized_flag() {
		let mut model = LanguageModel::new(1, Seed::Fixed(DEFAULT_SEED)).unwrap();
		assert!(model.is_finalized());

		model.accumulate("xy".chars());
		assert!(!model.is_finalized());

		model.finalize();
		assert!(model.is_finalized());

		// Nothing recorded, probabilities are still current
		model.accumulate("z".chars());
		assert!(model.is_finalized());
	}

	#[test]
	fn windows_are_counted_in_characters() {
		let mut model = LanguageModel::new(2, Seed::Fixed(DEFAULT_SEED)).unwrap();
		model.train("ééà".chars());
		assert_eq!(model.len(), 1);
		assert_eq!(model.table("éé").unwrap().get('à').unwrap().count, 1);
	}

	#[test]
	fn long_multibyte_corpus_keeps_sliding() {
		let mut model = LanguageModel::new(2, Seed::Fixed(DEFAULT_SEED)).unwrap();
		let corpus = "éa".repeat(3000);
		assert_eq!(model.accumulate(corpus.chars()), 5998);

		assert_eq!(model.len(), 2);
		assert_eq!(model.table("éa").unwrap().get('é').unwrap().count, 2999);
		assert_eq!(model.table("aé").unwrap().get('a').unwrap().count, 2999);
	}

	#[test]
	fn display_lists_sorted_windows() {
		let mut model = LanguageModel::new(1, Seed::Fixed(DEFAULT_SEED)).unwrap();
		model.train("ababab".chars());
		assert_eq!(model.to_string(), "a : (b 3 1 1)\nb : (a 2 1 1)\n");
	}
}
