use super::language_model::LanguageModel;
use super::sampler;
use crate::error::{ModelError, Result};

/// Progress of a single `generate` call.
#[derive(Debug, PartialEq)]
enum GenerationState {
	/// Extracting the starting window from the initial text.
	Seeding,
	/// Sampling one character per step. The window is the tail of the
	/// buffer starting at byte offset `window_start`.
	Extending { window_start: usize, remaining: usize },
	/// Finished, the buffer is the result.
	Done,
}

impl LanguageModel {
	/// Generates text from the learned probabilities.
	///
	/// # Parameters
	/// - `initial_text`: text to start from. Only its last `window_length`
	///   characters are kept in the output.
	/// - `text_length`: maximum number of characters to append.
	///
	/// # Returns
	/// - `initial_text` unchanged if it is shorter than the window.
	/// - Otherwise the starting window followed by up to `text_length`
	///   sampled characters. Generation stops early, without error, as soon
	///   as the current window was never seen during training.
	///
	/// # Errors
	/// Returns `ModelError::NotFinalized` if counts were accumulated since
	/// the last call to `finalize`.
	pub fn generate(&mut self, initial_text: &str, text_length: usize) -> Result<String> {
		let initial_len = initial_text.chars().count();
		if initial_len < self.window_length() {
			return Ok(initial_text.to_owned());
		}
		if !self.is_finalized() {
			return Err(ModelError::NotFinalized);
		}

		let mut generated = String::new();
		let mut state = GenerationState::Seeding;
		loop {
			state = match state {
				GenerationState::Seeding => {
					generated.extend(initial_text.chars().skip(initial_len - self.window_length()));
					GenerationState::Extending { window_start: 0, remaining: text_length }
				}
				GenerationState::Extending { remaining: 0, .. } => GenerationState::Done,
				GenerationState::Extending { window_start, remaining } => {
					let window = &generated[window_start..];
					match self.tables.get(window) {
						Some(table) => {
							let c = sampler::draw(table, &mut self.rng);
							let dropped = window.chars().next().map_or(0, char::len_utf8);
							generated.push(c);
							GenerationState::Extending { window_start: window_start + dropped, remaining: remaining - 1 }
						}
						None => {
							log::debug!("unknown window {window:?}, stopping with {remaining} characters left");
							GenerationState::Done
						}
					}
				}
				GenerationState::Done => return Ok(generated),
			};
		}
	}
}

#[cfg(test)]
mod tests {
	use crate::model::language_model::{LanguageModel, Seed, DEFAULT_SEED};
	use crate::error::ModelError;

	fn trained(window_length: usize, corpus: &str) -> LanguageModel {
		let mut model = LanguageModel::new(window_length, Seed::Fixed(DEFAULT_SEED)).unwrap();
		model.train(corpus.chars());
		model
	}

	#[test]
	fn short_initial_text_is_returned_unchanged() {
		let mut model = trained(3, "abcabcabc");
		assert_eq!(model.generate("ab", 10).unwrap(), "ab");
		assert_eq!(model.generate("", 0).unwrap(), "");
	}

	#[test]
	fn output_starts_at_last_window() {
		let mut model = trained(2, "xyzxyzxyz");
		let text = model.generate("hello xy", 3).unwrap();
		assert_eq!(text, "xyzxy");
	}

	#[test]
	fn zero_length_returns_window() {
		let mut model = trained(2, "xyzxyz");
		assert_eq!(model.generate("__xy", 0).unwrap(), "xy");
	}

	#[test]
	fn stops_on_unknown_window() {
		// "c" only ever ends the corpus, nothing follows it
		let mut model = trained(1, "abc");
		assert_eq!(model.generate("a", 10).unwrap(), "abc");
		assert_eq!(model.generate("q", 10).unwrap(), "q");
	}

	#[test]
	fn window_slides_over_multibyte_characters() {
		let mut model = trained(2, "αβγδαβγδ");
		assert_eq!(model.generate("xαβ", 6).unwrap(), "αβγδαβγδ");
	}

	#[test]
	fn pending_counts_are_rejected() {
		let mut model = trained(1, "abab");
		model.accumulate("ba".chars());
		assert!(matches!(model.generate("a", 3), Err(ModelError::NotFinalized)));

		// Short text never reaches the precondition
		let mut model = LanguageModel::new(4, Seed::Fixed(1)).unwrap();
		model.accumulate("abcdef".chars());
		assert_eq!(model.generate("abc", 3).unwrap(), "abc");
	}
}
