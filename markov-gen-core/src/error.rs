use thiserror::Error;

/// Result alias for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

/// Failures surfaced by the model.
///
/// Short corpora, unknown windows and short initial texts are not errors:
/// they produce an empty model or a truncated result instead.
#[derive(Error, Debug)]
pub enum ModelError {
	/// The corpus could not be opened or read.
	#[error("failed to read corpus: {0}")]
	Io(#[from] std::io::Error),

	/// A window must hold at least one character.
	#[error("window length must be >= 1, got {0}")]
	InvalidWindowLength(usize),

	/// Counts were accumulated after the last finalization pass.
	#[error("model has pending counts, call finalize() before generating")]
	NotFinalized,
}
