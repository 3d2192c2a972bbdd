//! Character-level Markov text generation library.
//!
//! This crate provides a fixed-order character Markov model including:
//! - Sliding-window training over a character stream
//! - Per-window probability finalization
//! - Cumulative-probability sampling with a seedable random source
//! - A corpus reader for file-backed training text
//!
//! Training must be followed by finalization before any generation:
//!
//! ```
//! use markov_gen_core::model::language_model::{LanguageModel, Seed};
//!
//! let mut model = LanguageModel::new(1, Seed::Fixed(20)).unwrap();
//! model.train("ababab".chars());
//! assert_eq!(model.generate("a", 3).unwrap(), "abab");
//! ```

/// Error type shared by the whole crate.
pub mod error;

/// Markov model, training, finalization, sampling and generation.
pub mod model;

/// Corpus reading (file-backed character streams).
pub mod io;

pub use error::{ModelError, Result};
