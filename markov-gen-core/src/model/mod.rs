//! Top-level module for the character Markov model.
//!
//! This module provides:
//! - Per-window frequency tables (`FrequencyTable`)
//! - The model itself, with training and finalization (`LanguageModel`)
//! - Cumulative-probability sampling (`sampler`)
//! - Text generation from a starting window (`generator`)

/// Per-window character counts and derived probabilities.
pub mod frequency_table;

/// Fixed-order character model.
///
/// Handles corpus ingestion, additive transition counting,
/// probability finalization and the seeded random source.
pub mod language_model;

/// Draws one character from a finalized table.
pub mod sampler;

/// Generation loop, implemented on `LanguageModel`.
mod generator;

pub use frequency_table::{CharObservation, FrequencyTable};
pub use language_model::{LanguageModel, Seed, DEFAULT_SEED};
