use rand::Rng;

use super::frequency_table::FrequencyTable;

/// Returned when a draw lands above the last cumulative probability.
///
/// Only reachable when rounding leaves the final `cp` a hair below 1.0.
pub const FALLBACK_CHAR: char = ' ';

/// Picks the character whose cumulative probability first reaches `u`.
///
/// `u` is expected in `[0, 1)` and `table` must be finalized.
/// Since `cp` is non-decreasing, a binary search finds the same
/// observation a front-to-back scan would.
pub fn sample(table: &FrequencyTable, u: f64) -> char {
	let observations = table.observations();
	let index = observations.partition_point(|o| o.cp < u);
	observations.get(index).map_or(FALLBACK_CHAR, |o| o.character)
}

/// Draws one uniform `f64` from `rng` and samples `table` with it.
pub fn draw<R: Rng>(table: &FrequencyTable, rng: &mut R) -> char {
	let u: f64 = rng.random();
	sample(table, u)
}
