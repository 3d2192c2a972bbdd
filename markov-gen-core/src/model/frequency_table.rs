use serde::Serialize;

/// One character observed after a window.
///
/// `p` and `cp` stay at `0.0` until the owning table is finalized.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct CharObservation {
	/// The observed character.
	pub character: char,
	/// How many times `character` followed the window.
	pub count: usize,
	/// Probability of `character` after the window.
	pub p: f64,
	/// Cumulative probability up to and including this observation.
	pub cp: f64,
}

impl CharObservation {
	fn new(character: char) -> Self {
		Self { character, count: 1, p: 0.0, cp: 0.0 }
	}
}

/// Represents everything observed after a single window.
///
/// Conceptually a node of the Markov chain whose outgoing edges are
/// weighted by their number of observations.
///
/// ## Invariants
/// - One observation per distinct character, kept in first-seen order
/// - Each count is strictly positive
/// - After finalization, `p` sums to 1.0 and `cp` is non-decreasing,
///   ending at (about) 1.0
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct FrequencyTable {
	observations: Vec<CharObservation>,
}

impl FrequencyTable {
	/// Creates a new empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a table with hand-set probabilities.
	#[cfg(test)]
	pub(crate) fn from_observations(observations: Vec<CharObservation>) -> Self {
		Self { observations }
	}

	/// Records an occurrence of `character`.
	///
	/// - If the character was already seen, its count is increased.
	/// - Otherwise it is appended with a count of 1, which fixes its
	///   position in the sampling order.
	pub fn record(&mut self, character: char) {
		match self.observations.iter_mut().find(|o| o.character == character) {
			Some(observation) => observation.count += 1,
			None => self.observations.push(CharObservation::new(character)),
		}
	}

	/// Computes `p` and `cp` for every observation from the current counts.
	///
	/// Walks the observations in stored order, so re-running it on
	/// unchanged counts gives the same values.
	pub fn calculate_probabilities(&mut self) {
		let total: usize = self.observations.iter().map(|o| o.count).sum();
		if total == 0 {
			return;
		}

		let mut cumulative = 0.0;
		for observation in &mut self.observations {
			observation.p = observation.count as f64 / total as f64;
			cumulative += observation.p;
			observation.cp = cumulative;
		}
	}

	/// Observations in first-seen order.
	pub fn observations(&self) -> &[CharObservation] {
		&self.observations
	}

	/// Returns the observation for `character`, if it was ever seen.
	pub fn get(&self, character: char) -> Option<&CharObservation> {
		self.observations.iter().find(|o| o.character == character)
	}

	/// Number of distinct characters observed.
	pub fn len(&self) -> usize {
		self.observations.len()
	}

	pub fn is_empty(&self) -> bool {
		self.observations.is_empty()
	}

	/// Sum of all counts.
	pub fn total(&self) -> usize {
		self.observations.iter().map(|o| o.count).sum()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn table_from(text: &str) -> FrequencyTable {
		let mut table = FrequencyTable::new();
		text.chars().for_each(|c| table.record(c));
		table
	}

	#[test]
	fn record_keeps_first_seen_order() {
		let table = table_from("cabbac");
		let order: String = table.observations().iter().map(|o| o.character).collect();
		assert_eq!(order, "cab");
		assert_eq!(table.get('a').unwrap().count, 2);
		assert_eq!(table.get('b').unwrap().count, 2);
		assert_eq!(table.get('c').unwrap().count, 2);
		assert_eq!(table.total(), 6);
	}

	#[test]
	fn probabilities_sum_to_one() {
		let mut table = table_from("aaabbc");
		table.calculate_probabilities();

		let a = table.get('a').unwrap();
		assert!((a.p - 0.5).abs() < 1e-12);
		assert!((a.cp - 0.5).abs() < 1e-12);

		let b = table.get('b').unwrap();
		assert!((b.p - 2.0 / 6.0).abs() < 1e-12);
		assert!((b.cp - 5.0 / 6.0).abs() < 1e-12);

		let sum: f64 = table.observations().iter().map(|o| o.p).sum();
		assert!((sum - 1.0).abs() < 1e-9);
		assert!((table.observations().last().unwrap().cp - 1.0).abs() < 1e-9);
	}

	#[test]
	fn probabilities_are_idempotent() {
		let mut table = table_from("xyzzyx!");
		table.calculate_probabilities();
		let first = table.clone();
		table.calculate_probabilities();
		assert_eq!(first, table);
	}

	#[test]
	fn unfinalized_observations_have_no_probability() {
		let table = table_from("ab");
		assert!(table.observations().iter().all(|o| o.p == 0.0 && o.cp == 0.0));
	}

	#[test]
	fn serializes_observations_in_order() {
		let mut table = table_from("ba");
		table.calculate_probabilities();
		let json = serde_json::to_string(&table).unwrap();
		assert_eq!(
			json,
			r#"{"observations":[{"character":"b","count":1,"p":0.5,"cp":0.5},{"character":"a","count":1,"p":0.5,"cp":1.0}]}"#
		);
	}
}
