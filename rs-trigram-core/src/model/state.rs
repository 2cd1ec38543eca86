use std::collections::HashMap;

use rand::Rng;

/// Represents the learned successors of a single two-word context.
///
/// A `State` stores all observed transitions from one context to the
/// word that followed it in the training text.
///
/// Conceptually, this is a node in a Markov chain where outgoing edges
/// are weighted by their number of observations.
///
/// ## Responsibilities:
/// - Accumulate successor occurrences during training
/// - Sample the next word using weighted random sampling
///
/// ## Invariants
/// - Each successor occurrence count is strictly positive
#[derive(Clone, Debug, Default)]
pub struct State {
	/// Outgoing transitions indexed by the next word.
	/// The value represents how many times this transition was observed.
	/// Example: { "sat" => 42, "ran" => 3 }
	successors: HashMap<String, usize>,
}

impl State {
	/// Creates a new empty state.
	pub fn new() -> Self {
		Self {
			successors: HashMap::new(),
		}
	}

	/// Records an occurrence of a transition toward `successor`.
	///
	/// - If the transition already exists, its occurrence count is increased.
	/// - Otherwise, a new transition is created with an initial count of 1.
	pub fn record(&mut self, successor: &str) {
		*self.successors.entry(successor.to_owned()).or_insert(0) += 1;
	}

	/// Samples the next word using weighted random sampling.
	///
	/// The probability of selecting a word is proportional to its
	/// occurrence count.
	///
	/// This method performs:
	/// - an O(n) scan over the successors
	/// - a cumulative subtraction to select a bucket
	///
	/// Returns `None` if the state has no successors.
	pub fn sample(&self) -> Option<String> {
		if self.successors.is_empty() {
			return None;
		}

		// Compute the total number of occurrences
		let total: usize = self.successors.values().sum();
		if total == 0 {
			// Should not happen due to invariants, but kept for safety
			return None;
		}

		// Randomly select a word
		let mut r = rand::rng().random_range(0..total);

		let mut fallback: Option<&String> = None;
		for (successor, occurrence) in &self.successors {
			if r < *occurrence {
				return Some(successor.clone());
			}
			r -= occurrence;
			fallback = Some(successor);
		}

		// Fallback: should not happen, but kept for safety.
		fallback.cloned()
	}
}
