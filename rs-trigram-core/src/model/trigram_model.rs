use std::collections::HashMap;

use rand::prelude::IteratorRandom;

use super::state::State;
use super::tokenizer::tokenize;

/// Conventional number of tokens produced by a generation call when the
/// caller does not ask for a specific length.
pub const DEFAULT_MAX_LENGTH: usize = 50;

/// Ordered pair of consecutive tokens, the lookup key for successors.
type Context = (String, String);

/// Represents a word-level trigram model.
///
/// The `TrigramModel` stores, for every two-word context observed in
/// the training text, how often each word followed it, and generates
/// new text by walking those statistics.
///
/// # Responsibilities
/// - Normalize a training text into word tokens
/// - Accumulate successor counts for each two-word context
/// - Generate sequences by weighted sampling over the counts
/// - Fall back to echoing the training tokens when no trigram exists
///
/// # Invariants
/// - Every context in the table has at least one recorded successor
/// - `fit` replaces all prior state; counts never merge across calls
/// - `generate` never mutates the model
///
/// # Notes
/// - Not synchronized: concurrent `fit` and `generate` on a shared
///   instance need external locking (the server wraps the model in a
///   `Mutex`).
#[derive(Clone, Debug, Default)]
pub struct TrigramModel {
	/// The training text after normalization, kept for fallback generation
	tokens: Vec<String>,

	/// Mapping from a two-word context to its successor counts
	contexts: HashMap<Context, State>,
}

impl TrigramModel {
	/// Creates a new, untrained model.
	pub fn new() -> Self {
		Self {
			tokens: Vec::new(),
			contexts: HashMap::new(),
		}
	}

	/// Number of tokens stored from the last training text.
	pub fn token_count(&self) -> usize {
		self.tokens.len()
	}

	/// Number of distinct two-word contexts in the frequency table.
	pub fn context_count(&self) -> usize {
		self.contexts.len()
	}

	/// Trains the model on the given text, discarding all prior state.
	///
	/// The new token sequence and frequency table are built first and
	/// swapped in at the end, so the model never holds a half-reset
	/// state once this returns. Training on an empty text is the
	/// supported way to reset the model.
	///
	/// # Behavior
	/// - Empty `text`: the model ends up untrained (no tokens, no contexts).
	/// - Fewer than 3 tokens: the tokens are stored for fallback
	///   generation, but no trigram can be counted.
	/// - Otherwise, every overlapping window `(w1, w2, w3)` increments
	///   the count of `w3` under the context `(w1, w2)`.
	pub fn fit(&mut self, text: &str) {
		let tokens = tokenize(text);
		let mut contexts: HashMap<Context, State> = HashMap::new();

		for window in tokens.windows(3) {
			let context = (window[0].clone(), window[1].clone());
			contexts
				.entry(context)
				.or_insert_with(State::new)
				.record(&window[2]);
		}

		self.tokens = tokens;
		self.contexts = contexts;
	}

	/// Generates new text from the trained statistics.
	///
	/// Three mutually exclusive branches, in priority order:
	/// 1. Untrained model (no stored tokens): returns an empty string.
	/// 2. No trigram was counted (training text shorter than 3 tokens):
	///    returns the first `max_length` stored tokens joined by single
	///    spaces, with no randomness involved.
	/// 3. Otherwise, seeds the output with a context chosen uniformly
	///    at random among all contexts, then repeatedly samples a
	///    successor of the trailing context with probability
	///    proportional to its count, advancing the context by one word
	///    each step. The walk runs for at most `max_length - 2` steps
	///    and stops early when the trailing context was never observed
	///    leading anywhere (only possible at the final two tokens of
	///    the training text).
	///
	/// # Notes
	/// - The output never holds more than `max_length` tokens; a
	///   `max_length` below 2 truncates the seeded context itself.
	/// - Read-only: repeated calls are independent samples.
	pub fn generate(&self, max_length: usize) -> String {
		// Never trained, or trained on empty text
		if self.tokens.is_empty() {
			return String::new();
		}

		// Too short to form a trigram: echo the training tokens
		if self.contexts.is_empty() {
			let end = self.tokens.len().min(max_length);
			return self.tokens[..end].join(" ");
		}

		// Seed the walk with a uniformly chosen context
		let mut context = match self.contexts.keys().choose(&mut rand::rng()) {
			Some(context) => context.clone(),
			// Unreachable with a non-empty table, kept for safety
			None => return String::new(),
		};

		let mut generated = vec![context.0.clone(), context.1.clone()];

		for _ in 0..max_length.saturating_sub(2) {
			let next = match self.contexts.get(&context).and_then(State::sample) {
				Some(next) => next,
				// The trailing context leads nowhere: stop early
				None => break,
			};

			generated.push(next.clone());
			context = (context.1.clone(), next);
		}

		generated.truncate(max_length);
		generated.join(" ")
	}
}
