//! End-to-end checks of the public training and generation API.

use rs_trigram_core::model::tokenizer::tokenize;
use rs_trigram_core::model::trigram_model::{DEFAULT_MAX_LENGTH, TrigramModel};

const CORPUS: &str = "The quick brown fox jumps over the lazy dog.
The quick brown cat sleeps beside the lazy dog.
A small grey mouse runs under the old table.
The lazy dog watches the quick brown fox.";

#[test]
fn every_generated_window_occurred_in_the_corpus() {
	let mut model = TrigramModel::new();
	model.fit(CORPUS);

	let tokens = tokenize(CORPUS);
	let training_windows: Vec<&[String]> = tokens.windows(3).collect();

	for _ in 0..20 {
		let output = model.generate(DEFAULT_MAX_LENGTH);
		let generated: Vec<String> = output.split_whitespace().map(str::to_owned).collect();
		assert!(generated.len() >= 2);
		assert!(generated.len() <= DEFAULT_MAX_LENGTH);

		for window in generated.windows(3) {
			assert!(
				training_windows.iter().any(|w| *w == window),
				"window {:?} was never observed during training",
				window
			);
		}
	}
}

#[test]
fn cyclic_corpus_always_fills_the_requested_length() {
	// Every trailing pair of this corpus is itself a known context, so
	// the walk can never stop early.
	let mut model = TrigramModel::new();
	model.fit(&"a b c ".repeat(10));

	for _ in 0..10 {
		assert_eq!(model.generate(12).split_whitespace().count(), 12);
	}
}

#[test]
fn counts_reflect_the_last_training_text_only() {
	let mut model = TrigramModel::new();
	model.fit(CORPUS);
	model.fit("one two three");

	// "one two three" has 3 tokens and a single context ("one", "two")
	assert_eq!(model.token_count(), 3);
	assert_eq!(model.context_count(), 1);
	assert_eq!(model.generate(10), "one two three");
}

#[test]
fn generation_leaves_the_model_untouched() {
	let mut model = TrigramModel::new();
	model.fit(CORPUS);

	let tokens_before = model.token_count();
	let contexts_before = model.context_count();

	let first = model.generate(DEFAULT_MAX_LENGTH);
	assert!(!first.is_empty());
	for _ in 0..10 {
		model.generate(DEFAULT_MAX_LENGTH);
	}

	assert_eq!(model.token_count(), tokens_before);
	assert_eq!(model.context_count(), contexts_before);
}
