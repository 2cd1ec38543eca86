/// Cleans and tokenizes raw text into lowercase word tokens.
///
/// Normalization happens in two passes:
/// 1. The text is lowercased, then every character that is not a
///    lowercase ASCII letter, an ASCII digit or whitespace is replaced
///    by a single space (punctuation, symbols and accented letters all
///    become separators).
/// 2. The normalized text is split on runs of whitespace, discarding
///    empty fragments and preserving left-to-right order.
///
/// ## Notes
/// - Pure function: the same input always yields the same output.
/// - Never fails; empty or separator-only input yields an empty sequence.
pub fn tokenize(text: &str) -> Vec<String> {
	let normalized: String = text
		.to_lowercase()
		.chars()
		.map(|c| {
			if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() {
				c
			} else {
				' '
			}
		})
		.collect();

	normalized.split_whitespace().map(str::to_owned).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn lowercases_and_strips_punctuation() {
		assert_eq!(
			tokenize("Hello, World! It's 2024."),
			vec!["hello", "world", "it", "s", "2024"]
		);
	}

	#[test]
	fn accented_letters_become_separators() {
		assert_eq!(tokenize("café naïve"), vec!["caf", "na", "ve"]);
	}

	#[test]
	fn empty_and_separator_only_input_yield_no_tokens() {
		assert!(tokenize("").is_empty());
		assert!(tokenize("   \t\n").is_empty());
		assert!(tokenize("!!! ??? ---").is_empty());
	}

	#[test]
	fn whitespace_runs_produce_no_empty_tokens() {
		assert_eq!(tokenize("  the   cat\n\nsat  "), vec!["the", "cat", "sat"]);
	}

	#[test]
	fn tokens_are_lowercase_alphanumeric_runs() {
		let tokens = tokenize("Mr. O'Brien paid $12,50 twice!");
		assert!(!tokens.is_empty());
		for token in &tokens {
			assert!(
				token
					.chars()
					.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()),
				"token {:?} holds a non-alphanumeric character",
				token
			);
		}
	}

	#[test]
	fn tokenization_is_deterministic() {
		let text = "Some text; with Punctuation... and 42 numbers!";
		assert_eq!(tokenize(text), tokenize(text));
	}
}
