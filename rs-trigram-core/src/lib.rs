//! Word-trigram-based text generation library.
//!
//! This crate provides a minimal statistical language model including:
//! - Deterministic text normalization into word tokens
//! - Trigram frequency counting keyed by two-word contexts
//! - Probabilistic generation with weighted successor sampling
//! - Utilities for locating and loading training corpora
//!
//! The model itself performs no I/O; the `io` helpers exist for callers
//! (the server and the example binary) that train from corpus files.

/// Core trigram model and generation logic.
///
/// This module exposes the model and tokenizer interfaces while keeping
/// the internal successor-count representation private.
pub mod model;

/// I/O utilities (corpus loading, path helpers).
pub mod io;
