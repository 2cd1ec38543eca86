//! Top-level module for the trigram generation system.
//!
//! This crate provides a word-level trigram text generator, including:
//! - The trainable model and its generation walk (`TrigramModel`)
//! - Text normalization into word tokens (`tokenize`)
//! - Internal successor-count management (`State`)

/// Word-level trigram model.
///
/// Handles training-text ingestion, trigram counting, probabilistic
/// text generation, and the documented short-text fallbacks.
pub mod trigram_model;

/// Text normalization into lowercase word tokens.
///
/// Exposes the pure `tokenize` function used by the model.
pub mod tokenizer;

/// Internal representation of a single context's successors.
///
/// Tracks successor counts and supports weighted random sampling.
/// This module is not exposed publicly.
mod state;
