//! # spanscope-core
//!
//! Core types for the spanscope toolbox: the abstract corpus model shared
//! across all crates.
//!
//! This crate provides:
//! - **Corpus types**: [`Token`], [`Span`], [`Document`], [`Corpus`]
//! - **Validation**: span offsets are checked against document bounds at
//!   construction time; a malformed span never enters a corpus
//! - **Errors**: [`Error`], [`Result`]
//!
//! The analysis crates depend on `spanscope-core` so that any external
//! parser producing these types can feed the metric engine.

#![warn(missing_docs)]

pub mod corpus;
pub mod error;

// Re-exports for convenience
pub use corpus::{normalize_token, Corpus, Document, Span, Token};
pub use error::{Error, Result};
