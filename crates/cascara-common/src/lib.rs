//! Common utilities for the Cascara CSS parser.
//!
//! This crate provides shared infrastructure used by the parser crates:
//! - **Warning System** - deduplicated, colored stderr diagnostics for
//!   problems the tokenizer recovers from

pub mod warning;
