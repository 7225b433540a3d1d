//! CSS2 grammar parser module.

/// Recursive-descent parser per [CSS 2.1 § G.1 Grammar](https://www.w3.org/TR/CSS2/grammar.html#grammar).
pub mod css_parser;

pub use css_parser::{CssParser, parse_events};
