//! CSS2 tokenizer and event-driven grammar parser for Cascara.
//!
//! # Scope
//!
//! This crate implements:
//! - **CSS2 Tokenizer** ([§ G.2 Lexical scanner](https://www.w3.org/TR/CSS2/grammar.html#scanner))
//!   - All CSS2 token classes: identifiers, strings, hashes, at-rule keywords,
//!     numbers with their unit classes, URIs, functions, punctuation
//!   - Comment skipping and escape sequences
//!   - 1-based line and column positions for every token
//!
//! - **Grammar Parser** ([§ G.1 Grammar](https://www.w3.org/TR/CSS2/grammar.html#grammar))
//!   - `@charset`, `@import`, `@media` and `@page` rules
//!   - Rule sets with selector lists and declaration blocks
//!   - Selectors with type, universal, ID, class, attribute and pseudo parts
//!     joined by descendant, child and adjacent-sibling combinators
//!   - Declaration values as terms and operators, with `!important`
//!
//! - **Events**
//!   - Every recognized construct is reported to listeners as a
//!     [`ParseEvent`] while parsing; nothing is retained afterwards
//!
//! # Not Yet Implemented
//!
//! - Error recovery: the first unexpected token aborts the parse
//! - Unknown at-rules
//! - Value interpretation (colors, lengths) and cascade
//!
//! ```
//! use cascara_css::{ParseEvent, parse_events};
//!
//! let events = parse_events("h1 { color: red }").unwrap();
//! assert_eq!(events.first(), Some(&ParseEvent::StartStylesheet));
//! assert_eq!(events.len(), 5);
//! ```

/// Parse failures.
pub mod error;
/// Parse events and listener registration.
pub mod events;
/// CSS2 grammar parser per [§ G.1 Grammar](https://www.w3.org/TR/CSS2/grammar.html#grammar).
pub mod parser;
/// Selector values per [CSS 2.1 § 5 Selectors](https://www.w3.org/TR/CSS2/selector.html).
pub mod selector;
/// CSS2 tokenizer per [§ G.2 Lexical scanner](https://www.w3.org/TR/CSS2/grammar.html#scanner).
pub mod tokenizer;
/// Declaration values and media lists per [CSS 2.1 § 4.3 Values](https://www.w3.org/TR/CSS2/syndata.html#values).
pub mod values;

pub use error::ParseError;
pub use events::{EventKind, Listeners, ParseEvent};
pub use parser::{CssParser, parse_events};
pub use selector::{Combinator, ElementName, Modifier, Selector, SelectorPart, SelectorUnit};
pub use values::{ExprPart, MediaList, Operator, TermKind, ValueTerm, render_expression};
