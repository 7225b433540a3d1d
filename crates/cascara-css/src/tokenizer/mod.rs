//! CSS2 tokenizer module.

/// Token stream consumed by the grammar parser.
pub mod stream;
/// CSS2 token kinds per [§ G.2 Lexical scanner](https://www.w3.org/TR/CSS2/grammar.html#scanner).
pub mod token;
/// CSS2 tokenizer implementation.
pub mod tokenizer;

pub use stream::{TokenStream, WhitespaceScope};
pub use token::{Token, TokenKind, strip_quotes};
pub use tokenizer::CssTokenizer;
