//! CSS2 token types per [CSS 2.1 § G.2 Lexical scanner](https://www.w3.org/TR/CSS2/grammar.html#scanner).
//!
//! Unlike the CSS Syntax Level 3 token set, the CSS2 scanner classifies
//! dimensions by unit family and gives the at-rules and `!important` their own
//! tokens. Every token keeps the exact source text it was scanned from.

use core::fmt;

use serde::Serialize;
use strum_macros::Display;

/// [§ G.2 Lexical scanner](https://www.w3.org/TR/CSS2/grammar.html#scanner)
///
/// The closed set of token kinds the grammar dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum TokenKind {
    /// `S`: "[ \t\r\n\f]+"
    S,
    /// `CDO`: "<!--"
    Cdo,
    /// `CDC`: "-->"
    Cdc,
    /// `INCLUDES`: "~="
    Includes,
    /// `DASHMATCH`: "|="
    DashMatch,
    /// `STRING`: a quoted string, quotes included in the token text.
    String,
    /// `INVALID`: a string that hit a newline before its closing quote.
    Invalid,
    /// `IDENT`
    Ident,
    /// `HASH`: "#" followed by a name.
    Hash,
    /// `IMPORT_SYM`: "@import"
    ImportSym,
    /// `PAGE_SYM`: "@page"
    PageSym,
    /// `MEDIA_SYM`: "@media"
    MediaSym,
    /// `CHARSET_SYM`: "@charset"
    CharsetSym,
    /// `ATKEYWORD`: any other "@" followed by an identifier.
    AtKeyword,
    /// `IMPORTANT_SYM`: "!" followed by optional whitespace and "important".
    ImportantSym,
    /// `EMS`: a number with the `em` unit.
    Ems,
    /// `EXS`: a number with the `ex` unit.
    Exs,
    /// `LENGTH`: a number with one of `px cm mm in pt pc`.
    Length,
    /// `ANGLE`: a number with one of `deg rad grad`.
    Angle,
    /// `TIME`: a number with one of `ms s`.
    Time,
    /// `FREQ`: a number with one of `hz khz`.
    Freq,
    /// `DIMENSION`: a number with any other unit.
    Dimension,
    /// `PERCENTAGE`: a number followed by "%".
    Percentage,
    /// `NUMBER`: an unsigned integer or decimal.
    Number,
    /// `URI`: "url(" ... ")", wrapper included in the token text.
    Uri,
    /// `FUNCTION`: an identifier immediately followed by "(".
    Function,
    /// "{"
    LBrace,
    /// "}"
    RBrace,
    /// "["
    LBracket,
    /// "]"
    RBracket,
    /// "("
    LParen,
    /// ")"
    RParen,
    /// ":"
    Colon,
    /// ";"
    Semicolon,
    /// ","
    Comma,
    /// "."
    Dot,
    /// "*"
    Star,
    /// "+"
    Plus,
    /// ">"
    Greater,
    /// "-"
    Minus,
    /// "/"
    Slash,
    /// "="
    Equals,
    /// Any other single character.
    Delim,
    /// End of input. Always the last token of a scan.
    Eof,
}

/// A classified lexical unit.
///
/// `start_row` and `start_col` are 1-based and count characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// The token's kind tag.
    pub kind: TokenKind,
    /// The exact source text of the token.
    pub value: String,
    /// Line of the token's first character.
    pub start_row: usize,
    /// Column of the token's first character.
    pub start_col: usize,
}

impl Token {
    /// Create a token.
    #[must_use]
    pub fn new(kind: TokenKind, value: impl Into<String>, start_row: usize, start_col: usize) -> Self {
        Self {
            kind,
            value: value.into(),
            start_row,
            start_col,
        }
    }

    /// Returns true if this is the end-of-input token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// The token text with one layer of matching quotes removed.
    ///
    /// Used for `STRING` tokens, whose text keeps the delimiters.
    #[must_use]
    pub fn unquoted(&self) -> &str {
        strip_quotes(&self.value)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<{}:{:?} @{}:{}>",
            self.kind, self.value, self.start_row, self.start_col
        )
    }
}

/// Remove one layer of matching `"` or `'` quotes, if present.
#[must_use]
pub fn strip_quotes(text: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = text
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    // Unterminated string at EOF: only the opening quote is present.
    text.strip_prefix(['"', '\'']).unwrap_or(text)
}
