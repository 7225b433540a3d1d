//! Declaration values and media lists.
//!
//! A declaration's value is kept as the flat sequence the expression grammar
//! produced: terms interleaved with the `/` and `,` operators that were
//! written between them. Terms are not interpreted beyond their lexical class.

use core::fmt;

use serde::Serialize;

/// [CSS 2.1 § 4.3 Values](https://www.w3.org/TR/CSS2/syndata.html#values)
///
/// Lexical class of a term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TermKind {
    /// A plain number, e.g. `1.5`.
    Number,
    /// A percentage, e.g. `50%`.
    Percentage,
    /// An absolute or pixel length, e.g. `12px`.
    Length,
    /// A length in `em`.
    Ems,
    /// A length in `ex`.
    Exs,
    /// An angle, e.g. `90deg`.
    Angle,
    /// A time, e.g. `200ms`.
    Time,
    /// A frequency, e.g. `2khz`.
    Frequency,
    /// A quoted string, quotes included.
    String,
    /// A keyword.
    Identifier,
    /// A `url(...)` token, wrapper included.
    Uri,
    /// `#` followed by three or six hex digits.
    HexColor,
    /// A function call, e.g. `rgb(0,0,0)`.
    Function,
}

/// One term of a declaration value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueTerm {
    /// Rendered text, with a unary sign folded in, e.g. `-2px`.
    pub text: String,
    /// Lexical class of the term.
    pub kind: TermKind,
    /// Line of the term's first token (the sign, when present).
    pub line: usize,
    /// Column of the term's first token.
    pub column: usize,
}

impl ValueTerm {
    /// Build a term from an optional sign and the value text.
    #[must_use]
    pub fn new(sign: Option<char>, value: &str, kind: TermKind, line: usize, column: usize) -> Self {
        let mut text = String::with_capacity(value.len() + 1);
        if let Some(sign) = sign {
            text.push(sign);
        }
        text.push_str(value);
        Self {
            text,
            kind,
            line,
            column,
        }
    }
}

impl fmt::Display for ValueTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// "operator : '/' S* | ',' S*"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Operator {
    /// `/`, e.g. between font size and line height.
    Slash,
    /// `,`, e.g. between font families.
    Comma,
}

impl Operator {
    /// The operator as written.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Slash => "/",
            Self::Comma => ",",
        }
    }
}

/// An element of an expression: a term or an operator between two terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ExprPart {
    /// A value term.
    Term(ValueTerm),
    /// An explicit operator.
    Operator(Operator),
}

impl ExprPart {
    /// The part as it renders inside a function call.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Term(term) => &term.text,
            Self::Operator(operator) => operator.symbol(),
        }
    }

    /// The term, if this part is one.
    #[must_use]
    pub const fn as_term(&self) -> Option<&ValueTerm> {
        match self {
            Self::Term(term) => Some(term),
            Self::Operator(_) => None,
        }
    }
}

/// Render an expression with single spaces between terms and no space before
/// an operator, e.g. `12px/1.5 "Helvetica", sans-serif`.
#[must_use]
pub fn render_expression(parts: &[ExprPart]) -> String {
    let mut out = String::new();
    for (index, part) in parts.iter().enumerate() {
        let after_slash = index > 0 && matches!(parts[index - 1], ExprPart::Operator(Operator::Slash));
        let needs_space = index > 0
            && !after_slash
            && !matches!(part, ExprPart::Operator(_));
        if needs_space {
            out.push(' ');
        }
        out.push_str(part.text());
    }
    out
}

/// [CSS 2.1 § 7.3 The @media rule](https://www.w3.org/TR/CSS2/media.html#at-media-rule)
///
/// An ordered, non-empty list of medium names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MediaList(Vec<String>);

impl MediaList {
    /// A list holding one medium.
    #[must_use]
    pub fn new(first: impl Into<String>) -> Self {
        Self(vec![first.into()])
    }

    /// Append another medium.
    pub fn push(&mut self, medium: impl Into<String>) {
        self.0.push(medium.into());
    }

    /// The media names in source order.
    #[must_use]
    pub fn media(&self) -> &[String] {
        &self.0
    }

    /// Number of media.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false: a media list holds at least one medium.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for MediaList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(text: &str) -> ExprPart {
        ExprPart::Term(ValueTerm::new(None, text, TermKind::Identifier, 1, 1))
    }

    #[test]
    fn test_sign_is_folded_into_text() {
        let term = ValueTerm::new(Some('-'), "2px", TermKind::Length, 3, 7);
        assert_eq!(term.text, "-2px");
        assert_eq!((term.line, term.column), (3, 7));
    }

    #[test]
    fn test_render_expression_spacing() {
        let parts = vec![
            term("12px"),
            ExprPart::Operator(Operator::Slash),
            term("1.5"),
            term("serif"),
            ExprPart::Operator(Operator::Comma),
            term("sans-serif"),
        ];
        assert_eq!(render_expression(&parts), "12px/1.5 serif, sans-serif");
    }

    #[test]
    fn test_media_list_display() {
        let mut media = MediaList::new("screen");
        media.push("print");
        assert_eq!(media.len(), 2);
        assert_eq!(media.to_string(), "screen, print");
    }
}
