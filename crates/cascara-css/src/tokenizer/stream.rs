//! Token stream with lookahead, one level of pushback, and switchable
//! whitespace visibility.
//!
//! The grammar never looks at raw characters. It pulls classified tokens from
//! a [`TokenStream`], which hides `S` tokens unless whitespace visibility is on.

use core::ops::{Deref, DerefMut};

use super::token::{Token, TokenKind};
use super::tokenizer::CssTokenizer;
use crate::error::ParseError;

/// Cursor over a materialized token sequence.
pub struct TokenStream {
    tokens: Vec<Token>,
    /// Index of the next token to examine.
    cursor: usize,
    /// Index of the most recently consumed token.
    current: Option<usize>,
    /// `(cursor, current)` before the last `get`, restored by `unget`.
    previous: Option<(usize, Option<usize>)>,
    whitespace: bool,
}

impl TokenStream {
    /// Tokenize `input` and wrap the result.
    #[must_use]
    pub fn new(input: &str) -> Self {
        let mut tokenizer = CssTokenizer::new(input);
        tokenizer.run();
        Self::from_tokens(tokenizer.into_tokens())
    }

    /// Wrap an existing token sequence. An `Eof` token is appended if the
    /// sequence does not already end with one.
    #[must_use]
    pub fn from_tokens(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(Token::is_eof) {
            let (row, col) = tokens
                .last()
                .map_or((1, 1), |t| (t.start_row, t.start_col + t.value.chars().count()));
            tokens.push(Token::new(TokenKind::Eof, "", row, col));
        }
        Self {
            tokens,
            cursor: 0,
            current: None,
            previous: None,
            whitespace: false,
        }
    }

    /// Whether `S` tokens are currently surfaced.
    #[must_use]
    pub const fn whitespace(&self) -> bool {
        self.whitespace
    }

    /// Set whitespace visibility. Prefer [`TokenStream::whitespace_scope`],
    /// which restores the previous value automatically.
    pub fn set_whitespace(&mut self, visible: bool) {
        self.whitespace = visible;
    }

    /// Set whitespace visibility until the returned guard is dropped.
    pub fn whitespace_scope(&mut self, visible: bool) -> WhitespaceScope<'_> {
        let saved = self.whitespace;
        self.whitespace = visible;
        WhitespaceScope {
            stream: self,
            saved,
        }
    }

    /// Index of the next visible token at or after `from`.
    fn visible_from(&self, mut from: usize) -> usize {
        let last = self.tokens.len() - 1;
        while from < last && !self.whitespace && self.tokens[from].kind == TokenKind::S {
            from += 1;
        }
        from.min(last)
    }

    /// Consume the next visible token and return its kind.
    pub fn get(&mut self) -> TokenKind {
        self.previous = Some((self.cursor, self.current));
        let index = self.visible_from(self.cursor);
        let token = &self.tokens[index];
        if !token.is_eof() {
            self.cursor = index + 1;
        }
        self.current = Some(index);
        token.kind
    }

    /// Push back the last consumed token. Only one level is kept; a second
    /// call without an intervening `get` does nothing.
    pub fn unget(&mut self) {
        if let Some((cursor, current)) = self.previous.take() {
            self.cursor = cursor;
            self.current = current;
        }
    }

    /// The kind of the next visible token, without consuming it.
    #[must_use]
    pub fn peek(&self) -> TokenKind {
        self.lt(1).kind
    }

    /// Consume the next token if its kind is one of `kinds`.
    pub fn match_kinds(&mut self, kinds: &[TokenKind]) -> bool {
        if kinds.contains(&self.peek()) {
            let _ = self.get();
            true
        } else {
            false
        }
    }

    /// Consume the next token if it is of `kind`.
    pub fn match_kind(&mut self, kind: TokenKind) -> bool {
        self.match_kinds(&[kind])
    }

    /// As [`TokenStream::match_kinds`], but a mismatch is an unexpected-token
    /// failure naming the token that was found instead.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::UnexpectedToken`] if the next token is not one of `kinds`.
    pub fn must_match_kinds(&mut self, kinds: &[TokenKind]) -> Result<(), ParseError> {
        if self.match_kinds(kinds) {
            Ok(())
        } else {
            Err(ParseError::unexpected(self.lt(1)))
        }
    }

    /// As [`TokenStream::match_kind`], but a mismatch is a failure.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::UnexpectedToken`] if the next token is not of `kind`.
    pub fn must_match(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        self.must_match_kinds(&[kind])
    }

    /// The most recently consumed token. Before anything was consumed this is
    /// the first token of the stream.
    #[must_use]
    pub fn token(&self) -> &Token {
        &self.tokens[self.current.unwrap_or(0)]
    }

    /// The `n`th visible token ahead of the cursor (`lt(1)` is the next one).
    /// Looking past the end yields the `Eof` token.
    #[must_use]
    pub fn lt(&self, n: usize) -> &Token {
        let mut index = self.visible_from(self.cursor);
        for _ in 1..n {
            index = self.visible_from(index + 1);
        }
        &self.tokens[index]
    }
}

/// Guard returned by [`TokenStream::whitespace_scope`].
///
/// Dereferences to the stream and restores the previous whitespace visibility
/// on drop, on every exit path including `?` propagation.
pub struct WhitespaceScope<'a> {
    stream: &'a mut TokenStream,
    saved: bool,
}

impl Deref for WhitespaceScope<'_> {
    type Target = TokenStream;

    fn deref(&self) -> &TokenStream {
        self.stream
    }
}

impl DerefMut for WhitespaceScope<'_> {
    fn deref_mut(&mut self) -> &mut TokenStream {
        self.stream
    }
}

impl Drop for WhitespaceScope<'_> {
    fn drop(&mut self) {
        self.stream.whitespace = self.saved;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_hidden_by_default() {
        let mut stream = TokenStream::new("a b");
        assert_eq!(stream.get(), TokenKind::Ident);
        assert_eq!(stream.get(), TokenKind::Ident);
        assert_eq!(stream.token().value, "b");
        assert_eq!(stream.get(), TokenKind::Eof);
    }

    #[test]
    fn test_whitespace_scope_restores_visibility() {
        let mut stream = TokenStream::new("a b");
        let _ = stream.get();
        {
            let scope = stream.whitespace_scope(true);
            assert!(scope.whitespace());
            assert_eq!(scope.peek(), TokenKind::S);
        }
        assert!(!stream.whitespace());
        assert_eq!(stream.peek(), TokenKind::Ident);
    }

    #[test]
    fn test_nested_scopes_restore_in_order() {
        let mut stream = TokenStream::new("a");
        stream.set_whitespace(true);
        {
            let mut outer = stream.whitespace_scope(false);
            {
                let inner = outer.whitespace_scope(true);
                assert!(inner.whitespace());
            }
            assert!(!outer.whitespace());
        }
        assert!(stream.whitespace());
    }

    #[test]
    fn test_unget_restores_one_token() {
        let mut stream = TokenStream::new("a { }");
        assert_eq!(stream.get(), TokenKind::Ident);
        assert_eq!(stream.get(), TokenKind::LBrace);
        stream.unget();
        assert_eq!(stream.token().value, "a");
        assert_eq!(stream.peek(), TokenKind::LBrace);
        // Only one level of pushback is kept.
        stream.unget();
        assert_eq!(stream.peek(), TokenKind::LBrace);
    }

    #[test]
    fn test_unget_after_visible_whitespace_probe() {
        let mut stream = TokenStream::new("a b");
        let _ = stream.get();
        let found = {
            let mut scope = stream.whitespace_scope(true);
            let found = scope.match_kind(TokenKind::S);
            if found {
                scope.unget();
            }
            found
        };
        assert!(found);
        assert_eq!(stream.token().value, "a");
        assert_eq!(stream.get(), TokenKind::Ident);
    }

    #[test]
    fn test_lookahead_by_index_skips_hidden_whitespace() {
        let stream = TokenStream::new("a , b");
        assert_eq!(stream.lt(1).kind, TokenKind::Ident);
        assert_eq!(stream.lt(2).kind, TokenKind::Comma);
        assert_eq!(stream.lt(3).value, "b");
        assert!(stream.lt(10).is_eof());
    }

    #[test]
    fn test_must_match_reports_found_token() {
        let mut stream = TokenStream::new("a\n  }");
        let _ = stream.get();
        let err = stream.must_match(TokenKind::Colon).unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedToken {
                value: "}".to_string(),
                line: 2,
                column: 3,
            }
        );
    }

    #[test]
    fn test_eof_is_sticky() {
        let mut stream = TokenStream::new("");
        assert_eq!(stream.get(), TokenKind::Eof);
        assert_eq!(stream.get(), TokenKind::Eof);
        assert_eq!(stream.peek(), TokenKind::Eof);
    }
}
