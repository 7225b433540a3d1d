//! Integration tests for the CSS2 tokenizer and token stream.

use cascara_css::tokenizer::{CssTokenizer, Token, TokenKind, TokenStream};

/// Helper to tokenize a string and return the tokens
fn tokenize(input: &str) -> Vec<Token> {
    let mut tokenizer = CssTokenizer::new(input);
    tokenizer.run();
    tokenizer.into_tokens()
}

/// Helper returning only the kinds, whitespace included
fn kinds(input: &str) -> Vec<TokenKind> {
    tokenize(input).iter().map(|t| t.kind).collect()
}

#[test]
fn test_whitespace_run_is_one_token() {
    let tokens = tokenize("   \t\n  ");
    assert_eq!(tokens.len(), 2); // whitespace + EOF
    assert!(matches!(tokens[0].kind, TokenKind::S));
    assert!(tokens[1].is_eof());
}

#[test]
fn test_ident_keeps_source_text() {
    let tokens = tokenize("background-color");
    assert_eq!(tokens[0].kind, TokenKind::Ident);
    assert_eq!(tokens[0].value, "background-color");
}

#[test]
fn test_vendor_prefixed_ident() {
    let tokens = tokenize("-moz-box");
    assert_eq!(tokens[0].kind, TokenKind::Ident);
    assert_eq!(tokens[0].value, "-moz-box");
}

#[test]
fn test_minus_before_number_is_separate() {
    assert_eq!(
        kinds("-2px"),
        vec![TokenKind::Minus, TokenKind::Length, TokenKind::Eof]
    );
}

#[test]
fn test_function_includes_open_paren() {
    let tokens = tokenize("rgb(");
    assert_eq!(tokens[0].kind, TokenKind::Function);
    assert_eq!(tokens[0].value, "rgb(");
}

#[test]
fn test_numeric_classes() {
    assert_eq!(
        kinds("1 50% 2em 3ex 4px 90deg 200ms 2khz 3fr .5"),
        vec![
            TokenKind::Number,
            TokenKind::S,
            TokenKind::Percentage,
            TokenKind::S,
            TokenKind::Ems,
            TokenKind::S,
            TokenKind::Exs,
            TokenKind::S,
            TokenKind::Length,
            TokenKind::S,
            TokenKind::Angle,
            TokenKind::S,
            TokenKind::Time,
            TokenKind::S,
            TokenKind::Freq,
            TokenKind::S,
            TokenKind::Dimension,
            TokenKind::S,
            TokenKind::Number,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_at_keywords() {
    assert_eq!(
        kinds("@import@page @MEDIA @charset @font-face"),
        vec![
            TokenKind::ImportSym,
            TokenKind::PageSym,
            TokenKind::S,
            TokenKind::MediaSym,
            TokenKind::S,
            TokenKind::CharsetSym,
            TokenKind::S,
            TokenKind::AtKeyword,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_strings_keep_quotes() {
    let tokens = tokenize(r#""a b" 'c'"#);
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "\"a b\"");
    assert_eq!(tokens[0].unquoted(), "a b");
    assert_eq!(tokens[2].value, "'c'");
}

#[test]
fn test_string_broken_by_newline_is_invalid() {
    let tokens = tokenize("\"abc\ndef\"");
    assert_eq!(tokens[0].kind, TokenKind::Invalid);
    assert_eq!(tokens[0].value, "\"abc");
}

#[test]
fn test_uri_forms() {
    let tokens = tokenize("url(a.css) url( \"b.css\" )");
    assert_eq!(tokens[0].kind, TokenKind::Uri);
    assert_eq!(tokens[0].value, "url(a.css)");
    assert_eq!(tokens[2].kind, TokenKind::Uri);
    assert_eq!(tokens[2].value, "url( \"b.css\" )");
}

#[test]
fn test_malformed_uri_falls_back_to_function() {
    let tokens = tokenize("url(a b)");
    assert_eq!(tokens[0].kind, TokenKind::Function);
    assert_eq!(tokens[0].value, "url(");
}

#[test]
fn test_important_allows_whitespace() {
    let tokens = tokenize("! important");
    assert_eq!(tokens[0].kind, TokenKind::ImportantSym);
    assert_eq!(tokens[1].kind, TokenKind::Eof);
}

#[test]
fn test_attribute_operators_and_markup_delimiters() {
    assert_eq!(
        kinds("~= |= = <!-- -->"),
        vec![
            TokenKind::Includes,
            TokenKind::S,
            TokenKind::DashMatch,
            TokenKind::S,
            TokenKind::Equals,
            TokenKind::S,
            TokenKind::Cdo,
            TokenKind::S,
            TokenKind::Cdc,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_comments_are_skipped() {
    assert_eq!(
        kinds("a/* x */b"),
        vec![TokenKind::Ident, TokenKind::Ident, TokenKind::Eof]
    );
}

#[test]
fn test_hash_and_lone_hash() {
    let tokens = tokenize("#fff # ");
    assert_eq!(tokens[0].kind, TokenKind::Hash);
    assert_eq!(tokens[0].value, "#fff");
    assert_eq!(tokens[2].kind, TokenKind::Delim);
}

#[test]
fn test_positions_are_one_based() {
    let tokens = tokenize("a {\n  color: red;\n}");
    let color = tokens.iter().find(|t| t.value == "color").unwrap();
    assert_eq!((color.start_row, color.start_col), (2, 3));
    let close = tokens.iter().find(|t| t.kind == TokenKind::RBrace).unwrap();
    assert_eq!((close.start_row, close.start_col), (3, 1));
}

#[test]
fn test_stream_hides_whitespace_by_default() {
    let mut stream = TokenStream::new("a  b");
    assert_eq!(stream.get(), TokenKind::Ident);
    assert_eq!(stream.peek(), TokenKind::Ident);
    {
        let scope = stream.whitespace_scope(true);
        assert_eq!(scope.peek(), TokenKind::S);
    }
    assert!(!stream.whitespace());
    assert_eq!(stream.lt(1).value, "b");
}
