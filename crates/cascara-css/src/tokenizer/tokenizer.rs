use cascara_common::warning::warn_once;

use super::token::{Token, TokenKind};

/// [§ G.2 Lexical scanner](https://www.w3.org/TR/CSS2/grammar.html#scanner)
///
/// CSS2 tokenizer. Produces the whole token sequence up front; the last token
/// is always [`TokenKind::Eof`].
pub struct CssTokenizer {
    /// The input being tokenized
    input: Vec<char>,
    /// Index of the first character of every line
    line_starts: Vec<usize>,
    /// Current position in the input
    position: usize,
    /// Collected tokens
    tokens: Vec<Token>,
}

impl CssTokenizer {
    /// Create a new tokenizer for the given input.
    pub fn new(input: impl Into<String>) -> Self {
        let input: Vec<char> = input.into().chars().collect();
        let line_starts = compute_line_starts(&input);
        Self {
            input,
            line_starts,
            position: 0,
            tokens: Vec::new(),
        }
    }

    /// Scan the entire input.
    pub fn run(&mut self) {
        loop {
            let token = self.consume_token();
            let is_eof = token.is_eof();
            self.tokens.push(token);
            if is_eof {
                break;
            }
        }
    }

    /// Return the collected tokens.
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    fn consume_token(&mut self) -> Token {
        // "COMMENT tokens do not occur in the grammar (to keep it readable),
        // but any number of these tokens may appear anywhere outside other tokens."
        self.consume_comments();

        let start = self.position;
        let Some(c) = self.consume() else {
            return self.make_token(TokenKind::Eof, start);
        };

        let kind = match c {
            c if is_whitespace(c) => {
                self.consume_whitespace();
                TokenKind::S
            }

            '"' | '\'' => self.consume_string(c, start),

            '#' => {
                if self.peek().is_some_and(is_name_char) || self.starts_with_escape(0) {
                    let _ = self.consume_name();
                    TokenKind::Hash
                } else {
                    TokenKind::Delim
                }
            }

            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ':' => TokenKind::Colon,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            '*' => TokenKind::Star,
            '>' => TokenKind::Greater,
            '/' => TokenKind::Slash,
            '=' => TokenKind::Equals,
            '+' => TokenKind::Plus,

            '-' => {
                if self.peek() == Some('-') && self.peek_at(1) == Some('>') {
                    self.advance(2);
                    TokenKind::Cdc
                } else if self.peek().is_some_and(is_name_start) || self.starts_with_escape(0) {
                    // "ident -?{nmstart}{nmchar}*"
                    self.consume_ident_like(start)
                } else {
                    TokenKind::Minus
                }
            }

            '.' => {
                if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.reconsume();
                    self.consume_numeric()
                } else {
                    TokenKind::Dot
                }
            }

            '<' => {
                if self.peek() == Some('!')
                    && self.peek_at(1) == Some('-')
                    && self.peek_at(2) == Some('-')
                {
                    self.advance(3);
                    TokenKind::Cdo
                } else {
                    TokenKind::Delim
                }
            }

            '@' => {
                if self.would_start_ident() {
                    let name = self.consume_name();
                    at_keyword_kind(&name)
                } else {
                    TokenKind::Delim
                }
            }

            // "!{w}important"
            '!' => {
                if let Some(len) = self.important_length() {
                    self.advance(len);
                    TokenKind::ImportantSym
                } else {
                    TokenKind::Delim
                }
            }

            '~' if self.peek() == Some('=') => {
                self.advance(1);
                TokenKind::Includes
            }

            '|' if self.peek() == Some('=') => {
                self.advance(1);
                TokenKind::DashMatch
            }

            '\\' => {
                if self.starts_with_escape(-1) {
                    self.reconsume();
                    self.consume_ident_like(start)
                } else {
                    TokenKind::Delim
                }
            }

            c if c.is_ascii_digit() => {
                self.reconsume();
                self.consume_numeric()
            }

            c if is_name_start(c) => {
                self.reconsume();
                self.consume_ident_like(start)
            }

            _ => TokenKind::Delim,
        };

        self.make_token(kind, start)
    }

    /// Build a token spanning `start..self.position`.
    fn make_token(&self, kind: TokenKind, start: usize) -> Token {
        let (row, col) = self.row_col(start);
        let value: String = self.input[start..self.position].iter().collect();
        Token::new(kind, value, row, col)
    }

    /// "\/\*[^*]*\*+([^/*][^*]*\*+)*\/"
    fn consume_comments(&mut self) {
        while self.peek() == Some('/') && self.peek_at(1) == Some('*') {
            let start = self.position;
            self.advance(2);

            loop {
                match self.consume() {
                    Some('*') if self.peek() == Some('/') => {
                        self.advance(1);
                        break;
                    }
                    Some(_) => {}
                    None => {
                        let (row, col) = self.row_col(start);
                        warn_once(
                            "CSS",
                            &format!("unterminated comment at line {row}, char {col}"),
                        );
                        break;
                    }
                }
            }
        }
    }

    fn consume_whitespace(&mut self) {
        while self.peek().is_some_and(is_whitespace) {
            self.advance(1);
        }
    }

    /// "string1 \"([^\n\r\f\\"]|\\{nl}|{escape})*\"" and its single-quoted twin.
    ///
    /// A newline before the closing quote yields `INVALID` and is left unconsumed.
    fn consume_string(&mut self, quote: char, start: usize) -> TokenKind {
        loop {
            match self.peek() {
                Some(c) if c == quote => {
                    self.advance(1);
                    return TokenKind::String;
                }
                None => {
                    let (row, col) = self.row_col(start);
                    warn_once(
                        "CSS",
                        &format!("unterminated string at line {row}, char {col}"),
                    );
                    return TokenKind::String;
                }
                Some(c) if is_newline(c) => {
                    let (row, col) = self.row_col(start);
                    warn_once(
                        "CSS",
                        &format!("string broken by a newline at line {row}, char {col}"),
                    );
                    return TokenKind::Invalid;
                }
                Some('\\') => {
                    self.advance(1);
                    match self.peek() {
                        None => {}
                        // "\\{nl}" continues the string on the next line.
                        Some('\r') if self.peek_at(1) == Some('\n') => self.advance(2),
                        Some(c) if is_newline(c) => self.advance(1),
                        Some(_) => self.consume_escape(),
                    }
                }
                Some(_) => self.advance(1),
            }
        }
    }

    /// "num [0-9]+|[0-9]*\.[0-9]+", then an optional unit or "%".
    fn consume_numeric(&mut self) -> TokenKind {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance(1);
        }
        if self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            self.advance(1);
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance(1);
            }
        }

        if self.would_start_ident() {
            let unit = self.consume_name();
            unit_kind(&unit)
        } else if self.peek() == Some('%') {
            self.advance(1);
            TokenKind::Percentage
        } else {
            TokenKind::Number
        }
    }

    /// An identifier, a function name, or a `url(...)` token.
    fn consume_ident_like(&mut self, start: usize) -> TokenKind {
        // A leading '-' was already consumed by the caller.
        let name = self.consume_name();
        let is_url = self.position - start == 3 && name.eq_ignore_ascii_case("url");

        if is_url && self.peek() == Some('(') {
            if let Some(end) = self.scan_uri(self.position) {
                self.position = end;
                return TokenKind::Uri;
            }
        }

        if self.peek() == Some('(') {
            self.advance(1);
            TokenKind::Function
        } else {
            TokenKind::Ident
        }
    }

    /// "url\({w}{string}{w}\)|url\({w}([!#$%&*-~]|{nonascii}|{escape})*{w}\)"
    ///
    /// `open` is the index of the '('. Returns the index just past the ')'
    /// without moving the cursor, or `None` if this is not a well-formed URI.
    fn scan_uri(&self, open: usize) -> Option<usize> {
        let mut i = self.skip_whitespace_from(open + 1);

        match self.input.get(i).copied() {
            Some(quote @ ('"' | '\'')) => {
                i += 1;
                loop {
                    match self.input.get(i).copied() {
                        Some(c) if c == quote => {
                            i += 1;
                            break;
                        }
                        Some('\\') => i += 2,
                        Some(c) if !is_newline(c) => i += 1,
                        _ => return None,
                    }
                }
            }
            _ => {
                while let Some(c) = self.input.get(i).copied() {
                    if c == ')' || is_whitespace(c) || matches!(c, '"' | '\'' | '(') {
                        break;
                    }
                    i += if c == '\\' { 2 } else { 1 };
                }
            }
        }

        i = self.skip_whitespace_from(i);
        (self.input.get(i) == Some(&')')).then_some(i + 1)
    }

    fn skip_whitespace_from(&self, mut i: usize) -> usize {
        while self.input.get(i).copied().is_some_and(is_whitespace) {
            i += 1;
        }
        i
    }

    /// "name {nmchar}+"
    fn consume_name(&mut self) -> String {
        let mut name = String::new();
        loop {
            match self.peek() {
                Some(c) if is_name_char(c) => {
                    name.push(c);
                    self.advance(1);
                }
                Some('\\') if self.starts_with_escape(0) => {
                    let from = self.position;
                    self.advance(1);
                    self.consume_escape();
                    name.extend(&self.input[from..self.position]);
                }
                _ => return name,
            }
        }
    }

    /// "escape {unicode}|\\[^\n\r\f0-9a-f]", with the backslash already consumed.
    fn consume_escape(&mut self) {
        if self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
            let mut digits = 0;
            while digits < 6 && self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                self.advance(1);
                digits += 1;
            }
            // "unicode \\[0-9a-f]{1,6}(\r\n|[ \n\r\t\f])?"
            if self.peek() == Some('\r') && self.peek_at(1) == Some('\n') {
                self.advance(2);
            } else if self.peek().is_some_and(is_whitespace) {
                self.advance(1);
            }
        } else if self.peek().is_some() {
            self.advance(1);
        }
    }

    /// Length of "!{w}important" starting at the '!' just consumed, minus the '!'.
    fn important_length(&self) -> Option<usize> {
        let mut i = self.position;
        loop {
            match self.input.get(i).copied() {
                Some(c) if is_whitespace(c) => i += 1,
                Some('/') if self.input.get(i + 1) == Some(&'*') => {
                    i += 2;
                    while i < self.input.len()
                        && !(self.input[i] == '*' && self.input.get(i + 1) == Some(&'/'))
                    {
                        i += 1;
                    }
                    i += 2;
                }
                _ => break,
            }
        }

        let keyword = "important";
        let end = i + keyword.len();
        let matches = end <= self.input.len()
            && self.input[i..end]
                .iter()
                .zip(keyword.chars())
                .all(|(a, b)| a.eq_ignore_ascii_case(&b));
        let followed_by_name = self.input.get(end).copied().is_some_and(is_name_char);

        (matches && !followed_by_name).then(|| end - self.position)
    }

    /// Whether the next characters begin an identifier (`-?{nmstart}`).
    fn would_start_ident(&self) -> bool {
        match self.peek() {
            Some('-') => {
                self.peek_at(1).is_some_and(is_name_start) || self.starts_with_escape(1)
            }
            Some(c) if is_name_start(c) => true,
            Some('\\') => self.starts_with_escape(0),
            _ => false,
        }
    }

    /// Whether the character at `offset` from the cursor is a backslash that
    /// begins a valid escape.
    fn starts_with_escape(&self, offset: isize) -> bool {
        let Some(at) = self.position.checked_add_signed(offset) else {
            return false;
        };
        self.input.get(at) == Some(&'\\')
            && self.input.get(at + 1).is_some_and(|&c| !is_newline(c))
    }

    fn row_col(&self, index: usize) -> (usize, usize) {
        let line = self.line_starts.partition_point(|&start| start <= index);
        (line, index - self.line_starts[line - 1] + 1)
    }

    fn consume(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += 1;
        Some(c)
    }

    fn advance(&mut self, count: usize) {
        self.position = (self.position + count).min(self.input.len());
    }

    fn reconsume(&mut self) {
        self.position = self.position.saturating_sub(1);
    }

    fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }
}

/// Index of the first character of each line; always starts with `0`.
fn compute_line_starts(input: &[char]) -> Vec<usize> {
    let mut starts = vec![0];
    let mut i = 0;
    while i < input.len() {
        match input[i] {
            '\r' if input.get(i + 1) == Some(&'\n') => {
                i += 2;
                starts.push(i);
            }
            c if is_newline(c) => {
                i += 1;
                starts.push(i);
            }
            _ => i += 1,
        }
    }
    starts
}

fn at_keyword_kind(name: &str) -> TokenKind {
    match name.to_ascii_lowercase().as_str() {
        "import" => TokenKind::ImportSym,
        "page" => TokenKind::PageSym,
        "media" => TokenKind::MediaSym,
        "charset" => TokenKind::CharsetSym,
        _ => TokenKind::AtKeyword,
    }
}

/// [§ G.2](https://www.w3.org/TR/CSS2/grammar.html#scanner) dimension classes.
fn unit_kind(unit: &str) -> TokenKind {
    match unit.to_ascii_lowercase().as_str() {
        "em" => TokenKind::Ems,
        "ex" => TokenKind::Exs,
        "px" | "cm" | "mm" | "in" | "pt" | "pc" => TokenKind::Length,
        "deg" | "rad" | "grad" => TokenKind::Angle,
        "ms" | "s" => TokenKind::Time,
        "hz" | "khz" => TokenKind::Freq,
        _ => TokenKind::Dimension,
    }
}

/// "[ \t\r\n\f]"
const fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n' | '\x0C')
}

/// "nl \n|\r\n|\r|\f"
const fn is_newline(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\x0C')
}

/// "nmstart [_a-z]|{nonascii}|{escape}" (escape handled separately)
const fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

/// "nmchar [_a-z0-9-]|{nonascii}|{escape}" (escape handled separately)
const fn is_name_char(c: char) -> bool {
    is_name_start(c) || c.is_ascii_digit() || c == '-'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_starts_handle_crlf_as_one_break() {
        let input: Vec<char> = "a\r\nb\nc\rd".chars().collect();
        assert_eq!(compute_line_starts(&input), vec![0, 3, 5, 7]);
    }

    #[test]
    fn test_unit_classification_is_case_insensitive() {
        assert_eq!(unit_kind("PX"), TokenKind::Length);
        assert_eq!(unit_kind("kHz"), TokenKind::Freq);
        assert_eq!(unit_kind("fr"), TokenKind::Dimension);
    }
}
