//! CSS2 grammar parser per [CSS 2.1 § G.1 Grammar](https://www.w3.org/TR/CSS2/grammar.html#grammar).
//!
//! A recursive-descent parser with one method per grammar production. It
//! keeps nothing it recognizes; rule sets, at-rules and declarations are
//! reported to listeners as [`ParseEvent`]s the moment they are complete.
//!
//! Productions that are optional in the grammar return `Ok(None)` or
//! `Ok(false)` when their first token is absent, leaving the stream where it
//! was. Once a production has committed, a missing token is an error.

use crate::error::ParseError;
use crate::events::{EventKind, Listeners, ParseEvent};
use crate::selector::{Combinator, ElementName, Modifier, Selector, SelectorUnit};
use crate::tokenizer::{TokenKind, TokenStream, strip_quotes};
use crate::values::{ExprPart, MediaList, Operator, TermKind, ValueTerm};

/// Token kinds a term accepts verbatim, in the order the grammar lists them.
const VALUE_TOKENS: [TokenKind; 11] = [
    TokenKind::Number,
    TokenKind::Percentage,
    TokenKind::Length,
    TokenKind::Ems,
    TokenKind::Exs,
    TokenKind::Angle,
    TokenKind::Time,
    TokenKind::Freq,
    TokenKind::String,
    TokenKind::Ident,
    TokenKind::Uri,
];

/// Print the production being entered and the next token.
macro_rules! trace_production {
    ($grammar:expr, $name:literal) => {
        #[cfg(feature = "parse-trace")]
        {
            let next = $grammar.stream.lt(1);
            eprintln!("[PARSE] {} next={}", $name, next);
        }
    };
}

/// Event-driven CSS2 parser.
///
/// Register listeners with [`CssParser::on`] or [`CssParser::on_any`], then
/// call [`CssParser::parse`]. Listeners run synchronously, in registration
/// order, while the parse is in progress.
///
/// ```
/// use cascara_css::{CssParser, EventKind, ParseEvent};
///
/// let mut properties = Vec::new();
/// let mut parser = CssParser::new();
/// parser.on(EventKind::Property, |event| {
///     if let ParseEvent::Property { property, .. } = event {
///         properties.push(property.clone());
///     }
/// });
/// parser.parse("a { color: red; margin: 0 }").unwrap();
/// drop(parser);
/// assert_eq!(properties, ["color", "margin"]);
/// ```
#[derive(Default)]
pub struct CssParser<'h> {
    listeners: Listeners<'h>,
}

impl<'h> CssParser<'h> {
    /// Create a parser with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self {
            listeners: Listeners::new(),
        }
    }

    /// Register `callback` for events of `kind`.
    pub fn on(&mut self, kind: EventKind, callback: impl FnMut(&ParseEvent) + 'h) {
        self.listeners.on(kind, callback);
    }

    /// Register `callback` for every event.
    pub fn on_any(&mut self, callback: impl FnMut(&ParseEvent) + 'h) {
        self.listeners.on_any(callback);
    }

    /// Deliver `event` to the registered listeners.
    pub fn fire(&mut self, event: &ParseEvent) {
        self.listeners.fire(event);
    }

    /// [§ G.1](https://www.w3.org/TR/CSS2/grammar.html#grammar) Parse a whole stylesheet.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::UnexpectedToken`] at the first token that does not
    /// fit the grammar. Events fired before the failure stay delivered.
    pub fn parse(&mut self, input: &str) -> Result<(), ParseError> {
        let mut grammar = Grammar {
            stream: TokenStream::new(input),
            listeners: &mut self.listeners,
        };
        grammar.stylesheet()
    }
}

/// Parse `input` and collect every event in order.
///
/// # Errors
///
/// Returns the first [`ParseError`]; the events collected so far are dropped.
pub fn parse_events(input: &str) -> Result<Vec<ParseEvent>, ParseError> {
    let mut events = Vec::new();
    let mut parser = CssParser::new();
    parser.on_any(|event| events.push(event.clone()));
    let result = parser.parse(input);
    drop(parser);
    result.map(|()| events)
}

/// One parse in progress: the token stream plus the listeners to notify.
struct Grammar<'p, 'h> {
    stream: TokenStream,
    listeners: &'p mut Listeners<'h>,
}

impl Grammar<'_, '_> {
    fn fire(&mut self, event: &ParseEvent) {
        self.listeners.fire(event);
    }

    fn unexpected_next(&self) -> ParseError {
        ParseError::unexpected(self.stream.lt(1))
    }

    /// stylesheet
    ///   : [ CHARSET_SYM STRING ';' ]?
    ///     [S|CDO|CDC]* [ import [ [CDO|CDC] S* ]* ]*
    ///     [ [ ruleset | media | page ] [ [CDO|CDC] S* ]* ]*
    ///   ;
    fn stylesheet(&mut self) -> Result<(), ParseError> {
        trace_production!(self, "stylesheet");
        self.fire(&ParseEvent::StartStylesheet);

        if self.stream.match_kind(TokenKind::CharsetSym) {
            self.stream.must_match(TokenKind::String)?;
            let charset = self.stream.token().unquoted().to_string();
            self.stream.must_match(TokenKind::Semicolon)?;
            self.fire(&ParseEvent::Charset { charset });
        }

        self.skip_cdo_cdc();
        while self.stream.peek() == TokenKind::ImportSym {
            self.import()?;
            self.skip_cdo_cdc();
        }

        loop {
            match self.stream.get() {
                TokenKind::Eof => break,
                TokenKind::Cdo | TokenKind::Cdc => {}
                TokenKind::MediaSym => {
                    self.stream.unget();
                    self.media()?;
                }
                TokenKind::PageSym => {
                    self.stream.unget();
                    self.page()?;
                }
                _ => {
                    self.stream.unget();
                    if !self.ruleset()? {
                        let _ = self.stream.get();
                        return Err(ParseError::unexpected(self.stream.token()));
                    }
                }
            }
        }

        self.fire(&ParseEvent::EndStylesheet);
        Ok(())
    }

    fn skip_cdo_cdc(&mut self) {
        while self.stream.match_kinds(&[TokenKind::Cdo, TokenKind::Cdc]) {}
    }

    /// import
    ///   : IMPORT_SYM S* [STRING|URI] S* media_list? ';' S*
    ///   ;
    fn import(&mut self) -> Result<(), ParseError> {
        trace_production!(self, "import");
        self.stream.must_match(TokenKind::ImportSym)?;
        self.stream
            .must_match_kinds(&[TokenKind::String, TokenKind::Uri])?;
        let uri = unwrap_uri(&self.stream.token().value);

        let media = if self.stream.peek() == TokenKind::Ident {
            Some(self.media_list()?)
        } else {
            None
        };

        self.stream.must_match(TokenKind::Semicolon)?;
        self.fire(&ParseEvent::Import { uri, media });
        Ok(())
    }

    /// media
    ///   : MEDIA_SYM S* media_list '{' S* ruleset* '}' S*
    ///   ;
    fn media(&mut self) -> Result<(), ParseError> {
        trace_production!(self, "media");
        self.stream.must_match(TokenKind::MediaSym)?;
        let media = self.media_list()?;
        self.stream.must_match(TokenKind::LBrace)?;
        self.fire(&ParseEvent::StartMedia {
            media: media.clone(),
        });

        while self.ruleset()? {}

        self.stream.must_match(TokenKind::RBrace)?;
        self.fire(&ParseEvent::EndMedia { media });
        Ok(())
    }

    /// media_list
    ///   : medium [ COMMA S* medium]*
    ///   ;
    fn media_list(&mut self) -> Result<MediaList, ParseError> {
        let mut media = MediaList::new(self.medium()?);
        while self.stream.match_kind(TokenKind::Comma) {
            media.push(self.medium()?);
        }
        Ok(media)
    }

    /// medium
    ///   : IDENT S*
    ///   ;
    fn medium(&mut self) -> Result<String, ParseError> {
        self.stream.must_match(TokenKind::Ident)?;
        Ok(self.stream.token().value.clone())
    }

    /// page
    ///   : PAGE_SYM S* pseudo_page?
    ///     '{' S* declaration? [ ';' S* declaration? ]* '}' S*
    ///   ;
    fn page(&mut self) -> Result<(), ParseError> {
        trace_production!(self, "page");
        self.stream.must_match(TokenKind::PageSym)?;

        let pseudo = if self.stream.peek() == TokenKind::Colon {
            Some(self.pseudo_page()?)
        } else {
            None
        };

        self.stream.must_match(TokenKind::LBrace)?;
        self.fire(&ParseEvent::StartPage {
            pseudo: pseudo.clone(),
        });

        self.declaration_block()?;

        self.stream.must_match(TokenKind::RBrace)?;
        self.fire(&ParseEvent::EndPage { pseudo });
        Ok(())
    }

    /// pseudo_page
    ///   : ':' IDENT S*
    ///   ;
    fn pseudo_page(&mut self) -> Result<String, ParseError> {
        self.stream.must_match(TokenKind::Colon)?;
        self.stream.must_match(TokenKind::Ident)?;
        Ok(self.stream.token().value.clone())
    }

    /// operator
    ///   : '/' S* | ',' S*
    ///   ;
    fn operator(&mut self) -> Option<Operator> {
        if self.stream.match_kind(TokenKind::Slash) {
            Some(Operator::Slash)
        } else if self.stream.match_kind(TokenKind::Comma) {
            Some(Operator::Comma)
        } else {
            None
        }
    }

    /// combinator
    ///   : '+' S*
    ///   | '>' S*
    ///   ;
    fn combinator(&mut self) -> Option<Combinator> {
        if self
            .stream
            .match_kinds(&[TokenKind::Plus, TokenKind::Greater])
        {
            Combinator::from_symbol(&self.stream.token().value)
        } else {
            None
        }
    }

    /// unary_operator
    ///   : '-' | '+'
    ///   ;
    fn unary_operator(&mut self) -> Option<char> {
        if self.stream.match_kind(TokenKind::Minus) {
            Some('-')
        } else if self.stream.match_kind(TokenKind::Plus) {
            Some('+')
        } else {
            None
        }
    }

    /// ruleset
    ///   : selector [ ',' S* selector ]*
    ///     '{' S* declaration? [ ';' S* declaration? ]* '}' S*
    ///   ;
    ///
    /// Returns `false` without consuming anything if no selector starts here.
    fn ruleset(&mut self) -> Result<bool, ParseError> {
        trace_production!(self, "ruleset");
        let Some(first) = self.selector()? else {
            return Ok(false);
        };

        let mut selectors = vec![first];
        while self.stream.match_kind(TokenKind::Comma) {
            match self.selector()? {
                Some(selector) => selectors.push(selector),
                None => return Err(self.unexpected_next()),
            }
        }

        self.stream.must_match(TokenKind::LBrace)?;
        self.fire(&ParseEvent::StartRule {
            selectors: selectors.clone(),
        });

        self.declaration_block()?;

        self.stream.must_match(TokenKind::RBrace)?;
        self.fire(&ParseEvent::EndRule { selectors });
        Ok(true)
    }

    /// declaration? [ ';' S* declaration? ]*
    ///
    /// Shared by rule sets and `@page`. Stray semicolons are empty declarations.
    fn declaration_block(&mut self) -> Result<(), ParseError> {
        let _ = self.declaration()?;
        while self.stream.match_kind(TokenKind::Semicolon) {
            let _ = self.declaration()?;
        }
        Ok(())
    }

    /// selector
    ///   : simple_selector [ combinator selector | S+ [ combinator? selector ]? ]?
    ///   ;
    fn selector(&mut self) -> Result<Option<Selector>, ParseError> {
        trace_production!(self, "selector");
        let Some(unit) = self.simple_selector()? else {
            return Ok(None);
        };
        let mut selector = Selector::new(unit);

        loop {
            let combinator = match self.combinator() {
                Some(combinator) => Some(combinator),
                None => {
                    // Descendant combinators only exist where whitespace was written.
                    let spaced = self
                        .stream
                        .whitespace_scope(true)
                        .match_kind(TokenKind::S);
                    if !spaced {
                        break;
                    }
                    self.combinator()
                }
            };

            match self.simple_selector()? {
                Some(unit) => selector.push(combinator.unwrap_or(Combinator::Descendant), unit),
                // An explicit combinator demands a right-hand side.
                None if combinator.is_some() => return Err(self.unexpected_next()),
                // Trailing whitespace before '{' or ','.
                None => break,
            }
        }
        Ok(Some(selector))
    }

    /// simple_selector
    ///   : element_name [ HASH | class | attrib | pseudo ]*
    ///   | [ HASH | class | attrib | pseudo ]+
    ///   ;
    fn simple_selector(&mut self) -> Result<Option<SelectorUnit>, ParseError> {
        let element_name = self.element_name();
        let mut modifiers = Vec::new();

        if element_name.is_none() {
            match self.modifier()? {
                Some(modifier) => modifiers.push(modifier),
                None => return Ok(None),
            }
        }

        while !self.whitespace_follows() {
            match self.modifier()? {
                Some(modifier) => modifiers.push(modifier),
                None => break,
            }
        }

        Ok(SelectorUnit::new(element_name, modifiers))
    }

    /// Probe for an `S` token with whitespace made visible for the probe only.
    fn whitespace_follows(&mut self) -> bool {
        self.stream.whitespace_scope(true).peek() == TokenKind::S
    }

    /// HASH | class | attrib | pseudo
    fn modifier(&mut self) -> Result<Option<Modifier>, ParseError> {
        if self.stream.match_kind(TokenKind::Hash) {
            return Ok(Some(Modifier::Id(self.stream.token().value.clone())));
        }
        if let Some(class) = self.class()? {
            return Ok(Some(Modifier::Class(class)));
        }
        if let Some(attrib) = self.attrib()? {
            return Ok(Some(Modifier::Attribute(attrib)));
        }
        Ok(self.pseudo()?.map(Modifier::Pseudo))
    }

    /// class
    ///   : '.' IDENT
    ///   ;
    fn class(&mut self) -> Result<Option<String>, ParseError> {
        if !self.stream.match_kind(TokenKind::Dot) {
            return Ok(None);
        }
        self.stream.must_match(TokenKind::Ident)?;
        Ok(Some(format!(".{}", self.stream.token().value)))
    }

    /// element_name
    ///   : IDENT | '*'
    ///   ;
    fn element_name(&mut self) -> Option<ElementName> {
        if self.stream.match_kind(TokenKind::Ident) {
            Some(ElementName::Named(self.stream.token().value.clone()))
        } else if self.stream.match_kind(TokenKind::Star) {
            Some(ElementName::Universal)
        } else {
            None
        }
    }

    /// attrib
    ///   : '[' S* IDENT S* [ [ '=' | INCLUDES | DASHMATCH ] S*
    ///     [ IDENT | STRING ] S* ]? ']'
    ///   ;
    fn attrib(&mut self) -> Result<Option<String>, ParseError> {
        if !self.stream.match_kind(TokenKind::LBracket) {
            return Ok(None);
        }
        let mut text = self.stream.token().value.clone();

        self.stream.must_match(TokenKind::Ident)?;
        text.push_str(&self.stream.token().value);

        if self.stream.match_kinds(&[
            TokenKind::Equals,
            TokenKind::Includes,
            TokenKind::DashMatch,
        ]) {
            text.push_str(&self.stream.token().value);
            self.stream
                .must_match_kinds(&[TokenKind::Ident, TokenKind::String])?;
            text.push_str(&self.stream.token().value);
        }

        self.stream.must_match(TokenKind::RBracket)?;
        text.push_str(&self.stream.token().value);
        Ok(Some(text))
    }

    /// pseudo
    ///   : ':' [ IDENT | FUNCTION S* [IDENT S*]? ')' ]
    ///   ;
    fn pseudo(&mut self) -> Result<Option<String>, ParseError> {
        if !self.stream.match_kind(TokenKind::Colon) {
            return Ok(None);
        }
        let mut text = self.stream.token().value.clone();

        if self.stream.match_kind(TokenKind::Ident) {
            text.push_str(&self.stream.token().value);
            return Ok(Some(text));
        }

        self.stream.must_match(TokenKind::Function)?;
        text.push_str(&self.stream.token().value);
        if self.stream.match_kind(TokenKind::Ident) {
            text.push_str(&self.stream.token().value);
        }
        self.stream.must_match(TokenKind::RParen)?;
        text.push_str(&self.stream.token().value);
        Ok(Some(text))
    }

    /// declaration
    ///   : property ':' S* expr prio?
    ///   ;
    ///
    /// Returns `false` without consuming anything if no property starts here.
    fn declaration(&mut self) -> Result<bool, ParseError> {
        trace_production!(self, "declaration");
        let Some(property) = self.property() else {
            return Ok(false);
        };

        self.stream.must_match(TokenKind::Colon)?;

        let value = self.expr()?;
        if value.is_empty() {
            return Err(self.unexpected_next());
        }

        let important = self.prio();

        self.fire(&ParseEvent::Property {
            property,
            value,
            important,
        });
        Ok(true)
    }

    /// property
    ///   : IDENT S*
    ///   ;
    fn property(&mut self) -> Option<String> {
        self.stream
            .match_kind(TokenKind::Ident)
            .then(|| self.stream.token().value.clone())
    }

    /// prio
    ///   : IMPORTANT_SYM S*
    ///   ;
    fn prio(&mut self) -> bool {
        self.stream.match_kind(TokenKind::ImportantSym)
    }

    /// expr
    ///   : term [ operator? term ]*
    ///   ;
    fn expr(&mut self) -> Result<Vec<ExprPart>, ParseError> {
        let mut parts = Vec::new();
        let Some(first) = self.term()? else {
            return Ok(parts);
        };
        parts.push(ExprPart::Term(first));

        loop {
            let operator = self.operator();
            if let Some(operator) = operator {
                parts.push(ExprPart::Operator(operator));
            }
            match self.term()? {
                Some(term) => parts.push(ExprPart::Term(term)),
                // A dangling operator stays in the value, e.g. `f(1,)`.
                None => break,
            }
        }
        Ok(parts)
    }

    /// term
    ///   : unary_operator?
    ///     [ NUMBER S* | PERCENTAGE S* | LENGTH S* | EMS S* | EXS S* | ANGLE S* |
    ///       TIME S* | FREQ S* ]
    ///   | STRING S* | IDENT S* | URI S* | hexcolor | function
    ///   ;
    fn term(&mut self) -> Result<Option<ValueTerm>, ParseError> {
        let start = self.stream.lt(1);
        let (line, column) = (start.start_row, start.start_col);

        let sign = self.unary_operator();

        if self.stream.match_kinds(&VALUE_TOKENS) {
            let token = self.stream.token();
            let kind = term_kind(token.kind);
            return Ok(Some(ValueTerm::new(sign, &token.value, kind, line, column)));
        }

        if let Some(color) = self.hexcolor()? {
            return Ok(Some(ValueTerm::new(
                sign,
                &color,
                TermKind::HexColor,
                line,
                column,
            )));
        }

        if let Some(function) = self.function()? {
            return Ok(Some(ValueTerm::new(
                sign,
                &function,
                TermKind::Function,
                line,
                column,
            )));
        }

        // A sign with nothing after it is dropped.
        Ok(None)
    }

    /// function
    ///   : FUNCTION S* expr ')' S*
    ///   ;
    fn function(&mut self) -> Result<Option<String>, ParseError> {
        if !self.stream.match_kind(TokenKind::Function) {
            return Ok(None);
        }
        let mut text = self.stream.token().value.clone();

        for part in self.expr()? {
            text.push_str(part.text());
        }

        // Best effort: an unclosed call is still rendered closed.
        let _ = self.stream.match_kind(TokenKind::RParen);
        text.push(')');
        Ok(Some(text))
    }

    /// hexcolor
    ///   : HASH S*
    ///   ;
    ///
    /// "There is a constraint on the color that it must have either 3 or 6
    /// hex-digits (i.e., [0-9a-fA-F]) after the "#"; e.g., "#000" is OK, but
    /// "#abcd" is not."
    fn hexcolor(&mut self) -> Result<Option<String>, ParseError> {
        if !self.stream.match_kind(TokenKind::Hash) {
            return Ok(None);
        }
        let token = self.stream.token();
        let digits = &token.value[1..];
        if matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit()) {
            Ok(Some(token.value.clone()))
        } else {
            Err(ParseError::unexpected(token))
        }
    }
}

const fn term_kind(kind: TokenKind) -> TermKind {
    match kind {
        TokenKind::Percentage => TermKind::Percentage,
        TokenKind::Length => TermKind::Length,
        TokenKind::Ems => TermKind::Ems,
        TokenKind::Exs => TermKind::Exs,
        TokenKind::Angle => TermKind::Angle,
        TokenKind::Time => TermKind::Time,
        TokenKind::Freq => TermKind::Frequency,
        TokenKind::String => TermKind::String,
        TokenKind::Ident => TermKind::Identifier,
        TokenKind::Uri => TermKind::Uri,
        _ => TermKind::Number,
    }
}

/// Strip the `url(...)` wrapper, surrounding whitespace, and quotes from an
/// import target.
fn unwrap_uri(text: &str) -> String {
    let inner = match text.get(..4) {
        Some(prefix) if prefix.eq_ignore_ascii_case("url(") => {
            let rest = &text[4..];
            rest.strip_suffix(')').unwrap_or(rest)
        }
        _ => text,
    };
    strip_quotes(inner.trim()).to_string()
}
