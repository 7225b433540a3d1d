//! Property tests for the tokenizer, the value model, and the parser.

use cascara_common::warning::set_quiet;
use cascara_css::tokenizer::{CssTokenizer, Token, TokenKind};
use cascara_css::{
    ElementName, EventKind, Modifier, ParseEvent, SelectorUnit, TermKind, ValueTerm, parse_events,
};
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

/// Inputs built from CSS-ish fragments reach deeper into the grammar than
/// arbitrary strings do.
const FRAGMENTS: [&str; 24] = [
    "a", "div", " ", "\n", "{", "}", ":", ";", ",", ">", "+", "-", ".c", "#i", "*", "[x]",
    "red", "12px", "!important", "@media", "print", "@page", "url(a)", "\"s\"",
];

fn assemble(picks: &[u8]) -> String {
    picks
        .iter()
        .map(|&pick| FRAGMENTS[usize::from(pick) % FRAGMENTS.len()])
        .collect()
}

#[quickcheck]
fn token_texts_tile_comment_free_input(input: String) -> TestResult {
    if input.contains("/*") {
        return TestResult::discard();
    }
    set_quiet(true);
    let mut tokenizer = CssTokenizer::new(input.as_str());
    tokenizer.run();
    let tokens = tokenizer.into_tokens();

    let eofs = tokens.iter().filter(|t| t.kind == TokenKind::Eof).count();
    let joined: String = tokens.iter().map(|t| t.value.as_str()).collect();
    TestResult::from_bool(eofs == 1 && tokens.last().is_some_and(Token::is_eof) && joined == input)
}

#[quickcheck]
fn parser_never_panics(input: String) -> bool {
    set_quiet(true);
    let _ = parse_events(&input);
    true
}

#[quickcheck]
fn successful_parses_are_balanced(picks: Vec<u8>) -> TestResult {
    let Ok(events) = parse_events(&assemble(&picks)) else {
        return TestResult::discard();
    };
    let count = |kind: EventKind| events.iter().filter(|e| e.kind() == kind).count();
    TestResult::from_bool(
        count(EventKind::StartRule) == count(EventKind::EndRule)
            && count(EventKind::StartMedia) == count(EventKind::EndMedia)
            && count(EventKind::StartPage) == count(EventKind::EndPage)
            && events.first().map(ParseEvent::kind) == Some(EventKind::StartStylesheet)
            && events.last().map(ParseEvent::kind) == Some(EventKind::EndStylesheet),
    )
}

#[quickcheck]
fn unit_text_is_name_then_modifiers(name: Option<String>, classes: Vec<String>) -> TestResult {
    let modifiers: Vec<Modifier> = classes
        .iter()
        .map(|class| Modifier::Class(format!(".{class}")))
        .collect();
    let Some(unit) = SelectorUnit::new(name.clone().map(ElementName::Named), modifiers) else {
        return TestResult::from_bool(name.is_none() && classes.is_empty());
    };

    let mut expected = name.unwrap_or_default();
    for class in &classes {
        expected.push('.');
        expected.push_str(class);
    }
    TestResult::from_bool(unit.text() == expected)
}

#[quickcheck]
fn term_text_is_sign_then_value(negative: Option<bool>, value: String) -> bool {
    let sign = negative.map(|negative| if negative { '-' } else { '+' });
    let term = ValueTerm::new(sign, &value, TermKind::Number, 1, 1);
    let expected = sign.map(String::from).unwrap_or_default() + &value;
    term.text == expected
}
