//! Primitive rule tests.

use docbot_foundation::Value;
use docbot_grammar::{Cursor, Rule};

#[test]
fn literal_failure_message() {
    let failure = Rule::literal("help").parse_str("halp").unwrap_err();
    assert_eq!(failure.to_string(), "at 0 expected 'help' got h");
}

#[test]
fn literal_failure_at_end_of_input() {
    let failure = Rule::literal("help").parse_str("").unwrap_err();
    assert_eq!(failure.to_string(), "at 0 expected 'help' got end of input");
}

#[test]
fn keyword_ignores_case_and_keeps_input_text() {
    let parsed = Rule::keyword("prospit").parse_str("PROSPIT dave").unwrap();
    assert_eq!(parsed.value, Value::from("PROSPIT"));
    assert_eq!(parsed.rest.remaining(), " dave");
    assert_eq!(parsed.rest.offset(), 7);
}

#[test]
fn pattern_groups() {
    let rule = Rule::pattern(r"(\d+)d(\d+)(x)?").unwrap();
    let parsed = rule.parse_str("2d8 - 1").unwrap();
    assert_eq!(
        parsed.value,
        Value::from(vec![Value::from("2d8"), Value::from("2"), Value::from("8"), Value::Nil])
    );
    assert_eq!(parsed.rest.offset(), 3);
}

#[test]
fn pattern_is_anchored_at_cursor() {
    let rule = Rule::token(r"\d+").unwrap();
    let failure = rule.parse_str("abc 42").unwrap_err();
    assert_eq!(failure.offset, 0);
    assert_eq!(failure.got, Some('a'));
}

#[test]
fn invalid_pattern_is_grammar_error() {
    let err = Rule::pattern("(").unwrap_err();
    assert!(err.to_string().starts_with("grammar error"));
}

#[test]
fn predicate_single_character() {
    let rule = Rule::predicate(char::is_alphabetic).expect_hint("a letter");
    let parsed = rule.parse_str("ñx").unwrap();
    assert_eq!(parsed.value, Value::from("ñ"));
    assert_eq!(parsed.rest.offset(), 'ñ'.len_utf8());

    let failure = rule.parse_str("1").unwrap_err();
    assert_eq!(failure.to_string(), "at 0 expected a letter got 1");
}

#[test]
fn end_of_input_only_at_end() {
    assert_eq!(Rule::end_of_input().parse_str("").unwrap().value, Value::Nil);
    let failure = Rule::end_of_input().parse_str(" ").unwrap_err();
    assert_eq!(failure.to_string(), "at 0 expected end of input got  ");
}

#[test]
fn spaces_may_be_empty() {
    let parsed = Rule::spaces().parse_str("x").unwrap();
    assert_eq!(parsed.rest.offset(), 0);
    let parsed = Rule::spaces().parse_str(" \t\n x").unwrap();
    assert_eq!(parsed.rest.remaining(), "x");
}

#[test]
fn offsets_are_relative_to_original_input() {
    let cursor = Cursor::new("roll 1d20").advance(5);
    let failure = Rule::literal("x").parse(cursor).unwrap_err();
    assert_eq!(failure.offset, 5);
    assert_eq!(failure.got, Some('1'));
}
