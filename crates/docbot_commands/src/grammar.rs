//! Argument rules shared by several commands, plus helpers for reading
//! the values they produce.

use docbot_foundation::{Error, ErrorKind, Result, Value};
use docbot_grammar::{Choice, Rule};

/// A character or document name: a letter followed by word characters.
///
/// # Errors
///
/// Only fails if the built-in pattern is rejected by the regex engine.
pub fn name() -> Result<Rule> {
    Ok(Rule::token(r"[a-zA-Z]\w*")?.expect_hint("name"))
}

/// A spreadsheet document id.
///
/// # Errors
///
/// See [`name`].
pub fn document_id() -> Result<Rule> {
    Ok(Rule::token(r"[0-9a-zA-Z_\-]+")?.expect_hint("document id"))
}

/// A non-negative decimal integer, produced as [`Value::Int`].
///
/// # Errors
///
/// See [`name`].
pub fn integer() -> Result<Rule> {
    integer_pattern("[0-9]{1,18}")
}

/// A positive decimal integer without leading zeros.
///
/// # Errors
///
/// See [`name`].
pub fn positive_integer() -> Result<Rule> {
    integer_pattern("[1-9][0-9]{0,17}")
}

fn integer_pattern(source: &str) -> Result<Rule> {
    Ok(Rule::token(source)?.map(|value| {
        value
            .as_str()
            .and_then(|digits| digits.parse::<i64>().ok())
            .map_or(Value::Nil, Value::Int)
    }))
}

/// Any of `words` as a whole word, e.g. `hp` but not the start of `hpx`.
///
/// # Errors
///
/// Returns a grammar error if a word is not valid pattern text.
pub fn synonyms(words: &[&str]) -> Result<Rule> {
    Rule::token(&format!(r"(?:{})\b", words.join("|")))
}

/// `add`, `sub` or `set`.
///
/// # Errors
///
/// See [`name`].
pub fn operation() -> Result<Rule> {
    Ok(Choice::new()
        .with("add")
        .with("sub")
        .with("set")
        .build()?
        .expect_hint("an operation (add|sub|set)"))
}

/// Optional `prospit` or `derse` subsheet selector, produced uppercased
/// or as [`Value::Nil`] when absent.
///
/// # Errors
///
/// See [`name`].
pub fn moon() -> Result<Rule> {
    Ok(Choice::new()
        .with(Rule::token("[Pp]rospit")?)
        .with(Rule::token("[Dd]erse")?)
        .build()?
        .map(|value| value.as_str().map_or(Value::Nil, |s| Value::from(s.to_uppercase())))
        .opt())
}

fn malformed(what: &str) -> Error {
    Error::new(ErrorKind::Internal(format!("malformed arguments: {what}")))
}

/// Reads a text field of an argument record.
///
/// # Errors
///
/// Returns an internal error if the field is missing or not text.
pub fn text<'v>(args: &'v Value, field: &str) -> Result<&'v str> {
    args.field(field)
        .and_then(Value::as_str)
        .ok_or_else(|| malformed(field))
}

/// Reads an integer field of an argument record.
///
/// # Errors
///
/// Returns an internal error if the field is missing or not an integer.
pub fn int(args: &Value, field: &str) -> Result<i64> {
    args.field(field)
        .and_then(Value::as_int)
        .ok_or_else(|| malformed(field))
}

/// Splits a tagged value into its tag and payload.
///
/// # Errors
///
/// Returns an internal error if the value carries no tag.
pub fn branch(args: &Value) -> Result<(&str, &Value)> {
    args.as_branch().ok_or_else(|| malformed("branch"))
}

/// Reads the optional moon field of an argument record.
#[must_use]
pub fn moon_of(args: &Value) -> Option<&str> {
    args.field("moon").and_then(Value::as_str)
}
