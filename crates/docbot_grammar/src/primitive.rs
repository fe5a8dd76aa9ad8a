//! Leaf rules: literals, patterns, predicates, end of input and spaces.

use std::sync::Arc;

use docbot_foundation::{Error, List, Result, Value};
use regex::Regex;

use crate::cursor::Cursor;
use crate::rule::{CharTest, ParseResult, Parsed, Rule, RuleKind};

impl Rule {
    /// Matches `word` exactly. Produces the matched text.
    #[must_use]
    pub fn literal(word: impl Into<String>) -> Self {
        Self::from_kind(RuleKind::Literal {
            word: word.into(),
            ignore_case: false,
        })
    }

    /// Matches `word` ignoring case. Produces the text as typed.
    #[must_use]
    pub fn keyword(word: impl Into<String>) -> Self {
        Self::from_kind(RuleKind::Literal {
            word: word.into(),
            ignore_case: true,
        })
    }

    /// Matches a regular expression at the cursor.
    ///
    /// Produces a list holding the whole match followed by each capture
    /// group, with [`Value::Nil`] for groups that did not participate.
    ///
    /// # Errors
    ///
    /// Returns a grammar error if `source` is not a valid expression.
    pub fn pattern(source: &str) -> Result<Self> {
        let regex = Regex::new(&format!(r"\A(?:{source})"))
            .map_err(|e| Error::grammar(format!("invalid pattern {source}: {e}")))?;
        Ok(Self::from_kind(RuleKind::Pattern {
            source: source.to_string(),
            regex,
        }))
    }

    /// Matches a regular expression and produces only the matched text.
    ///
    /// # Errors
    ///
    /// Returns a grammar error if `source` is not a valid expression.
    pub fn token(source: &str) -> Result<Self> {
        Ok(Self::pattern(source)?.map(|value| {
            value
                .index(0)
                .cloned()
                .unwrap_or(Value::Nil)
        }))
    }

    /// Matches a single character accepted by `test`.
    #[must_use]
    pub fn predicate(test: impl Fn(char) -> bool + Send + Sync + 'static) -> Self {
        Self::from_kind(RuleKind::Predicate(CharTest(Arc::new(test))))
    }

    /// Succeeds only when the input is exhausted. Produces [`Value::Nil`].
    #[must_use]
    pub const fn end_of_input() -> Self {
        Self::from_kind(RuleKind::EndOfInput)
    }

    /// Consumes any run of whitespace, possibly empty. Always hidden.
    #[must_use]
    pub fn spaces() -> Self {
        Self::from_kind(RuleKind::Spaces).hide()
    }
}

pub(crate) fn parse_literal<'a>(
    rule: &Rule,
    word: &str,
    ignore_case: bool,
    input: Cursor<'a>,
) -> ParseResult<'a> {
    let matched = if ignore_case {
        caseless_prefix(word, input.remaining())
    } else {
        input.remaining().starts_with(word).then_some(word.len())
    };
    match matched {
        Some(n) => {
            let (head, rest) = input.split(n);
            Ok(Parsed::new(Value::from(head.remaining()), rest))
        }
        None => Err(input.fail(rule.expects())),
    }
}

/// Returns the byte length of the prefix of `text` that equals `word`
/// under lowercasing, if any.
fn caseless_prefix(word: &str, text: &str) -> Option<usize> {
    let mut consumed = 0;
    let mut chars = text.chars();
    for expected in word.chars() {
        let actual = chars.next()?;
        if !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
        consumed += actual.len_utf8();
    }
    Some(consumed)
}

pub(crate) fn parse_pattern<'a>(rule: &Rule, regex: &Regex, input: Cursor<'a>) -> ParseResult<'a> {
    let Some(captures) = regex.captures(input.remaining()) else {
        return Err(input.fail(rule.expects()));
    };
    let groups: List<Value> = captures
        .iter()
        .map(|group| group.map_or(Value::Nil, |m| Value::from(m.as_str())))
        .collect();
    let length = captures.get(0).map_or(0, |m| m.end());
    Ok(Parsed::new(Value::List(groups), input.advance(length)))
}

pub(crate) fn parse_predicate<'a>(
    rule: &Rule,
    test: &CharTest,
    input: Cursor<'a>,
) -> ParseResult<'a> {
    match input.peek() {
        Some(c) if test.test(c) => Ok(Parsed::new(
            Value::from(c.to_string()),
            input.advance(c.len_utf8()),
        )),
        _ => Err(input.fail(rule.expects())),
    }
}

pub(crate) fn parse_end<'a>(rule: &Rule, input: Cursor<'a>) -> ParseResult<'a> {
    if input.is_empty() {
        Ok(Parsed::new(Value::Nil, input))
    } else {
        Err(input.fail(rule.expects()))
    }
}

pub(crate) fn parse_spaces(input: Cursor<'_>) -> Parsed<'_> {
    let text = input.remaining();
    let length = text.len() - text.trim_start().len();
    let (head, rest) = input.split(length);
    Parsed::new(Value::from(head.remaining()), rest)
}
