//! Sequence, repetition and ordered-choice combinators.
//!
//! Each combinator has a small builder ([`Sequence`], [`Repeat`],
//! [`Choice`]) that accumulates members and finishes with `build()`.

use docbot_foundation::{Error, List, Result, Value};

use crate::cursor::Cursor;
use crate::rule::{ParseResult, Parsed, Rule, RuleKind};

/// Builder for a rule that matches its members in order.
///
/// The built rule produces a list of the values of its visible members.
/// With [`Sequence::interleave_spaces`] enabled, a hidden [`Rule::spaces`]
/// is appended after every member, so words may be separated by any
/// amount of whitespace.
#[derive(Clone, Debug, Default)]
pub struct Sequence {
    members: Vec<Rule>,
    interleave: bool,
}

impl Sequence {
    /// Creates an empty sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a member.
    #[must_use]
    pub fn with(mut self, rule: impl Into<Rule>) -> Self {
        self.members.push(rule.into());
        if self.interleave {
            self.members.push(Rule::spaces());
        }
        self
    }

    /// Appends a member whose value is dropped from the result.
    #[must_use]
    pub fn with_hidden(self, rule: impl Into<Rule>) -> Self {
        self.with(rule.into().hide())
    }

    /// Appends an explicit whitespace run.
    #[must_use]
    pub fn with_spaces(mut self) -> Self {
        self.members.push(Rule::spaces());
        self
    }

    /// Turns on automatic whitespace after each member.
    ///
    /// Also appends one whitespace run now unless the sequence already ends
    /// with one, so leading whitespace is skipped.
    #[must_use]
    pub fn interleave_spaces(mut self) -> Self {
        self.interleave = true;
        if !self.ends_with_spaces() {
            self.members.push(Rule::spaces());
        }
        self
    }

    /// Turns off automatic whitespace and drops a trailing whitespace run.
    #[must_use]
    pub fn no_interleave_spaces(mut self) -> Self {
        self.interleave = false;
        if self.ends_with_spaces() {
            self.members.pop();
        }
        self
    }

    fn ends_with_spaces(&self) -> bool {
        self.members
            .last()
            .is_some_and(|rule| matches!(rule.kind, RuleKind::Spaces))
    }

    /// Finishes the sequence.
    #[must_use]
    pub fn build(self) -> Rule {
        Rule::from_kind(RuleKind::Sequence(self.members))
    }
}

impl From<Sequence> for Rule {
    fn from(sequence: Sequence) -> Self {
        sequence.build()
    }
}

/// Builder for a rule that matches another rule repeatedly.
///
/// The built rule produces a list of every match. Matching stops at the
/// first failure, after `max` matches, or after a match that consumed
/// nothing.
#[derive(Clone, Debug)]
pub struct Repeat {
    rule: Rule,
    min: usize,
    max: Option<usize>,
}

impl Repeat {
    /// Repeats `rule` zero or more times.
    #[must_use]
    pub fn new(rule: impl Into<Rule>) -> Self {
        Self {
            rule: rule.into(),
            min: 0,
            max: None,
        }
    }

    /// Requires at least `min` matches.
    #[must_use]
    pub const fn at_least(mut self, min: usize) -> Self {
        self.min = min;
        self
    }

    /// Stops after `max` matches.
    #[must_use]
    pub const fn at_most(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    /// Finishes the repetition.
    #[must_use]
    pub fn build(self) -> Rule {
        Rule::from_kind(RuleKind::Repetition {
            rule: Box::new(self.rule),
            min: self.min,
            max: self.max,
        })
    }
}

impl From<Repeat> for Rule {
    fn from(repeat: Repeat) -> Self {
        repeat.build()
    }
}

/// Builder for an ordered choice between rules.
///
/// Candidates are tried in order against the same input; the first to
/// succeed wins and later ones are never tried.
#[derive(Clone, Debug, Default)]
pub struct Choice {
    candidates: Vec<Rule>,
}

impl Choice {
    /// Creates an empty choice.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a candidate.
    #[must_use]
    pub fn with(mut self, rule: impl Into<Rule>) -> Self {
        self.candidates.push(rule.into());
        self
    }

    /// Adds a candidate left out of the "one of" description.
    #[must_use]
    pub fn with_hidden(self, rule: impl Into<Rule>) -> Self {
        self.with(rule.into().hide())
    }

    /// Finishes the choice.
    ///
    /// # Errors
    ///
    /// Returns a grammar error if no candidates were added.
    pub fn build(self) -> Result<Rule> {
        if self.candidates.is_empty() {
            return Err(Error::grammar("alternation needs at least one candidate"));
        }
        Ok(Rule::from_kind(RuleKind::Alternation(self.candidates)))
    }
}

pub(crate) fn parse_sequence<'a>(members: &[Rule], input: Cursor<'a>) -> ParseResult<'a> {
    let mut values = Vec::with_capacity(members.len());
    let mut rest = input;
    for member in members {
        let parsed = member.parse(rest)?;
        if !member.hidden {
            values.push(parsed.value);
        }
        rest = parsed.rest;
    }
    Ok(Parsed::new(
        Value::List(values.into_iter().collect::<List<_>>()),
        rest,
    ))
}

pub(crate) fn parse_repetition<'a>(
    this: &Rule,
    rule: &Rule,
    min: usize,
    max: Option<usize>,
    input: Cursor<'a>,
) -> ParseResult<'a> {
    let mut values = Vec::new();
    let mut rest = input;
    while max.is_none_or(|max| values.len() < max) {
        let Ok(parsed) = rule.parse(rest) else {
            break;
        };
        let advanced = parsed.rest.offset() != rest.offset();
        values.push(parsed.value);
        rest = parsed.rest;
        if !advanced {
            break;
        }
    }
    if values.len() < min {
        let expected = this.expectation.clone().unwrap_or_else(|| rule.expects());
        return Err(rest.fail(expected));
    }
    Ok(Parsed::new(
        Value::List(values.into_iter().collect::<List<_>>()),
        rest,
    ))
}

pub(crate) fn parse_alternation<'a>(
    this: &Rule,
    candidates: &[Rule],
    input: Cursor<'a>,
) -> ParseResult<'a> {
    for candidate in candidates {
        if let Ok(parsed) = candidate.parse(input) {
            return Ok(parsed);
        }
    }
    Err(input.fail(this.expects()))
}
