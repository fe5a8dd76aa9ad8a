//! The [`Rule`] type and its parse entry point.
//!
//! Every grammar rule is a value of one closed enum, [`RuleKind`]. Leaf
//! kinds live in [`crate::primitive`], combinators in [`crate::combinator`]
//! and value rewriting in [`crate::transform`]; this module ties them
//! together with a single `match`.

use std::fmt;
use std::sync::Arc;

use docbot_foundation::{ParseFailure, Value};
use regex::Regex;

use crate::cursor::Cursor;
use crate::{combinator, primitive, transform};

/// Outcome of running a rule.
pub type ParseResult<'a> = std::result::Result<Parsed<'a>, ParseFailure>;

/// A successful match: the produced value and the unconsumed input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parsed<'a> {
    /// Value produced by the rule.
    pub value: Value,
    /// Cursor just past the consumed input.
    pub rest: Cursor<'a>,
}

impl<'a> Parsed<'a> {
    /// Creates a new parse result.
    #[must_use]
    pub const fn new(value: Value, rest: Cursor<'a>) -> Self {
        Self { value, rest }
    }
}

/// Single-character test used by [`RuleKind::Predicate`].
#[derive(Clone)]
pub struct CharTest(pub(crate) Arc<dyn Fn(char) -> bool + Send + Sync>);

impl CharTest {
    /// Runs the test.
    #[must_use]
    pub fn test(&self, c: char) -> bool {
        (self.0)(c)
    }
}

impl fmt::Debug for CharTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CharTest(..)")
    }
}

/// Value rewrite used by [`RuleKind::Transform`].
#[derive(Clone)]
pub struct ValueMap(pub(crate) Arc<dyn Fn(Value) -> Value + Send + Sync>);

impl ValueMap {
    /// Applies the rewrite.
    #[must_use]
    pub fn apply(&self, value: Value) -> Value {
        (self.0)(value)
    }
}

impl fmt::Debug for ValueMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ValueMap(..)")
    }
}

/// The closed set of rule shapes.
#[derive(Clone, Debug)]
pub enum RuleKind {
    /// Exact text, optionally compared case-insensitively.
    Literal {
        /// Text to match.
        word: String,
        /// Compare with Unicode lowercasing.
        ignore_case: bool,
    },
    /// Regular expression anchored at the cursor.
    Pattern {
        /// Pattern as written by the grammar author.
        source: String,
        /// Compiled, anchored form.
        regex: Regex,
    },
    /// One character satisfying a test.
    Predicate(CharTest),
    /// Succeeds only when no input remains.
    EndOfInput,
    /// Zero or more whitespace characters.
    Spaces,
    /// Members matched one after another.
    Sequence(Vec<Rule>),
    /// A sub-rule matched between `min` and `max` times.
    Repetition {
        /// The repeated rule.
        rule: Box<Rule>,
        /// Fewest matches that count as success.
        min: usize,
        /// Most matches attempted, unbounded if `None`.
        max: Option<usize>,
    },
    /// Ordered choice; the first matching candidate wins.
    Alternation(Vec<Rule>),
    /// A rule whose value is rewritten on success.
    Transform {
        /// The wrapped rule.
        rule: Box<Rule>,
        /// The rewrite.
        map: ValueMap,
    },
}

/// A grammar rule.
///
/// Rules are immutable once built and can be shared freely; every
/// configuration method consumes the rule and returns the adjusted one.
#[derive(Clone, Debug)]
pub struct Rule {
    pub(crate) kind: RuleKind,
    pub(crate) expectation: Option<String>,
    pub(crate) hidden: bool,
}

impl Rule {
    pub(crate) const fn from_kind(kind: RuleKind) -> Self {
        Self {
            kind,
            expectation: None,
            hidden: false,
        }
    }

    /// Returns the shape of this rule.
    #[must_use]
    pub const fn kind(&self) -> &RuleKind {
        &self.kind
    }

    /// Returns true if the rule's value is dropped by an enclosing sequence
    /// and its description left out of enclosing expectation texts.
    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Replaces the expectation text reported when this rule fails.
    #[must_use]
    pub fn expect_hint(mut self, text: impl Into<String>) -> Self {
        self.expectation = Some(text.into());
        self
    }

    /// Marks this rule hidden.
    #[must_use]
    pub fn hide(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Describes what this rule expects to see.
    ///
    /// An override set with [`Rule::expect_hint`] wins; otherwise the text is
    /// derived from the rule's shape.
    #[must_use]
    pub fn expects(&self) -> String {
        if let Some(text) = &self.expectation {
            return text.clone();
        }
        match &self.kind {
            RuleKind::Literal { word, .. } => format!("'{word}'"),
            RuleKind::Pattern { source, .. } => format!("pattern {source}"),
            RuleKind::Predicate(_) => "character matching a predicate".to_string(),
            RuleKind::EndOfInput => "end of input".to_string(),
            RuleKind::Spaces => "spaces".to_string(),
            RuleKind::Sequence(members) => {
                format!("chain [{}]", visible_expectations(members, ", "))
            }
            RuleKind::Repetition { rule, min, max } => {
                if rule.hidden {
                    return String::new();
                }
                let upper = max.map(|m| format!("and at most {m} ")).unwrap_or_default();
                format!("at least {min} {upper}{}", rule.expects())
            }
            RuleKind::Alternation(candidates) => {
                format!("one of ({})", visible_expectations(candidates, " | "))
            }
            RuleKind::Transform { rule, .. } => rule.expects(),
        }
    }

    /// Matches this rule at `input`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseFailure`] describing the furthest position this rule
    /// reached and what it expected there.
    pub fn parse<'a>(&self, input: Cursor<'a>) -> ParseResult<'a> {
        match &self.kind {
            RuleKind::Literal { word, ignore_case } => {
                primitive::parse_literal(self, word, *ignore_case, input)
            }
            RuleKind::Pattern { regex, .. } => primitive::parse_pattern(self, regex, input),
            RuleKind::Predicate(test) => primitive::parse_predicate(self, test, input),
            RuleKind::EndOfInput => primitive::parse_end(self, input),
            RuleKind::Spaces => Ok(primitive::parse_spaces(input)),
            RuleKind::Sequence(members) => combinator::parse_sequence(members, input),
            RuleKind::Repetition { rule, min, max } => {
                combinator::parse_repetition(self, rule, *min, *max, input)
            }
            RuleKind::Alternation(candidates) => {
                combinator::parse_alternation(self, candidates, input)
            }
            RuleKind::Transform { rule, map } => transform::parse_transform(rule, map, input),
        }
    }

    /// Matches this rule at the start of `input`.
    ///
    /// # Errors
    ///
    /// See [`Rule::parse`].
    pub fn parse_str<'a>(&self, input: &'a str) -> ParseResult<'a> {
        self.parse(Cursor::new(input))
    }

    /// Short name of the rule's shape, for diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match &self.kind {
            RuleKind::Literal { .. } => "literal",
            RuleKind::Pattern { .. } => "pattern",
            RuleKind::Predicate(_) => "predicate",
            RuleKind::EndOfInput => "end of input",
            RuleKind::Spaces => "spaces",
            RuleKind::Sequence(_) => "sequence",
            RuleKind::Repetition { .. } => "repetition",
            RuleKind::Alternation(_) => "alternation",
            RuleKind::Transform { .. } => "transform",
        }
    }
}

impl From<&str> for Rule {
    fn from(word: &str) -> Self {
        Self::literal(word)
    }
}

fn visible_expectations(rules: &[Rule], separator: &str) -> String {
    rules
        .iter()
        .filter(|rule| !rule.hidden)
        .map(Rule::expects)
        .collect::<Vec<_>>()
        .join(separator)
}
