//! Value rewriting: `map`, `named`, `branch`, `opt` and `pluck`.
//!
//! A transform never changes what a rule consumes or where it fails, only
//! the value it produces on success.

use std::collections::HashSet;
use std::sync::Arc;

use docbot_foundation::{Error, Fields, Result, Value};

use crate::combinator::Repeat;
use crate::cursor::Cursor;
use crate::rule::{ParseResult, Parsed, Rule, RuleKind, ValueMap};

impl Rule {
    /// Rewrites this rule's value with `f` on success.
    #[must_use]
    pub fn map(self, f: impl Fn(Value) -> Value + Send + Sync + 'static) -> Self {
        Self::from_kind(RuleKind::Transform {
            rule: Box::new(self),
            map: ValueMap(Arc::new(f)),
        })
    }

    /// Turns a sequence's list result into a record.
    ///
    /// The `i`-th name is bound to the `i`-th visible member.
    ///
    /// # Errors
    ///
    /// Returns a grammar error if this rule is not a sequence, if the number
    /// of names differs from the number of visible members, or if a name is
    /// repeated.
    pub fn named(self, names: &[&str]) -> Result<Self> {
        let RuleKind::Sequence(members) = &self.kind else {
            return Err(Error::grammar(format!(
                "named {names:?} applied to a {}, expected a sequence",
                self.kind_name()
            )));
        };
        let visible = members.iter().filter(|member| !member.hidden).count();
        if visible != names.len() {
            return Err(Error::grammar(format!(
                "named {names:?} has {} names for {visible} visible members",
                names.len()
            )));
        }
        let mut seen = HashSet::new();
        if let Some(duplicate) = names.iter().find(|name| !seen.insert(**name)) {
            return Err(Error::grammar(format!("duplicate field name {duplicate}")));
        }

        let names: Arc<[Arc<str>]> = names.iter().map(|name| Arc::from(*name)).collect();
        Ok(self.map(move |value| {
            let fields: Fields<Value> = value
                .as_list()
                .map(|items| names.iter().cloned().zip(items.iter().cloned()).collect())
                .unwrap_or_default();
            Value::Record(fields)
        }))
    }

    /// Tags this rule's value with the name of the branch that produced it.
    #[must_use]
    pub fn branch(self, tag: &str) -> Self {
        let tag: Arc<str> = Arc::from(tag);
        self.map(move |value| Value::branch(Arc::clone(&tag), value))
    }

    /// Matches this rule zero or one time.
    ///
    /// Produces the rule's value, or [`Value::Nil`] when it did not match.
    #[must_use]
    pub fn opt(self) -> Self {
        Repeat::new(self).at_most(1).build().pluck(0)
    }

    /// Replaces a list result with its element at `index`, or
    /// [`Value::Nil`] if there is none.
    #[must_use]
    pub fn pluck(self, index: usize) -> Self {
        self.map(move |value| value.index(index).cloned().unwrap_or(Value::Nil))
    }
}

pub(crate) fn parse_transform<'a>(rule: &Rule, map: &ValueMap, input: Cursor<'a>) -> ParseResult<'a> {
    let parsed = rule.parse(input)?;
    Ok(Parsed::new(map.apply(parsed.value), parsed.rest))
}
