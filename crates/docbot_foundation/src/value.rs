//! Structured values produced by grammar rules.

use std::fmt;
use std::sync::Arc;

use crate::collections::{Fields, List};

/// A structured parse result.
///
/// Leaf rules produce strings, combinators produce lists, named bindings
/// produce records and branch tags produce [`Value::Branch`]. Values are
/// immutable and cheap to clone.
#[derive(Clone, PartialEq, Eq)]
pub enum Value {
    /// Absence of a value (an optional that matched nothing).
    Nil,
    /// 64-bit signed integer.
    Int(i64),
    /// Text, usually a slice of the input.
    Str(Arc<str>),
    /// Ordered sequence of values.
    List(List<Value>),
    /// Field name to value mapping.
    Record(Fields<Value>),
    /// A value labelled with the grammar branch that produced it.
    Branch {
        /// Label identifying the matched alternative.
        tag: Arc<str>,
        /// The wrapped result.
        value: Arc<Value>,
    },
}

impl Value {
    /// Wraps a value in a branch tag.
    #[must_use]
    pub fn branch(tag: impl Into<Arc<str>>, value: Value) -> Self {
        Self::Branch {
            tag: tag.into(),
            value: Arc::new(value),
        }
    }

    /// Returns true if this value is nil.
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Attempts to extract an integer.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a string slice.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to extract a list.
    #[must_use]
    pub const fn as_list(&self) -> Option<&List<Value>> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Attempts to extract a record.
    #[must_use]
    pub const fn as_record(&self) -> Option<&Fields<Value>> {
        match self {
            Self::Record(fields) => Some(fields),
            _ => None,
        }
    }

    /// Attempts to extract a branch as `(tag, value)`.
    #[must_use]
    pub fn as_branch(&self) -> Option<(&str, &Value)> {
        match self {
            Self::Branch { tag, value } => Some((tag, value)),
            _ => None,
        }
    }

    /// Looks up a field of a record. Returns `None` for non-records.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.as_record().and_then(|fields| fields.get(name))
    }

    /// Returns the element at `index` of a list. Returns `None` for non-lists.
    #[must_use]
    pub fn index(&self, index: usize) -> Option<&Value> {
        self.as_list().and_then(|items| items.get(index))
    }

    /// Short description of the variant, for error messages.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Int(_) => "integer",
            Self::Str(_) => "string",
            Self::List(_) => "list",
            Self::Record(_) => "record",
            Self::Branch { .. } => "branch",
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::List(items) => write!(f, "{items:?}"),
            Self::Record(fields) => write!(f, "{fields:?}"),
            Self::Branch { tag, value } => write!(f, "<{tag}> {value:?}"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Record(fields) => {
                write!(f, "{{")?;
                for (i, (name, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{name}: {value}")?;
                }
                write!(f, "}}")
            }
            Self::Branch { tag, value } => write!(f, "{tag}({value})"),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s.into())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Nil, Into::into)
    }
}

impl From<Fields<Value>> for Value {
    fn from(fields: Fields<Value>) -> Self {
        Self::Record(fields)
    }
}
