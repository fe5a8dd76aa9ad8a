//! Backtracking parser-combinator grammar for chat commands.
//!
//! Grammars are trees of [`Rule`] values. A rule is matched against a
//! [`Cursor`] and either produces a [`Value`](docbot_foundation::Value)
//! plus the unconsumed input, or a
//! [`ParseFailure`](docbot_foundation::ParseFailure) naming the offset and
//! what was expected there.
//!
//! # Architecture
//!
//! ```text
//! "roll 2d8 - 1"
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ ADDRESS         │  → optional mention stripped
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ PREFIX          │  → first matching command prefix ("roll")
//! │ SELECTION       │
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ ARGUMENT        │  → custom({num: 2, size: 8, mods: [{mod: 1, op: -}]})
//! │ GRAMMAR         │
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ HANDLER         │  → reply text
//! └─────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`cursor`] - Position in the input
//! - [`rule`] - The rule type and its single parse entry point
//! - [`primitive`] - Literals, patterns, predicates, end of input, spaces
//! - [`combinator`] - Sequences, repetitions, ordered choice
//! - [`transform`] - Value rewriting (`map`, `named`, `branch`, `opt`)
//! - [`driver`] - Prefix-based command dispatch
//!
//! # Example
//!
//! ```
//! use docbot_grammar::{Choice, Rule, Sequence};
//!
//! let op = Choice::new().with("add").with("sub").build().unwrap();
//! let change = Sequence::new()
//!     .interleave_spaces()
//!     .with(Rule::token("[a-z]+").unwrap())
//!     .with(op)
//!     .build()
//!     .named(&["type", "op"])
//!     .unwrap();
//!
//! let parsed = change.parse_str("build add").unwrap();
//! assert_eq!(parsed.value.field("op").and_then(|v| v.as_str()), Some("add"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod combinator;
pub mod cursor;
pub mod driver;
pub mod primitive;
pub mod rule;
pub mod transform;

pub use combinator::{Choice, Repeat, Sequence};
pub use cursor::Cursor;
pub use driver::{CommandBinding, Dispatcher, Handler, Matched, prefix_words};
pub use rule::{CharTest, ParseResult, Parsed, Rule, RuleKind, ValueMap};
