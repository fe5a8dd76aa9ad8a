//! DocBot - Chat command bot built on a parser-combinator grammar
//!
//! This crate re-exports all layers of the DocBot system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: docbot_runtime    - Config, REPL, CLI, snapshots, logging
//! Layer 2: docbot_commands   - Command set, documents, sheets, dice
//! Layer 1: docbot_grammar    - Rules, combinators, transforms, dispatcher
//! Layer 0: docbot_foundation - Core types (Value, Error, ParseFailure)
//! ```

pub use docbot_commands as commands;
pub use docbot_foundation as foundation;
pub use docbot_grammar as grammar;
pub use docbot_runtime as runtime;
