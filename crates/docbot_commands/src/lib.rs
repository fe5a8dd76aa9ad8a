//! The DocBot command set.
//!
//! Each command supplies its prefix words, an argument grammar built from
//! [`docbot_grammar`] rules, a handler and a usage line. [`dispatcher`]
//! registers them all, in priority order, into a
//! [`Dispatcher<Context>`](docbot_grammar::Dispatcher).
//!
//! # Modules
//!
//! - [`command`] - The [`Command`] trait and registration
//! - [`builtin`] - help, documents, show, change and roll
//! - [`grammar`] - Argument rules shared between commands
//! - [`context`] - State handed to handlers
//! - [`documents`] - Character name to document id registry
//! - [`sheets`] - Cell storage backends
//! - [`layout`] - Where each field lives on a sheet
//! - [`requests`] - Field, trait and grist reads and writes
//! - [`dice`] - Dice rolling and rendering

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod builtin;
pub mod command;
pub mod context;
pub mod dice;
pub mod documents;
pub mod grammar;
pub mod layout;
pub mod requests;
pub mod sheets;

pub use command::{Command, dispatcher, register, standard_commands};
pub use context::Context;
pub use dice::{DiceRoll, RollOutcome, TOTAL_TOO_LARGE};
pub use documents::DocumentStore;
pub use layout::{DocMap, SheetMap, TraitMap};
pub use requests::SheetAccess;
pub use sheets::{MISSING_CELL, MemorySheets, SheetBackend};
