//! Core types for DocBot.
//!
//! This crate provides:
//! - [`Value`] - Structured values produced by grammar rules
//! - [`Error`] and [`ParseFailure`] - Error types shared by every layer
//! - Persistent collections ([`List`], [`Fields`])

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collections;
pub mod error;
pub mod value;

pub use collections::{Fields, List};
pub use error::{Error, ErrorContext, ErrorKind, ParseFailure, Result};
pub use value::Value;
