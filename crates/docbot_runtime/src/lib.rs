//! Configuration, sessions, REPL, and CLI for DocBot.
//!
//! This crate provides:
//! - [`Config`] - JSON configuration with `CONFIG` environment fallback
//! - [`Session`] - A context and dispatcher that turn messages into replies
//! - [`Repl`] - Interactive console standing in for a chat channel
//! - [`serialize`] - `MessagePack` snapshots of sheet storage
//! - [`logging`] - `tracing` subscriber setup

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod editor;
pub mod highlight;
pub mod logging;
pub mod repl;
pub mod serialize;
pub mod session;

pub use config::Config;
pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use repl::Repl;
pub use serialize::SnapshotSheets;
pub use session::{Reply, Session};
