//! Error types for DocBot.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

/// The main error type for DocBot operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a business-rule violation raised by a command handler.
    #[must_use]
    pub fn domain(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Domain(message.into()))
    }

    /// Creates a grammar construction error.
    #[must_use]
    pub fn grammar(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Grammar(message.into()))
    }

    /// Creates an "unknown command" error.
    #[must_use]
    pub fn unknown_command() -> Self {
        Self::new(ErrorKind::UnknownCommand)
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config(message.into()))
    }

    /// Creates an I/O error.
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io(message.into()))
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Serialization(message.into()))
    }

    /// Returns the parse failure, if this error is one.
    #[must_use]
    pub const fn as_parse_failure(&self) -> Option<&ParseFailure> {
        match &self.kind {
            ErrorKind::Parse(failure) => Some(failure),
            _ => None,
        }
    }

    /// Returns true if this error was raised by a command handler.
    #[must_use]
    pub const fn is_domain(&self) -> bool {
        matches!(self.kind, ErrorKind::Domain(_))
    }
}

impl From<ParseFailure> for Error {
    fn from(failure: ParseFailure) -> Self {
        Self::new(ErrorKind::Parse(failure))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Input did not match the grammar.
    #[error("{0}")]
    Parse(ParseFailure),

    /// No command prefix matched the input.
    #[error("Unknown command")]
    UnknownCommand,

    /// A grammar was assembled incorrectly.
    #[error("grammar error: {0}")]
    Grammar(String),

    /// A command handler rejected the request.
    #[error("{0}")]
    Domain(String),

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),

    /// File system failure.
    #[error("io error: {0}")]
    Io(String),

    /// Snapshot or registry encoding failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A grammar failed to match.
///
/// Carries the byte offset where matching stopped, a description of what
/// was expected there and the character actually found (`None` at end of
/// input). Renders as `at <offset> expected <expectation> got <char>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    /// Byte offset into the original input.
    pub offset: usize,
    /// Human-readable description of what would have matched.
    pub expected: String,
    /// The next character, or `None` at end of input.
    pub got: Option<char>,
}

impl ParseFailure {
    /// Creates a new parse failure.
    #[must_use]
    pub fn new(offset: usize, expected: impl Into<String>, got: Option<char>) -> Self {
        Self {
            offset,
            expected: expected.into(),
            got,
        }
    }
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at {} expected {} got ", self.offset, self.expected)?;
        match self.got {
            Some(c) => write!(f, "{c}"),
            None => write!(f, "end of input"),
        }
    }
}

impl std::error::Error for ParseFailure {}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Name of the command being handled.
    pub command: Option<String>,
    /// The raw input being handled.
    pub input: Option<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the command name.
    #[must_use]
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Sets the raw input.
    #[must_use]
    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(command) = &self.command {
            write!(f, "in command {command}")?;
        }
        if let Some(input) = &self.input {
            if self.command.is_some() {
                write!(f, " ")?;
            }
            write!(f, "for input {input:?}")?;
        }
        Ok(())
    }
}

/// Result type alias using DocBot's error type.
pub type Result<T> = std::result::Result<T, Error>;
