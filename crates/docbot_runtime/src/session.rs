//! A running bot: command context plus dispatcher.
//!
//! [`Session::handle`] is the whole message loop body. It takes one chat
//! message and produces the reply text, rendering failures the way users
//! see them.

use std::fmt;

use docbot_commands::{Context, DocumentStore, MemorySheets, SheetBackend, standard_commands};
use docbot_foundation::{Error, ErrorKind, Result};
use docbot_grammar::{Dispatcher, Rule};
use tracing::{info, warn};

use crate::config::Config;
use crate::serialize::SnapshotSheets;

/// What the bot says back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    /// The command ran.
    Message(String),
    /// The command was not understood or failed.
    Error(String),
}

impl Reply {
    /// Renders an error the way it is shown in chat.
    #[must_use]
    pub fn from_error(error: &Error) -> Self {
        match error.kind {
            ErrorKind::UnknownCommand => Self::Error("Unknown command".to_string()),
            _ => Self::Error(format!("Error: {error}")),
        }
    }

    /// The reply text.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Message(text) | Self::Error(text) => text,
        }
    }

    /// Returns true for failures.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Command context and dispatcher for one bot.
pub struct Session {
    context: Context,
    dispatcher: Dispatcher<Context>,
    handled: usize,
}

impl Session {
    /// Creates a session over `context` with the standard commands and no
    /// addressing token.
    ///
    /// # Errors
    ///
    /// Returns a grammar error if a command grammar cannot be built.
    pub fn new(context: Context) -> Result<Self> {
        Ok(Self {
            context,
            dispatcher: docbot_commands::dispatcher()?,
            handled: 0,
        })
    }

    /// Builds a session from configuration: opens the document registry and
    /// the sheet snapshot, and compiles the addressing pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be opened or the addressing
    /// pattern is not a valid regular expression.
    pub fn from_config(config: &Config) -> Result<Self> {
        let documents = DocumentStore::open(&config.documents);
        let sheets: Box<dyn SheetBackend> = match &config.sheets {
            Some(path) => Box::new(SnapshotSheets::open(path)?),
            None => Box::new(MemorySheets::new()),
        };
        info!(
            documents = documents.len(),
            persistent = config.sheets.is_some(),
            "session starting"
        );

        let context = Context::new(documents, sheets, config.docmap.clone(), config.seed);
        let mut dispatcher = docbot_commands::dispatcher()?;
        if let Some(address) = &config.address {
            dispatcher = dispatcher.with_address(address_rule(address)?);
        }
        Ok(Self {
            context,
            dispatcher,
            handled: 0,
        })
    }

    /// Runs one message and returns the reply.
    pub fn handle(&mut self, input: &str) -> Reply {
        self.handled += 1;
        match self.execute(input) {
            Ok(text) => Reply::Message(text),
            Err(error) => {
                let command = error.context.as_ref().and_then(|c| c.command.as_deref());
                warn!(command, error = %error, "command failed");
                Reply::from_error(&error)
            }
        }
    }

    /// Runs one message, returning the raw result.
    ///
    /// # Errors
    ///
    /// Returns the dispatcher's or the handler's error.
    pub fn execute(&mut self, input: &str) -> Result<String> {
        self.dispatcher.dispatch(input, &mut self.context)
    }

    /// The command context.
    #[must_use]
    pub const fn context(&self) -> &Context {
        &self.context
    }

    /// The command context, mutably.
    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    /// The dispatcher.
    #[must_use]
    pub const fn dispatcher(&self) -> &Dispatcher<Context> {
        &self.dispatcher
    }

    /// Number of messages handled so far.
    #[must_use]
    pub const fn handled(&self) -> usize {
        self.handled
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("context", &self.context)
            .field("commands", &self.dispatcher.len())
            .field("handled", &self.handled)
            .finish()
    }
}

/// Rule for the addressing token, including the spaces after it.
///
/// # Errors
///
/// Returns a grammar error if `pattern` is not a valid regular expression.
pub fn address_rule(pattern: &str) -> Result<Rule> {
    Ok(Rule::pattern(&format!(r"(?:{pattern})\s*"))?.expect_hint("an address"))
}

/// Every word that starts a command, for completion.
#[must_use]
pub fn command_words() -> Vec<String> {
    let mut words: Vec<String> = standard_commands()
        .iter()
        .flat_map(|command| command.prefix().iter().map(ToString::to_string))
        .collect();
    words.sort();
    words.dedup();
    words
}
