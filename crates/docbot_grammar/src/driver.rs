//! Command dispatch on top of grammar rules.
//!
//! A [`Dispatcher`] owns an ordered list of command bindings. Each binding
//! has a prefix rule that selects the command and an argument rule whose
//! value is handed to the handler. Prefixes are tried in registration
//! order; the first that matches commits to that command.

use std::fmt;

use docbot_foundation::{Error, ErrorContext, Result, Value};
use tracing::{debug, trace};

use crate::combinator::Sequence;
use crate::cursor::Cursor;
use crate::primitive::parse_spaces;
use crate::rule::Rule;

/// Callback invoked with a command's parsed arguments.
pub type Handler<C> = Box<dyn Fn(Value, &mut C) -> Result<String> + Send + Sync>;

/// One registered command.
pub struct CommandBinding<C> {
    name: String,
    prefix: Rule,
    arguments: Rule,
    handler: Handler<C>,
}

impl<C> CommandBinding<C> {
    /// The command's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The rule that selects this command.
    #[must_use]
    pub const fn prefix(&self) -> &Rule {
        &self.prefix
    }

    /// The rule that parses this command's arguments.
    #[must_use]
    pub const fn arguments(&self) -> &Rule {
        &self.arguments
    }
}

impl<C> fmt::Debug for CommandBinding<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandBinding")
            .field("name", &self.name)
            .field("prefix", &self.prefix.expects())
            .finish_non_exhaustive()
    }
}

/// A command selected and parsed, but not yet executed.
pub struct Matched<'d, C> {
    /// The selected binding.
    pub binding: &'d CommandBinding<C>,
    /// The parsed argument value.
    pub arguments: Value,
}

impl<C> fmt::Debug for Matched<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matched")
            .field("binding", &self.binding.name)
            .field("arguments", &self.arguments)
            .finish()
    }
}

/// Routes raw input to command handlers.
pub struct Dispatcher<C> {
    address: Option<Rule>,
    bindings: Vec<CommandBinding<C>>,
}

impl<C> Default for Dispatcher<C> {
    fn default() -> Self {
        Self {
            address: None,
            bindings: Vec::new(),
        }
    }
}

impl<C> fmt::Debug for Dispatcher<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("address", &self.address.as_ref().map(Rule::expects))
            .field("bindings", &self.bindings)
            .finish()
    }
}

impl<C> Dispatcher<C> {
    /// Creates a dispatcher with no commands.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a rule matched and discarded before any command prefix.
    ///
    /// Input that does not start with the address is dispatched unchanged.
    #[must_use]
    pub fn with_address(mut self, address: Rule) -> Self {
        self.address = Some(address);
        self
    }

    /// Registers a command.
    #[must_use]
    pub fn bind<F>(mut self, name: impl Into<String>, prefix: Rule, arguments: Rule, handler: F) -> Self
    where
        F: Fn(Value, &mut C) -> Result<String> + Send + Sync + 'static,
    {
        self.bindings.push(CommandBinding {
            name: name.into(),
            prefix,
            arguments,
            handler: Box::new(handler),
        });
        self
    }

    /// Registered commands in priority order.
    pub fn bindings(&self) -> impl Iterator<Item = &CommandBinding<C>> {
        self.bindings.iter()
    }

    /// Number of registered commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns true if no commands are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    fn strip_address<'a>(&self, input: &'a str) -> Cursor<'a> {
        let cursor = Cursor::new(input);
        self.address
            .as_ref()
            .and_then(|address| address.parse(cursor).ok())
            .map_or(cursor, |parsed| parsed.rest)
    }

    /// Selects the command for `input` and parses its arguments.
    ///
    /// The argument rule must consume the whole remaining input, apart from
    /// trailing whitespace.
    ///
    /// # Errors
    ///
    /// Returns an unknown-command error if no prefix matches, or a parse
    /// error (with the command name and input attached as context) if the
    /// arguments do not.
    pub fn resolve<'d>(&'d self, input: &str) -> Result<Matched<'d, C>> {
        let cursor = self.strip_address(input);
        for binding in &self.bindings {
            let Ok(prefix) = binding.prefix.parse(cursor) else {
                continue;
            };
            debug!(command = %binding.name, "prefix matched");

            let context = || {
                ErrorContext::new()
                    .with_command(binding.name.clone())
                    .with_input(input)
            };
            let parsed = binding
                .arguments
                .parse(prefix.rest)
                .map_err(|failure| Error::from(failure).with_context(context()))?;
            let rest = parse_spaces(parsed.rest).rest;
            if !rest.is_empty() {
                let failure = rest.fail("end of input");
                return Err(Error::from(failure).with_context(context()));
            }
            trace!(command = %binding.name, arguments = %parsed.value, "arguments parsed");
            return Ok(Matched {
                binding,
                arguments: parsed.value,
            });
        }
        debug!(input, "no command prefix matched");
        Err(Error::unknown_command())
    }

    /// Parses `input` and runs the selected command's handler.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Dispatcher::resolve`], or whatever the
    /// handler returns, unchanged.
    pub fn dispatch(&self, input: &str, context: &mut C) -> Result<String> {
        let matched = self.resolve(input)?;
        (matched.binding.handler)(matched.arguments, context)
    }
}

/// Builds a prefix rule from command words separated by whitespace.
///
/// Leading and trailing whitespace is consumed too.
#[must_use]
pub fn prefix_words(words: &[&str]) -> Rule {
    words
        .iter()
        .fold(Sequence::new().interleave_spaces(), |sequence, word| {
            sequence.with(*word)
        })
        .build()
}
