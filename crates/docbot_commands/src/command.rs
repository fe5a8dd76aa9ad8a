//! The [`Command`] trait and the standard command table.

use std::sync::Arc;

use docbot_foundation::{Result, Value};
use docbot_grammar::{Dispatcher, Rule, Sequence, prefix_words};
use tracing::debug;

use crate::builtin::{AddDocument, Change, Help, ListDocuments, RemoveDocument, Roll, Show};
use crate::context::Context;

/// A chat command.
pub trait Command: Send + Sync {
    /// Short identifier used in logs and error context.
    fn name(&self) -> &'static str;

    /// Words that select this command, e.g. `["add", "document"]`.
    fn prefix(&self) -> &'static [&'static str];

    /// Grammar of the command's arguments.
    ///
    /// The default accepts no arguments.
    ///
    /// # Errors
    ///
    /// Returns a grammar error if the rule cannot be assembled.
    fn arguments(&self) -> Result<Rule> {
        Ok(Sequence::new().interleave_spaces().build())
    }

    /// Runs the command.
    ///
    /// # Errors
    ///
    /// Returns a domain error when the request cannot be carried out.
    fn execute(&self, args: &Value, context: &mut Context) -> Result<String>;

    /// Usage text shown by `help`.
    fn help(&self) -> &'static str;
}

/// The standard commands, in dispatch priority order.
#[must_use]
pub fn standard_commands() -> Vec<Arc<dyn Command>> {
    let rest: Vec<Arc<dyn Command>> = vec![
        Arc::new(AddDocument),
        Arc::new(RemoveDocument),
        Arc::new(ListDocuments),
        Arc::new(Show),
        Arc::new(Change),
        Arc::new(Roll),
    ];
    let help = Help::new(rest.iter().map(|command| command.help()));

    let mut commands: Vec<Arc<dyn Command>> = vec![Arc::new(help)];
    commands.extend(rest);
    commands
}

/// Adds `command` to `dispatcher`.
///
/// # Errors
///
/// Returns a grammar error if the command's argument rule cannot be built.
pub fn register(dispatcher: Dispatcher<Context>, command: Arc<dyn Command>) -> Result<Dispatcher<Context>> {
    let arguments = command.arguments()?;
    debug!(command = command.name(), "registering command");
    Ok(dispatcher.bind(
        command.name(),
        prefix_words(command.prefix()),
        arguments,
        move |args: Value, context: &mut Context| command.execute(&args, context),
    ))
}

/// A dispatcher with every standard command registered.
///
/// # Errors
///
/// Returns a grammar error if any argument rule cannot be built.
pub fn dispatcher() -> Result<Dispatcher<Context>> {
    standard_commands()
        .into_iter()
        .try_fold(Dispatcher::new(), register)
}
