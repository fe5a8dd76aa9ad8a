//! The console REPL.
//!
//! Each entered line is one chat message. A line ending in `\` continues
//! the message on the next line, which is how multi-line grist changes are
//! typed.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use docbot_foundation::{Error, ErrorKind, Result};

use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::session::{Reply, Session, command_words};

/// The interactive REPL.
pub struct Repl<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// The bot being talked to.
    session: Session,

    /// Whether to show the welcome banner.
    show_banner: bool,

    /// Primary prompt.
    prompt: String,

    /// Continuation prompt (after a trailing `\`).
    continuation_prompt: String,
}

impl Repl<RustylineEditor> {
    /// Creates a REPL on the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new(session: Session) -> Result<Self> {
        let editor = RustylineEditor::new()?;
        Ok(Self::with_editor(editor, session))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a REPL reading from `editor`.
    pub fn with_editor(mut editor: E, session: Session) -> Self {
        editor.set_keywords(command_words());
        Self {
            editor,
            session,
            show_banner: true,
            prompt: "docbot> ".to_string(),
            continuation_prompt: "....... ".to_string(),
        }
    }

    /// Disables the welcome banner.
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Sets the primary prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Returns a reference to the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns a mutable reference to the session.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Runs the REPL loop until end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails fatally.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            self.print_banner();
        }

        loop {
            match self.read_eval_print() {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => print_error(&e.to_string()),
            }
        }

        println!("\nGoodbye!");
        Ok(())
    }

    /// Handles one message and prints the reply.
    pub fn eval(&mut self, input: &str) -> Reply {
        let reply = self.session.handle(input);
        print_reply(&reply);
        reply
    }

    /// Handles every message in a batch file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read.
    pub fn eval_file(&mut self, path: impl AsRef<Path>) -> Result<Vec<Reply>> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            Error::io(format!("failed to read file '{}': {e}", path.display()))
        })?;
        Ok(split_messages(&text)
            .iter()
            .map(|message| self.eval(message))
            .collect())
    }

    /// Executes one read-eval-print iteration.
    ///
    /// Returns `Ok(true)` to continue, `Ok(false)` to exit.
    fn read_eval_print(&mut self) -> Result<bool> {
        let Some(input) = self.read_input()? else {
            return Ok(false);
        };

        if input.trim().is_empty() {
            return Ok(true);
        }

        self.editor.add_history(&input);
        self.eval(&input);
        Ok(true)
    }

    /// Reads a message, following `\` continuations.
    fn read_input(&mut self) -> Result<Option<String>> {
        let mut input = String::new();
        let mut first_line = true;

        loop {
            let read = if first_line {
                self.editor.read_line(&self.prompt)?
            } else {
                self.editor.read_continuation(&self.continuation_prompt)?
            };

            match read {
                ReadResult::Line(line) => {
                    // rustyline keeps validated continuations inside one line
                    let line = line.replace("\\\n", "\n");
                    if let Some(head) = line.strip_suffix('\\') {
                        input.push_str(head);
                        input.push('\n');
                        first_line = false;
                    } else {
                        input.push_str(&line);
                        return Ok(Some(input));
                    }
                }
                ReadResult::Interrupted => {
                    if first_line {
                        println!();
                    } else {
                        println!("\nInput cancelled.");
                    }
                    return Ok(Some(String::new()));
                }
                ReadResult::Eof => {
                    if first_line {
                        return Ok(None);
                    }
                    return Err(Error::new(ErrorKind::Io(
                        "unexpected EOF in multi-line input".to_string(),
                    )));
                }
            }
        }
    }

    #[allow(clippy::unused_self)]
    fn print_banner(&self) {
        println!("\x1b[1;36m");
        println!("  ___           ___       _   ");
        println!(" |   \\ ___  __ | _ ) ___ | |_ ");
        println!(" | |) / _ \\/ _|| _ \\/ _ \\|  _|");
        println!(" |___/\\___/\\__||___/\\___/ \\__|");
        println!("\x1b[0m");
        println!("DocBot console v{}", env!("CARGO_PKG_VERSION"));
        println!("Type `help` for commands. End a line with \\ to continue it. Ctrl+D exits.\n");

        let _ = io::stdout().flush();
    }
}

/// Splits batch text into messages.
///
/// One message per line; a trailing `\` joins the next line with a newline.
/// Blank lines and lines starting with `#` are skipped between messages.
#[must_use]
pub fn split_messages(text: &str) -> Vec<String> {
    let mut messages = Vec::new();
    let mut current: Option<String> = None;

    for line in text.lines() {
        let continuing = current.is_some();
        if !continuing && (line.trim().is_empty() || line.trim_start().starts_with('#')) {
            continue;
        }

        let message = current.get_or_insert_with(String::new);
        if let Some(head) = line.strip_suffix('\\') {
            message.push_str(head);
            message.push('\n');
        } else {
            message.push_str(line);
            messages.extend(current.take());
        }
    }
    messages.extend(current);
    messages
}

fn print_reply(reply: &Reply) {
    match reply {
        Reply::Message(text) => println!("{text}"),
        Reply::Error(text) => print_error(text),
    }
}

fn print_error(text: &str) {
    eprintln!("\x1b[31m{text}\x1b[0m");
}
