//! Console input for the DocBot REPL.
//!
//! The REPL talks to a [`LineEditor`] so tests can script input; the real
//! terminal uses [`RustylineEditor`].

use std::borrow::Cow;

use docbot_foundation::{Error, ErrorKind, Result};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::hint::HistoryHinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::{Completer, Config, Context, Editor, Helper, Hinter, Validator as RLValidator};

use crate::highlight::DocbotHighlighter;

/// One read from the console.
#[derive(Debug)]
pub enum ReadResult {
    /// A line of message text.
    Line(String),
    /// User pressed Ctrl+C.
    Interrupted,
    /// Ctrl+D, or the input ran out.
    Eof,
}

/// Source of console input.
pub trait LineEditor {
    /// Reads the first line of a message.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the console cannot be read.
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult>;

    /// Reads the next line of a message continued with a trailing `\`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the console cannot be read.
    fn read_continuation(&mut self, prompt: &str) -> Result<ReadResult> {
        self.read_line(prompt)
    }

    /// Records a handled message.
    fn add_history(&mut self, line: &str);

    /// Set the words offered for completion.
    fn set_keywords(&mut self, keywords: Vec<String>);
}

#[derive(Helper, Completer, Hinter, RLValidator)]
struct DocbotHelper {
    #[rustyline(Completer)]
    completer: CommandCompleter,
    #[rustyline(Hinter)]
    hinter: HistoryHinter,
    #[rustyline(Validator)]
    validator: ContinuationValidator,
    highlighter: DocbotHighlighter,
}

impl Highlighter for DocbotHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        self.highlighter.highlight(line)
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        if default {
            Cow::Owned(format!("\x1b[1;32m{prompt}\x1b[0m"))
        } else {
            Cow::Borrowed(prompt)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(format!("\x1b[2m{hint}\x1b[0m"))
    }
}

/// Completes command words.
#[derive(Default)]
struct CommandCompleter {
    keywords: Vec<String>,
}

impl Completer for CommandCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let start = line[..pos]
            .rfind(char::is_whitespace)
            .map_or(0, |i| i + 1);
        let word = &line[start..pos];

        let candidates = self
            .keywords
            .iter()
            .filter(|kw| kw.starts_with(word))
            .map(|kw| Pair {
                display: kw.clone(),
                replacement: kw.clone(),
            })
            .collect();

        Ok((start, candidates))
    }
}

/// A trailing `\` continues the message on the next line.
#[derive(Default)]
struct ContinuationValidator;

impl Validator for ContinuationValidator {
    fn validate(&self, ctx: &mut ValidationContext<'_>) -> rustyline::Result<ValidationResult> {
        if ctx.input().ends_with('\\') {
            Ok(ValidationResult::Incomplete)
        } else {
            Ok(ValidationResult::Valid(None))
        }
    }
}

/// Terminal console backed by rustyline.
pub struct RustylineEditor {
    editor: Editor<DocbotHelper, DefaultHistory>,
}

impl RustylineEditor {
    /// Opens the terminal console with completion, hints and highlighting.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the terminal cannot be set up.
    pub fn new() -> Result<Self> {
        let config = Config::builder()
            .auto_add_history(false)
            .max_history_size(1000)
            .map_err(|e| Error::new(ErrorKind::Internal(e.to_string())))?
            .build();

        let helper = DocbotHelper {
            completer: CommandCompleter::default(),
            hinter: HistoryHinter::new(),
            validator: ContinuationValidator,
            highlighter: DocbotHighlighter::default(),
        };

        let mut editor = Editor::with_config(config)
            .map_err(|e| Error::new(ErrorKind::Internal(e.to_string())))?;
        editor.set_helper(Some(helper));

        Ok(Self { editor })
    }
}

impl LineEditor for RustylineEditor {
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadResult::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadResult::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadResult::Eof),
            Err(e) => Err(Error::io(e.to_string())),
        }
    }

    fn add_history(&mut self, line: &str) {
        let _ = self.editor.add_history_entry(line);
    }

    fn set_keywords(&mut self, keywords: Vec<String>) {
        if let Some(helper) = self.editor.helper_mut() {
            helper.highlighter.set_commands(keywords.clone());
            helper.completer.keywords = keywords;
        }
    }
}
