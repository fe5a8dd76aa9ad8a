//! Input highlighting for the REPL.

use std::borrow::Cow;

const RESET: &str = "\x1b[0m";
const COMMAND: &str = "\x1b[1;36m";
const NUMBER: &str = "\x1b[35m";
const DICE: &str = "\x1b[33m";
const MENTION: &str = "\x1b[34m";

/// Colours command words, mentions, numbers and dice notation.
#[derive(Debug, Clone, Default)]
pub struct DocbotHighlighter {
    commands: Vec<String>,
}

impl DocbotHighlighter {
    /// Creates a highlighter that knows `commands` as command words.
    #[must_use]
    pub const fn new(commands: Vec<String>) -> Self {
        Self { commands }
    }

    /// Replaces the known command words.
    pub fn set_commands(&mut self, commands: Vec<String>) {
        self.commands = commands;
    }

    /// Highlights a line of input.
    #[must_use]
    pub fn highlight<'l>(&self, line: &'l str) -> Cow<'l, str> {
        if line.trim().is_empty() {
            return Cow::Borrowed(line);
        }

        let mut result = String::with_capacity(line.len() * 2);
        let mut leading = true;
        let mut rest = line;
        while !rest.is_empty() {
            let split = rest
                .find(|c: char| !c.is_whitespace())
                .unwrap_or(rest.len());
            result.push_str(&rest[..split]);
            rest = &rest[split..];
            if rest.is_empty() {
                break;
            }

            let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            let word = &rest[..end];
            rest = &rest[end..];

            match self.colour(word, leading) {
                Some(colour) => {
                    result.push_str(colour);
                    result.push_str(word);
                    result.push_str(RESET);
                }
                None => result.push_str(word),
            }
            leading = leading && (is_mention(word) || self.is_command(word));
        }
        Cow::Owned(result)
    }

    fn colour(&self, word: &str, leading: bool) -> Option<&'static str> {
        if is_mention(word) {
            Some(MENTION)
        } else if leading && self.is_command(word) {
            Some(COMMAND)
        } else if is_dice(word) {
            Some(DICE)
        } else if word.chars().all(|c| c.is_ascii_digit()) {
            Some(NUMBER)
        } else {
            None
        }
    }

    fn is_command(&self, word: &str) -> bool {
        self.commands.iter().any(|c| c == word)
    }
}

fn is_mention(word: &str) -> bool {
    word == "@docbot" || (word.starts_with("<@") && word.ends_with('>'))
}

/// `NdM` with both sides numeric.
fn is_dice(word: &str) -> bool {
    word.split_once('d').is_some_and(|(num, size)| {
        !num.is_empty()
            && !size.is_empty()
            && num.chars().all(|c| c.is_ascii_digit())
            && size.chars().all(|c| c.is_ascii_digit())
    })
}
