//! The console driven by a scripted editor.

use docbot_commands::Context;
use docbot_foundation::Result;
use docbot_runtime::repl::split_messages;
use docbot_runtime::{LineEditor, ReadResult, Repl, Session};

use super::write_file;

/// Replays fixed lines, recording prompts.
#[derive(Default)]
struct Script {
    lines: Vec<ReadResult>,
    prompts: Vec<String>,
    keywords: Vec<String>,
}

impl Script {
    fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().rev().map(|l| ReadResult::Line((*l).to_string())).collect(),
            ..Self::default()
        }
    }
}

impl LineEditor for Script {
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult> {
        self.prompts.push(prompt.to_string());
        Ok(self.lines.pop().unwrap_or(ReadResult::Eof))
    }

    fn add_history(&mut self, _line: &str) {}

    fn set_keywords(&mut self, keywords: Vec<String>) {
        self.keywords = keywords;
    }
}

fn session() -> Session {
    Session::new(Context::in_memory(3)).unwrap()
}

#[test]
fn console_session() {
    let script = Script::new(&[
        "add document jade jade-doc",
        "change jade grist\\",
        "build set 10\\",
        "shale set 3",
        "",
        "frobnicate",
    ]);
    let mut repl = Repl::with_editor(script, session())
        .without_banner()
        .with_prompt("> ");
    repl.run().unwrap();

    assert_eq!(repl.session().handled(), 3);
    let grist = repl.session_mut().execute("show jade grist").unwrap();
    assert!(grist.contains("10"), "{grist}");
}

#[test]
fn batch_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "session.txt",
        "# characters\nadd document jade jade-doc\n\nchange jade xp set 50\nshow jade xp\nroll 300d6\n",
    );

    let mut repl = Repl::with_editor(Script::default(), session()).without_banner();
    let replies = repl.eval_file(&path).unwrap();
    assert_eq!(replies.len(), 4);
    assert!(replies[..3].iter().all(|r| !r.is_error()));
    assert_eq!(
        replies[3].text(),
        "Error: That's a lot of dice. Are you trying to kill me?"
    );
    assert!(repl.eval_file(dir.path().join("absent.txt")).is_err());
}

#[test]
fn batch_continuations() {
    assert_eq!(
        split_messages("change jade grist\\\nbuild add 1; tar add 2\\\n  ruby sub 0\nhelp"),
        vec!["change jade grist\nbuild add 1; tar add 2\n  ruby sub 0", "help"]
    );
}
