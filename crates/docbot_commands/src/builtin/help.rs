use docbot_foundation::{Result, Value};

use crate::command::Command;
use crate::context::Context;

const HEADER: &str = "DocBot help
all-capital words in triangle brackets are placeholders
square brackets mean optional parameters
curly braces mean multiple arguments
`|` means `or`

commands:
```
";

const USAGE: &str = "help: show this message";

/// `help`: lists the usage of every command.
#[derive(Debug, Clone)]
pub struct Help {
    text: String,
}

impl Help {
    /// Builds the help text from the usage of the other commands.
    #[must_use]
    pub fn new<'a>(usages: impl IntoIterator<Item = &'a str>) -> Self {
        let mut lines: Vec<&str> = vec![USAGE];
        lines.extend(usages);
        Self {
            text: format!("{HEADER}{}```", lines.join("\n")),
        }
    }
}

impl Command for Help {
    fn name(&self) -> &'static str {
        "help"
    }

    fn prefix(&self) -> &'static [&'static str] {
        &["help"]
    }

    fn execute(&self, _args: &Value, _context: &mut Context) -> Result<String> {
        Ok(self.text.clone())
    }

    fn help(&self) -> &'static str {
        USAGE
    }
}
