use docbot_foundation::{Result, Value};
use docbot_grammar::{Rule, Sequence};

use crate::command::Command;
use crate::context::Context;
use crate::grammar::{document_id, name, text};

/// `add document <NAME> <DOCUMENT-ID>`
#[derive(Debug, Clone, Copy)]
pub struct AddDocument;

impl Command for AddDocument {
    fn name(&self) -> &'static str {
        "add document"
    }

    fn prefix(&self) -> &'static [&'static str] {
        &["add", "document"]
    }

    fn arguments(&self) -> Result<Rule> {
        Sequence::new()
            .interleave_spaces()
            .with(name()?)
            .with(document_id()?)
            .build()
            .named(&["name", "id"])
    }

    fn execute(&self, args: &Value, context: &mut Context) -> Result<String> {
        let name = text(args, "name")?;
        context.documents.add(name, text(args, "id")?)?;
        Ok(format!("Successfully added document {name}"))
    }

    fn help(&self) -> &'static str {
        "add document <NAME> <DOCUMENT-ID>:
    add a document to the bot's database
    <NAME> is a name you'll use to refer to that document later
    <DOCUMENT-ID> you can find in the document's url after .../spreadsheets/d/"
    }
}

/// `remove document <NAME>`
#[derive(Debug, Clone, Copy)]
pub struct RemoveDocument;

impl Command for RemoveDocument {
    fn name(&self) -> &'static str {
        "remove document"
    }

    fn prefix(&self) -> &'static [&'static str] {
        &["remove", "document"]
    }

    fn arguments(&self) -> Result<Rule> {
        Sequence::new()
            .interleave_spaces()
            .with(name()?)
            .build()
            .named(&["name"])
    }

    fn execute(&self, args: &Value, context: &mut Context) -> Result<String> {
        let name = text(args, "name")?;
        context.documents.remove(name)?;
        Ok(format!("Successfully removed document {name}"))
    }

    fn help(&self) -> &'static str {
        "remove document <NAME>"
    }
}

/// `list documents`
#[derive(Debug, Clone, Copy)]
pub struct ListDocuments;

impl Command for ListDocuments {
    fn name(&self) -> &'static str {
        "list documents"
    }

    fn prefix(&self) -> &'static [&'static str] {
        &["list", "documents"]
    }

    fn execute(&self, _args: &Value, context: &mut Context) -> Result<String> {
        let listing = context
            .documents
            .entries()
            .map(|(name, id)| format!("{name}: {id}"))
            .collect::<Vec<_>>()
            .join("\n");
        Ok(format!("\n```{listing}```"))
    }

    fn help(&self) -> &'static str {
        "list documents"
    }
}
