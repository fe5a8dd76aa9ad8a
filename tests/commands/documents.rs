//! Document registry commands.

use docbot_commands::{Context, dispatcher};
use docbot_foundation::ErrorKind;

use super::{fixture, run};

#[test]
fn add_list_remove() {
    let dispatcher = dispatcher().unwrap();
    let mut context = Context::in_memory(1);

    assert_eq!(
        dispatcher.dispatch("add document Rose abc-123", &mut context).unwrap(),
        "Successfully added document Rose"
    );
    dispatcher.dispatch("add document jade xyz_9", &mut context).unwrap();
    assert_eq!(
        dispatcher.dispatch("list documents", &mut context).unwrap(),
        "\n```jade: xyz_9\nrose: abc-123```"
    );
    assert_eq!(
        dispatcher.dispatch("remove document ROSE", &mut context).unwrap(),
        "Successfully removed document ROSE"
    );
    assert_eq!(
        dispatcher.dispatch("list documents", &mut context).unwrap(),
        "\n```jade: xyz_9```"
    );
}

#[test]
fn duplicate_names_ignore_case() {
    let err = run("add document dave other").unwrap_err();
    assert_eq!(err.to_string(), "Document with name dave already exists");
}

#[test]
fn remove_unknown() {
    let err = run("remove document karkat").unwrap_err();
    assert_eq!(err.to_string(), "Document with name karkat does not exist");
}

#[test]
fn unregistered_character() {
    let err = run("show karkat grist").unwrap_err();
    assert_eq!(err.to_string(), "Document for karkat does not exist");
}

#[test]
fn names_must_start_with_a_letter() {
    let err = run("add document 9lives abc").unwrap_err();
    assert_eq!(err.to_string(), "at 13 expected name got 9");
    let context = err.context.unwrap();
    assert_eq!(context.command.as_deref(), Some("add document"));
}

#[test]
fn whitespace_between_words_is_flexible() {
    let (dispatcher, mut context) = fixture(1);
    let reply = dispatcher
        .dispatch("  list    documents  ", &mut context)
        .unwrap();
    assert_eq!(reply, "\n```dave: dave-doc```");
}

#[test]
fn unknown_and_help() {
    let err = run("make me a sandwich").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownCommand));

    let help = run("help").unwrap();
    assert!(help.contains("help: show this message"));
    assert!(help.contains("add document <NAME> <DOCUMENT-ID>"));
    assert!(help.contains("roll <NAME> [prospit|derse] <TRAIT>"));
}
