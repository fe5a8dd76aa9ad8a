//! Sessions built from configuration, with state kept across restarts.

use docbot_commands::MemorySheets;
use docbot_commands::layout::SYLLADEX;
use docbot_runtime::serialize::{SnapshotSheets, load_from_file, save_to_file};
use docbot_runtime::{Config, Reply, Session};

fn persistent_config(dir: &std::path::Path) -> Config {
    Config::default()
        .with_documents(dir.join("documents.json"))
        .with_sheets(dir.join("sheets.msgpack"))
        .with_seed(5)
}

#[test]
fn documents_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = persistent_config(dir.path());

    let mut session = Session::from_config(&config).unwrap();
    assert!(!session.handle("add document Rose rose-doc").is_error());
    drop(session);

    let registry = std::fs::read_to_string(dir.path().join("documents.json")).unwrap();
    assert!(registry.contains("\"rose\": \"rose-doc\""), "{registry}");

    let mut session = Session::from_config(&config).unwrap();
    assert_eq!(session.handle("list documents").text(), "\n```rose: rose-doc```");
}

#[test]
fn sheet_changes_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = persistent_config(dir.path());

    let mut session = Session::from_config(&config).unwrap();
    session.handle("add document rose rose-doc");
    let reply = session.handle("change rose grist build set 40; shale set 2");
    assert!(!reply.is_error(), "{reply}");
    drop(session);

    let sheets = load_from_file(dir.path().join("sheets.msgpack")).unwrap();
    assert_eq!(sheets.cell("rose-doc", &format!("{SYLLADEX}!C3")), Some("40"));

    let mut session = Session::from_config(&config).unwrap();
    let reply = session.handle("show rose grist");
    assert!(reply.text().contains("40"), "{reply}");
}

#[test]
fn snapshot_seeded_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sheets.msgpack");
    let sheets = MemorySheets::new()
        .with_cell("kanaya", "CHARACTER SHEET!C4", "120")
        .with_cell("kanaya", "CHARACTER SHEET!C7", "20");
    save_to_file(&sheets, &path).unwrap();
    assert_eq!(SnapshotSheets::open(&path).unwrap().sheets(), &sheets);

    let config = persistent_config(dir.path());
    let mut session = Session::from_config(&config).unwrap();
    session.handle("add document kanaya kanaya");
    assert_eq!(
        session.handle("change kanaya xp sub 200").text(),
        "Xp changes for kanaya: was 120, became 0\nTried to subtract more xp than you have. Value set to 0"
    );
}

#[test]
fn corrupt_snapshot_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("sheets.msgpack"), b"not a snapshot").unwrap();
    let err = Session::from_config(&persistent_config(dir.path())).unwrap_err();
    assert!(err.to_string().starts_with("serialization error:"), "{err}");
}

#[test]
fn replies_as_shown_in_chat() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = Session::from_config(&persistent_config(dir.path())).unwrap();

    assert_eq!(session.handle("<@1234> dance"), Reply::Error("Unknown command".to_string()));
    assert_eq!(
        session.handle("@docbot remove document nobody").text(),
        "Error: Document with name nobody does not exist"
    );
    let reply = session.handle("<@!99>   roll 1d1 + 1");
    assert_eq!(reply, Reply::Message("roll (1d1 + 1): 1 + 1 = __2__".to_string()));
    assert_eq!(session.handled(), 3);
}

#[test]
fn custom_address() {
    let dir = tempfile::tempdir().unwrap();
    let config = persistent_config(dir.path()).with_address("!db");
    let mut session = Session::from_config(&config).unwrap();
    assert!(!session.handle("!db help").is_error());
    assert!(session.handle("@docbot help").is_error());

    let bare = persistent_config(dir.path()).without_address();
    let mut session = Session::from_config(&bare).unwrap();
    assert!(session.handle("!db help").is_error());
}
