//! Loading configuration files.

use std::path::Path;

use docbot_runtime::Config;
use docbot_runtime::config::DEFAULT_ADDRESS;

use super::write_file;

#[test]
fn locate_explicit_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "bot.json",
        r#"{ "documents": "chars.json", "seed": 9, "address": "!bot" }"#,
    );

    let config = Config::locate(Some(&path)).unwrap();
    assert_eq!(config.documents, Path::new("chars.json"));
    assert_eq!(config.seed, Some(9));
    assert_eq!(config.address.as_deref(), Some("!bot"));
    assert_eq!(config.sheets, None);
}

#[test]
fn missing_keys_take_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "bot.json", "{}");
    assert_eq!(Config::load(&path).unwrap(), Config::default());
    assert_eq!(Config::default().address.as_deref(), Some(DEFAULT_ADDRESS));
}

#[test]
fn docmap_override() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "bot.json",
        r#"{ "docmap": { "CHARACTER SHEET": { "xp": "Z9" } } }"#,
    );
    let config = Config::load(&path).unwrap();
    let sheet = config.docmap.sheet("CHARACTER SHEET").unwrap();
    assert_eq!(sheet.field("xp"), Some("Z9"));
}

#[test]
fn unreadable_and_invalid_files() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::locate(Some(&dir.path().join("absent.json"))).unwrap_err();
    assert!(err.to_string().starts_with("io error: failed to read config"), "{err}");

    let path = write_file(dir.path(), "bot.json", r#"{ "seed": "many" }"#);
    let err = Config::load(&path).unwrap_err();
    assert!(err.to_string().starts_with("configuration error:"), "{err}");
}
