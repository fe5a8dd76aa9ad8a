//! Integration tests for Layer 3: Runtime
//!
//! Configuration files, persistent sessions and the console driven by a
//! scripted editor.

mod config;
mod repl;
mod session;

use std::fs;
use std::path::Path;

/// Writes `text` to `dir/name` and returns the path.
fn write_file(dir: &Path, name: &str, text: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path
}
