//! Registry of character documents.
//!
//! Maps a case-insensitive character name to a spreadsheet document id.
//! When backed by a file, the registry is written back as pretty JSON
//! after every change.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};

use docbot_foundation::{Error, Result};
use tracing::{info, warn};

/// Name to document id map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocumentStore {
    path: Option<PathBuf>,
    entries: BTreeMap<String, String>,
}

impl DocumentStore {
    /// Creates an empty registry that is never written to disk.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Opens the registry stored at `path`.
    ///
    /// A missing or unreadable file yields an empty registry; the file is
    /// created on the first change.
    #[must_use]
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let entries = match fs::read_to_string(path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "document registry is not valid JSON, starting empty");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == IoErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "document registry is unreadable, starting empty");
                BTreeMap::new()
            }
        };
        Self {
            path: Some(path.to_path_buf()),
            entries,
        }
    }

    /// Registers `name` for document `id`.
    ///
    /// # Errors
    ///
    /// Returns a domain error if the name is taken, or an I/O error if the
    /// registry cannot be saved.
    pub fn add(&mut self, name: &str, id: &str) -> Result<()> {
        let key = name.to_lowercase();
        if self.entries.contains_key(&key) {
            return Err(Error::domain(format!(
                "Document with name {name} already exists"
            )));
        }
        self.entries.insert(key, id.to_string());
        self.save()
    }

    /// Forgets `name`.
    ///
    /// # Errors
    ///
    /// Returns a domain error if the name is not registered, or an I/O error
    /// if the registry cannot be saved.
    pub fn remove(&mut self, name: &str) -> Result<()> {
        if self.entries.remove(&name.to_lowercase()).is_none() {
            return Err(Error::domain(format!(
                "Document with name {name} does not exist"
            )));
        }
        self.save()
    }

    /// Returns the document id registered for `name`.
    ///
    /// # Errors
    ///
    /// Returns a domain error if the name is not registered.
    pub fn lookup(&self, name: &str) -> Result<&str> {
        self.entries
            .get(&name.to_lowercase())
            .map(String::as_str)
            .ok_or_else(|| Error::domain(format!("Document for {name} does not exist")))
    }

    /// Registered `(name, id)` pairs, sorted by name.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of registered documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Where the registry is saved, if anywhere.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let json = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| Error::serialization(e.to_string()))?;
        fs::write(path, json)
            .map_err(|e| Error::io(format!("failed to write {}: {e}", path.display())))?;
        info!(path = %path.display(), documents = self.entries.len(), "document registry saved");
        Ok(())
    }
}
