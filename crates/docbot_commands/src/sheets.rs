//! Spreadsheet access.
//!
//! Commands read and write cells through [`SheetBackend`]. Ranges use the
//! `SUBSHEET!CELL` form, for example `SYLLADEX!C4`.

use docbot_foundation::Result;
use serde::{Deserialize, Serialize};

/// Text returned for a cell that has no value.
pub const MISSING_CELL: &str = "????";

/// Batched cell storage, one namespace per document id.
pub trait SheetBackend: Send {
    /// Reads `ranges` from `document`, in order.
    ///
    /// Missing cells read as [`MISSING_CELL`].
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached.
    fn batch_get(&self, document: &str, ranges: &[String]) -> Result<Vec<String>>;

    /// Writes `(range, value)` pairs to `document`.
    ///
    /// Returns the `(old, new)` value of each range, in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached.
    fn batch_set(&mut self, document: &str, pairs: &[(String, String)]) -> Result<Vec<(String, String)>>;
}

/// In-memory sheets backed by persistent maps.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemorySheets {
    documents: im::OrdMap<String, im::OrdMap<String, String>>,
}

impl MemorySheets {
    /// Creates empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns storage with one cell set.
    #[must_use]
    pub fn with_cell(mut self, document: &str, range: &str, value: impl Into<String>) -> Self {
        self.set_cell(document, range, value);
        self
    }

    /// Sets one cell.
    pub fn set_cell(&mut self, document: &str, range: &str, value: impl Into<String>) {
        self.documents
            .entry(document.to_string())
            .or_default()
            .insert(range.to_string(), value.into());
    }

    /// Reads one cell.
    #[must_use]
    pub fn cell(&self, document: &str, range: &str) -> Option<&str> {
        self.documents
            .get(document)
            .and_then(|cells| cells.get(range))
            .map(String::as_str)
    }

    /// Number of documents with at least one cell.
    #[must_use]
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Total number of stored cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.documents.values().map(im::OrdMap::len).sum()
    }
}

impl SheetBackend for MemorySheets {
    fn batch_get(&self, document: &str, ranges: &[String]) -> Result<Vec<String>> {
        Ok(ranges
            .iter()
            .map(|range| {
                self.cell(document, range)
                    .unwrap_or(MISSING_CELL)
                    .to_string()
            })
            .collect())
    }

    fn batch_set(&mut self, document: &str, pairs: &[(String, String)]) -> Result<Vec<(String, String)>> {
        let ranges: Vec<String> = pairs.iter().map(|(range, _)| range.clone()).collect();
        let old = self.batch_get(document, &ranges)?;
        for (range, value) in pairs {
            self.set_cell(document, range, value.clone());
        }
        Ok(old
            .into_iter()
            .zip(pairs.iter().map(|(_, value)| value.clone()))
            .collect())
    }
}
