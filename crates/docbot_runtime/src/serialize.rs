//! Sheet snapshots using `MessagePack`.
//!
//! [`SnapshotSheets`] keeps cells in a [`MemorySheets`] and rewrites the
//! snapshot file after every batch of writes, so a restarted bot picks up
//! where it left off.

use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind as IoErrorKind, Write};
use std::path::{Path, PathBuf};

use docbot_commands::{MemorySheets, SheetBackend};
use docbot_foundation::{Error, Result};
use tracing::{debug, info};

/// Serializes sheets to `MessagePack` bytes.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_bytes(sheets: &MemorySheets) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(sheets).map_err(|e| Error::serialization(e.to_string()))
}

/// Deserializes sheets from `MessagePack` bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not a sheet snapshot.
pub fn from_bytes(bytes: &[u8]) -> Result<MemorySheets> {
    rmp_serde::from_slice(bytes).map_err(|e| Error::serialization(e.to_string()))
}

/// Writes a snapshot to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns an error if the file cannot be written or serialization fails.
pub fn save_to_file<P: AsRef<Path>>(sheets: &MemorySheets, path: P) -> Result<()> {
    let path = path.as_ref();
    let bytes = to_bytes(sheets)?;
    let file = File::create(path).map_err(|e| {
        Error::io(format!("failed to create file '{}': {e}", path.display()))
    })?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(&bytes)
        .and_then(|()| writer.flush())
        .map_err(|e| Error::io(format!("failed to write to file '{}': {e}", path.display())))
}

/// Reads a snapshot from `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a snapshot.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<MemorySheets> {
    let path = path.as_ref();
    let bytes = fs::read(path)
        .map_err(|e| Error::io(format!("failed to read file '{}': {e}", path.display())))?;
    from_bytes(&bytes)
}

/// Sheet storage persisted to a snapshot file.
#[derive(Debug)]
pub struct SnapshotSheets {
    sheets: MemorySheets,
    path: PathBuf,
}

impl SnapshotSheets {
    /// Opens the snapshot at `path`. A missing file starts empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be loaded.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let sheets = match fs::metadata(&path) {
            Ok(_) => load_from_file(&path)?,
            Err(e) if e.kind() == IoErrorKind::NotFound => MemorySheets::new(),
            Err(e) => {
                return Err(Error::io(format!(
                    "failed to open file '{}': {e}",
                    path.display()
                )));
            }
        };
        info!(path = %path.display(), cells = sheets.cell_count(), "sheet snapshot opened");
        Ok(Self { sheets, path })
    }

    /// Wraps existing sheets; nothing is written until the first change.
    #[must_use]
    pub fn with_sheets(sheets: MemorySheets, path: impl Into<PathBuf>) -> Self {
        Self {
            sheets,
            path: path.into(),
        }
    }

    /// The cells currently held.
    #[must_use]
    pub const fn sheets(&self) -> &MemorySheets {
        &self.sheets
    }

    /// The snapshot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the snapshot now.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn save(&self) -> Result<()> {
        save_to_file(&self.sheets, &self.path)?;
        debug!(path = %self.path.display(), "sheet snapshot saved");
        Ok(())
    }
}

impl SheetBackend for SnapshotSheets {
    fn batch_get(&self, document: &str, ranges: &[String]) -> Result<Vec<String>> {
        self.sheets.batch_get(document, ranges)
    }

    fn batch_set(&mut self, document: &str, pairs: &[(String, String)]) -> Result<Vec<(String, String)>> {
        let changes = self.sheets.batch_set(document, pairs)?;
        self.save()?;
        Ok(changes)
    }
}
