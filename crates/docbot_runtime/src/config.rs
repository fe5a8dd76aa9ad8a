//! Bot configuration.
//!
//! Configuration is a JSON object. Every key is optional:
//!
//! ```json
//! {
//!     "documents": "documents.json",
//!     "sheets": "sheets.msgpack",
//!     "docmap": { "CHARACTER SHEET": { "xp": "C4" } },
//!     "seed": 42,
//!     "address": "<@!?\\d+>"
//! }
//! ```
//!
//! [`Config::locate`] reads the file named on the command line, falling back
//! to the `CONFIG` environment variable and then to built-in defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use docbot_commands::DocMap;
use docbot_foundation::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "CONFIG";

/// Pattern for the token that addresses the bot: a chat mention or `@docbot`.
pub const DEFAULT_ADDRESS: &str = r"<@!?\d+>|@docbot";

/// Settings for a bot session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Document registry file.
    pub documents: PathBuf,
    /// Sheet snapshot file; `None` keeps sheets in memory only.
    pub sheets: Option<PathBuf>,
    /// Sheet layout.
    pub docmap: DocMap,
    /// Dice seed.
    pub seed: Option<u64>,
    /// Regular expression for the addressing token.
    pub address: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            documents: PathBuf::from("documents.json"),
            sheets: None,
            docmap: DocMap::standard(),
            seed: None,
            address: Some(DEFAULT_ADDRESS.to_string()),
        }
    }
}

impl Config {
    /// Parses a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the text is not a valid configuration.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::config(e.to_string()))
    }

    /// Loads the configuration file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or a configuration
    /// error if it does not parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            Error::io(format!("failed to read config '{}': {e}", path.display()))
        })?;
        let config = Self::from_json(&text)
            .map_err(|e| Error::config(format!("'{}': {e}", path.display())))?;
        info!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Loads `explicit` if given, else the file named by `CONFIG`, else the
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen file cannot be loaded.
    pub fn locate(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => Self::load(PathBuf::from(path)),
            _ => Ok(Self::default()),
        }
    }

    /// Sets the document registry file.
    #[must_use]
    pub fn with_documents(mut self, path: impl Into<PathBuf>) -> Self {
        self.documents = path.into();
        self
    }

    /// Persists sheets to a snapshot file.
    #[must_use]
    pub fn with_sheets(mut self, path: impl Into<PathBuf>) -> Self {
        self.sheets = Some(path.into());
        self
    }

    /// Sets the sheet layout.
    #[must_use]
    pub fn with_docmap(mut self, docmap: DocMap) -> Self {
        self.docmap = docmap;
        self
    }

    /// Fixes the dice seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the addressing pattern.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Accepts commands without an addressing token only.
    #[must_use]
    pub fn without_address(mut self) -> Self {
        self.address = None;
        self
    }
}
