//! Sheet layout: which cell holds which field on each subsheet.
//!
//! A [`DocMap`] is read from configuration and looks like:
//!
//! ```json
//! {
//!   "CHARACTER SHEET": {
//!     "xp": "C4",
//!     "vitality": "C6",
//!     "traits": { "rating": "D", "mod": "E", "STR": 14, "FOR": 15 }
//!   },
//!   "SYLLADEX": { "grist": { "build": "C3", "shale": "C4" } }
//! }
//! ```

use std::collections::BTreeMap;

use docbot_foundation::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::requests::{GRIST_TYPES, TRAITS};

/// The main character subsheet.
pub const CHARACTER_SHEET: &str = "CHARACTER SHEET";

/// The subsheet holding grist counters.
pub const SYLLADEX: &str = "SYLLADEX";

/// Layout of every subsheet, keyed by subsheet name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocMap {
    sheets: BTreeMap<String, SheetMap>,
}

impl DocMap {
    /// Creates an empty layout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a subsheet.
    #[must_use]
    pub fn with_sheet(mut self, name: impl Into<String>, sheet: SheetMap) -> Self {
        self.sheets.insert(name.into(), sheet);
        self
    }

    /// Looks up a subsheet.
    ///
    /// # Errors
    ///
    /// Returns a domain error if the layout has no such subsheet.
    pub fn sheet(&self, name: &str) -> Result<&SheetMap> {
        self.sheets
            .get(name)
            .ok_or_else(|| Error::domain(format!("Unknown sheet: {name}")))
    }

    /// Subsheet names.
    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.keys().map(String::as_str)
    }

    /// The layout of the standard character sheet template.
    #[must_use]
    pub fn standard() -> Self {
        let character = || {
            SheetMap::new()
                .with_field("chumhandle", "C2")
                .with_field("xp", "C4")
                .with_field("vitality", "C6")
                .with_field("gv", "C7")
                .with_field("lp", "C8")
                .with_field("mb", "C9")
                .with_field("defence", "C10")
                .with_traits(
                    TRAITS
                        .iter()
                        .zip(14..)
                        .fold(TraitMap::new("D", "E"), |map, (name, row)| {
                            map.with_row(*name, row)
                        }),
                )
        };
        let grist = GRIST_TYPES
            .iter()
            .zip(3..)
            .map(|(name, row)| ((*name).to_string(), format!("C{row}")))
            .collect();

        Self::new()
            .with_sheet(CHARACTER_SHEET, character())
            .with_sheet("PROSPIT", character())
            .with_sheet("DERSE", character())
            .with_sheet(SYLLADEX, SheetMap::new().with_grist(grist))
    }
}

/// Layout of one subsheet.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetMap {
    /// Trait table, if the subsheet has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traits: Option<TraitMap>,
    /// Grist type to cell, if the subsheet has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grist: Option<BTreeMap<String, String>>,
    /// Field name to cell.
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
}

impl SheetMap {
    /// Creates an empty subsheet layout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps a field to a cell.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>, cell: impl Into<String>) -> Self {
        self.fields.insert(field.into(), cell.into());
        self
    }

    /// Sets the trait table.
    #[must_use]
    pub fn with_traits(mut self, traits: TraitMap) -> Self {
        self.traits = Some(traits);
        self
    }

    /// Sets the grist table.
    #[must_use]
    pub fn with_grist(mut self, grist: BTreeMap<String, String>) -> Self {
        self.grist = Some(grist);
        self
    }

    /// The cell of a field, without alias resolution.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// Trait table: a rating column, a modifier column and one row per trait.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitMap {
    /// Column holding trait ratings.
    pub rating: String,
    /// Column holding trait modifiers.
    #[serde(rename = "mod")]
    pub modifier: String,
    /// Trait abbreviation to row number.
    #[serde(flatten)]
    pub rows: BTreeMap<String, u32>,
}

impl TraitMap {
    /// Creates a table with no rows.
    #[must_use]
    pub fn new(rating: impl Into<String>, modifier: impl Into<String>) -> Self {
        Self {
            rating: rating.into(),
            modifier: modifier.into(),
            rows: BTreeMap::new(),
        }
    }

    /// Adds a trait row.
    #[must_use]
    pub fn with_row(mut self, name: impl Into<String>, row: u32) -> Self {
        self.rows.insert(name.into(), row);
        self
    }

    /// Row of a trait.
    #[must_use]
    pub fn row(&self, name: &str) -> Option<u32> {
        self.rows.get(name).copied()
    }

    /// Rating cell of a trait, e.g. `D14`.
    #[must_use]
    pub fn rating_cell(&self, name: &str) -> Option<String> {
        self.row(name).map(|row| format!("{}{row}", self.rating))
    }

    /// Modifier cell of a trait, e.g. `E14`.
    #[must_use]
    pub fn modifier_cell(&self, name: &str) -> Option<String> {
        self.row(name).map(|row| format!("{}{row}", self.modifier))
    }
}
