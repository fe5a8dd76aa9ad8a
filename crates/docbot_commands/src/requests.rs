//! Typed reads and writes of character sheet data.
//!
//! [`SheetAccess`] combines a [`SheetBackend`], the [`DocMap`] layout and a
//! document id, and turns field names, traits and grist types into cell
//! ranges.

use docbot_foundation::{Error, Result};
use tracing::debug;

use crate::layout::{DocMap, SYLLADEX, SheetMap, TraitMap};
use crate::sheets::SheetBackend;

/// Trait abbreviations, in display order.
pub const TRAITS: [&str; 6] = ["STR", "FOR", "AGL", "INT", "IMG", "CHR"];

/// Grist types, in display order.
pub const GRIST_TYPES: [&str; 12] = [
    "build", "shale", "tar", "chalk", "iodine", "marble", "mercury", "ruby", "gold", "uranium",
    "diamond", "artifact",
];

/// Resolves a long field or trait name to its short form.
#[must_use]
pub fn alias(name: &str) -> Option<&'static str> {
    let short = match name {
        "strength" => "STR",
        "fortitude" => "FOR",
        "agility" => "AGL",
        "intellect" | "intelligence" => "INT",
        "imagination" => "IMG",
        "charm" | "charisma" => "CHR",
        "gel_viscosity" | "viscosity" => "gv",
        "luck_points" | "luck" => "lp",
        "magic_bullshit" | "magic" => "mb",
        "def" => "defence",
        "experience" => "xp",
        "handle" => "chumhandle",
        _ => return None,
    };
    Some(short)
}

/// One row of a trait table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraitReading {
    /// Trait abbreviation.
    pub name: &'static str,
    /// Rating cell value.
    pub rating: String,
    /// Modifier cell value.
    pub modifier: String,
}

/// Result of writing one cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellChange {
    /// Field or grist type as requested.
    pub field: String,
    /// Value before the write.
    pub old: String,
    /// Value written.
    pub new: String,
}

/// Sheet operations for one document.
pub struct SheetAccess<'a> {
    backend: &'a mut dyn SheetBackend,
    layout: &'a DocMap,
    document: &'a str,
}

impl<'a> SheetAccess<'a> {
    /// Binds a backend and layout to a document id.
    pub fn new(backend: &'a mut dyn SheetBackend, layout: &'a DocMap, document: &'a str) -> Self {
        Self {
            backend,
            layout,
            document,
        }
    }

    /// The document id.
    #[must_use]
    pub const fn document(&self) -> &str {
        self.document
    }

    fn trait_map(&self, subsheet: &str) -> Result<&'a TraitMap> {
        self.layout
            .sheet(subsheet)?
            .traits
            .as_ref()
            .ok_or_else(|| Error::domain(format!("Sheet {subsheet} has no traits")))
    }

    fn get(&self, ranges: &[String]) -> Result<Vec<String>> {
        debug!(document = self.document, ?ranges, "reading cells");
        self.backend.batch_get(self.document, ranges)
    }

    fn set(&mut self, pairs: &[(String, String)]) -> Result<Vec<(String, String)>> {
        debug!(document = self.document, cells = pairs.len(), "writing cells");
        self.backend.batch_set(self.document, pairs)
    }

    /// Reads the rating and modifier of every trait on `subsheet`.
    ///
    /// # Errors
    ///
    /// Returns a domain error if the subsheet has no trait table.
    pub fn traits(&self, subsheet: &str) -> Result<Vec<TraitReading>> {
        let map = self.trait_map(subsheet)?;
        let cells = |column: fn(&TraitMap, &str) -> Option<String>| {
            TRAITS
                .iter()
                .map(|name| {
                    column(map, name)
                        .map(|cell| format!("{subsheet}!{cell}"))
                        .ok_or_else(|| Error::config(format!("no row for trait {name} on {subsheet}")))
                })
                .collect::<Result<Vec<_>>>()
        };
        let mut ranges = cells(TraitMap::rating_cell)?;
        ranges.extend(cells(TraitMap::modifier_cell)?);

        let values = self.get(&ranges)?;
        let (ratings, modifiers) = values.split_at(TRAITS.len());
        Ok(TRAITS
            .iter()
            .zip(ratings.iter().zip(modifiers))
            .map(|(&name, (rating, modifier))| TraitReading {
                name,
                rating: rating.clone(),
                modifier: modifier.clone(),
            })
            .collect())
    }

    /// Reads the modifier of one trait, given by abbreviation or long name.
    ///
    /// # Errors
    ///
    /// Returns a domain error for an unknown trait.
    pub fn trait_modifier(&self, subsheet: &str, name: &str) -> Result<String> {
        let map = self.trait_map(subsheet)?;
        let cell = map
            .modifier_cell(&name.to_uppercase())
            .or_else(|| alias(&name.to_lowercase()).and_then(|short| map.modifier_cell(short)))
            .ok_or_else(|| Error::domain(format!("Unknown trait: {name}")))?;
        let values = self.get(&[format!("{subsheet}!{cell}")])?;
        Ok(values.into_iter().next().unwrap_or_default())
    }

    fn grist_ranges<'t>(&self, types: impl Iterator<Item = &'t str>) -> Result<Vec<String>> {
        let types: Vec<&str> = types.collect();
        let invalid: Vec<&str> = types
            .iter()
            .copied()
            .filter(|t| !GRIST_TYPES.contains(&t.to_lowercase().as_str()))
            .collect();
        if !invalid.is_empty() {
            return Err(Error::domain(format!(
                "invalid grist types: {}",
                invalid.join(" ")
            )));
        }

        let map = self
            .layout
            .sheet(SYLLADEX)?
            .grist
            .as_ref()
            .ok_or_else(|| Error::config(format!("sheet {SYLLADEX} has no grist table")))?;
        types
            .iter()
            .map(|t| {
                map.get(&t.to_lowercase())
                    .map(|cell| format!("{SYLLADEX}!{cell}"))
                    .ok_or_else(|| Error::config(format!("no cell for grist {t}")))
            })
            .collect()
    }

    /// Reads grist counters. An empty `types` reads all of them.
    ///
    /// # Errors
    ///
    /// Returns a domain error naming any unknown grist types.
    pub fn grist(&self, types: &[&str]) -> Result<Vec<(String, String)>> {
        let types: Vec<&str> = if types.is_empty() {
            GRIST_TYPES.to_vec()
        } else {
            types.to_vec()
        };
        let ranges = self.grist_ranges(types.iter().copied())?;
        let values = self.get(&ranges)?;
        Ok(types
            .into_iter()
            .map(str::to_string)
            .zip(values)
            .collect())
    }

    /// Writes grist counters.
    ///
    /// # Errors
    ///
    /// Returns a domain error naming any unknown grist types.
    pub fn set_grist(&mut self, values: &[(String, i64)]) -> Result<Vec<CellChange>> {
        let ranges = self.grist_ranges(values.iter().map(|(t, _)| t.as_str()))?;
        let pairs: Vec<(String, String)> = ranges
            .into_iter()
            .zip(values.iter().map(|(_, v)| v.to_string()))
            .collect();
        let changes = self.set(&pairs)?;
        Ok(values
            .iter()
            .zip(changes)
            .map(|((field, _), (old, new))| CellChange {
                field: field.clone(),
                old,
                new,
            })
            .collect())
    }

    /// Reads arbitrary fields, resolving aliases.
    ///
    /// # Errors
    ///
    /// Returns a domain error for an unknown subsheet or field.
    pub fn data(&self, subsheet: &str, fields: &[&str]) -> Result<Vec<(String, String)>> {
        let sheet = self.layout.sheet(subsheet)?;
        let ranges = fields
            .iter()
            .map(|field| resolve_field(sheet, field).map(|cell| format!("{subsheet}!{cell}")))
            .collect::<Result<Vec<_>>>()?;
        let values = self.get(&ranges)?;
        Ok(fields
            .iter()
            .map(|field| (*field).to_string())
            .zip(values)
            .collect())
    }

    /// Writes arbitrary fields, resolving aliases.
    ///
    /// # Errors
    ///
    /// Returns a domain error for an unknown subsheet or field.
    pub fn set_data(&mut self, subsheet: &str, pairs: &[(&str, String)]) -> Result<Vec<CellChange>> {
        let sheet = self.layout.sheet(subsheet)?;
        let writes = pairs
            .iter()
            .map(|(field, value)| {
                resolve_field(sheet, field).map(|cell| (format!("{subsheet}!{cell}"), value.clone()))
            })
            .collect::<Result<Vec<_>>>()?;
        let changes = self.set(&writes)?;
        Ok(pairs
            .iter()
            .zip(changes)
            .map(|((field, _), (old, new))| CellChange {
                field: (*field).to_string(),
                old,
                new,
            })
            .collect())
    }
}

/// Finds the cell of a field: the field itself, then its alias, then the
/// rating of a trait with that name.
fn resolve_field(sheet: &SheetMap, field: &str) -> Result<String> {
    let lower = field.to_lowercase();
    let short = alias(&lower);
    sheet
        .field(&lower)
        .or_else(|| short.and_then(|s| sheet.field(s)))
        .map(str::to_string)
        .or_else(|| {
            let traits = sheet.traits.as_ref()?;
            traits
                .rating_cell(&field.to_uppercase())
                .or_else(|| short.and_then(|s| traits.rating_cell(s)))
        })
        .ok_or_else(|| Error::domain(format!("Unknown field: {field}")))
}
