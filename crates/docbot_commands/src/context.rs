//! State shared by all command handlers.

use std::fmt;

use docbot_foundation::Result;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::documents::DocumentStore;
use crate::layout::DocMap;
use crate::requests::SheetAccess;
use crate::sheets::{MemorySheets, SheetBackend};

/// Everything a command can read or change.
pub struct Context {
    /// Character name to document id registry.
    pub documents: DocumentStore,
    /// Where sheet cells live.
    pub sheets: Box<dyn SheetBackend>,
    /// Cell layout of the sheets.
    pub layout: DocMap,
    /// Dice source.
    pub rng: ChaCha8Rng,
}

impl Context {
    /// Creates a context. Without a seed, dice are seeded from the OS.
    #[must_use]
    pub fn new(
        documents: DocumentStore,
        sheets: Box<dyn SheetBackend>,
        layout: DocMap,
        seed: Option<u64>,
    ) -> Self {
        let rng = seed.map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64);
        Self {
            documents,
            sheets,
            layout,
            rng,
        }
    }

    /// An in-memory context with the standard layout and a fixed seed.
    #[must_use]
    pub fn in_memory(seed: u64) -> Self {
        Self::new(
            DocumentStore::in_memory(),
            Box::new(MemorySheets::new()),
            DocMap::standard(),
            Some(seed),
        )
    }

    /// Opens the sheet of the character registered as `name`.
    ///
    /// # Errors
    ///
    /// Returns a domain error if no document is registered for `name`.
    pub fn sheet(&mut self, name: &str) -> Result<SheetAccess<'_>> {
        let document = self.documents.lookup(name)?;
        Ok(SheetAccess::new(self.sheets.as_mut(), &self.layout, document))
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("documents", &self.documents)
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}
