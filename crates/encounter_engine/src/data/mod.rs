//! Read-only game-data access.
//!
//! The generator core never touches the filesystem directly; it goes
//! through [`DataProvider`]. The production implementation is [`DataDir`],
//! a directory-backed set of record caches; tests use [`MemoryProvider`].

mod cache;
pub mod loader;

use std::path::{Path, PathBuf};

use tracing::info;

use crate::core_data::{AbilityRecord, MoveRecord, SpeciesRecord};
use crate::error::EngineError;
use crate::ranks::Rank;

use cache::RecordCache;

/// Lookup surface for species, move and ability records. All lookups are
/// case-insensitive; a miss is `None`, never an error.
pub trait DataProvider {
    fn species(&self, name: &str) -> Option<&SpeciesRecord>;
    fn move_record(&self, name: &str) -> Option<&MoveRecord>;
    fn ability(&self, name: &str) -> Option<&AbilityRecord>;

    /// All species names, sorted case-insensitively.
    fn species_names(&self) -> &[String];

    /// Species with at least one move unlocked at or below `rank` —
    /// the candidate pool for random encounters.
    fn species_with_moves_at(&self, rank: Rank) -> Vec<&SpeciesRecord> {
        self.species_names()
            .iter()
            .filter_map(|name| self.species(name))
            .filter(|species| {
                species.moves.tiers()[..rank.unlocked_tiers()]
                    .iter()
                    .any(|tier| !tier.is_empty())
            })
            .collect()
    }
}

/// Directory-backed provider over the `pokemon/`, `moves/` and
/// `abilities/` subdirectories of a data root.
pub struct DataDir {
    root: PathBuf,
    species: RecordCache<SpeciesRecord>,
    moves: RecordCache<MoveRecord>,
    abilities: RecordCache<AbilityRecord>,
}

impl DataDir {
    /// Scan the data root and build all caches.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, EngineError> {
        let root = root.into();
        let (species, moves, abilities) = Self::scan(&root)?;
        info!(
            root = %root.display(),
            species = species.len(),
            moves = moves.len(),
            abilities = abilities.len(),
            "data directory loaded"
        );
        Ok(Self {
            root,
            species,
            moves,
            abilities,
        })
    }

    /// Drop and re-scan every cache. Call after the corpus on disk changed.
    pub fn rebuild(&mut self) -> Result<(), EngineError> {
        let (species, moves, abilities) = Self::scan(&self.root)?;
        self.species = species;
        self.moves = moves;
        self.abilities = abilities;
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    #[allow(clippy::type_complexity)]
    fn scan(
        root: &Path,
    ) -> Result<
        (
            RecordCache<SpeciesRecord>,
            RecordCache<MoveRecord>,
            RecordCache<AbilityRecord>,
        ),
        EngineError,
    > {
        let species = RecordCache::load_dir(&root.join("pokemon"), "species", loader::parse_species)?;
        let moves = RecordCache::load_dir(&root.join("moves"), "moves", loader::parse_move)?;
        let abilities =
            RecordCache::load_dir(&root.join("abilities"), "abilities", loader::parse_ability)?;
        Ok((species, moves, abilities))
    }
}

impl DataProvider for DataDir {
    fn species(&self, name: &str) -> Option<&SpeciesRecord> {
        self.species.get(name)
    }

    fn move_record(&self, name: &str) -> Option<&MoveRecord> {
        self.moves.get(name)
    }

    fn ability(&self, name: &str) -> Option<&AbilityRecord> {
        self.abilities.get(name)
    }

    fn species_names(&self) -> &[String] {
        self.species.names()
    }
}

/// In-memory provider for unit tests and embedding.
#[derive(Default)]
pub struct MemoryProvider {
    species: Vec<SpeciesRecord>,
    names: Vec<String>,
    moves: std::collections::HashMap<String, MoveRecord>,
    abilities: std::collections::HashMap<String, AbilityRecord>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_species(&mut self, record: SpeciesRecord) {
        self.names.push(record.name.clone());
        self.species.push(record);
    }

    pub fn add_move(&mut self, record: MoveRecord) {
        self.moves
            .insert(loader::normalize_name(&record.name), record);
    }

    pub fn add_ability(&mut self, record: AbilityRecord) {
        self.abilities
            .insert(loader::normalize_name(&record.name), record);
    }
}

impl DataProvider for MemoryProvider {
    fn species(&self, name: &str) -> Option<&SpeciesRecord> {
        let key = loader::normalize_name(name);
        self.species
            .iter()
            .find(|s| loader::normalize_name(&s.name) == key)
    }

    fn move_record(&self, name: &str) -> Option<&MoveRecord> {
        self.moves.get(&loader::normalize_name(name))
    }

    fn ability(&self, name: &str) -> Option<&AbilityRecord> {
        self.abilities.get(&loader::normalize_name(name))
    }

    fn species_names(&self) -> &[String] {
        &self.names
    }
}
