//! Encounter generation: the StatAllocator → MovesetSelector →
//! EncounterFormatter pipeline for one species at one level.
//!
//! Everything here is request-scoped; nothing persists between calls.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::allocator::{allocate, ComputedStats, Purchase, StatMode};
use crate::data::DataProvider;
use crate::error::EngineError;
use crate::format::{render, SheetLayout};
use crate::moveset::{select, MoveMode};
use crate::ranks::Rank;

#[derive(Debug, Clone, Copy, Default)]
pub struct EncounterOptions {
    pub level: i32,
    pub stat_mode: StatMode,
    pub move_mode: MoveMode,
    pub include_extra: bool,
}

impl EncounterOptions {
    pub fn new(level: i32) -> Self {
        Self {
            level: level.max(1),
            ..Default::default()
        }
    }
}

/// One fully generated encounter, ready for rendering.
#[derive(Debug, Clone)]
pub struct Encounter {
    pub species: crate::core_data::SpeciesRecord,
    pub level: i32,
    pub rank: Rank,
    pub stats: ComputedStats,
    pub ability: String,
    pub gender: &'static str,
    pub moves: Vec<String>,
    /// Points the allocator could not legally spend (usually zero).
    pub leftover_points: i32,
    /// Limit-break purchase audit log.
    pub purchases: Vec<Purchase>,
}

impl Encounter {
    pub fn render(&self, provider: &dyn DataProvider, layout: SheetLayout) -> String {
        render(self, provider, layout)
    }
}

/// Generate an encounter for `species_name`. The only failure mode is an
/// unknown species; missing moves and abilities degrade during rendering.
pub fn generate<R: Rng>(
    provider: &dyn DataProvider,
    species_name: &str,
    options: &EncounterOptions,
    rng: &mut R,
) -> Result<Encounter, EngineError> {
    let species = provider
        .species(species_name)
        .ok_or_else(|| EngineError::SpeciesNotFound(species_name.to_owned()))?
        .clone();

    let level = options.level.max(1);
    let rank = Rank::from_level(level);

    let outcome = allocate(&species, level, options.stat_mode, provider, rng);
    let moves = select(
        &species,
        &outcome.stats,
        rank,
        options.move_mode,
        options.include_extra,
        provider,
        rng,
    );

    let ability = species
        .abilities
        .normal
        .choose(rng)
        .cloned()
        .unwrap_or_else(|| "None".to_owned());
    let gender = if rng.gen_bool(0.5) { "(M)" } else { "(F)" };

    debug!(
        species = %species.name,
        level,
        rank = rank.name(),
        moves = moves.len(),
        leftover = outcome.leftover,
        "encounter generated"
    );

    Ok(Encounter {
        species,
        level,
        rank,
        stats: outcome.stats,
        ability,
        gender,
        moves,
        leftover_points: outcome.leftover,
        purchases: outcome.purchases,
    })
}
