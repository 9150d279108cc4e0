//! encounter_engine - Procedural NPC encounter generation for
//! tabletop-style Pokémon role-play.
//!
//! Given a species record, a level and a policy, the engine allocates a
//! point budget across the five battle stats (with odd caps, escalating
//! limit-break costs and purchase-spacing rules), selects a coherent
//! moveset (STAB-weighted, role-aware, with a separate boss policy), and
//! renders the result as a text sheet.
//!
//! Randomness is injected everywhere (`&mut impl rand::Rng`); callers pass
//! `rand::thread_rng()`, tests pass a seeded generator.

/// Core record and enum types
pub mod core_data;

/// JSON data loading and the provider abstraction
pub mod data;

/// Engine error type
pub mod error;

/// Level-derived ranks
pub mod ranks;

/// Battle/social stat allocation
pub mod allocator;

/// Moveset selection policies
pub mod moveset;

/// Sheet rendering
pub mod format;

/// The generation pipeline
pub mod encounter;

#[cfg(test)]
mod test_util;

// Re-export commonly used types
pub use allocator::{AllocationOutcome, ComputedStats, Purchase, PurchaseKind, StatMode};
pub use core_data::{
    AbilityRecord, BattleStat, EffectFlags, MoveCategory, MoveRecord, SocialStat, SpeciesRecord,
    StatRange, Type,
};
pub use data::{DataDir, DataProvider, MemoryProvider};
pub use encounter::{generate, Encounter, EncounterOptions};
pub use error::EngineError;
pub use format::SheetLayout;
pub use moveset::MoveMode;
pub use ranks::Rank;

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::test_util::{full_pools, species, standard_provider};

    #[test]
    fn test_generate_unknown_species_errors() {
        let provider = MemoryProvider::new();
        let mut rng = StdRng::seed_from_u64(0);
        let err = generate(&provider, "missingno", &EncounterOptions::new(1), &mut rng);
        assert!(matches!(err, Err(EngineError::SpeciesNotFound(_))));
    }

    #[test]
    fn test_generate_full_pipeline() {
        let mut provider = standard_provider();
        provider.add_species(species(
            "Testmon",
            vec![Type::Electric],
            ["2/6", "2/6", "1/9", "2/8", "1/9"],
            full_pools(),
        ));

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut options = EncounterOptions::new(5);
            options.stat_mode = StatMode::Smart;
            options.move_mode = MoveMode::Smart;
            let encounter = generate(&provider, "Testmon", &options, &mut rng).unwrap();

            // Size bound and dedup
            let limit = encounter.stats.active_move_limit() as usize;
            assert!(encounter.moves.len() <= limit);
            let mut unique = encounter.moves.clone();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), encounter.moves.len());

            // Budget respected
            assert!(encounter.leftover_points >= 0);

            // Both layouts render without panicking and name the species
            let sheet = encounter.render(&provider, SheetLayout::Standard);
            assert!(sheet.contains("Testmon"));
            assert!(sheet.contains("### Moves"));
            let sheet = encounter.render(&provider, SheetLayout::Detailed);
            assert!(sheet.contains("Testmon"));
            assert!(sheet.contains("## Moves"));
        }
    }

    #[test]
    fn test_generate_is_case_insensitive() {
        let mut provider = standard_provider();
        provider.add_species(species(
            "Testmon",
            vec![Type::Electric],
            ["2/6"; 5],
            full_pools(),
        ));
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate(&provider, "TESTMON", &EncounterOptions::new(1), &mut rng).is_ok());
    }

    #[test]
    fn test_missing_move_record_renders_no_data_marker() {
        let mut provider = standard_provider();
        let mut pools = full_pools();
        pools.bronze.push("Phantom Move".into());
        provider.add_species(species(
            "Testmon",
            vec![Type::Electric],
            ["2/6", "2/6", "1/9", "2/8", "1/9"],
            pools,
        ));

        // Find a seed whose standard sample includes the phantom move.
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let encounter =
                generate(&provider, "Testmon", &EncounterOptions::new(10), &mut rng).unwrap();
            if encounter.moves.iter().any(|m| m == "Phantom Move") {
                let sheet = encounter.render(&provider, SheetLayout::Detailed);
                assert!(sheet.contains("**Phantom Move** – *No data found.*"));
                return;
            }
        }
        panic!("no seed selected the phantom move");
    }
}
