//! `generate` subcommand: roll encounters and print their sheets.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use encounter_engine::{
    generate, DataDir, DataProvider, EncounterOptions, EngineError, MoveMode, Rank, SheetLayout,
    StatMode,
};

/// Cap matching the original command surface.
const MAX_ENCOUNTERS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Standard,
    Detailed,
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Species names, comma-separated. Blank picks random species that
    /// have moves unlocked at the target rank.
    #[arg(long, value_delimiter = ',')]
    species: Vec<String>,

    /// Encounter level
    #[arg(long, default_value_t = 1)]
    level: i32,

    /// How many random encounters to roll (max 6)
    #[arg(long, default_value_t = 1)]
    count: usize,

    /// Include TM, Egg and Tutor moves in the candidate pool
    #[arg(long)]
    include_extra: bool,

    /// Sheet layout
    #[arg(long, value_enum, default_value = "standard")]
    format: FormatArg,

    /// Role-aware stat distribution and moveset selection
    #[arg(long)]
    smart_stats: bool,

    /// Boss move selection (implies smart stats)
    #[arg(long)]
    evil: bool,

    /// Data directory holding pokemon/, moves/ and abilities/
    #[arg(long, default_value_os_t = super::default_data_dir())]
    data_dir: PathBuf,

    /// RNG seed for reproducible encounters
    #[arg(long)]
    seed: Option<u64>,
}

pub fn execute(args: GenerateArgs) -> Result<(), EngineError> {
    let provider = DataDir::open(&args.data_dir)?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let level = args.level.max(1);
    let rank = Rank::from_level(level);

    let targets: Vec<String> = if args.species.is_empty() {
        let candidates = provider.species_with_moves_at(rank);
        if candidates.is_empty() {
            eprintln!("No species available for level {level}.");
            return Ok(());
        }
        let count = args.count.clamp(1, MAX_ENCOUNTERS).min(candidates.len());
        candidates
            .choose_multiple(&mut rng, count)
            .map(|s| s.name.clone())
            .collect()
    } else {
        args.species
            .iter()
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .take(MAX_ENCOUNTERS)
            .collect()
    };

    let options = EncounterOptions {
        level,
        stat_mode: if args.smart_stats || args.evil {
            StatMode::Smart
        } else {
            StatMode::Uniform
        },
        move_mode: if args.evil {
            MoveMode::Evil
        } else if args.smart_stats {
            MoveMode::Smart
        } else {
            MoveMode::Standard
        },
        include_extra: args.include_extra,
    };
    let layout = match args.format {
        FormatArg::Standard => SheetLayout::Standard,
        FormatArg::Detailed => SheetLayout::Detailed,
    };

    for name in &targets {
        match generate(&provider, name, &options, &mut rng) {
            Ok(encounter) => {
                println!("{}", encounter.render(&provider, layout));
            }
            Err(EngineError::SpeciesNotFound(name)) => {
                // One bad name shouldn't sink the rest of the batch.
                eprintln!("No data for {name}");
            }
            Err(err) => return Err(err),
        }
    }
    Ok(())
}
