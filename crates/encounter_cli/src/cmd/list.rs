//! `list` subcommand: show the species corpus.

use std::path::PathBuf;

use clap::Args;

use encounter_engine::{DataDir, DataProvider, EngineError, Rank};

#[derive(Args)]
pub struct ListArgs {
    /// Only species with moves unlocked at this level's rank
    #[arg(long)]
    level: Option<i32>,

    /// Data directory holding pokemon/, moves/ and abilities/
    #[arg(long, default_value_os_t = super::default_data_dir())]
    data_dir: PathBuf,
}

pub fn execute(args: ListArgs) -> Result<(), EngineError> {
    let provider = DataDir::open(&args.data_dir)?;

    match args.level {
        Some(level) => {
            let rank = Rank::from_level(level.max(1));
            let species = provider.species_with_moves_at(rank);
            println!("{} species at {} rank:", species.len(), rank.name());
            for s in species {
                println!("  #{:<4} {}", s.number, s.name);
            }
        }
        None => {
            let names = provider.species_names();
            println!("{} species:", names.len());
            for name in names {
                println!("  {name}");
            }
        }
    }
    Ok(())
}
