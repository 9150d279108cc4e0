//! Terminal front-end for the encounter generator.
//!
//! Usage:
//!   cargo run -p encounter_cli -- generate --species Pikachu --level 5
//!   cargo run -p encounter_cli -- generate --level 8 --count 3 --smart-stats
//!   cargo run -p encounter_cli -- list --level 4

mod cmd;

use clap::{Parser, Subcommand};
use cmd::{generate, list};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "encounter_cli")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one or more encounters
    Generate(generate::GenerateArgs),

    /// List species available in the data directory
    List(list::ListArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Generate(args)) => generate::execute(args),
        Some(Commands::List(args)) => list::execute(args),
        None => {
            use clap::CommandFactory;
            let mut cmd = Cli::command();
            let _ = cmd.print_help();
            return;
        }
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
