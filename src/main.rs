use anyhow::Result;
use clap::Parser;

use pg_utilities::cli::{commands, UtilityCommands};

#[derive(Parser, Debug)]
#[clap(
    name = "pgutil",
    about = "Typed wrappers around the PostgreSQL command-line utilities",
    version
)]
struct Cli {
    #[clap(subcommand)]
    command: UtilityCommands,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        UtilityCommands::Dump(args) => commands::dump(args),
        UtilityCommands::Restore(args) => commands::restore(args),
        UtilityCommands::Cluster(command) => commands::cluster(command),
    }
}
