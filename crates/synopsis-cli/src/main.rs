//! Synopsis CLI - terminal dashboard for tabular datasets.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Show {
            file,
            indicator,
            groups,
            bins,
            json,
        } => commands::show::run(file, indicator, groups, bins, json, cli.verbose),

        Commands::Schema { file, json } => commands::schema::run(file, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
