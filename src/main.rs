mod adapters;
mod cli;
mod config;
mod core;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    let args = Cli::parse();

    let result = match &args.command {
        Commands::Backup {
            source,
            destination,
        } => cli::commands::backup::execute(
            source,
            destination,
            args.key.as_deref(),
            args.format.as_deref(),
            args.verbose,
            args.quiet,
        ),
        Commands::Restore {
            backup_file,
            destination,
        } => cli::commands::restore::execute(
            backup_file,
            destination,
            args.key.as_deref(),
            args.format.as_deref(),
            args.verbose,
            args.quiet,
        ),
        Commands::GenerateKey { output, force } => {
            cli::commands::generate_key::execute(output.as_deref(), *force, args.quiet)
        }
    };

    if let Err(e) = result {
        cli::output::error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}
