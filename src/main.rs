//! flatjava CLI entry point.

use clap::Parser;
use flatjava::cli::{self, Cli, Commands, EXIT_ERROR};

fn main() {
    let cli = Cli::parse();
    flatjava::init_logging(cli.verbose);

    let exit_code = match cli.command {
        Commands::Inspect(args) => match cli::run_inspect(&args) {
            Ok(code) => code,
            Err(e) => {
                eprintln!("Error: {}", e);
                EXIT_ERROR
            }
        },
        Commands::Scaffold(args) => match cli::run_scaffold(&args) {
            Ok(code) => code,
            Err(e) => {
                eprintln!("Error: {}", e);
                EXIT_ERROR
            }
        },
    };

    std::process::exit(exit_code);
}
