use clap::Parser;

use lifeweeks::logging;

#[cfg(feature = "tui")]
mod app;
mod cli;

use cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();

    match cli.command {
        None | Some(Command::Ui) => run_ui(&cli.input),
        Some(command) => {
            logging::init();
            cli::run_command(command, &cli.input);
        }
    }
}

#[cfg(feature = "tui")]
fn run_ui(input: &cli::InputArgs) {
    let result = input
        .dashboard()
        .and_then(|dashboard| app::run_ui(dashboard).map_err(|e| e.to_string()));

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "tui"))]
fn run_ui(input: &cli::InputArgs) {
    logging::init();
    cli::run_command(
        Command::Stats {
            format: cli::OutputFormat::Text,
        },
        input,
    );
}
