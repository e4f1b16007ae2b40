mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use std::process;

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match &cli.command {
        Command::Migrate(args) => commands::migrate::run(&cli, args),
    };

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}
