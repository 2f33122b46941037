mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{list, merge};

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    init_logging(cli.verbose);
    match &cli.command {
        Commands::Merge(args) => merge::run(&cli, args),
        Commands::List(args) => list::run(&cli, args),
    }
}

/// `-v` raises the default level; `RUST_LOG`, when set, wins.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> anyhow::Result<()> { run() }
