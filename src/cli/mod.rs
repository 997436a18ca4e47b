// src/cli/mod.rs
use clap::Parser;

pub mod commands;
pub mod menu;
pub mod handlers;

pub use commands::CliCommand;

#[derive(Parser, Debug)]
#[command(author, version, about = "Secure password generator with strength scoring", long_about = None)]
pub struct Args {
    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Seed the random source for reproducible output. Never use seeded
    /// passwords for real accounts.
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Command to execute; without one the interactive menu starts
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}
