//! Command-line interface

pub mod serve;

use clap::{Parser, Subcommand};

/// Techlog Article API
#[derive(Parser)]
#[command(name = "techlog-api", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,
}
