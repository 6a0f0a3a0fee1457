//! CLI for the team formation API

pub mod serve;

use clap::{Parser, Subcommand};

/// TeamUp API - waiting pool and consensus-driven team formation
#[derive(Parser)]
#[command(name = "teamup-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server (default)
    Serve,
}
