//! CLI module for the Beacon Analytics API
//!
//! Provides subcommands for running the service:
//! - `serve`: run the collection API server

pub mod serve;

use clap::{Parser, Subcommand};

/// Beacon Analytics - multi-tenant event collection API
#[derive(Parser)]
#[command(name = "beacon-analytics-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server
    Serve,
}
