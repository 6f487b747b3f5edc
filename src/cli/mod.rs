//! CLI module for the provision gate
//!
//! Provides the `serve` subcommand running the gate in front of the
//! provisioning backend.

pub mod serve;

use clap::{Parser, Subcommand};

/// Provision Gate - authorization gate for the provisioning backend
#[derive(Parser)]
#[command(name = "provision-gate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the gate
    Serve(serve::ServeArgs),
}
