//! # Scaffolder CLI
//!
//! This is the binary entry point for the `scaffolder` command-line tool.
//!
//! Its responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Setting up logging and console output.
//! - Driving the library's scaffolding workflow and printing the report.
//!
//! Errors are returned from `main`, so they are printed to stderr and the
//! process exits with status 1. Usage errors are reported by clap with
//! status 2.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
