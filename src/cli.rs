//! CLI argument parsing and dispatch

use anyhow::Result;
use clap::Parser;
use env_logger::Env;

use scaffolder::output::OutputConfig;

use crate::commands;

/// Scaffolder - Create a new project from a template repository and add-ons
#[derive(Parser, Debug)]
#[command(name = "scaffolder")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    create: commands::create::CreateArgs,

    /// Colorize output (always, never, auto)
    #[arg(
        long,
        global = true,
        value_name = "WHEN",
        default_value = "auto",
        value_parser = ["always", "never", "auto"]
    )]
    color: String,

    /// Set log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        let output = OutputConfig::from_env_and_flag(&self.color);
        output.apply();

        if self.create.list_addons {
            commands::list::execute(self.create.config.as_deref(), &output)
        } else {
            commands::create::execute(self.create, &output)
        }
    }
}

fn init_logging(level: &str) {
    // Ignore a second initialization (only possible when embedded in tests).
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}
