mod analyze;
mod config;
mod demo;
mod output;

use clap::{Parser, Subcommand};

use crate::cli::{analyze::AnalyzeArgs, config::PrintConfigArgs, demo::DemoArgs};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Analyze a diagnostic snapshot stored as JSON.
    #[clap(name = "analyze")]
    Analyze(Box<AnalyzeArgs>),

    /// Analyze a generated three-year-old Model 3.
    #[clap(name = "demo")]
    Demo(Box<DemoArgs>),

    /// Print the effective analyzer configuration.
    #[clap(name = "config")]
    Config(PrintConfigArgs),
}
