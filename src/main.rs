mod cli;
mod tables;

use clap::{Parser, crate_version};
use ev_battery_health::prelude::*;

use crate::cli::{Args, Command};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().with_writer(std::io::stderr).init();
    info!(version = crate_version!(), "starting…");

    match Args::parse().command {
        Command::Analyze(args) => args.run()?,
        Command::Demo(args) => args.run()?,
        Command::Config(args) => args.run()?,
    }

    info!("done!");
    Ok(())
}
