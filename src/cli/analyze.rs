use std::{fs, path::PathBuf};

use chrono::{DateTime, Utc};
use clap::Parser;
use ev_battery_health::{Analyzer, ingest, prelude::*};

use crate::cli::{config::ConfigArgs, output::OutputArgs};

#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Diagnostic snapshot in JSON.
    path: PathBuf,

    /// Assess the health as of this RFC 3339 timestamp instead of the snapshot timestamp.
    #[clap(long, env = "ANALYSIS_TIME")]
    analysis_time: Option<DateTime<Utc>>,

    #[clap(flatten)]
    config: ConfigArgs,

    #[clap(flatten)]
    output: OutputArgs,
}

impl AnalyzeArgs {
    #[instrument(skip_all, fields(path = %self.path.display()))]
    pub fn run(&self) -> Result {
        let analyzer = Analyzer::new(self.config.load()?)?;
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read `{}`", self.path.display()))?;
        let diagnostic = ingest::from_json(&text)
            .with_context(|| format!("failed to ingest `{}`", self.path.display()))?;
        info!(
            vehicle_id = %diagnostic.vehicle_id,
            n_cells = diagnostic.cells.len(),
            n_events = diagnostic.charge_history.len(),
            "loaded the diagnostic",
        );
        let report =
            analyzer.analyze(&diagnostic, self.analysis_time.unwrap_or(diagnostic.timestamp));
        self.output.print(&report)
    }
}
