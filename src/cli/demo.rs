use std::{fs, path::PathBuf};

use chrono::{DateTime, Utc};
use clap::Parser;
use ev_battery_health::{Analyzer, demo::mock_diagnostic, ingest::RawDiagnostic, prelude::*};

use crate::cli::{config::ConfigArgs, output::OutputArgs};

#[derive(Parser)]
pub struct DemoArgs {
    /// Generate the snapshot as of this RFC 3339 timestamp instead of the current time.
    #[clap(long)]
    now: Option<DateTime<Utc>>,

    /// Also write the generated payload to this path, suitable for `analyze`.
    #[clap(long)]
    dump: Option<PathBuf>,

    #[clap(flatten)]
    config: ConfigArgs,

    #[clap(flatten)]
    output: OutputArgs,
}

impl DemoArgs {
    #[instrument(skip_all)]
    pub fn run(&self) -> Result {
        let analyzer = Analyzer::new(self.config.load()?)?;
        let now = self.now.unwrap_or_else(Utc::now);
        let diagnostic = mock_diagnostic(now);
        if let Some(path) = &self.dump {
            let payload = serde_json::to_string_pretty(&RawDiagnostic::from(&diagnostic))?;
            fs::write(path, payload)
                .with_context(|| format!("failed to write `{}`", path.display()))?;
            info!(path = %path.display(), "dumped the payload");
        }
        self.output.print(&analyzer.analyze(&diagnostic, now))
    }
}
