use std::{fs, path::PathBuf};

use clap::Parser;
use ev_battery_health::{config::AnalyzerConfig, prelude::*};

#[derive(Parser)]
pub struct ConfigArgs {
    /// Analyzer configuration in TOML. Built-in defaults apply when omitted.
    #[clap(long = "config", env = "ANALYZER_CONFIG_PATH")]
    path: Option<PathBuf>,
}

impl ConfigArgs {
    #[instrument(skip_all)]
    pub fn load(&self) -> Result<AnalyzerConfig> {
        let Some(path) = &self.path else {
            debug!("using the default configuration");
            return Ok(AnalyzerConfig::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display()))?;
        let config = AnalyzerConfig::from_toml(&text)
            .with_context(|| format!("invalid configuration in `{}`", path.display()))?;
        info!(path = %path.display(), "loaded the configuration");
        Ok(config)
    }
}

#[derive(Parser)]
pub struct PrintConfigArgs {
    #[clap(flatten)]
    config: ConfigArgs,
}

impl PrintConfigArgs {
    pub fn run(&self) -> Result {
        print!("{}", self.config.load()?.to_toml()?);
        Ok(())
    }
}
