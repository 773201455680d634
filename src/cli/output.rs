use clap::Parser;
use ev_battery_health::{model::BatteryHealthReport, prelude::*};

use crate::tables::{build_anomalies_table, build_report_table};

#[derive(Parser)]
pub struct OutputArgs {
    #[clap(long, env = "OUTPUT_FORMAT", default_value = "table")]
    format: OutputFormat,
}

impl OutputArgs {
    pub fn print(&self, report: &BatteryHealthReport) -> Result {
        match self.format {
            OutputFormat::Table => {
                println!("{}", build_report_table(report));
                if report.anomalies.is_empty() {
                    println!("No anomalies detected");
                } else {
                    println!("{}", build_anomalies_table(&report.anomalies));
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(report)?);
            }
        }
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables.
    Table,

    /// Pretty-printed JSON report.
    Json,
}
