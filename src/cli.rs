//! Command-line interface definitions.

use crate::domain::SolverBackend;
use crate::infrastructure::Overrides;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// lineupopt - Pick the best nine-player lineup under a payroll cap.
///
/// Flags left out fall back to the config file, then to built-in defaults.
#[derive(Parser, Debug)]
#[command(name = "lineupopt")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Player CSV file [default: data.csv]
    #[arg(long, value_name = "PATH")]
    pub data_csv: Option<PathBuf>,

    /// Season to build the lineup from [default: 2002]
    #[arg(long)]
    pub year: Option<u16>,

    /// Payroll cap in millions of dollars [default: 19]
    #[arg(long, value_name = "MILLIONS")]
    pub payroll: Option<f64>,

    /// Statistic to maximize, e.g. HR, RBI, SB [default: HR]
    #[arg(long, value_name = "CODE")]
    pub stat: Option<String>,

    /// Solver backend: auto, highs or cbc
    #[arg(long)]
    pub solver: Option<SolverBackend>,

    /// Stop the solver after this many seconds
    #[arg(long, value_name = "SECS")]
    pub time_limit: Option<f64>,

    /// Relative optimality gap at which the solver may stop
    #[arg(long, value_name = "REL")]
    pub gap: Option<f64>,

    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Print the seasons present in the dataset and exit
    #[arg(long)]
    pub list_years: bool,

    /// Show solver output
    #[arg(short, long)]
    pub verbose: bool,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            data_csv: self.data_csv.clone(),
            year: self.year,
            payroll: self.payroll,
            stat: self.stat.clone(),
            backend: self.solver,
            time_limit: self.time_limit,
            gap_tolerance: self.gap,
            verbose: self.verbose,
        }
    }
}
