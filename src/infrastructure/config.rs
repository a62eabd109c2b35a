// Run configuration: optional TOML file merged with command-line overrides.

use crate::application::LineupRequest;
use crate::domain::{SolverBackend, SolverConfig, Stat};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_DATA_CSV: &str = "data.csv";
pub const DEFAULT_YEAR: u16 = 2002;
pub const DEFAULT_PAYROLL: f64 = 19.0;
pub const DEFAULT_STAT: Stat = Stat::HomeRuns;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.to_string(),
        message: message.into(),
    }
}

// ---------------------------------------------------------------------------
// File structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub data: DataSection,
    pub lineup: LineupSection,
    pub solver: SolverSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataSection {
    pub csv: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LineupSection {
    pub year: Option<u16>,
    pub payroll: Option<f64>,
    pub stat: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverSection {
    pub backend: Option<SolverBackend>,
    pub time_limit: Option<f64>,
    pub gap_tolerance: Option<f64>,
    pub verbose: Option<bool>,
}

/// Values given on the command line; each one wins over the file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub data_csv: Option<PathBuf>,
    pub year: Option<u16>,
    pub payroll: Option<f64>,
    pub stat: Option<String>,
    pub backend: Option<SolverBackend>,
    pub time_limit: Option<f64>,
    pub gap_tolerance: Option<f64>,
    pub verbose: bool,
}

/// Fully resolved and validated settings for one run
#[derive(Debug, Clone)]
pub struct Settings {
    pub data_csv: PathBuf,
    pub request: LineupRequest,
    pub solver: SolverConfig,
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl FileConfig {
    pub fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.to_path_buf(),
        })?;
        Self::parse(&contents, path)
    }

    /// Merge with `overrides`, fill defaults and validate.
    pub fn resolve(self, overrides: Overrides) -> Result<Settings, ConfigError> {
        let data_csv = overrides
            .data_csv
            .or(self.data.csv)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_CSV));

        let year = overrides.year.or(self.lineup.year).unwrap_or(DEFAULT_YEAR);

        let payroll = overrides
            .payroll
            .or(self.lineup.payroll)
            .unwrap_or(DEFAULT_PAYROLL);
        if !payroll.is_finite() || payroll <= 0.0 {
            return Err(invalid(
                "lineup.payroll",
                format!("must be a positive number of millions, got {}", payroll),
            ));
        }

        let stat = match overrides.stat.or(self.lineup.stat) {
            Some(code) => code
                .parse::<Stat>()
                .map_err(|e| invalid("lineup.stat", e))?,
            None => DEFAULT_STAT,
        };

        let time_limit = overrides.time_limit.or(self.solver.time_limit);
        if let Some(limit) = time_limit {
            if !limit.is_finite() || limit <= 0.0 {
                return Err(invalid(
                    "solver.time_limit",
                    format!("must be a positive number of seconds, got {}", limit),
                ));
            }
        }

        let gap_tolerance = overrides.gap_tolerance.or(self.solver.gap_tolerance);
        if let Some(gap) = gap_tolerance {
            if !gap.is_finite() || gap < 0.0 {
                return Err(invalid(
                    "solver.gap_tolerance",
                    format!("must be zero or positive, got {}", gap),
                ));
            }
        }

        let solver = SolverConfig {
            backend: overrides
                .backend
                .or(self.solver.backend)
                .unwrap_or_default(),
            time_limit,
            gap_tolerance,
            verbose: overrides.verbose || self.solver.verbose.unwrap_or(false),
        };

        Ok(Settings {
            data_csv,
            request: LineupRequest::new(year, payroll, stat),
            solver,
        })
    }
}
