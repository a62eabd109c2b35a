// Infrastructure: CSV dataset, TOML configuration and output rendering

pub mod config;
pub mod dataset;
pub mod report;

pub use config::{ConfigError, FileConfig, Overrides, Settings};
pub use dataset::{Dataset, DatasetError};
pub use report::{render_json, render_text};
