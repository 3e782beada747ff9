use std::path::{Path, PathBuf};

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_PICK_COLUMN: &str = "Pick";
pub const DEFAULT_VALUE_COLUMN: &str = "DrAV";

/// Command-line flags. Anything given here overrides the config file.
#[derive(Parser, Debug, Default)]
#[command(name = "drav-analysis")]
#[command(about = "Expected DrAV per draft pick: summary tables, range buckets and a trendline")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// Input spreadsheet (.xlsx, .xls, .xlsm, .ods) or .csv file
    pub input: Option<PathBuf>,

    /// Output workbook path (defaults to <input>_analysis.xlsx)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// JSON config file with the same keys as the flags
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Skip the chart window
    #[arg(long)]
    pub headless: bool,

    /// Worksheet to read (defaults to the first sheet)
    #[arg(long)]
    pub sheet: Option<String>,

    /// Name of the draft pick column
    #[arg(long)]
    pub pick_column: Option<String>,

    /// Name of the outcome metric column
    #[arg(long)]
    pub value_column: Option<String>,

    /// Also dump the full report as JSON
    #[arg(long)]
    pub json: Option<PathBuf>,
}

/// Settings for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub input_path: PathBuf,
    pub output_path: Option<PathBuf>,
    pub headless: bool,
    pub sheet: Option<String>,
    pub pick_column: String,
    pub value_column: String,
    pub json_path: Option<PathBuf>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::new(),
            output_path: None,
            headless: false,
            sheet: None,
            pick_column: DEFAULT_PICK_COLUMN.to_string(),
            value_column: DEFAULT_VALUE_COLUMN.to_string(),
            json_path: None,
        }
    }
}

#[cfg(test)]
impl AnalysisConfig {
    pub fn new(input_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            ..Self::default()
        }
    }
}

impl AnalysisConfig {
    /// Read a JSON config file. Missing keys fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Build the run config: defaults, then the config file, then flags.
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(input) = cli.input {
            config.input_path = input;
        }
        if cli.output.is_some() {
            config.output_path = cli.output;
        }
        if cli.headless {
            config.headless = true;
        }
        if cli.sheet.is_some() {
            config.sheet = cli.sheet;
        }
        if let Some(col) = cli.pick_column {
            config.pick_column = col;
        }
        if let Some(col) = cli.value_column {
            config.value_column = col;
        }
        if cli.json.is_some() {
            config.json_path = cli.json;
        }

        if config.input_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingInput);
        }
        Ok(config)
    }

    /// Output workbook path, derived from the input name when not set.
    pub fn resolved_output_path(&self) -> PathBuf {
        if let Some(path) = &self.output_path {
            return path.clone();
        }
        let stem = self
            .input_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("draft");
        self.input_path
            .with_file_name(format!("{stem}_analysis.xlsx"))
    }
}
