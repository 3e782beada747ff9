//! Error types for each pipeline stage.
//!
//! Every error is fatal for the run; invalid rows are not errors, the cleaner
//! drops them.

use std::path::PathBuf;
use thiserror::Error;

/// Failure reading the input table.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Cannot read file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot open spreadsheet: {0}")]
    Open(#[from] calamine::Error),

    #[error("Cannot parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unsupported file format: .{0}")]
    UnsupportedFormat(String),

    #[error("No sheets found")]
    NoSheets,

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    #[error("Required column not found in the first {scanned} rows: {column}")]
    MissingColumn { column: String, scanned: usize },
}

/// Failure fitting the trend polynomial.
#[derive(Error, Debug, PartialEq)]
pub enum FitError {
    #[error("Insufficient data: degree {degree} fit needs at least {expected} distinct picks, got {actual}")]
    InsufficientPoints {
        degree: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Least-squares solve failed: {0}")]
    Solve(String),
}

/// Failure writing an output artifact.
#[derive(Error, Debug)]
pub enum WriteError {
    #[error("Cannot write workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Cannot serialize report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure reading the optional config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("No input file given")]
    MissingInput,
}

/// Any error that aborts an analysis run.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Fit(#[from] FitError),

    #[error(transparent)]
    Write(#[from] WriteError),

    #[error("Cannot show chart: {0}")]
    Chart(#[from] eframe::Error),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
