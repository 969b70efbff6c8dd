use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Config directory not found at {0}. Run 'dental-report init' to create it.")]
    ConfigNotFound(PathBuf),

    #[error("Config file not found: {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Bundle file not found: {0}")]
    BundleNotFound(PathBuf),

    #[error("Failed to parse bundle {path}: {source}")]
    BundleParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Aggregate bundle is missing the '{0}' section")]
    MissingSection(&'static str),

    #[error("Invalid color '{value}' for style.{field}. Expected '#RRGGBB'.")]
    InvalidColor { field: &'static str, value: String },

    #[error("Invalid value {value} for style.{field}. Expected a number greater than {min}.")]
    InvalidStyle { field: String, value: f64, min: f64 },

    #[error("Invalid format '{0}'. Use 'xlsx', 'pdf' or 'both'.")]
    InvalidFormat(String),

    #[error("Failed to write spreadsheet: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    #[error("Failed to write PDF: {0}")]
    Pdf(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{failed} of {requested} export(s) failed")]
    ExportFailed { failed: usize, requested: usize },
}

pub type Result<T> = std::result::Result<T, ReportError>;
