pub mod config;
pub mod error;
pub mod export;
pub mod pdf;
pub mod report;
pub mod xlsx;

pub use config::{Config, LabelKey, Labels, ReportStyle};
pub use error::{ReportError, Result};
pub use export::{ExportFormat, ExportOutcome, Exporter};
pub use report::{RawBundle, ReportBundle, ReportContext};
