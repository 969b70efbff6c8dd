pub mod bundle;
pub mod format;
pub mod sections;

pub use bundle::{
    AppointmentSummary, FilterDescriptor, FinancialSummary, PatientSummary, RawBundle,
    ReportBundle, TreatmentEntry,
};
pub use format::{export_filename, format_amount, format_currency, format_percent};
pub use sections::{assemble, filter_lines, Section, SectionId, TOP_TREATMENTS};

use crate::config::{Config, LabelKey, Labels, ReportStyle};
use crate::error::Result;

/// Everything a builder needs besides the data: branding, date, style and labels
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub clinic_name: String,
    pub tagline: Option<String>,
    /// Generation date as displayed, e.g. "05/03/2025"
    pub generated_on: String,
    pub currency_symbol: String,
    pub style: ReportStyle,
    pub labels: Labels,
}

impl ReportContext {
    /// Context with default style, labels and "$" currency
    pub fn new(clinic_name: &str, generated_on: &str) -> Self {
        Self {
            clinic_name: clinic_name.to_string(),
            tagline: None,
            generated_on: generated_on.to_string(),
            currency_symbol: "$".to_string(),
            style: ReportStyle::default(),
            labels: Labels::new(),
        }
    }

    pub fn from_config(config: &Config, generated_on: &str) -> Result<Self> {
        Ok(Self {
            clinic_name: config.clinic.name.clone(),
            tagline: config.clinic.tagline.clone(),
            generated_on: generated_on.to_string(),
            currency_symbol: config.report.currency_symbol.clone(),
            style: ReportStyle::from_settings(&config.style)?,
            labels: Labels::with_overrides(&config.labels),
        })
    }

    /// "Generado el 05/03/2025"
    pub fn generated_line(&self) -> String {
        format!(
            "{} {}",
            self.labels.get(LabelKey::GeneratedOn),
            self.generated_on
        )
    }
}
