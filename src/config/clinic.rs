use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::style::StyleSettings;

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub clinic: Clinic,
    pub report: ReportSettings,
    #[serde(default)]
    pub style: StyleSettings,
    /// Label overrides keyed by label id (e.g. "financial.collected")
    #[serde(default)]
    pub labels: HashMap<String, String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Clinic {
    pub name: String,
    #[serde(default)]
    pub tagline: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ReportSettings {
    pub currency_symbol: String,
    pub output_dir: String,
}
