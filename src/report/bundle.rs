use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::error::{ReportError, Result};

/// Aggregate bundle exactly as the provider hands it over: every field may be absent
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBundle {
    #[serde(default, alias = "financiero")]
    pub financial: Option<RawFinancial>,
    #[serde(default, alias = "citas")]
    pub appointments: Option<RawAppointments>,
    #[serde(default, alias = "pacientes")]
    pub patients: Option<RawPatients>,
    #[serde(default, alias = "tratamientos")]
    pub treatments: Option<Vec<RawTreatment>>,
    #[serde(default, alias = "filtros")]
    pub filters: Option<FilterDescriptor>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFinancial {
    #[serde(default)]
    pub total_collected: Option<f64>,
    #[serde(default)]
    pub total_receivable: Option<f64>,
    #[serde(default)]
    pub period_profit: Option<f64>,
    #[serde(default)]
    pub average_payment: Option<f64>,
    #[serde(default)]
    pub payment_count: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAppointments {
    #[serde(default)]
    pub total_scheduled: Option<u64>,
    #[serde(default)]
    pub attended: Option<u64>,
    #[serde(default)]
    pub cancelled: Option<u64>,
    #[serde(default)]
    pub attendance_rate: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPatients {
    #[serde(default)]
    pub active_patients: Option<u64>,
    #[serde(default)]
    pub new_patients: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawTreatment {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub revenue: Option<f64>,
}

/// Free-form filter labels echoed into report headers
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterDescriptor {
    #[serde(default, deserialize_with = "filter_label")]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "filter_label")]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "filter_label")]
    pub dentist_id: Option<String>,
}

/// Accept any JSON scalar as a label; ids often arrive as numbers
fn filter_label<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "expected a filter label, found {other}"
        ))),
    }
}

impl FilterDescriptor {
    pub fn is_empty(&self) -> bool {
        self.start_date.is_none() && self.end_date.is_none() && self.dentist_id.is_none()
    }

    /// Fields set on `other` take precedence
    pub fn merged_with(&self, other: &FilterDescriptor) -> FilterDescriptor {
        FilterDescriptor {
            start_date: other.start_date.clone().or_else(|| self.start_date.clone()),
            end_date: other.end_date.clone().or_else(|| self.end_date.clone()),
            dentist_id: other.dentist_id.clone().or_else(|| self.dentist_id.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FinancialSummary {
    pub total_collected: f64,
    pub total_receivable: f64,
    pub period_profit: f64,
    pub average_payment: f64,
    pub payment_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppointmentSummary {
    pub total_scheduled: u64,
    pub attended: u64,
    pub cancelled: u64,
    pub attendance_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientSummary {
    pub active_patients: u64,
    pub new_patients: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TreatmentEntry {
    pub name: String,
    pub count: u64,
    pub revenue: f64,
}

/// Validated bundle with every number filled in
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportBundle {
    pub financial: FinancialSummary,
    pub appointments: AppointmentSummary,
    pub patients: PatientSummary,
    pub treatments: Vec<TreatmentEntry>,
    pub filters: FilterDescriptor,
}

fn amount(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

impl RawBundle {
    /// Read a bundle from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ReportError::BundleNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| ReportError::BundleParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Fill every missing number with zero. The three summary objects are required.
    pub fn validate(&self) -> Result<ReportBundle> {
        let financial = self
            .financial
            .as_ref()
            .ok_or(ReportError::MissingSection("financial"))?;
        let appointments = self
            .appointments
            .as_ref()
            .ok_or(ReportError::MissingSection("appointments"))?;
        let patients = self
            .patients
            .as_ref()
            .ok_or(ReportError::MissingSection("patients"))?;

        let treatments = self
            .treatments
            .iter()
            .flatten()
            .map(|t| TreatmentEntry {
                name: t.name.clone().unwrap_or_default(),
                count: t.count.unwrap_or(0),
                revenue: amount(t.revenue),
            })
            .collect();

        Ok(ReportBundle {
            financial: FinancialSummary {
                total_collected: amount(financial.total_collected),
                total_receivable: amount(financial.total_receivable),
                period_profit: amount(financial.period_profit),
                average_payment: amount(financial.average_payment),
                payment_count: financial.payment_count.unwrap_or(0),
            },
            appointments: AppointmentSummary {
                total_scheduled: appointments.total_scheduled.unwrap_or(0),
                attended: appointments.attended.unwrap_or(0),
                cancelled: appointments.cancelled.unwrap_or(0),
                attendance_rate: amount(appointments.attendance_rate),
            },
            patients: PatientSummary {
                active_patients: patients.active_patients.unwrap_or(0),
                new_patients: patients.new_patients.unwrap_or(0),
            },
            treatments,
            filters: self.filters.clone().unwrap_or_default(),
        })
    }
}
