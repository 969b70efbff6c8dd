use std::collections::HashMap;

use log::warn;

/// Identifier of every human-visible string in the reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelKey {
    ReportTitle,
    GeneratedOn,
    FiltersHeading,
    FilterStartDate,
    FilterEndDate,
    FilterDentist,
    ConceptHeader,
    AmountHeader,
    MetricHeader,
    ValueHeader,
    FinancialTitle,
    Collected,
    Receivable,
    PeriodProfit,
    AveragePayment,
    PaymentCount,
    AppointmentsTitle,
    Scheduled,
    Attended,
    Cancelled,
    AttendanceRate,
    ActivePatients,
    NewPatients,
    TreatmentsTitle,
    TreatmentHeader,
    CountHeader,
    RevenueHeader,
    PageFooter,
    SuccessTitle,
    SpreadsheetReady,
    DocumentReady,
    ErrorTitle,
    ErrorMessage,
    CloseAction,
}

impl LabelKey {
    pub const ALL: [LabelKey; 34] = [
        LabelKey::ReportTitle,
        LabelKey::GeneratedOn,
        LabelKey::FiltersHeading,
        LabelKey::FilterStartDate,
        LabelKey::FilterEndDate,
        LabelKey::FilterDentist,
        LabelKey::ConceptHeader,
        LabelKey::AmountHeader,
        LabelKey::MetricHeader,
        LabelKey::ValueHeader,
        LabelKey::FinancialTitle,
        LabelKey::Collected,
        LabelKey::Receivable,
        LabelKey::PeriodProfit,
        LabelKey::AveragePayment,
        LabelKey::PaymentCount,
        LabelKey::AppointmentsTitle,
        LabelKey::Scheduled,
        LabelKey::Attended,
        LabelKey::Cancelled,
        LabelKey::AttendanceRate,
        LabelKey::ActivePatients,
        LabelKey::NewPatients,
        LabelKey::TreatmentsTitle,
        LabelKey::TreatmentHeader,
        LabelKey::CountHeader,
        LabelKey::RevenueHeader,
        LabelKey::PageFooter,
        LabelKey::SuccessTitle,
        LabelKey::SpreadsheetReady,
        LabelKey::DocumentReady,
        LabelKey::ErrorTitle,
        LabelKey::ErrorMessage,
        LabelKey::CloseAction,
    ];

    /// Stable id used in the `[labels]` config table
    pub fn id(self) -> &'static str {
        match self {
            LabelKey::ReportTitle => "report.title",
            LabelKey::GeneratedOn => "report.generated_on",
            LabelKey::FiltersHeading => "filters.heading",
            LabelKey::FilterStartDate => "filters.start_date",
            LabelKey::FilterEndDate => "filters.end_date",
            LabelKey::FilterDentist => "filters.dentist",
            LabelKey::ConceptHeader => "header.concept",
            LabelKey::AmountHeader => "header.amount",
            LabelKey::MetricHeader => "header.metric",
            LabelKey::ValueHeader => "header.value",
            LabelKey::FinancialTitle => "financial.title",
            LabelKey::Collected => "financial.collected",
            LabelKey::Receivable => "financial.receivable",
            LabelKey::PeriodProfit => "financial.period_profit",
            LabelKey::AveragePayment => "financial.average_payment",
            LabelKey::PaymentCount => "financial.payment_count",
            LabelKey::AppointmentsTitle => "appointments.title",
            LabelKey::Scheduled => "appointments.scheduled",
            LabelKey::Attended => "appointments.attended",
            LabelKey::Cancelled => "appointments.cancelled",
            LabelKey::AttendanceRate => "appointments.attendance_rate",
            LabelKey::ActivePatients => "patients.active",
            LabelKey::NewPatients => "patients.new",
            LabelKey::TreatmentsTitle => "treatments.title",
            LabelKey::TreatmentHeader => "treatments.header.name",
            LabelKey::CountHeader => "treatments.header.count",
            LabelKey::RevenueHeader => "treatments.header.revenue",
            LabelKey::PageFooter => "page.footer",
            LabelKey::SuccessTitle => "notify.success.title",
            LabelKey::SpreadsheetReady => "notify.success.xlsx",
            LabelKey::DocumentReady => "notify.success.pdf",
            LabelKey::ErrorTitle => "notify.error.title",
            LabelKey::ErrorMessage => "notify.error.message",
            LabelKey::CloseAction => "notify.close",
        }
    }

    fn default_text(self) -> &'static str {
        match self {
            LabelKey::ReportTitle => "Reporte General - Clínica Dental",
            LabelKey::GeneratedOn => "Generado el",
            LabelKey::FiltersHeading => "Filtros aplicados:",
            LabelKey::FilterStartDate => "Fecha inicio",
            LabelKey::FilterEndDate => "Fecha fin",
            LabelKey::FilterDentist => "Dentista",
            LabelKey::ConceptHeader => "Concepto",
            LabelKey::AmountHeader => "Monto",
            LabelKey::MetricHeader => "Métrica",
            LabelKey::ValueHeader => "Valor",
            LabelKey::FinancialTitle => "Resumen Financiero",
            LabelKey::Collected => "Dinero Cobrado",
            LabelKey::Receivable => "Dinero por Cobrar",
            LabelKey::PeriodProfit => "Ganancia del Período",
            LabelKey::AveragePayment => "Promedio por Pago",
            LabelKey::PaymentCount => "Total de Pagos",
            LabelKey::AppointmentsTitle => "Resumen de Citas",
            LabelKey::Scheduled => "Citas Programadas",
            LabelKey::Attended => "Citas Asistidas",
            LabelKey::Cancelled => "Citas Canceladas",
            LabelKey::AttendanceRate => "Tasa de Asistencia",
            LabelKey::ActivePatients => "Pacientes Activos",
            LabelKey::NewPatients => "Pacientes Nuevos",
            LabelKey::TreatmentsTitle => "Tratamientos Más Realizados",
            LabelKey::TreatmentHeader => "Tratamiento",
            LabelKey::CountHeader => "Cantidad",
            LabelKey::RevenueHeader => "Ingresos",
            LabelKey::PageFooter => "Página {page} de {total}",
            LabelKey::SuccessTitle => "¡Éxito!",
            LabelKey::SpreadsheetReady => "Reporte Excel generado correctamente",
            LabelKey::DocumentReady => "Reporte PDF generado correctamente",
            LabelKey::ErrorTitle => "Error",
            LabelKey::ErrorMessage => "No se pudo generar el reporte: {error}",
            LabelKey::CloseAction => "Cerrar",
        }
    }

    fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|key| key.id() == id)
    }
}

/// Label lookup table: built-in Spanish defaults plus configured overrides
#[derive(Debug, Clone, Default)]
pub struct Labels {
    overrides: HashMap<LabelKey, String>,
}

impl Labels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the `[labels]` config table; unknown ids are skipped
    pub fn with_overrides(table: &HashMap<String, String>) -> Self {
        let mut overrides = HashMap::new();
        for (id, text) in table {
            match LabelKey::from_id(id) {
                Some(key) => {
                    overrides.insert(key, text.clone());
                }
                None => warn!("ignoring unknown label id '{id}'"),
            }
        }
        Self { overrides }
    }

    pub fn get(&self, key: LabelKey) -> &str {
        self.overrides
            .get(&key)
            .map(String::as_str)
            .unwrap_or_else(|| key.default_text())
    }

    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }

    /// "Página {page} de {total}" with both placeholders filled in
    pub fn page_footer(&self, page: usize, total: usize) -> String {
        self.get(LabelKey::PageFooter)
            .replace("{page}", &page.to_string())
            .replace("{total}", &total.to_string())
    }

    pub fn error_message(&self, error: &str) -> String {
        self.get(LabelKey::ErrorMessage).replace("{error}", error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_spanish() {
        let labels = Labels::new();
        assert_eq!(labels.get(LabelKey::Collected), "Dinero Cobrado");
        assert_eq!(labels.get(LabelKey::PeriodProfit), "Ganancia del Período");
        assert_eq!(labels.page_footer(2, 3), "Página 2 de 3");
    }

    #[test]
    fn overrides_replace_defaults() {
        let mut table = HashMap::new();
        table.insert("financial.collected".to_string(), "Collected".to_string());
        table.insert("page.footer".to_string(), "Page {page} of {total}".to_string());
        table.insert("no.such.label".to_string(), "ignored".to_string());

        let labels = Labels::with_overrides(&table);
        assert_eq!(labels.get(LabelKey::Collected), "Collected");
        assert_eq!(labels.page_footer(1, 4), "Page 1 of 4");
        assert_eq!(labels.get(LabelKey::Receivable), "Dinero por Cobrar");
        assert_eq!(labels.override_count(), 2);
    }

    #[test]
    fn label_ids_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for key in LabelKey::ALL {
            assert!(seen.insert(key.id()), "duplicate id {}", key.id());
            assert_eq!(LabelKey::from_id(key.id()), Some(key));
        }
    }
}
