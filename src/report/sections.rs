use crate::config::LabelKey;
use crate::report::bundle::{FilterDescriptor, ReportBundle};
use crate::report::format::{format_currency, format_percent};
use crate::report::ReportContext;

/// Maximum number of ranked treatments rendered in any report
pub const TOP_TREATMENTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionId {
    Financial,
    Appointments,
    Treatments,
}

/// A titled grid shared by the spreadsheet and PDF layouts
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: SectionId,
    pub title: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Section {
    pub fn columns(&self) -> usize {
        self.header.len()
    }
}

/// Sections in their fixed order. Top treatments is left out when the ranking is empty.
pub fn assemble(bundle: &ReportBundle, ctx: &ReportContext) -> Vec<Section> {
    let mut sections = vec![financial(bundle, ctx), appointments(bundle, ctx)];
    if !bundle.treatments.is_empty() {
        sections.push(treatments(bundle, ctx));
    }
    sections
}

fn financial(bundle: &ReportBundle, ctx: &ReportContext) -> Section {
    let labels = &ctx.labels;
    let f = &bundle.financial;
    let money = |v: f64| format_currency(&ctx.currency_symbol, v);

    let rows = [
        (LabelKey::Collected, money(f.total_collected)),
        (LabelKey::Receivable, money(f.total_receivable)),
        (LabelKey::PeriodProfit, money(f.period_profit)),
        (LabelKey::AveragePayment, money(f.average_payment)),
        (LabelKey::PaymentCount, f.payment_count.to_string()),
    ];

    Section {
        id: SectionId::Financial,
        title: labels.get(LabelKey::FinancialTitle).to_string(),
        header: vec![
            labels.get(LabelKey::ConceptHeader).to_string(),
            labels.get(LabelKey::AmountHeader).to_string(),
        ],
        rows: rows
            .into_iter()
            .map(|(key, value)| vec![labels.get(key).to_string(), value])
            .collect(),
    }
}

fn appointments(bundle: &ReportBundle, ctx: &ReportContext) -> Section {
    let labels = &ctx.labels;
    let a = &bundle.appointments;
    let p = &bundle.patients;

    let rows = [
        (LabelKey::Scheduled, a.total_scheduled.to_string()),
        (LabelKey::Attended, a.attended.to_string()),
        (LabelKey::Cancelled, a.cancelled.to_string()),
        (LabelKey::AttendanceRate, format_percent(a.attendance_rate)),
        (LabelKey::ActivePatients, p.active_patients.to_string()),
        (LabelKey::NewPatients, p.new_patients.to_string()),
    ];

    Section {
        id: SectionId::Appointments,
        title: labels.get(LabelKey::AppointmentsTitle).to_string(),
        header: vec![
            labels.get(LabelKey::MetricHeader).to_string(),
            labels.get(LabelKey::ValueHeader).to_string(),
        ],
        rows: rows
            .into_iter()
            .map(|(key, value)| vec![labels.get(key).to_string(), value])
            .collect(),
    }
}

fn treatments(bundle: &ReportBundle, ctx: &ReportContext) -> Section {
    let labels = &ctx.labels;

    Section {
        id: SectionId::Treatments,
        title: labels.get(LabelKey::TreatmentsTitle).to_string(),
        header: vec![
            labels.get(LabelKey::TreatmentHeader).to_string(),
            labels.get(LabelKey::CountHeader).to_string(),
            labels.get(LabelKey::RevenueHeader).to_string(),
        ],
        rows: bundle
            .treatments
            .iter()
            .take(TOP_TREATMENTS)
            .map(|t| {
                vec![
                    t.name.clone(),
                    t.count.to_string(),
                    format_currency(&ctx.currency_symbol, t.revenue),
                ]
            })
            .collect(),
    }
}

/// "Label: value" lines for every present filter, in start/end/dentist order
pub fn filter_lines(filters: &FilterDescriptor, ctx: &ReportContext) -> Vec<String> {
    [
        (LabelKey::FilterStartDate, &filters.start_date),
        (LabelKey::FilterEndDate, &filters.end_date),
        (LabelKey::FilterDentist, &filters.dentist_id),
    ]
    .into_iter()
    .filter_map(|(key, value)| {
        value
            .as_ref()
            .map(|v| format!("{}: {}", ctx.labels.get(key), v))
    })
    .collect()
}
