use log::debug;

use crate::config::LabelKey;
use crate::report::{assemble, filter_lines, ReportBundle, ReportContext, Section, SectionId};

/// Number of grid columns used by the layout (A-C)
pub const COLUMNS: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Title,
    Subtitle,
    FiltersHeading,
    Filter,
    SectionTitle(SectionId),
    Header(SectionId),
    Data(SectionId),
}

impl RowKind {
    /// Rows whose single value spans every column
    pub fn is_merged(self) -> bool {
        matches!(
            self,
            RowKind::Title
                | RowKind::Subtitle
                | RowKind::FiltersHeading
                | RowKind::Filter
                | RowKind::SectionTitle(_)
        )
    }
}

/// Cell value. Counts and amounts stay numeric so the workbook can total them.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Count(u64),
    Amount(f64),
}

impl Cell {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    /// 0-based row index in the worksheet
    pub row: u32,
    pub kind: RowKind,
    pub cells: Vec<Cell>,
}

/// In-memory single-sheet layout, ready for [`write_workbook`](super::write_workbook)
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub currency_symbol: String,
    pub column_widths: [f64; 3],
    pub rows: Vec<SheetRow>,
    next_row: u32,
}

impl Sheet {
    fn new(name: &str, currency_symbol: &str, column_widths: [f64; 3]) -> Self {
        Self {
            name: name.to_string(),
            currency_symbol: currency_symbol.to_string(),
            column_widths,
            rows: Vec::new(),
            next_row: 0,
        }
    }

    fn push(&mut self, kind: RowKind, cells: Vec<Cell>) {
        self.rows.push(SheetRow {
            row: self.next_row,
            kind,
            cells,
        });
        self.next_row += 1;
    }

    fn skip_row(&mut self) {
        self.next_row += 1;
    }

    pub fn rows_of(&self, kind: RowKind) -> impl Iterator<Item = &SheetRow> {
        self.rows.iter().filter(move |r| r.kind == kind)
    }

    pub fn data_rows(&self, section: SectionId) -> usize {
        self.rows_of(RowKind::Data(section)).count()
    }

    pub fn has_section(&self, section: SectionId) -> bool {
        self.rows_of(RowKind::SectionTitle(section)).next().is_some()
    }

    pub fn filter_lines(&self) -> Vec<&str> {
        self.rows_of(RowKind::Filter)
            .filter_map(|r| r.cells.first().and_then(Cell::as_text))
            .collect()
    }
}

fn text(value: impl Into<String>) -> Cell {
    Cell::Text(value.into())
}

fn label(row: &[String]) -> Cell {
    text(row[0].clone())
}

/// Data rows with the value columns as numbers. Labels and the attendance rate stay text.
fn data_cells(section: &Section, bundle: &ReportBundle) -> Vec<Vec<Cell>> {
    match section.id {
        SectionId::Financial => {
            let f = &bundle.financial;
            let values = [
                Cell::Amount(f.total_collected),
                Cell::Amount(f.total_receivable),
                Cell::Amount(f.period_profit),
                Cell::Amount(f.average_payment),
                Cell::Count(f.payment_count),
            ];
            section
                .rows
                .iter()
                .zip(values)
                .map(|(row, value)| vec![label(row), value])
                .collect()
        }
        SectionId::Appointments => {
            let (a, p) = (&bundle.appointments, &bundle.patients);
            let counts = [
                Some(a.total_scheduled),
                Some(a.attended),
                Some(a.cancelled),
                None,
                Some(p.active_patients),
                Some(p.new_patients),
            ];
            section
                .rows
                .iter()
                .zip(counts)
                .map(|(row, count)| {
                    let value = count.map_or_else(|| text(row[1].clone()), Cell::Count);
                    vec![label(row), value]
                })
                .collect()
        }
        SectionId::Treatments => section
            .rows
            .iter()
            .zip(&bundle.treatments)
            .map(|(row, t)| vec![label(row), Cell::Count(t.count), Cell::Amount(t.revenue)])
            .collect(),
    }
}

/// Lay the report out as a single stacked grid
pub fn build_sheet(bundle: &ReportBundle, ctx: &ReportContext) -> Sheet {
    let mut sheet = Sheet::new("Reporte", &ctx.currency_symbol, ctx.style.column_widths);

    sheet.push(
        RowKind::Title,
        vec![text(ctx.labels.get(LabelKey::ReportTitle))],
    );
    sheet.push(
        RowKind::Subtitle,
        vec![text(format!("{} · {}", ctx.clinic_name, ctx.generated_line()))],
    );
    sheet.skip_row();

    let filters = filter_lines(&bundle.filters, ctx);
    if !filters.is_empty() {
        sheet.push(
            RowKind::FiltersHeading,
            vec![text(ctx.labels.get(LabelKey::FiltersHeading))],
        );
        for line in filters {
            sheet.push(RowKind::Filter, vec![text(line)]);
        }
        sheet.skip_row();
    }

    for section in assemble(bundle, ctx) {
        let rows = data_cells(&section, bundle);
        sheet.push(RowKind::SectionTitle(section.id), vec![text(section.title)]);
        sheet.push(
            RowKind::Header(section.id),
            section.header.into_iter().map(Cell::from).collect(),
        );
        for row in rows {
            sheet.push(RowKind::Data(section.id), row);
        }
        sheet.skip_row();
    }

    debug!("laid out sheet with {} rows", sheet.rows.len());
    sheet
}
