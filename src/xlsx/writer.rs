use log::debug;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet};

use crate::config::ReportStyle;
use crate::error::Result;
use crate::xlsx::sheet::{Cell, RowKind, Sheet, COLUMNS};

struct Formats {
    title: Format,
    subtitle: Format,
    heading: Format,
    plain: Format,
    section: Format,
    header: Format,
    data: Format,
    striped: Format,
    amount: Format,
    striped_amount: Format,
}

/// Excel number format with the currency symbol as a quoted literal
fn amount_format(currency_symbol: &str) -> String {
    format!("\"{}\"#,##0.00", currency_symbol.replace('"', ""))
}

impl Formats {
    fn new(style: &ReportStyle, currency_symbol: &str) -> Self {
        let primary = Color::RGB(style.primary.to_u32());
        let header_text = Color::RGB(style.header_text.to_u32());
        let text = Color::RGB(style.text.to_u32());

        let stripe = Color::RGB(style.stripe.to_u32());
        let data = Format::new()
            .set_font_color(text)
            .set_border(FormatBorder::Thin);
        let amount = data.clone().set_num_format(amount_format(currency_symbol));

        Self {
            title: Format::new()
                .set_bold()
                .set_font_size(16)
                .set_font_color(header_text)
                .set_background_color(primary)
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter),
            subtitle: Format::new()
                .set_italic()
                .set_font_color(text)
                .set_align(FormatAlign::Center),
            heading: Format::new().set_bold().set_font_color(text),
            plain: Format::new().set_font_color(text),
            section: Format::new()
                .set_bold()
                .set_font_size(13)
                .set_font_color(primary),
            header: Format::new()
                .set_bold()
                .set_font_color(header_text)
                .set_background_color(primary)
                .set_border(FormatBorder::Thin)
                .set_align(FormatAlign::Center),
            striped: data.clone().set_background_color(stripe),
            striped_amount: amount.clone().set_background_color(stripe),
            data,
            amount,
        }
    }
}

/// Serialize a laid-out sheet into an Office Open XML workbook
pub fn write_workbook(sheet: &Sheet, style: &ReportStyle) -> Result<Vec<u8>> {
    let formats = Formats::new(style, &sheet.currency_symbol);
    let mut workbook = Workbook::new();
    let mut worksheet = Worksheet::new();

    worksheet.set_name(&sheet.name)?;
    for (col, width) in sheet.column_widths.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }

    let mut stripe = false;
    for row in &sheet.rows {
        if row.kind.is_merged() {
            let format = match row.kind {
                RowKind::Title => &formats.title,
                RowKind::Subtitle => &formats.subtitle,
                RowKind::FiltersHeading => &formats.heading,
                RowKind::SectionTitle(_) => &formats.section,
                _ => &formats.plain,
            };
            let text = row.cells.first().and_then(Cell::as_text).unwrap_or_default();
            worksheet.merge_range(row.row, 0, row.row, COLUMNS - 1, text, format)?;
            if row.kind == RowKind::Title {
                worksheet.set_row_height(row.row, 28)?;
            }
            continue;
        }

        let (format, amount) = match row.kind {
            RowKind::Header(_) => {
                stripe = false;
                (&formats.header, &formats.header)
            }
            _ => {
                stripe = !stripe;
                if stripe {
                    (&formats.data, &formats.amount)
                } else {
                    (&formats.striped, &formats.striped_amount)
                }
            }
        };
        for (col, cell) in row.cells.iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Text(value) => {
                    worksheet.write_string_with_format(row.row, col, value, format)?;
                }
                Cell::Count(value) => {
                    worksheet.write_number_with_format(row.row, col, *value as f64, format)?;
                }
                Cell::Amount(value) => {
                    worksheet.write_number_with_format(row.row, col, *value, amount)?;
                }
            }
        }
    }

    workbook.push_worksheet(worksheet);
    let buffer = workbook.save_to_buffer()?;
    debug!("serialized workbook ({} bytes)", buffer.len());

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{ReportBundle, ReportContext, TreatmentEntry};
    use crate::xlsx::build_sheet;

    #[test]
    fn writes_zip_container() {
        let ctx = ReportContext::new("Clínica", "05/03/2025");
        let bundle = ReportBundle {
            treatments: vec![TreatmentEntry {
                name: "Resina".into(),
                count: 3,
                revenue: 540.0,
            }],
            ..ReportBundle::default()
        };
        let sheet = build_sheet(&bundle, &ctx);
        let bytes = write_workbook(&sheet, &ctx.style).unwrap();
        assert!(bytes.len() > 100);
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn amount_format_quotes_the_symbol() {
        assert_eq!(amount_format("$"), "\"$\"#,##0.00");
        assert_eq!(amount_format("S/"), "\"S/\"#,##0.00");
    }
}
