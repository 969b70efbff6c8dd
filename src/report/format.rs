use crate::export::ExportFormat;

/// Fixed two-decimal rendering for report cells. Missing and non-finite values render "0.00".
pub fn format_amount(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => match format!("{:.2}", v) {
            s if s == "-0.00" => "0.00".to_string(),
            s => s,
        },
        _ => "0.00".to_string(),
    }
}

pub fn format_currency(symbol: &str, value: f64) -> String {
    format!("{}{}", symbol, format_amount(Some(value)))
}

/// Attendance rate as "<n>%", one decimal at most ("80%", "66.7%")
pub fn format_percent(rate: f64) -> String {
    if !rate.is_finite() {
        return "0%".to_string();
    }
    let rounded = (rate * 10.0).round() / 10.0;
    format!("{}%", rounded)
}

/// `Reporte_Dental_<date>.<ext>` with path separators in the date made filesystem-safe
pub fn export_filename(date_label: &str, format: ExportFormat) -> String {
    format!(
        "Reporte_Dental_{}.{}",
        date_label.replace('/', "-"),
        format.extension()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_amounts_render_zero() {
        assert_eq!(format_amount(None), "0.00");
        assert_eq!(format_amount(Some(f64::NAN)), "0.00");
        assert_eq!(format_amount(Some(f64::INFINITY)), "0.00");
    }

    #[test]
    fn amounts_have_two_decimals_without_grouping() {
        assert_eq!(format_amount(Some(0.0)), "0.00");
        assert_eq!(format_amount(Some(1500.5)), "1500.50");
        assert_eq!(format_amount(Some(1234567.891)), "1234567.89");
        assert_eq!(format_currency("$", 75.0), "$75.00");
    }

    #[test]
    fn tiny_negatives_do_not_render_negative_zero() {
        assert_eq!(format_amount(Some(-0.001)), "0.00");
        assert_eq!(format_amount(Some(-0.0)), "0.00");
        assert_eq!(format_amount(Some(-0.005001)), "-0.01");
        assert_eq!(format_currency("$", -0.004), "$0.00");
    }

    #[test]
    fn percent_drops_trailing_zero() {
        assert_eq!(format_percent(80.0), "80%");
        assert_eq!(format_percent(66.666), "66.7%");
        assert_eq!(format_percent(f64::NAN), "0%");
    }

    #[test]
    fn filename_replaces_slashes() {
        assert_eq!(
            export_filename("05/03/2025", ExportFormat::Xlsx),
            "Reporte_Dental_05-03-2025.xlsx"
        );
        assert_eq!(
            export_filename("05/03/2025", ExportFormat::Pdf),
            "Reporte_Dental_05-03-2025.pdf"
        );
    }
}
