use serde::{Deserialize, Serialize};

use crate::error::{ReportError, Result};

/// Raw `[style]` table as written in config.toml
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct StyleSettings {
    pub primary: String,
    pub header_text: String,
    pub stripe: String,
    pub text: String,
    pub column_widths: [f64; 3],
    pub page_width_mm: f64,
    pub page_height_mm: f64,
    pub row_height_mm: f64,
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            primary: "#2980B9".to_string(),
            header_text: "#FFFFFF".to_string(),
            stripe: "#EAF2F8".to_string(),
            text: "#333333".to_string(),
            column_widths: [35.0, 18.0, 18.0],
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            row_height_mm: 7.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse "#RRGGBB" (the leading '#' is optional)
    pub fn from_hex(value: &str) -> Option<Self> {
        let hex = value.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Packed 0xRRGGBB, as spreadsheet formats expect
    pub fn to_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Channels scaled to 0.0..=1.0, as PDF color operators expect
    pub fn to_unit(self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }
}

/// Smallest page side that still leaves room between the running header and the footer
const MIN_PAGE_MM: f64 = 50.0;

fn dimension(field: impl Into<String>, value: f64, min: f64) -> Result<f64> {
    if value.is_finite() && value > min {
        Ok(value)
    } else {
        Err(ReportError::InvalidStyle {
            field: field.into(),
            value,
            min,
        })
    }
}

/// Resolved style handed to every builder call
#[derive(Debug, Clone)]
pub struct ReportStyle {
    pub primary: Rgb,
    pub header_text: Rgb,
    pub stripe: Rgb,
    pub text: Rgb,
    pub column_widths: [f64; 3],
    pub page_width_mm: f64,
    pub page_height_mm: f64,
    pub row_height_mm: f64,
}

impl ReportStyle {
    pub fn from_settings(settings: &StyleSettings) -> Result<Self> {
        let color = |field: &'static str, value: &str| {
            Rgb::from_hex(value).ok_or_else(|| ReportError::InvalidColor {
                field,
                value: value.to_string(),
            })
        };

        let mut column_widths = settings.column_widths;
        for (i, width) in column_widths.iter_mut().enumerate() {
            *width = dimension(format!("column_widths[{i}]"), *width, 0.0)?;
        }

        Ok(Self {
            primary: color("primary", &settings.primary)?,
            header_text: color("header_text", &settings.header_text)?,
            stripe: color("stripe", &settings.stripe)?,
            text: color("text", &settings.text)?,
            column_widths,
            page_width_mm: dimension("page_width_mm", settings.page_width_mm, MIN_PAGE_MM)?,
            page_height_mm: dimension("page_height_mm", settings.page_height_mm, MIN_PAGE_MM)?,
            row_height_mm: dimension("row_height_mm", settings.row_height_mm, 0.0)?,
        })
    }
}

impl Default for ReportStyle {
    fn default() -> Self {
        Self {
            primary: Rgb::new(0x29, 0x80, 0xB9),
            header_text: Rgb::WHITE,
            stripe: Rgb::new(0xEA, 0xF2, 0xF8),
            text: Rgb::new(0x33, 0x33, 0x33),
            column_widths: [35.0, 18.0, 18.0],
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            row_height_mm: 7.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(Rgb::from_hex("#2980B9"), Some(Rgb::new(0x29, 0x80, 0xB9)));
        assert_eq!(Rgb::from_hex("ffffff"), Some(Rgb::WHITE));
        assert_eq!(Rgb::from_hex("#12345"), None);
        assert_eq!(Rgb::from_hex("#GG0000"), None);
    }

    #[test]
    fn packs_color_for_spreadsheets() {
        assert_eq!(Rgb::new(0x29, 0x80, 0xB9).to_u32(), 0x2980B9);
    }

    #[test]
    fn default_settings_resolve_to_default_style() {
        let style = ReportStyle::from_settings(&StyleSettings::default()).unwrap();
        let default = ReportStyle::default();
        assert_eq!(style.primary, default.primary);
        assert_eq!(style.stripe, default.stripe);
        assert_eq!(style.column_widths, default.column_widths);
    }

    #[test]
    fn rejects_invalid_color() {
        let settings = StyleSettings {
            primary: "blue".to_string(),
            ..StyleSettings::default()
        };
        let err = ReportStyle::from_settings(&settings).unwrap_err();
        assert!(err.to_string().contains("style.primary"));
    }

    #[test]
    fn rejects_zero_row_height() {
        let settings = StyleSettings {
            row_height_mm: 0.0,
            ..StyleSettings::default()
        };
        let err = ReportStyle::from_settings(&settings).unwrap_err();
        assert!(matches!(
            err,
            ReportError::InvalidStyle { ref field, .. } if field == "row_height_mm"
        ));
    }

    #[test]
    fn rejects_negative_or_tiny_page() {
        for height in [-5.0, 0.0, 20.0, f64::NAN] {
            let settings = StyleSettings {
                page_height_mm: height,
                ..StyleSettings::default()
            };
            let err = ReportStyle::from_settings(&settings).unwrap_err();
            assert!(err.to_string().contains("style.page_height_mm"), "{height}");
        }

        let settings = StyleSettings {
            page_width_mm: f64::INFINITY,
            ..StyleSettings::default()
        };
        assert!(ReportStyle::from_settings(&settings).is_err());
    }

    #[test]
    fn rejects_non_positive_column_width() {
        let settings = StyleSettings {
            column_widths: [35.0, -1.0, 18.0],
            ..StyleSettings::default()
        };
        let err = ReportStyle::from_settings(&settings).unwrap_err();
        assert!(err.to_string().contains("style.column_widths[1]"));
    }
}
