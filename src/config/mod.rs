mod clinic;
pub mod labels;
pub mod style;

pub use clinic::{Clinic, Config, ReportSettings};
pub use labels::{LabelKey, Labels};
pub use style::{ReportStyle, Rgb, StyleSettings};

use crate::error::{ReportError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (XDG config dir, or ~/.dental-report/)
pub fn config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "dental-report") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    let home = dirs_home().ok_or_else(|| {
        ReportError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".dental-report"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Expand ~ in paths
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_home() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Resolve the configured output directory; relative paths are taken from the config dir
pub fn resolve_output_dir(output_dir: &str, config_dir: &Path) -> PathBuf {
    let expanded = expand_path(output_dir);
    if expanded.is_absolute() {
        expanded
    } else {
        config_dir.join(expanded)
    }
}

/// Load the main config.toml
pub fn load_config(config_dir: &Path) -> Result<Config> {
    let path = config_dir.join("config.toml");
    if !path.exists() {
        return Err(ReportError::ConfigFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| ReportError::ConfigParse { path, source: e })
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r##"[clinic]
name = "Clínica Dental"
tagline = "Cuidamos tu sonrisa"   # optional, shown under the name in PDF reports

[report]
currency_symbol = "$"
output_dir = "output"   # relative paths live inside this config directory

# Every key below is optional.
[style]
primary = "#2980B9"       # title band and table header fill
header_text = "#FFFFFF"   # text drawn over the primary color
stripe = "#EAF2F8"        # alternate table rows
text = "#333333"
column_widths = [35.0, 18.0, 18.0]   # spreadsheet columns A-C, in characters
page_width_mm = 210.0
page_height_mm = 297.0
row_height_mm = 7.0

# Override any report label by id, e.g.:
[labels]
# "financial.collected" = "Collected"
# "page.footer" = "Page {page} of {total}"
"##;

/// Example aggregate bundle written by `init`
pub const SAMPLE_BUNDLE: &str = r#"{
  "financial": {
    "totalCollected": 15420.5,
    "totalReceivable": 3200,
    "periodProfit": 12220.5,
    "averagePayment": 257.01,
    "paymentCount": 60
  },
  "appointments": {
    "totalScheduled": 84,
    "attended": 70,
    "cancelled": 9,
    "attendanceRate": 83.3
  },
  "patients": {
    "activePatients": 212,
    "newPatients": 17
  },
  "treatments": [
    { "name": "Limpieza dental", "count": 31, "revenue": 2790 },
    { "name": "Resina", "count": 18, "revenue": 3240 },
    { "name": "Extracción", "count": 9, "revenue": 1350 },
    { "name": "Endodoncia", "count": 6, "revenue": 4800 },
    { "name": "Blanqueamiento", "count": 4, "revenue": 1600 },
    { "name": "Corona", "count": 2, "revenue": 1640 }
  ]
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_parses() {
        let config: Config = toml::from_str(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.clinic.name, "Clínica Dental");
        assert_eq!(config.report.currency_symbol, "$");
        assert!(config.labels.is_empty());
        ReportStyle::from_settings(&config.style).unwrap();
    }

    #[test]
    fn style_and_labels_are_optional() {
        let config: Config = toml::from_str(
            r#"
            [clinic]
            name = "Sonrisas"

            [report]
            currency_symbol = "Q"
            output_dir = "/tmp/reports"
            "#,
        )
        .unwrap();
        assert!(config.clinic.tagline.is_none());
        assert_eq!(config.style.primary, StyleSettings::default().primary);
    }

    #[test]
    fn relative_output_dir_resolves_inside_config_dir() {
        let dir = Path::new("/etc/dental");
        assert_eq!(
            resolve_output_dir("output", dir),
            PathBuf::from("/etc/dental/output")
        );
        assert_eq!(
            resolve_output_dir("/var/reports", dir),
            PathBuf::from("/var/reports")
        );
    }
}
