use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn report_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("dental-report"))
}

fn init_config(temp_dir: &TempDir) -> PathBuf {
    let config_path = temp_dir.path().join("report-config");
    report_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success();
    config_path
}

fn write_bundle(dir: &Path, json: &str) -> PathBuf {
    let path = dir.join("bundle.json");
    fs::write(&path, json).unwrap();
    path
}

const BUNDLE: &str = r#"{
  "financial": { "totalCollected": 1500.5, "totalReceivable": 200,
                 "periodProfit": 1300.5, "averagePayment": 75.03, "paymentCount": 20 },
  "appointments": { "totalScheduled": 40, "attended": 32, "cancelled": 5, "attendanceRate": 80 },
  "patients": { "activePatients": 120, "newPatients": 8 },
  "treatments": [ { "name": "Limpieza", "count": 18, "revenue": 540 } ]
}"#;

#[test]
fn test_help() {
    report_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dental clinic report exporter"));
}

#[test]
fn test_version() {
    report_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("dental-report"));
}

#[test]
fn test_init_creates_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("report-config");

    report_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized dental-report config"));

    assert!(config_path.join("config.toml").exists());
    assert!(config_path.join("sample-bundle.json").exists());
    assert!(config_path.join("output").is_dir());
}

#[test]
fn test_init_fails_if_exists() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir);

    report_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_status_without_init() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("nonexistent");

    report_cmd()
        .args(["-C", config_path.to_str().unwrap(), "status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_status() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir);

    report_cmd()
        .args(["-C", config_path.to_str().unwrap(), "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Report Status"))
        .stdout(predicate::str::contains("Clínica Dental"))
        .stdout(predicate::str::contains("Label overrides:  0"));
}

#[test]
fn test_export_both_formats_with_safe_filenames() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir);
    let bundle = write_bundle(temp_dir.path(), BUNDLE);
    let out = temp_dir.path().join("out");

    report_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "export",
            "--input",
            bundle.to_str().unwrap(),
            "--date",
            "05/03/2025",
            "--output-dir",
            out.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reporte Excel generado correctamente"))
        .stdout(predicate::str::contains("Reporte PDF generado correctamente"));

    let xlsx = fs::read(out.join("Reporte_Dental_05-03-2025.xlsx")).unwrap();
    assert_eq!(&xlsx[..2], b"PK");
    let pdf = fs::read(out.join("Reporte_Dental_05-03-2025.pdf")).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
}

#[test]
fn test_export_defaults_to_configured_output_dir() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir);

    report_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "export",
            "--input",
            config_path.join("sample-bundle.json").to_str().unwrap(),
            "--format",
            "xlsx",
            "--date",
            "17/10/2026",
        ])
        .assert()
        .success();

    assert!(config_path
        .join("output")
        .join("Reporte_Dental_17-10-2026.xlsx")
        .exists());
}

#[test]
fn test_export_missing_financial_reports_error_without_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir);
    let bundle = write_bundle(
        temp_dir.path(),
        r#"{ "appointments": {}, "patients": {} }"#,
    );
    let out = temp_dir.path().join("out");

    report_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "export",
            "--input",
            bundle.to_str().unwrap(),
            "--format",
            "pdf",
            "--output-dir",
            out.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No se pudo generar el reporte"))
        .stderr(predicate::str::contains("financial"))
        .stderr(predicate::str::contains("Cerrar"));

    let delivered = fs::read_dir(&out).map(|d| d.count()).unwrap_or(0);
    assert_eq!(delivered, 0);
}

#[test]
fn test_export_invalid_format() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir);
    let bundle = write_bundle(temp_dir.path(), BUNDLE);

    report_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "export",
            "--input",
            bundle.to_str().unwrap(),
            "--format",
            "docx",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid format 'docx'"));
}

#[test]
fn test_export_missing_bundle_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir);

    report_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "export",
            "--input",
            "does-not-exist.json",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Bundle file not found"));
}

#[test]
fn test_show_prints_sections() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir);
    let bundle = write_bundle(temp_dir.path(), BUNDLE);

    report_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "show",
            "--input",
            bundle.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Resumen Financiero"))
        .stdout(predicate::str::contains("$1500.50"))
        .stdout(predicate::str::contains("Resumen de Citas"))
        .stdout(predicate::str::contains("80%"))
        .stdout(predicate::str::contains("Limpieza"));
}

#[test]
fn test_show_echoes_bundle_filters() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir);
    let bundle = write_bundle(
        temp_dir.path(),
        r#"{ "financial": {}, "appointments": {}, "patients": {},
             "filters": { "startDate": "01/03/2025" } }"#,
    );

    report_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "show",
            "--input",
            bundle.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fecha inicio: 01/03/2025"))
        .stdout(predicate::str::contains("Fecha fin").not())
        .stdout(predicate::str::contains("Tratamientos").not());
}

#[test]
fn test_label_overrides_apply() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir);
    let config_file = config_path.join("config.toml");
    let mut content = fs::read_to_string(&config_file).unwrap();
    content.push_str("\"financial.title\" = \"Financial Summary\"\n");
    fs::write(&config_file, content).unwrap();
    let bundle = write_bundle(temp_dir.path(), BUNDLE);

    report_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "show",
            "--input",
            bundle.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Financial Summary"))
        .stdout(predicate::str::contains("Resumen Financiero").not());
}

#[test]
fn test_show_echoes_numeric_dentist_filter() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir);
    let bundle = write_bundle(
        temp_dir.path(),
        r#"{ "financial": {}, "appointments": {}, "patients": {},
             "filters": { "dentistId": 7 } }"#,
    );

    report_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "show",
            "--input",
            bundle.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dentista: 7"));
}

#[test]
fn test_export_malformed_bundle_reports_error_notification() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir);
    let bundle = write_bundle(
        temp_dir.path(),
        r#"{ "financial": {}, "appointments": { "attendanceRate": "80.0" }, "patients": {} }"#,
    );
    let out = temp_dir.path().join("out");

    report_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "export",
            "--input",
            bundle.to_str().unwrap(),
            "--output-dir",
            out.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No se pudo generar el reporte"))
        .stderr(predicate::str::contains("Cerrar").count(1))
        .stderr(predicate::str::contains("Error: Failed to parse").not());

    let delivered = fs::read_dir(&out).map(|d| d.count()).unwrap_or(0);
    assert_eq!(delivered, 0);
}

#[test]
fn test_invalid_style_dimension_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir);
    let config_file = config_path.join("config.toml");
    let content = fs::read_to_string(&config_file)
        .unwrap()
        .replace("row_height_mm = 7.0", "row_height_mm = 0.0");
    fs::write(&config_file, content).unwrap();

    report_cmd()
        .args(["-C", config_path.to_str().unwrap(), "status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("style.row_height_mm"));
}
