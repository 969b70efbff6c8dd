use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};

use dental_report::config::{
    config_dir, load_config, resolve_output_dir, CONFIG_TEMPLATE, SAMPLE_BUNDLE,
};
use dental_report::error::{ReportError, Result};
use dental_report::export::{DirectorySink, ExportFormat, ExportOutcome, Exporter, TerminalNotifier};
use dental_report::report::{assemble, filter_lines, FilterDescriptor, RawBundle, ReportContext};

#[derive(Parser)]
#[command(name = "dental-report")]
#[command(version, about = "Dental clinic report exporter (Excel and PDF)", long_about = None)]
struct Cli {
    /// Path to config directory (default: XDG config or ~/.dental-report)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with template files
    Init,

    /// Export a report from an aggregate bundle
    Export {
        /// Aggregate bundle (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output format: xlsx, pdf or both
        #[arg(short, long, default_value = "both")]
        format: String,

        /// Generation date shown in the report and filename (default: today, DD/MM/YYYY)
        #[arg(long)]
        date: Option<String>,

        /// Start date filter label (overrides the bundle)
        #[arg(long)]
        from: Option<String>,

        /// End date filter label (overrides the bundle)
        #[arg(long)]
        to: Option<String>,

        /// Dentist filter label (overrides the bundle)
        #[arg(long)]
        dentist: Option<String>,

        /// Directory for the generated files (default: report.output_dir)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Open generated files with system default viewer
        #[arg(long)]
        open: bool,
    },

    /// Print the report sections to the terminal
    Show {
        /// Aggregate bundle (JSON)
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Show configuration status
    Status,
}

fn main() {
    env_logger::init();

    match run() {
        Ok(()) => {}
        // the exporter has already told the user what went wrong
        Err(ReportError::ExportFailed { .. }) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Export {
            input,
            format,
            date,
            from,
            to,
            dentist,
            output_dir,
            open,
        } => {
            let filters = FilterDescriptor {
                start_date: from,
                end_date: to,
                dentist_id: dentist,
            };
            cmd_export(&cfg_dir, &input, &format, date, filters, output_dir, open)
        }
        Commands::Show { input } => cmd_show(&cfg_dir, &input),
        Commands::Status => cmd_status(&cfg_dir),
    }
}

/// Initialize config directory with template files
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    use std::fs;

    if cfg_dir.exists() {
        return Err(ReportError::AlreadyInitialized(cfg_dir.to_path_buf()));
    }

    fs::create_dir_all(cfg_dir)?;
    fs::create_dir_all(cfg_dir.join("output"))?;
    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;
    fs::write(cfg_dir.join("sample-bundle.json"), SAMPLE_BUNDLE)?;

    println!("Initialized dental-report config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Edit clinic branding and style:  $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!("  2. Export the sample bundle:");
    println!(
        "     dental-report export --input {}/sample-bundle.json",
        cfg_dir.display()
    );

    Ok(())
}

fn today_label() -> String {
    chrono::Local::now().format("%d/%m/%Y").to_string()
}

/// Load a bundle and apply CLI filter overrides
fn load_bundle(input: &Path, overrides: &FilterDescriptor) -> Result<RawBundle> {
    let mut raw = RawBundle::load(input)?;
    let filters = raw.filters.clone().unwrap_or_default().merged_with(overrides);
    raw.filters = (!filters.is_empty()).then_some(filters);
    Ok(raw)
}

/// Export one file per requested format
fn cmd_export(
    cfg_dir: &Path,
    input: &Path,
    format: &str,
    date: Option<String>,
    filters: FilterDescriptor,
    output_dir: Option<PathBuf>,
    open: bool,
) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(ReportError::ConfigNotFound(cfg_dir.to_path_buf()));
    }

    let formats = ExportFormat::parse_list(format)?;
    let config = load_config(cfg_dir)?;
    let ctx = ReportContext::from_config(&config, &date.unwrap_or_else(today_label))?;

    let output_dir =
        output_dir.unwrap_or_else(|| resolve_output_dir(&config.report.output_dir, cfg_dir));
    let mut exporter = Exporter::new(DirectorySink::new(output_dir), TerminalNotifier);

    let raw = match load_bundle(input, &filters) {
        Ok(raw) => raw,
        Err(e) => {
            exporter.report_failure(&ctx, &e);
            return Err(ReportError::ExportFailed {
                failed: formats.len(),
                requested: formats.len(),
            });
        }
    };

    let mut failed = 0;
    for format in &formats {
        match exporter.export(&raw, &ctx, *format) {
            ExportOutcome::Delivered(path) => {
                if open {
                    open_path(&path)?;
                }
            }
            ExportOutcome::Failed(_) => failed += 1,
        }
    }

    if failed > 0 {
        return Err(ReportError::ExportFailed {
            failed,
            requested: formats.len(),
        });
    }
    Ok(())
}

#[derive(Tabled)]
struct SectionRow {
    #[tabled(rename = "FIELD")]
    field: String,
    #[tabled(rename = "VALUE")]
    value: String,
}

#[derive(Tabled)]
struct TreatmentRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "TREATMENT")]
    name: String,
    #[tabled(rename = "COUNT")]
    count: String,
    #[tabled(rename = "REVENUE")]
    revenue: String,
}

/// Print the report sections as terminal tables
fn cmd_show(cfg_dir: &Path, input: &Path) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(ReportError::ConfigNotFound(cfg_dir.to_path_buf()));
    }

    let config = load_config(cfg_dir)?;
    let ctx = ReportContext::from_config(&config, &today_label())?;
    let bundle = RawBundle::load(input)?.validate()?;

    println!("{}", ctx.clinic_name);
    for line in filter_lines(&bundle.filters, &ctx) {
        println!("  {line}");
    }

    for section in assemble(&bundle, &ctx) {
        println!();
        println!("{}", section.title);

        let table = if section.columns() == 3 {
            let rows: Vec<TreatmentRow> = section
                .rows
                .iter()
                .enumerate()
                .map(|(idx, r)| TreatmentRow {
                    rank: idx + 1,
                    name: r[0].clone(),
                    count: r[1].clone(),
                    revenue: r[2].clone(),
                })
                .collect();
            Table::new(rows).with(Style::rounded()).to_string()
        } else {
            let rows: Vec<SectionRow> = section
                .rows
                .iter()
                .map(|r| SectionRow {
                    field: r[0].clone(),
                    value: r[1].clone(),
                })
                .collect();
            Table::new(rows).with(Style::rounded()).to_string()
        };
        println!("{table}");
    }

    Ok(())
}

/// Show configuration status
fn cmd_status(cfg_dir: &Path) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(ReportError::ConfigNotFound(cfg_dir.to_path_buf()));
    }

    let config = load_config(cfg_dir)?;
    let ctx = ReportContext::from_config(&config, &today_label())?;

    println!("Report Status");
    println!("{}", "-".repeat(50));
    println!("Config directory: {}", cfg_dir.display());
    println!("Clinic:           {}", config.clinic.name);
    if let Some(tagline) = &config.clinic.tagline {
        println!("Tagline:          {}", tagline);
    }
    println!("Currency:         {}", config.report.currency_symbol);
    println!(
        "Output directory: {}",
        resolve_output_dir(&config.report.output_dir, cfg_dir).display()
    );
    println!("Label overrides:  {}", ctx.labels.override_count());

    Ok(())
}

fn open_path(path: &Path) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(path).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(path).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", ""])
            .arg(path)
            .spawn()?;
    }
    Ok(())
}
