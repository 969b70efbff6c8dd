mod notify;
mod sink;

pub use notify::{
    Notification, NotificationKind, Notifier, RecordingNotifier, TerminalNotifier,
    SUCCESS_DISMISS_AFTER,
};
pub use sink::{DirectorySink, DownloadSink, MemorySink};

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use log::{debug, error};

use crate::config::LabelKey;
use crate::error::{ReportError, Result};
use crate::pdf::{build_document, render_pdf};
use crate::report::{export_filename, RawBundle, ReportBundle, ReportContext};
use crate::xlsx::{build_sheet, write_workbook};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Xlsx,
    Pdf,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::Pdf => "application/pdf",
        }
    }

    /// Parse a `--format` value; "both" expands to every format
    pub fn parse_list(value: &str) -> Result<Vec<ExportFormat>> {
        match value.to_ascii_lowercase().as_str() {
            "both" | "all" => Ok(vec![ExportFormat::Xlsx, ExportFormat::Pdf]),
            other => Ok(vec![other.parse()?]),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "xlsx" | "excel" => Ok(ExportFormat::Xlsx),
            "pdf" => Ok(ExportFormat::Pdf),
            _ => Err(ReportError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Build the document for `format` and serialize it
pub fn render(bundle: &ReportBundle, ctx: &ReportContext, format: ExportFormat) -> Result<Vec<u8>> {
    match format {
        ExportFormat::Xlsx => write_workbook(&build_sheet(bundle, ctx), &ctx.style),
        ExportFormat::Pdf => render_pdf(&build_document(bundle, ctx), &ctx.style),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Delivered(PathBuf),
    Failed(String),
}

impl ExportOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, ExportOutcome::Delivered(_))
    }
}

/// Boundary that turns a bundle into a delivered file and tells the user how it went.
/// Every call raises exactly one notification.
pub struct Exporter<S, N> {
    sink: S,
    notifier: N,
}

impl<S: DownloadSink, N: Notifier> Exporter<S, N> {
    pub fn new(sink: S, notifier: N) -> Self {
        Self { sink, notifier }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn export(
        &mut self,
        raw: &RawBundle,
        ctx: &ReportContext,
        format: ExportFormat,
    ) -> ExportOutcome {
        let labels = &ctx.labels;

        match self.try_export(raw, ctx, format) {
            Ok(path) => {
                let message = match format {
                    ExportFormat::Xlsx => labels.get(LabelKey::SpreadsheetReady),
                    ExportFormat::Pdf => labels.get(LabelKey::DocumentReady),
                };
                self.notifier.notify(Notification::success(
                    labels.get(LabelKey::SuccessTitle),
                    &format!("{message} ({})", path.display()),
                ));
                ExportOutcome::Delivered(path)
            }
            Err(e) => {
                debug!("{format} export aborted");
                self.report_failure(ctx, &e)
            }
        }
    }

    /// Raise the error notification for a failure that happened before or during an export
    pub fn report_failure(&mut self, ctx: &ReportContext, err: &ReportError) -> ExportOutcome {
        let labels = &ctx.labels;
        error!("export failed: {err}");
        self.notifier.notify(Notification::error(
            labels.get(LabelKey::ErrorTitle),
            &labels.error_message(&err.to_string()),
            labels.get(LabelKey::CloseAction),
        ));
        ExportOutcome::Failed(err.to_string())
    }

    fn try_export(
        &mut self,
        raw: &RawBundle,
        ctx: &ReportContext,
        format: ExportFormat,
    ) -> Result<PathBuf> {
        let bundle = raw.validate()?;
        let bytes = render(&bundle, ctx, format)?;
        let filename = export_filename(&ctx.generated_on, format);
        debug!(
            "delivering {filename} as {} ({} bytes)",
            format.mime_type(),
            bytes.len()
        );
        self.sink.deliver(&filename, &bytes)
    }
}
