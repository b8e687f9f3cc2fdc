//! Report export: tabular projection, spreadsheet and PDF renderers.
//!
//! Rendering is CPU-bound and runs on the blocking pool.

pub mod format;
pub mod options;
pub mod pdf;
pub mod spreadsheet;

use thiserror::Error;

use crate::domain::BroadcastReport;

pub use format::{project_rows, ExportRow};
pub use options::{period_label, ExportFormat, ExportOptions, Signatory};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("Export task failed: {0}")]
    Task(String),
}

/// A rendered document ready to be sent as a download.
#[derive(Debug, Clone)]
pub struct ExportedFile {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Render `reports` (already filtered, newest first) synchronously.
pub fn render(
    format: ExportFormat,
    reports: &[BroadcastReport],
    options: &ExportOptions,
) -> Result<ExportedFile, ExportError> {
    let rows = project_rows(reports);
    let bytes = match format {
        ExportFormat::Xlsx => {
            spreadsheet::render_xlsx(&spreadsheet::build_sheet(&rows, options))?
        }
        ExportFormat::Pdf => {
            pdf::render_pdf(&pdf::build_pdf(&rows, options), &options.title)
                .map_err(ExportError::Pdf)?
        }
    };

    Ok(ExportedFile {
        filename: options.filename(format),
        content_type: format.content_type(),
        bytes,
    })
}

pub async fn generate(
    format: ExportFormat,
    reports: Vec<BroadcastReport>,
    options: ExportOptions,
) -> Result<ExportedFile, ExportError> {
    let file = tokio::task::spawn_blocking(move || render(format, &reports, &options))
        .await
        .map_err(|e| ExportError::Task(e.to_string()))??;

    metrics::counter!("exports_generated_total", "format" => format.extension()).increment(1);
    Ok(file)
}
