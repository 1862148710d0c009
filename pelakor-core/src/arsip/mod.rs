//! Archive export: one entry point, shared table layout, two backends.
//!
//! The table layout (columns, truncation, summary) is computed here once;
//! the PDF and HTML backends only draw what this module lays out.

mod html;
mod pdf;

use std::path::PathBuf;

use chrono::NaiveDate;

use crate::error::{PelakorError, Result};
use crate::laporan::Laporan;

/// Output format for an archive export.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ExportFormat {
    /// A4 PDF document.
    Pdf,
    /// Printable HTML document.
    Html,
}

impl ExportFormat {
    /// File extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Html => "html",
        }
    }
}

/// Inclusive date range an archive was filtered by.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Periode {
    /// First day of the range.
    pub mulai: NaiveDate,
    /// Last day of the range.
    pub selesai: NaiveDate,
}

impl Periode {
    /// Build a range, rejecting an end before the start.
    pub fn new(mulai: NaiveDate, selesai: NaiveDate) -> Result<Self> {
        if selesai < mulai {
            return Err(PelakorError::Validation(
                "tanggal akhir tidak boleh sebelum tanggal mulai".to_string(),
            ));
        }
        Ok(Self { mulai, selesai })
    }

    fn label(&self) -> String {
        format!(
            "Periode {} s.d. {}",
            self.mulai.format("%d/%m/%Y"),
            self.selesai.format("%d/%m/%Y")
        )
    }
}

/// Options for an archive export.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Optional PNG logo placed in the document header.
    pub logo: Option<PathBuf>,
    /// Date range the reports were filtered by, shown under the title.
    pub periode: Option<Periode>,
}

/// A finished export: suggested file name plus document bytes.
#[derive(Debug, Clone)]
pub struct ExportFile {
    /// Suggested file name.
    pub file_name: String,
    /// Document contents.
    pub contents: Vec<u8>,
}

/// Document title shared by both backends.
const TITLE: &str = "Arsip Laporan Selesai";

/// Table column widths in millimetres; the sum fills an A4 content width of
/// 180 mm inside 15 mm margins.
const COLUMN_WIDTHS_MM: [f32; 5] = [12.0, 68.0, 40.0, 30.0, 30.0];

/// Character budget per column before truncation.
const COLUMN_CHAR_BUDGETS: [usize; 5] = [4, 40, 24, 15, 10];

/// Column headers shared by both backends.
const COLUMN_HEADERS: [&str; 5] = ["No", "Judul", "Pelapor", "Status", "Tanggal"];

/// One laid-out table row, already truncated to the column budgets.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ArchiveRow {
    cells: [String; 5],
}

/// Truncate `text` to `budget` characters, marking the cut with an ellipsis.
fn truncate_cell(text: &str, budget: usize) -> String {
    if text.chars().count() <= budget {
        return text.to_string();
    }
    let kept: String = text.chars().take(budget.saturating_sub(3)).collect();
    format!("{}...", kept.trim_end())
}

/// Lay out the archive table rows from a report list.
fn build_rows(reports: &[Laporan]) -> Vec<ArchiveRow> {
    reports
        .iter()
        .enumerate()
        .map(|(index, laporan)| {
            let raw = [
                (index + 1).to_string(),
                laporan.judul_laporan.clone(),
                laporan.nama_pelapor().to_string(),
                laporan.status_laporan.label().to_string(),
                laporan.created_at.format("%d/%m/%Y").to_string(),
            ];
            let cells = std::array::from_fn(|column| {
                truncate_cell(&raw[column], COLUMN_CHAR_BUDGETS[column])
            });
            ArchiveRow { cells }
        })
        .collect()
}

/// Summary line with the total count, shared by both backends.
fn summary_line(total: usize) -> String {
    format!("Total laporan: {total}")
}

/// Render a filtered archive to the requested format.
///
/// Refuses an empty report set with [`PelakorError::NoData`] before either
/// backend runs; any later failure is all-or-nothing, no partial file is
/// produced.
pub fn export_archive(
    reports: &[Laporan],
    format: ExportFormat,
    options: &ExportOptions,
) -> Result<ExportFile> {
    if reports.is_empty() {
        return Err(PelakorError::NoData);
    }
    let logo = match &options.logo {
        Some(path) => Some(std::fs::read(path)?),
        None => None,
    };
    let rows = build_rows(reports);
    let subtitle = options.periode.as_ref().map(Periode::label);
    let contents = match format {
        ExportFormat::Pdf => pdf::render(&rows, subtitle.as_deref(), logo.as_deref())?,
        ExportFormat::Html => {
            html::render(&rows, subtitle.as_deref(), logo.as_deref()).into_bytes()
        }
    };
    Ok(ExportFile {
        file_name: format!("arsip-laporan.{}", format.extension()),
        contents,
    })
}
