//! Spreadsheet export.
//!
//! [`build_sheet`] lays the report out as plain cells and merges;
//! [`render_xlsx`] writes that layout with `rust_xlsxwriter`.

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, XlsxError};

use super::format::{ExportRow, COLUMN_COUNT};
use super::options::ExportOptions;

pub const SHEET_NAME: &str = "Laporan TD Penyiaran";
pub const COLUMN_WIDTHS: [f64; COLUMN_COUNT] =
    [5.0, 25.0, 20.0, 20.0, 20.0, 15.0, 30.0, 40.0, 30.0, 30.0];

const LAST_COL: u16 = (COLUMN_COUNT - 1) as u16;
/// Blank rows left for a handwritten signature.
const SIGNATURE_GAP: u32 = 3;
/// Column holding the left ("Ketua") and right ("Petugas TD") signatures.
const LEFT_SIGNATURE_COL: u16 = 1;
const RIGHT_SIGNATURE_COL: u16 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    Title,
    Subtitle,
    Header,
    Body,
    BodyCenter,
    Signature,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetCell {
    pub row: u32,
    pub col: u16,
    pub value: CellValue,
    pub style: CellStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MergedRange {
    pub first_row: u32,
    pub first_col: u16,
    pub last_row: u32,
    pub last_col: u16,
    pub text: String,
    pub style: CellStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    pub name: String,
    pub column_widths: Vec<f64>,
    pub cells: Vec<SheetCell>,
    pub merges: Vec<MergedRange>,
    /// First row holding report data
    pub first_data_row: u32,
    pub data_rows: usize,
}

impl SheetLayout {
    pub fn text_at(&self, row: u32, col: u16) -> Option<&str> {
        self.cells
            .iter()
            .find(|c| c.row == row && c.col == col)
            .and_then(|c| match &c.value {
                CellValue::Text(t) => Some(t.as_str()),
                CellValue::Number(_) => None,
            })
            .or_else(|| {
                self.merges
                    .iter()
                    .find(|m| m.first_row == row && m.first_col == col)
                    .map(|m| m.text.as_str())
            })
    }

    fn text(&mut self, row: u32, col: u16, text: impl Into<String>, style: CellStyle) {
        self.cells.push(SheetCell {
            row,
            col,
            value: CellValue::Text(text.into()),
            style,
        });
    }

    fn merge(&mut self, rows: (u32, u32), cols: (u16, u16), text: &str, style: CellStyle) {
        self.merges.push(MergedRange {
            first_row: rows.0,
            first_col: cols.0,
            last_row: rows.1,
            last_col: cols.1,
            text: text.to_string(),
            style,
        });
    }
}

/// Column headers: single-column labels span both header rows, grouped
/// labels span two columns with their sub-labels underneath.
enum HeaderColumn {
    Single(&'static str),
    Group(&'static str, [&'static str; 2]),
}

const HEADER: [HeaderColumn; 8] = [
    HeaderColumn::Single("No"),
    HeaderColumn::Single("Tanggal/Hari"),
    HeaderColumn::Single("Petugas TD"),
    HeaderColumn::Group("Kualitas Siaran", ["Video", "Audio"]),
    HeaderColumn::Single("Jam Siaran"),
    HeaderColumn::Single("Program Siaran"),
    HeaderColumn::Group("Kendala Siaran", ["Kendala/Masalah", "Penanganan"]),
    HeaderColumn::Single("Keterangan"),
];

pub fn build_sheet(rows: &[ExportRow], options: &ExportOptions) -> SheetLayout {
    let mut layout = SheetLayout {
        name: SHEET_NAME.to_string(),
        column_widths: COLUMN_WIDTHS.to_vec(),
        cells: Vec::new(),
        merges: Vec::new(),
        first_data_row: 0,
        data_rows: rows.len(),
    };

    // Title block
    let mut row = 0;
    layout.merge((row, row), (0, LAST_COL), &options.title, CellStyle::Title);
    row += 1;
    layout.merge((row, row), (0, LAST_COL), &options.station_name, CellStyle::Subtitle);
    row += 1;
    if let Some(period) = &options.period {
        layout.merge((row, row), (0, LAST_COL), period, CellStyle::Subtitle);
        row += 1;
    }
    row += 1;

    // Two-row header
    let (top, sub) = (row, row + 1);
    let mut col: u16 = 0;
    for column in &HEADER {
        match column {
            HeaderColumn::Single(label) => {
                layout.merge((top, sub), (col, col), label, CellStyle::Header);
                col += 1;
            }
            HeaderColumn::Group(label, parts) => {
                layout.merge((top, top), (col, col + 1), label, CellStyle::Header);
                layout.text(sub, col, parts[0], CellStyle::Header);
                layout.text(sub, col + 1, parts[1], CellStyle::Header);
                col += 2;
            }
        }
    }
    row = sub + 1;

    // Body
    layout.first_data_row = row;
    for export_row in rows {
        for (col, value) in export_row.cells().into_iter().enumerate() {
            let col = col as u16;
            let cell = if col == 0 {
                SheetCell {
                    row,
                    col,
                    value: CellValue::Number(export_row.no as f64),
                    style: CellStyle::BodyCenter,
                }
            } else {
                SheetCell {
                    row,
                    col,
                    value: CellValue::Text(value),
                    style: CellStyle::Body,
                }
            };
            layout.cells.push(cell);
        }
        row += 1;
    }

    // Signature block
    row += 2;
    layout.text(row, LEFT_SIGNATURE_COL, "Mengetahui,", CellStyle::Signature);
    row += 1;
    layout.text(row, LEFT_SIGNATURE_COL, "Ketua", CellStyle::Signature);
    layout.text(row, RIGHT_SIGNATURE_COL, "Petugas TD", CellStyle::Signature);
    row += SIGNATURE_GAP + 1;
    layout.text(
        row,
        LEFT_SIGNATURE_COL,
        format!("({})", options.supervisor.display_name()),
        CellStyle::Signature,
    );
    layout.text(
        row,
        RIGHT_SIGNATURE_COL,
        format!("({})", options.operator.display_name()),
        CellStyle::Signature,
    );
    row += 1;
    layout.text(
        row,
        LEFT_SIGNATURE_COL,
        format!("NIP: {}", options.supervisor.display_nip()),
        CellStyle::Signature,
    );
    layout.text(
        row,
        RIGHT_SIGNATURE_COL,
        format!("NIP: {}", options.operator.display_nip()),
        CellStyle::Signature,
    );

    layout
}

fn format_for(style: CellStyle) -> Format {
    match style {
        CellStyle::Title => Format::new()
            .set_bold()
            .set_font_size(16)
            .set_align(FormatAlign::Center),
        CellStyle::Subtitle => Format::new()
            .set_font_size(12)
            .set_align(FormatAlign::Center),
        CellStyle::Header => Format::new()
            .set_bold()
            .set_font_color(Color::White)
            .set_background_color(Color::RGB(0x1E3A8A))
            .set_border(FormatBorder::Thin)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_text_wrap(),
        CellStyle::Body => Format::new()
            .set_border(FormatBorder::Thin)
            .set_align(FormatAlign::Top)
            .set_text_wrap(),
        CellStyle::BodyCenter => Format::new()
            .set_border(FormatBorder::Thin)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::Top),
        CellStyle::Signature => Format::new(),
    }
}

pub fn render_xlsx(layout: &SheetLayout) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&layout.name)?;

    for (col, width) in layout.column_widths.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }

    for merge in &layout.merges {
        worksheet.merge_range(
            merge.first_row,
            merge.first_col,
            merge.last_row,
            merge.last_col,
            &merge.text,
            &format_for(merge.style),
        )?;
    }

    for cell in &layout.cells {
        let format = format_for(cell.style);
        match &cell.value {
            CellValue::Text(text) => {
                worksheet.write_string_with_format(cell.row, cell.col, text, &format)?;
            }
            CellValue::Number(n) => {
                worksheet.write_number_with_format(cell.row, cell.col, *n, &format)?;
            }
        }
    }

    workbook.save_to_buffer()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::export::format::project_rows;
    use crate::application::export::options::{Signatory, SIGNATURE_PLACEHOLDER};
    use crate::test_utils::report_fixture;
    use chrono::NaiveDate;

    fn options(period: Option<&str>) -> ExportOptions {
        ExportOptions {
            title: "LAPORAN TD PENYIARAN".into(),
            station_name: "TVRI".into(),
            period: period.map(String::from),
            printed_on: NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
            operator: Signatory::new(Some("Alan"), None),
            supervisor: Signatory::new(Some("Dr. John Doe, M.Si."), Some("19651231 199203 1 001")),
            filename_prefix: "laporan-td-penyiaran".into(),
        }
    }

    fn rows(n: usize) -> Vec<ExportRow> {
        let reports: Vec<_> = (0..n)
            .map(|i| report_fixture(&i.to_string(), "2024-05-01", "Berita", None))
            .collect();
        project_rows(&reports)
    }

    #[test]
    fn header_groups_span_two_columns() {
        let layout = build_sheet(&rows(1), &options(None));
        let quality = layout
            .merges
            .iter()
            .find(|m| m.text == "Kualitas Siaran")
            .unwrap();
        assert_eq!((quality.first_col, quality.last_col), (3, 4));
        assert_eq!(quality.first_row, quality.last_row);

        let issue = layout.merges.iter().find(|m| m.text == "Kendala Siaran").unwrap();
        assert_eq!((issue.first_col, issue.last_col), (7, 8));

        let no = layout.merges.iter().find(|m| m.text == "No").unwrap();
        assert_eq!(no.last_row, no.first_row + 1);
        assert_eq!(layout.text_at(no.last_row, 3), Some("Video"));
        assert_eq!(layout.text_at(no.last_row, 8), Some("Penanganan"));
    }

    #[test]
    fn one_sheet_row_per_report() {
        let layout = build_sheet(&rows(4), &options(None));
        assert_eq!(layout.data_rows, 4);
        let body_rows: std::collections::BTreeSet<_> = layout
            .cells
            .iter()
            .filter(|c| c.style == CellStyle::Body || c.style == CellStyle::BodyCenter)
            .map(|c| c.row)
            .collect();
        assert_eq!(body_rows.len(), 4);
        assert_eq!(body_rows.iter().next(), Some(&layout.first_data_row));
        assert_eq!(layout.text_at(layout.first_data_row, 7), Some("Siaran lancar"));
    }

    #[test]
    fn period_row_is_optional() {
        let without = build_sheet(&rows(1), &options(None));
        let with = build_sheet(&rows(1), &options(Some("Periode: Mei 2024")));
        assert_eq!(with.first_data_row, without.first_data_row + 1);
        assert_eq!(with.text_at(2, 0), Some("Periode: Mei 2024"));
        assert_eq!(without.text_at(0, 0), Some("LAPORAN TD PENYIARAN"));
        assert_eq!(without.text_at(1, 0), Some("TVRI"));
    }

    #[test]
    fn signature_block_has_both_signatories() {
        let layout = build_sheet(&rows(2), &options(None));
        let texts: Vec<&str> = layout
            .cells
            .iter()
            .filter(|c| c.style == CellStyle::Signature)
            .filter_map(|c| match &c.value {
                CellValue::Text(t) => Some(t.as_str()),
                CellValue::Number(_) => None,
            })
            .collect();
        assert!(texts.contains(&"Mengetahui,"));
        assert!(texts.contains(&"Ketua"));
        assert!(texts.contains(&"Petugas TD"));
        assert!(texts.contains(&"(Dr. John Doe, M.Si.)"));
        assert!(texts.contains(&"(Alan)"));
        let placeholder_nip = format!("NIP: {}", SIGNATURE_PLACEHOLDER);
        assert!(texts.contains(&placeholder_nip.as_str()));
    }

    #[test]
    fn renders_a_zip_container() {
        let layout = build_sheet(&rows(3), &options(Some("Periode: Mei 2024")));
        let bytes = render_xlsx(&layout).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn empty_report_list_still_renders() {
        let layout = build_sheet(&[], &options(None));
        assert_eq!(layout.data_rows, 0);
        assert!(render_xlsx(&layout).is_ok());
    }
}
