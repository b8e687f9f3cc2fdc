//! Paginated PDF export.
//!
//! [`build_pdf`] computes every page as a list of draw operations in
//! millimetres measured from the top-left corner. [`render_pdf`] turns
//! that into a document with `printpdf`, flipping the y axis.

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{BuiltinFont, Color, Line, Mm, PdfDocument, Point, Polygon, Rgb};

use super::format::{ExportRow, COLUMN_COUNT};
use super::options::ExportOptions;
use super::spreadsheet::COLUMN_WIDTHS;

// A4 landscape
pub const PAGE_WIDTH: f32 = 297.0;
pub const PAGE_HEIGHT: f32 = 210.0;
const MARGIN_X: f32 = 10.0;
const TABLE_TOP_FIRST_PAGE: f32 = 40.0;
const TABLE_TOP: f32 = 15.0;
/// Lowest y a table row may reach.
const TABLE_BOTTOM: f32 = PAGE_HEIGHT - 15.0;
/// Lowest y the signature block may reach.
const CONTENT_BOTTOM: f32 = PAGE_HEIGHT - 12.0;
const FOOTER_Y: f32 = PAGE_HEIGHT - 6.0;

/// Table end assumed when no body row was drawn.
pub const FALLBACK_TABLE_END: f32 = 150.0;
/// Gap between table end and the signature separator.
pub const SIGNATURE_OFFSET: f32 = 10.0;
pub const SIGNATURE_HEIGHT: f32 = 36.0;

const BODY_FONT: f32 = 8.0;
const HEADER_FONT: f32 = 8.0;
const HEADER_ROW_HEIGHT: f32 = 8.0;
const CELL_PADDING: f32 = 1.5;
const PT_TO_MM: f32 = 0.3528;

const BLACK: (u8, u8, u8) = (0, 0, 0);
const WHITE: (u8, u8, u8) = (255, 255, 255);
const HEADER_FILL: (u8, u8, u8) = (30, 58, 138);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        size: f32,
        bold: bool,
        color: (u8, u8, u8),
        text: String,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
    },
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        fill: Option<(u8, u8, u8)>,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdfPage {
    pub ops: Vec<DrawOp>,
}

impl PdfPage {
    fn text(&mut self, x: f32, y: f32, size: f32, bold: bool, align: Align, text: &str) {
        self.colored_text(x, y, size, bold, align, BLACK, text);
    }

    #[allow(clippy::too_many_arguments)]
    fn colored_text(
        &mut self,
        x: f32,
        y: f32,
        size: f32,
        bold: bool,
        align: Align,
        color: (u8, u8, u8),
        text: &str,
    ) {
        let width = text_width(text, size, bold);
        let x = match align {
            Align::Left => x,
            Align::Center => x - width / 2.0,
            Align::Right => x - width,
        };
        self.ops.push(DrawOp::Text {
            x,
            y,
            size,
            bold,
            color,
            text: text.to_string(),
        });
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PdfLayout {
    pub pages: Vec<PdfPage>,
    /// Bottom edge of the last body row, `None` for an empty table
    pub table_end: Option<f32>,
    /// Top of the signature block and the page it sits on
    pub signature_y: f32,
    pub signature_page: usize,
    pub body_rows: usize,
}

/// Approximate Helvetica advance width in millimetres.
fn text_width(text: &str, size: f32, bold: bool) -> f32 {
    let em = if bold { 0.56 } else { 0.5 };
    text.chars().count() as f32 * size * PT_TO_MM * em
}

fn line_height(size: f32) -> f32 {
    size * PT_TO_MM * 1.25
}

fn ascent(size: f32) -> f32 {
    size * PT_TO_MM * 0.8
}

/// Greedy word wrap; words wider than the cell are split by character.
pub fn wrap_text(text: &str, max_width: f32, size: f32) -> Vec<String> {
    let fits = |s: &str| text_width(s, size, false) <= max_width;
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };
            if fits(&candidate) {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if fits(word) {
                current = word.to_string();
                continue;
            }
            for ch in word.chars() {
                current.push(ch);
                if !fits(&current) && current.chars().count() > 1 {
                    current.pop();
                    lines.push(std::mem::take(&mut current));
                    current.push(ch);
                }
            }
        }
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Column widths scaled from the spreadsheet hints to the printable width.
pub fn column_widths() -> [f32; COLUMN_COUNT] {
    let total: f64 = COLUMN_WIDTHS.iter().sum();
    let printable = (PAGE_WIDTH - 2.0 * MARGIN_X) as f64;
    let mut widths = [0.0; COLUMN_COUNT];
    for (w, hint) in widths.iter_mut().zip(COLUMN_WIDTHS.iter()) {
        *w = (hint / total * printable) as f32;
    }
    widths
}

fn column_x(widths: &[f32; COLUMN_COUNT]) -> [f32; COLUMN_COUNT] {
    let mut xs = [0.0; COLUMN_COUNT];
    let mut x = MARGIN_X;
    for (i, w) in widths.iter().enumerate() {
        xs[i] = x;
        x += w;
    }
    xs
}

/// Draw the two-row grouped header at `top`; returns its bottom edge.
fn draw_table_header(page: &mut PdfPage, top: f32, widths: &[f32; COLUMN_COUNT]) -> f32 {
    let xs = column_x(widths);
    let full = 2.0 * HEADER_ROW_HEIGHT;

    let cell = |page: &mut PdfPage, x: f32, y: f32, w: f32, h: f32, label: &str| {
        page.ops.push(DrawOp::Rect {
            x,
            y,
            w,
            h,
            fill: Some(HEADER_FILL),
        });
        let baseline = y + h / 2.0 + ascent(HEADER_FONT) / 2.0;
        page.colored_text(x + w / 2.0, baseline, HEADER_FONT, true, Align::Center, WHITE, label);
    };

    let singles = [
        (0, "No"),
        (1, "Tanggal/Hari"),
        (2, "Petugas TD"),
        (5, "Jam Siaran"),
        (6, "Program Siaran"),
        (9, "Keterangan"),
    ];
    for (col, label) in singles {
        cell(page, xs[col], top, widths[col], full, label);
    }

    let groups = [
        (3, "Kualitas Siaran", ["Video", "Audio"]),
        (7, "Kendala Siaran", ["Kendala/Masalah", "Penanganan"]),
    ];
    for (col, label, parts) in groups {
        cell(
            page,
            xs[col],
            top,
            widths[col] + widths[col + 1],
            HEADER_ROW_HEIGHT,
            label,
        );
        let sub = top + HEADER_ROW_HEIGHT;
        cell(page, xs[col], sub, widths[col], HEADER_ROW_HEIGHT, parts[0]);
        cell(page, xs[col + 1], sub, widths[col + 1], HEADER_ROW_HEIGHT, parts[1]);
    }

    top + full
}

fn draw_title_block(page: &mut PdfPage, options: &ExportOptions) {
    page.text(PAGE_WIDTH / 2.0, 20.0, 16.0, true, Align::Center, &options.title);
    page.text(
        PAGE_WIDTH / 2.0,
        28.0,
        12.0,
        false,
        Align::Center,
        &options.station_name,
    );
    page.text(
        PAGE_WIDTH - MARGIN_X,
        35.0,
        10.0,
        false,
        Align::Right,
        &options.printed_label(),
    );
    if let Some(period) = &options.period {
        page.text(MARGIN_X, 35.0, 10.0, false, Align::Left, period);
    }
}

fn draw_signature(page: &mut PdfPage, y: f32, options: &ExportOptions) {
    page.ops.push(DrawOp::Line {
        x1: MARGIN_X,
        y1: y,
        x2: PAGE_WIDTH - MARGIN_X,
        y2: y,
        width: 0.5,
    });

    let left = 30.0;
    page.text(left, y + 8.0, 10.0, false, Align::Left, "Petugas TD");
    page.text(
        left,
        y + 28.0,
        10.0,
        false,
        Align::Left,
        &format!("({})", options.operator.display_name()),
    );
    page.text(
        left,
        y + 34.0,
        10.0,
        false,
        Align::Left,
        &format!("NIP: {}", options.operator.display_nip()),
    );

    let right = PAGE_WIDTH - 90.0;
    page.text(right, y + 8.0, 10.0, false, Align::Left, "Mengetahui,");
    page.text(right, y + 13.0, 10.0, false, Align::Left, "Ketua");
    page.text(
        right,
        y + 28.0,
        10.0,
        false,
        Align::Left,
        &format!("({})", options.supervisor.display_name()),
    );
    page.text(
        right,
        y + 34.0,
        10.0,
        false,
        Align::Left,
        &format!("NIP: {}", options.supervisor.display_nip()),
    );
}

/// Body lines that fit between `y` and the table bottom.
fn lines_that_fit(y: f32) -> usize {
    let room = TABLE_BOTTOM - y - 2.0 * CELL_PADDING;
    if room <= 0.0 {
        return 0;
    }
    (room / line_height(BODY_FONT)).floor() as usize
}

fn lines_per_fresh_page() -> usize {
    lines_that_fit(TABLE_TOP + 2.0 * HEADER_ROW_HEIGHT)
}

/// Draw lines `first..first + count` of every cell as one table row at
/// `top`; returns the row height.
fn draw_row_slice(
    page: &mut PdfPage,
    xs: &[f32; COLUMN_COUNT],
    widths: &[f32; COLUMN_COUNT],
    cells: &[Vec<String>],
    first: usize,
    count: usize,
    top: f32,
) -> f32 {
    let height = count.max(1) as f32 * line_height(BODY_FONT) + 2.0 * CELL_PADDING;

    for (col, lines) in cells.iter().enumerate() {
        page.ops.push(DrawOp::Rect {
            x: xs[col],
            y: top,
            w: widths[col],
            h: height,
            fill: None,
        });
        for (i, line) in lines.iter().skip(first).take(count).enumerate() {
            let baseline = top + CELL_PADDING + ascent(BODY_FONT) + i as f32 * line_height(BODY_FONT);
            if col == 0 {
                page.text(
                    xs[col] + widths[col] / 2.0,
                    baseline,
                    BODY_FONT,
                    false,
                    Align::Center,
                    line,
                );
            } else {
                page.text(xs[col] + CELL_PADDING, baseline, BODY_FONT, false, Align::Left, line);
            }
        }
    }

    height
}

pub fn build_pdf(rows: &[ExportRow], options: &ExportOptions) -> PdfLayout {
    let widths = column_widths();
    let xs = column_x(&widths);

    let mut pages = vec![PdfPage::default()];
    draw_title_block(&mut pages[0], options);
    let mut y = draw_table_header(&mut pages[0], TABLE_TOP_FIRST_PAGE, &widths);
    let mut table_end = None;

    for row in rows {
        let cells: Vec<Vec<String>> = row
            .cells()
            .iter()
            .zip(widths.iter())
            .map(|(text, w)| wrap_text(text, w - 2.0 * CELL_PADDING, BODY_FONT))
            .collect();
        let total = cells.iter().map(Vec::len).max().unwrap_or(1);

        // Rows that fit on a fresh page move there whole; taller rows are
        // split line by line, repeating the header on every page.
        let mut first = 0;
        loop {
            let remaining = total - first;
            let fit = lines_that_fit(y);
            if remaining <= fit {
                let page = pages.len() - 1;
                y += draw_row_slice(&mut pages[page], &xs, &widths, &cells, first, remaining, y);
                break;
            }
            if fit == 0 || (first == 0 && remaining <= lines_per_fresh_page()) {
                pages.push(PdfPage::default());
                let page = pages.len() - 1;
                y = draw_table_header(&mut pages[page], TABLE_TOP, &widths);
                continue;
            }
            let page = pages.len() - 1;
            draw_row_slice(&mut pages[page], &xs, &widths, &cells, first, fit, y);
            first += fit;
            pages.push(PdfPage::default());
            let page = pages.len() - 1;
            y = draw_table_header(&mut pages[page], TABLE_TOP, &widths);
        }
        table_end = Some(y);
    }

    let mut signature_y = table_end.unwrap_or(FALLBACK_TABLE_END) + SIGNATURE_OFFSET;
    if signature_y + SIGNATURE_HEIGHT > CONTENT_BOTTOM {
        pages.push(PdfPage::default());
        signature_y = TABLE_TOP;
    }
    let signature_page = pages.len() - 1;
    draw_signature(&mut pages[signature_page], signature_y, options);

    let total = pages.len();
    for (i, page) in pages.iter_mut().enumerate() {
        page.text(
            PAGE_WIDTH / 2.0,
            FOOTER_Y,
            8.0,
            false,
            Align::Center,
            &format!("Halaman {} dari {}", i + 1, total),
        );
    }

    PdfLayout {
        pages,
        table_end,
        signature_y,
        signature_page,
        body_rows: rows.len(),
    }
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(Rgb::new(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        None,
    ))
}

fn point(x: f32, y: f32) -> (Point, bool) {
    (Point::new(Mm(x), Mm(PAGE_HEIGHT - y)), false)
}

pub fn render_pdf(layout: &PdfLayout, title: &str) -> Result<Vec<u8>, String> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| e.to_string())?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| e.to_string())?;

    for (index, page) in layout.pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_idx, layer_idx) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            doc.get_page(page_idx).get_layer(layer_idx)
        };
        layer.set_outline_color(rgb(BLACK));
        layer.set_outline_thickness(0.2);

        for op in &page.ops {
            match op {
                DrawOp::Text {
                    x,
                    y,
                    size,
                    bold: is_bold,
                    color,
                    text,
                } => {
                    layer.set_fill_color(rgb(*color));
                    let font = if *is_bold { &bold } else { &regular };
                    layer.use_text(text.clone(), *size, Mm(*x), Mm(PAGE_HEIGHT - y), font);
                }
                DrawOp::Line {
                    x1,
                    y1,
                    x2,
                    y2,
                    width,
                } => {
                    layer.set_outline_thickness(*width);
                    layer.add_line(Line {
                        points: vec![point(*x1, *y1), point(*x2, *y2)],
                        is_closed: false,
                    });
                    layer.set_outline_thickness(0.2);
                }
                DrawOp::Rect { x, y, w, h, fill } => {
                    let corners = vec![
                        point(*x, *y),
                        point(x + w, *y),
                        point(x + w, y + h),
                        point(*x, y + h),
                    ];
                    if let Some(fill) = fill {
                        layer.set_fill_color(rgb(*fill));
                        layer.add_polygon(Polygon {
                            rings: vec![corners.clone()],
                            mode: PaintMode::FillStroke,
                            winding_order: WindingOrder::NonZero,
                        });
                    } else {
                        layer.add_line(Line {
                            points: corners,
                            is_closed: true,
                        });
                    }
                }
            }
        }
    }

    doc.save_to_bytes().map_err(|e| e.to_string())
}
