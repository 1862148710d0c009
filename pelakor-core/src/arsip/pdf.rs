//! PDF backend for the archive export: paginated A4 table via `printpdf`.

use std::io::Cursor;

use printpdf::image_crate::codecs::png::PngDecoder;
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument,
    PdfLayerReference, Point, Polygon, Rgb,
};

use super::{ArchiveRow, COLUMN_HEADERS, COLUMN_WIDTHS_MM, TITLE, summary_line};
use crate::error::{PelakorError, Result};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 15.0;
const ROW_HEIGHT: f32 = 8.0;
const HEADER_BAND_HEIGHT: f32 = 9.0;
/// A new page starts when the space left above the bottom margin drops below
/// this before the next row is drawn.
const PAGE_BREAK_THRESHOLD: f32 = ROW_HEIGHT + 2.0;
const LOGO_BOX: f32 = 18.0;
const CELL_PADDING: f32 = 2.0;

fn pdf_err(err: impl std::fmt::Display) -> PelakorError {
    PelakorError::Pdf(err.to_string())
}

/// Render the laid-out rows into a finished PDF document.
pub(super) fn render(
    rows: &[ArchiveRow],
    subtitle: Option<&str>,
    logo: Option<&[u8]>,
) -> Result<Vec<u8>> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(TITLE, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Halaman 1");
    let font = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_err)?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    let mut y = PAGE_HEIGHT - MARGIN;

    y = draw_document_header(&layer, &bold, &font, subtitle, logo, y);
    draw_header_band(&layer, &bold, y);
    y -= HEADER_BAND_HEIGHT;

    for (index, row) in rows.iter().enumerate() {
        if y - MARGIN < PAGE_BREAK_THRESHOLD {
            let (page, new_layer) =
                doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Halaman berikut");
            layer = doc.get_page(page).get_layer(new_layer);
            y = PAGE_HEIGHT - MARGIN;
            draw_header_band(&layer, &bold, y);
            y -= HEADER_BAND_HEIGHT;
        }
        draw_row(&layer, &font, y, row, index % 2 == 1);
        y -= ROW_HEIGHT;
    }

    if y - MARGIN < ROW_HEIGHT {
        let (page, new_layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Halaman berikut");
        layer = doc.get_page(page).get_layer(new_layer);
        y = PAGE_HEIGHT - MARGIN;
    }
    layer.set_fill_color(black());
    layer.use_text(summary_line(rows.len()), 10.0, Mm(MARGIN), Mm(y - 6.0), &bold);

    doc.save_to_bytes().map_err(pdf_err)
}

/// Draw the logo, title, and optional subtitle; returns the new cursor.
fn draw_document_header(
    layer: &PdfLayerReference,
    bold: &IndirectFontRef,
    font: &IndirectFontRef,
    subtitle: Option<&str>,
    logo: Option<&[u8]>,
    y: f32,
) -> f32 {
    let mut text_x = MARGIN;
    let mut header_height = 16.0;
    // A logo that fails to decode is skipped, never fatal.
    if let Some(image) = logo.and_then(decode_logo) {
        place_logo(layer, image, y);
        text_x = MARGIN + LOGO_BOX + 4.0;
        header_height = LOGO_BOX + 4.0;
    }
    layer.set_fill_color(black());
    layer.use_text(TITLE, 16.0, Mm(text_x), Mm(y - 8.0), bold);
    if let Some(subtitle) = subtitle {
        layer.use_text(subtitle, 10.0, Mm(text_x), Mm(y - 14.0), font);
    }
    y - header_height - 4.0
}

fn decode_logo(bytes: &[u8]) -> Option<Image> {
    let decoder = PngDecoder::new(Cursor::new(bytes)).ok()?;
    Image::try_from(decoder).ok()
}

fn place_logo(layer: &PdfLayerReference, image: Image, y: f32) {
    let dpi = 300.0;
    let width_mm = image.image.width.0 as f32 * 25.4 / dpi;
    let height_mm = image.image.height.0 as f32 * 25.4 / dpi;
    if width_mm <= 0.0 || height_mm <= 0.0 {
        return;
    }
    let scale = (LOGO_BOX / width_mm).min(LOGO_BOX / height_mm);
    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(MARGIN)),
            translate_y: Some(Mm(y - LOGO_BOX)),
            scale_x: Some(scale),
            scale_y: Some(scale),
            ..Default::default()
        },
    );
}

/// Column x boundaries, left edge first, right edge last.
fn column_edges() -> [f32; 6] {
    let mut edges = [MARGIN; 6];
    for (index, width) in COLUMN_WIDTHS_MM.iter().enumerate() {
        edges[index + 1] = edges[index] + width;
    }
    edges
}

fn draw_header_band(layer: &PdfLayerReference, bold: &IndirectFontRef, y: f32) {
    fill_rect(layer, MARGIN, y, PAGE_WIDTH - 2.0 * MARGIN, HEADER_BAND_HEIGHT, gray(0.80));
    layer.set_fill_color(black());
    let edges = column_edges();
    for (header, left) in COLUMN_HEADERS.iter().zip(edges) {
        layer.use_text(*header, 10.0, Mm(left + CELL_PADDING), Mm(y - 6.0), bold);
    }
    draw_borders(layer, y, HEADER_BAND_HEIGHT, true);
}

fn draw_row(layer: &PdfLayerReference, font: &IndirectFontRef, y: f32, row: &ArchiveRow, shaded: bool) {
    if shaded {
        fill_rect(layer, MARGIN, y, PAGE_WIDTH - 2.0 * MARGIN, ROW_HEIGHT, gray(0.93));
    }
    layer.set_fill_color(black());
    let edges = column_edges();
    for (cell, left) in row.cells.iter().zip(edges) {
        layer.use_text(cell.as_str(), 9.0, Mm(left + CELL_PADDING), Mm(y - 5.5), font);
    }
    draw_borders(layer, y, ROW_HEIGHT, false);
}

/// Stroke the vertical dividers and the bottom edge of a band starting at
/// `y` and extending `height` downwards; `with_top` also strokes the top.
fn draw_borders(layer: &PdfLayerReference, y: f32, height: f32, with_top: bool) {
    layer.set_outline_color(gray(0.35));
    layer.set_outline_thickness(0.3);
    let edges = column_edges();
    for x in edges {
        stroke_line(layer, x, y, x, y - height);
    }
    stroke_line(layer, edges[0], y - height, edges[5], y - height);
    if with_top {
        stroke_line(layer, edges[0], y, edges[5], y);
    }
}

fn stroke_line(layer: &PdfLayerReference, x1: f32, y1: f32, x2: f32, y2: f32) {
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(x1), Mm(y1)), false),
            (Point::new(Mm(x2), Mm(y2)), false),
        ],
        is_closed: false,
    });
}

fn fill_rect(layer: &PdfLayerReference, x: f32, y: f32, width: f32, height: f32, color: Color) {
    layer.set_fill_color(color);
    layer.add_polygon(Polygon {
        rings: vec![vec![
            (Point::new(Mm(x), Mm(y)), false),
            (Point::new(Mm(x + width), Mm(y)), false),
            (Point::new(Mm(x + width), Mm(y - height)), false),
            (Point::new(Mm(x), Mm(y - height)), false),
        ]],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    });
}

fn gray(level: f32) -> Color {
    Color::Rgb(Rgb::new(level, level, level, None))
}

fn black() -> Color {
    Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None))
}

#[cfg(test)]
mod tests {
    use super::{column_edges, decode_logo, render};
    use crate::arsip::ArchiveRow;

    fn sample_row(no: usize) -> ArchiveRow {
        ArchiveRow {
            cells: [
                no.to_string(),
                format!("Laporan {no}"),
                "Budi".to_string(),
                "Selesai".to_string(),
                "15/01/2024".to_string(),
            ],
        }
    }

    #[test]
    fn column_edges_span_the_content_width() {
        let edges = column_edges();
        assert_eq!(edges[0], 15.0);
        assert_eq!(edges[5], 195.0);
    }

    #[test]
    fn render_produces_pdf_bytes() {
        let rows: Vec<ArchiveRow> = (1..=3).map(sample_row).collect();
        let bytes = render(&rows, Some("Periode 01/01/2024 s.d. 31/01/2024"), None)
            .expect("render pdf");
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn render_paginates_long_archives() {
        // Enough rows to force more than one A4 page at 8 mm per row; extra
        // pages show up as extra PDF objects.
        let short = render(&(1..=3).map(sample_row).collect::<Vec<_>>(), None, None)
            .expect("render short pdf");
        let long = render(&(1..=80).map(sample_row).collect::<Vec<_>>(), None, None)
            .expect("render long pdf");
        let count = |bytes: &[u8]| {
            String::from_utf8_lossy(bytes).matches("endobj").count()
        };
        assert!(
            count(&long) > count(&short),
            "expected extra page objects after pagination"
        );
    }

    #[test]
    fn broken_logo_bytes_are_skipped() {
        assert!(decode_logo(b"not a png").is_none());
        let rows = vec![sample_row(1)];
        let bytes = render(&rows, None, Some(b"not a png")).expect("render pdf");
        assert!(bytes.starts_with(b"%PDF"));
    }
}
