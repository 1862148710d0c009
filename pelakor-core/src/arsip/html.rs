//! HTML backend for the archive export: one printable document.
//!
//! The document carries print CSS and a script that waits for the logo to
//! load before calling `window.print()`, so the print dialog never opens on
//! a page with a missing image. Without a logo it prints immediately.

use std::fmt::Write;

use base64::{Engine as _, engine::general_purpose};

use super::{ArchiveRow, COLUMN_HEADERS, TITLE, summary_line};

/// Render the laid-out rows into a printable HTML document.
pub(super) fn render(rows: &[ArchiveRow], subtitle: Option<&str>, logo: Option<&[u8]>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "<!DOCTYPE html>");
    let _ = writeln!(out, "<html lang=\"id\">");
    let _ = writeln!(out, "<head>");
    let _ = writeln!(out, "<meta charset=\"utf-8\">");
    let _ = writeln!(out, "<title>{}</title>", escape(TITLE));
    let _ = writeln!(out, "<style>{STYLE}</style>");
    let _ = writeln!(out, "</head>");
    let _ = writeln!(out, "<body>");

    let _ = writeln!(out, "<header>");
    if let Some(bytes) = logo {
        let encoded = general_purpose::STANDARD.encode(bytes);
        let _ = writeln!(
            out,
            "<img id=\"logo\" src=\"data:image/png;base64,{encoded}\" alt=\"Logo\">"
        );
    }
    let _ = writeln!(out, "<div><h1>{}</h1>", escape(TITLE));
    if let Some(subtitle) = subtitle {
        let _ = writeln!(out, "<p class=\"periode\">{}</p>", escape(subtitle));
    }
    let _ = writeln!(out, "</div></header>");

    let _ = writeln!(out, "<table>");
    let _ = writeln!(out, "<thead><tr>");
    for header in COLUMN_HEADERS {
        let _ = writeln!(out, "<th>{}</th>", escape(header));
    }
    let _ = writeln!(out, "</tr></thead>");
    let _ = writeln!(out, "<tbody>");
    for row in rows {
        let _ = writeln!(out, "<tr>");
        for cell in &row.cells {
            let _ = writeln!(out, "<td>{}</td>", escape(cell));
        }
        let _ = writeln!(out, "</tr>");
    }
    let _ = writeln!(out, "</tbody>");
    let _ = writeln!(out, "</table>");

    let _ = writeln!(out, "<p class=\"ringkasan\">{}</p>", escape(&summary_line(rows.len())));
    let _ = writeln!(out, "<script>{PRINT_SCRIPT}</script>");
    let _ = writeln!(out, "</body>");
    let _ = writeln!(out, "</html>");
    out
}

const STYLE: &str = "\
body { font-family: Helvetica, Arial, sans-serif; margin: 15mm; color: #111; }\n\
header { display: flex; align-items: center; gap: 6mm; margin-bottom: 6mm; }\n\
header img { width: 18mm; height: auto; }\n\
h1 { font-size: 16pt; margin: 0; }\n\
.periode { font-size: 10pt; margin: 1mm 0 0; }\n\
table { width: 100%; border-collapse: collapse; font-size: 9pt; }\n\
th, td { border: 0.3mm solid #595959; padding: 1.5mm 2mm; text-align: left; }\n\
thead th { background: #cccccc; }\n\
tbody tr:nth-child(even) { background: #ededed; }\n\
.ringkasan { font-size: 10pt; font-weight: bold; margin-top: 4mm; }\n\
@media print { body { margin: 0; } @page { size: A4; margin: 15mm; } }\n";

/// Print once the logo has finished loading, or immediately when it is
/// missing or broken.
const PRINT_SCRIPT: &str = "\
(function () {\n\
  var logo = document.getElementById('logo');\n\
  var print = function () { window.print(); };\n\
  if (!logo) { print(); return; }\n\
  if (logo.complete) { print(); return; }\n\
  logo.onload = print;\n\
  logo.onerror = print;\n\
})();\n";

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{escape, render};
    use crate::arsip::ArchiveRow;

    fn sample_row() -> ArchiveRow {
        ArchiveRow {
            cells: [
                "1".to_string(),
                "Kerusakan <AC> & \"lainnya\"".to_string(),
                "Budi".to_string(),
                "Selesai".to_string(),
                "15/01/2024".to_string(),
            ],
        }
    }

    #[test]
    fn escapes_markup_in_cells() {
        let html = render(&[sample_row()], None, None);
        assert!(html.contains("Kerusakan &lt;AC&gt; &amp; &quot;lainnya&quot;"));
        assert!(!html.contains("<AC>"));
    }

    #[test]
    fn without_logo_prints_immediately_and_has_no_img() {
        let html = render(&[sample_row()], None, None);
        assert!(!html.contains("<img"));
        assert!(html.contains("window.print()"));
    }

    #[test]
    fn logo_is_inlined_as_base64_with_load_guard() {
        let html = render(&[sample_row()], Some("Periode"), Some(b"pngbytes"));
        assert!(html.contains("data:image/png;base64,"));
        assert!(html.contains("logo.onload = print"));
        assert!(html.contains("logo.onerror = print"));
    }

    #[test]
    fn escape_handles_all_specials() {
        assert_eq!(escape("a&b<c>d\"e'f"), "a&amp;b&lt;c&gt;d&quot;e&#39;f");
    }
}
