//! Paginated-document rendering of the report via genpdf.
//!
//! The document uses a single Latin-1-shaped repertoire; a line containing
//! anything outside it is replaced wholesale with a placeholder entry rather
//! than aborting the document.

use std::path::Path;

use genpdf::{elements::Paragraph, fonts, Document};

pub const ENCODING_PLACEHOLDER: &str = "[Encoding Error Line]";

/// Replaces a line the document encoding cannot represent. Exactly one
/// placeholder per bad line; surrounding lines are unaffected.
pub fn sanitize_line(line: &str) -> String {
    if line.chars().any(|c| c as u32 > 0xFF) {
        ENCODING_PLACEHOLDER.to_string()
    } else {
        line.to_string()
    }
}

fn load_fonts() -> Result<fonts::FontFamily<fonts::FontData>, String> {
    // Probe the usual TrueType locations; genpdf needs real font files.
    if let Ok(font) = fonts::from_files("./fonts", "LiberationSans", None) {
        return Ok(font);
    }
    if let Ok(font) = fonts::from_files(
        "/usr/share/fonts/truetype/liberation",
        "LiberationSans",
        None,
    ) {
        return Ok(font);
    }
    if let Ok(font) = fonts::from_files("/usr/share/fonts/truetype/dejavu", "DejaVuSans", None) {
        return Ok(font);
    }
    if let Ok(font) = fonts::from_files("/Library/Fonts", "Arial", None) {
        return Ok(font);
    }
    if let Ok(font) = fonts::from_files("C:\\Windows\\Fonts", "arial", None) {
        return Ok(font);
    }
    Err(
        "No suitable fonts found for PDF generation; expected TrueType fonts under ./fonts, \
         /usr/share/fonts/truetype or the platform font directory"
            .to_string(),
    )
}

/// Writes one fixed-height text entry per report row.
pub fn write_pdf(rows: &[&str], output: &Path) -> Result<(), String> {
    let font_family = load_fonts()?;
    let mut doc = Document::new(font_family);
    doc.set_title("Extracted Evidence");
    doc.set_minimal_conformance();

    for row in rows {
        doc.push(Paragraph::new(sanitize_line(row)));
    }

    doc.render_to_file(output)
        .map_err(|err| format!("Failed to render PDF: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin1_lines_pass_through() {
        assert_eq!(sanitize_line("Row 1: body=hello"), "Row 1: body=hello");
        assert_eq!(sanitize_line("café au lait"), "café au lait");
    }

    #[test]
    fn non_latin1_line_becomes_exactly_one_placeholder() {
        assert_eq!(sanitize_line("body=привет"), ENCODING_PLACEHOLDER);
        assert_eq!(sanitize_line("emoji \u{1F600}"), ENCODING_PLACEHOLDER);
    }

    #[test]
    fn bad_line_does_not_affect_neighbours() {
        let rows = ["A", "body=привет", "B"];
        let sanitized: Vec<String> = rows.iter().map(|r| sanitize_line(r)).collect();
        assert_eq!(sanitized, vec!["A", ENCODING_PLACEHOLDER, "B"]);
    }
}
