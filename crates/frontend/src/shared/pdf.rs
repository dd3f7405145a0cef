//! A4 PDF writer for positioned text.
//!
//! Coordinates are in millimetres measured from the top-left corner, the way
//! printed layouts are usually drawn. Text uses the standard Helvetica faces
//! with WinAnsi encoding, so no font has to be embedded; characters outside
//! Latin-1 are written as `?`.

pub const PAGE_WIDTH_PT: f64 = 595.28;
pub const PAGE_HEIGHT_PT: f64 = 841.89;
pub const PAGE_WIDTH_MM: f64 = 210.0;
pub const PAGE_HEIGHT_MM: f64 = 297.0;

const PT_PER_MM: f64 = 72.0 / 25.4;
/// Average Helvetica glyph width as a fraction of the font size.
const AVG_GLYPH_EM: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weight {
    Regular,
    Bold,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub x_mm: f64,
    pub y_mm: f64,
    pub size: f64,
    pub weight: Weight,
    pub align: Align,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdfPage {
    items: Vec<TextItem>,
}

impl PdfPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&mut self, x_mm: f64, y_mm: f64, size: f64, text: impl Into<String>) -> &mut Self {
        self.push(x_mm, y_mm, size, Weight::Regular, Align::Left, text.into())
    }

    pub fn bold(&mut self, x_mm: f64, y_mm: f64, size: f64, text: impl Into<String>) -> &mut Self {
        self.push(x_mm, y_mm, size, Weight::Bold, Align::Left, text.into())
    }

    /// Bold text centred on `x_mm`.
    pub fn heading(&mut self, x_mm: f64, y_mm: f64, size: f64, text: impl Into<String>) -> &mut Self {
        self.push(x_mm, y_mm, size, Weight::Bold, Align::Center, text.into())
    }

    fn push(
        &mut self,
        x_mm: f64,
        y_mm: f64,
        size: f64,
        weight: Weight,
        align: Align,
        text: String,
    ) -> &mut Self {
        self.items.push(TextItem {
            x_mm,
            y_mm,
            size,
            weight,
            align,
            text,
        });
        self
    }

    pub fn items(&self) -> &[TextItem] {
        &self.items
    }

    fn content_stream(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for item in &self.items {
            let font = match item.weight {
                Weight::Regular => "F1",
                Weight::Bold => "F2",
            };
            let x_mm = match item.align {
                Align::Left => item.x_mm,
                Align::Center => item.x_mm - text_width_mm(&item.text, item.size) / 2.0,
            };
            let x = x_mm * PT_PER_MM;
            let y = PAGE_HEIGHT_PT - item.y_mm * PT_PER_MM;
            out.extend_from_slice(
                format!("BT /{} {:.1} Tf {:.2} {:.2} Td (", font, item.size, x, y).as_bytes(),
            );
            out.extend_from_slice(&escape_text(&item.text));
            out.extend_from_slice(b") Tj ET\n");
        }
        out
    }
}

/// Ordered pages sharing the two Helvetica fonts. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfDocument {
    pages: Vec<PdfPage>,
}

impl Default for PdfDocument {
    fn default() -> Self {
        Self {
            pages: vec![PdfPage::new()],
        }
    }
}

impl From<PdfPage> for PdfDocument {
    fn from(page: PdfPage) -> Self {
        Self { pages: vec![page] }
    }
}

impl PdfDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pages(&self) -> &[PdfPage] {
        &self.pages
    }

    /// The last page, where new text goes.
    pub fn current(&mut self) -> &mut PdfPage {
        if self.pages.is_empty() {
            self.pages.push(PdfPage::new());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    pub fn add_page(&mut self) -> &mut PdfPage {
        self.pages.push(PdfPage::new());
        self.current()
    }

    /// Serializes every page into a complete PDF document.
    ///
    /// Objects: 1 catalog, 2 page tree, 3-4 fonts, then a page and its
    /// content stream per page.
    pub fn to_pdf(&self) -> Vec<u8> {
        let page_object = |index: usize| 5 + index * 2;
        let kids: Vec<String> = (0..self.pages.len())
            .map(|i| format!("{} 0 R", page_object(i)))
            .collect();

        let mut objects: Vec<Vec<u8>> = vec![
            b"<< /Type /Catalog /Pages 2 0 R >>".to_vec(),
            format!(
                "<< /Type /Pages /Kids [{}] /Count {} >>",
                kids.join(" "),
                self.pages.len()
            )
            .into_bytes(),
            font_object("Helvetica"),
            font_object("Helvetica-Bold"),
        ];
        for (index, page) in self.pages.iter().enumerate() {
            objects.push(
                format!(
                    "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
                     /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {} 0 R >>",
                    PAGE_WIDTH_PT,
                    PAGE_HEIGHT_PT,
                    page_object(index) + 1
                )
                .into_bytes(),
            );
            let content = page.content_stream();
            let mut stream = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
            stream.extend_from_slice(&content);
            stream.extend_from_slice(b"\nendstream");
            objects.push(stream);
        }

        let mut out: Vec<u8> = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::with_capacity(objects.len());
        for (index, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n", index + 1).as_bytes());
            out.extend_from_slice(body);
            out.extend_from_slice(b"\nendobj\n");
        }

        let xref_offset = out.len();
        out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
        out.extend_from_slice(b"0000000000 65535 f \n");
        for offset in offsets {
            out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
        }
        out.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
                objects.len() + 1,
                xref_offset
            )
            .as_bytes(),
        );
        out
    }
}

fn font_object(base_font: &str) -> Vec<u8> {
    format!(
        "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
        base_font
    )
    .into_bytes()
}

/// WinAnsi bytes of `text` with the string delimiters escaped.
fn escape_text(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '(' | ')' | '\\' => {
                out.push(b'\\');
                out.push(ch as u8);
            }
            '\n' | '\r' | '\t' => out.push(b' '),
            c if (c as u32) <= 0xFF => out.push(c as u32 as u8),
            _ => out.push(b'?'),
        }
    }
    out
}

/// Estimated rendered width of `text` in millimetres.
pub fn text_width_mm(text: &str, size: f64) -> f64 {
    text.chars().count() as f64 * size * AVG_GLYPH_EM / PT_PER_MM
}

/// Greedy word wrap to lines no wider than `width_mm`. A single word longer
/// than the width gets its own line.
pub fn wrap_text(text: &str, width_mm: f64, size: f64) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if line.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", line, word)
            };
            if !line.is_empty() && text_width_mm(&candidate, size) > width_mm {
                lines.push(std::mem::take(&mut line));
                line = word.to_string();
            } else {
                line = candidate;
            }
        }
        if !line.is_empty() {
            lines.push(line);
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).position(|w| w == needle)
    }

    #[test]
    fn document_has_header_trailer_and_valid_xref() {
        let mut page = PdfPage::new();
        page.heading(105.0, 15.0, 12.0, "COMPROBANTE DE VENTA")
            .text(15.0, 25.0, 10.0, "Folio: V-001");
        let pdf = PdfDocument::from(page).to_pdf();

        assert!(pdf.starts_with(b"%PDF-1.4\n"));
        assert!(pdf.ends_with(b"%%EOF\n"));

        let xref = find(&pdf, b"xref\n").expect("xref table");
        let startxref = find(&pdf, b"startxref\n").expect("startxref");
        let declared: usize = String::from_utf8_lossy(&pdf[startxref + 10..])
            .lines()
            .next()
            .and_then(|l| l.parse().ok())
            .expect("xref offset");
        assert_eq!(declared, xref);

        // every xref entry points at its object header
        let table = String::from_utf8_lossy(&pdf[xref..startxref]).to_string();
        let entries: Vec<usize> = table
            .lines()
            .filter(|l| l.ends_with(" n "))
            .map(|l| l[..10].parse().expect("offset"))
            .collect();
        assert_eq!(entries.len(), 6);
        for (index, offset) in entries.iter().enumerate() {
            let header = format!("{} 0 obj", index + 1);
            assert!(pdf[*offset..].starts_with(header.as_bytes()));
        }
    }

    #[test]
    fn stream_length_matches_content() {
        let mut page = PdfPage::new();
        page.text(15.0, 60.0, 9.0, "Miel (500 g) \\ envase");
        let pdf = PdfDocument::from(page.clone()).to_pdf();
        let content = page.content_stream();
        let marker = format!("<< /Length {} >>\nstream\n", content.len());
        let start = find(&pdf, marker.as_bytes()).expect("stream header") + marker.len();
        assert_eq!(&pdf[start..start + content.len()], content.as_slice());
        assert!(find(&content, b"(Miel \\(500 g\\) \\\\ envase) Tj").is_some());
    }

    #[test]
    fn every_page_gets_its_own_content_stream() {
        let mut doc = PdfDocument::new();
        doc.current().text(15.0, 20.0, 10.0, "uno");
        doc.add_page().text(15.0, 20.0, 10.0, "dos");
        let pdf = doc.to_pdf();
        let body = String::from_utf8_lossy(&pdf).to_string();

        assert!(body.contains("/Kids [5 0 R 7 0 R] /Count 2"));
        assert!(body.contains("/Contents 6 0 R"));
        assert!(body.contains("/Contents 8 0 R"));
        let first = body.find("(uno) Tj").expect("first page text");
        let second = body.find("(dos) Tj").expect("second page text");
        assert!(first < second);
        assert_eq!(doc.pages().len(), 2);
    }

    #[test]
    fn latin1_is_kept_and_other_chars_replaced() {
        assert_eq!(escape_text("Añejo"), vec![b'A', 0xF1, b'e', b'j', b'o']);
        assert_eq!(escape_text("10€"), b"10?".to_vec());
    }

    #[test]
    fn positions_are_measured_from_the_top() {
        let mut page = PdfPage::new();
        page.text(0.0, 0.0, 10.0, "a");
        let content = String::from_utf8_lossy(&page.content_stream()).to_string();
        assert!(content.contains("0.00 841.89 Td"));
    }

    #[test]
    fn centred_text_starts_left_of_anchor() {
        let mut page = PdfPage::new();
        page.heading(105.0, 15.0, 12.0, "ABCD");
        let content = String::from_utf8_lossy(&page.content_stream()).to_string();
        let x = (105.0 - text_width_mm("ABCD", 12.0) / 2.0) * PT_PER_MM;
        assert!(content.contains(&format!("{:.2} ", x)));
        assert!(content.starts_with("BT /F2 12.0 Tf"));
    }

    #[test]
    fn wraps_on_word_boundaries() {
        let lines = wrap_text("Miel multifloral de la sierra de Puebla", 30.0, 9.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.join(" "), "Miel multifloral de la sierra de Puebla");
        for line in &lines {
            assert!(text_width_mm(line, 9.0) <= 30.0 || !line.contains(' '));
        }
        assert!(wrap_text("", 30.0, 9.0).is_empty());
    }
}
