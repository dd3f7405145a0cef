//! Printable payment receipt for a registered sale.

use contracts::domain::a002_sale::aggregate::PAYMENT_METHODS;
use contracts::domain::a002_sale::Sale;

use crate::shared::date_utils::format_date;
use crate::shared::pdf::{wrap_text, PdfDocument, PdfPage, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};

const LEFT_MM: f64 = 15.0;
const TOTALS_X_MM: f64 = 150.0;
const DESCRIPTION_WIDTH_MM: f64 = 85.0;
const NOTES_WIDTH_MM: f64 = 180.0;
const ROW_STEP_MM: f64 = 5.0;
const BODY_SIZE: f64 = 10.0;
const TABLE_SIZE: f64 = 9.0;
const WRAP_STEP_MM: f64 = 4.0;
const NOTE_STEP_MM: f64 = 5.0;
/// First baseline on continuation pages.
const TOP_MM: f64 = 20.0;
/// Last usable baseline.
const BOTTOM_MM: f64 = PAGE_HEIGHT_MM - 15.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptLine {
    pub quantity: u32,
    pub description: String,
    pub unit_price: f64,
    pub subtotal: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub folio: String,
    pub date: String,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub lines: Vec<ReceiptLine>,
    pub subtotal: f64,
    pub vat: f64,
    pub discount: f64,
    pub total: f64,
    pub currency: String,
    pub payment_method: String,
    pub status: String,
    pub notes: Option<String>,
}

impl Receipt {
    pub fn from_sale(sale: &Sale) -> Self {
        Self {
            folio: sale.folio().to_string(),
            date: format_date(&sale.date),
            customer_name: sale.customer.name.clone(),
            customer_email: sale.customer.email.clone().filter(|e| !e.trim().is_empty()),
            lines: sale
                .lines
                .iter()
                .map(|line| ReceiptLine {
                    quantity: line.quantity,
                    description: line.name.clone(),
                    unit_price: line.unit_price,
                    subtotal: line.subtotal,
                })
                .collect(),
            subtotal: sale.lines_subtotal(),
            vat: sale.totals.taxes.unwrap_or(0.0),
            discount: sale.totals.discount.unwrap_or(0.0),
            total: sale.totals.total,
            currency: sale.totals.currency.clone(),
            payment_method: payment_method_label(&sale.payment_method),
            status: sale
                .status
                .clone()
                .unwrap_or_else(|| "Registrada".to_string()),
            notes: sale.notes.clone().filter(|n| !n.trim().is_empty()),
        }
    }

    pub fn filename(&self) -> String {
        format!("comprobante_{}.pdf", self.folio)
    }

    /// Positions every text element on A4 pages. Rows, totals and notes that
    /// would pass the bottom margin continue on a new page; product rows
    /// repeat the column headers there.
    pub fn layout(&self) -> PdfDocument {
        let mut doc = PdfDocument::new();
        let page = doc.current();
        page.heading(PAGE_WIDTH_MM / 2.0, 15.0, 12.0, "Comprobante de Pago");

        page.text(LEFT_MM, 25.0, BODY_SIZE, format!("Folio: {}", self.folio))
            .text(150.0, 25.0, BODY_SIZE, format!("Fecha: {}", self.date))
            .text(LEFT_MM, 33.0, BODY_SIZE, format!("Cliente: {}", self.customer_name));
        if let Some(email) = &self.customer_email {
            page.text(LEFT_MM, 51.0, BODY_SIZE, format!("Email: {}", email));
        }

        let mut y = 60.0;
        page.bold(LEFT_MM, y, BODY_SIZE, "Productos:");
        y += 6.0;
        column_headers(page, y);
        y += ROW_STEP_MM;

        for line in &self.lines {
            let wrapped = wrap_text(&line.description, DESCRIPTION_WIDTH_MM, TABLE_SIZE);
            let extra_rows = wrapped.len().saturating_sub(1) as f64;
            if y + extra_rows * WRAP_STEP_MM > BOTTOM_MM {
                column_headers(doc.add_page(), TOP_MM);
                y = TOP_MM + ROW_STEP_MM;
            }
            let page = doc.current();
            page.text(LEFT_MM, y, TABLE_SIZE, line.quantity.to_string())
                .text(120.0, y, TABLE_SIZE, format!("{:.2}", line.unit_price))
                .text(160.0, y, TABLE_SIZE, format!("{:.2}", line.subtotal));
            for (i, text) in wrapped.into_iter().enumerate() {
                page.text(30.0, y + i as f64 * WRAP_STEP_MM, TABLE_SIZE, text);
            }
            y += ROW_STEP_MM + extra_rows * WRAP_STEP_MM;
        }

        y += 2.0;
        // three amounts then the total, kept together
        if y + 3.0 * ROW_STEP_MM > BOTTOM_MM {
            doc.add_page();
            y = TOP_MM;
        }
        for text in [
            format!("Subtotal: ${:.2}", self.subtotal),
            format!("IVA: ${:.2}", self.vat),
            format!("Descuento: ${:.2}", self.discount),
        ] {
            doc.current().text(TOTALS_X_MM, y, BODY_SIZE, text);
            y += ROW_STEP_MM;
        }
        doc.current().bold(
            TOTALS_X_MM,
            y,
            BODY_SIZE,
            format!("Total: ${:.2} {}", self.total, self.currency),
        );
        y += 8.0;

        if y + 18.0 > BOTTOM_MM {
            doc.add_page();
            y = TOP_MM;
        }
        doc.current()
            .text(LEFT_MM, y, BODY_SIZE, format!("Método de pago: {}", self.payment_method));
        y += 18.0;
        doc.current()
            .text(LEFT_MM, y, BODY_SIZE, format!("Estatus: {}", self.status));
        if let Some(notes) = &self.notes {
            y += 6.0;
            for text in wrap_text(notes, NOTES_WIDTH_MM, BODY_SIZE) {
                if y > BOTTOM_MM {
                    doc.add_page();
                    y = TOP_MM;
                }
                doc.current().text(LEFT_MM, y, BODY_SIZE, text);
                y += NOTE_STEP_MM;
            }
        }
        doc
    }

    pub fn to_pdf(&self) -> Vec<u8> {
        self.layout().to_pdf()
    }
}

fn column_headers(page: &mut PdfPage, y: f64) {
    page.bold(LEFT_MM, y, TABLE_SIZE, "Cant.")
        .bold(30.0, y, TABLE_SIZE, "Descripción")
        .bold(120.0, y, TABLE_SIZE, "P. Unit.")
        .bold(160.0, y, TABLE_SIZE, "Subtotal");
}

fn payment_method_label(value: &str) -> String {
    PAYMENT_METHODS
        .iter()
        .find(|(v, _)| *v == value)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_sale::{SaleCustomer, SaleLine, SaleTotals};

    fn sale() -> Sale {
        let lines = vec![
            SaleLine::new("p1", "Miel Pura de Abeja 500g", 2, "Frasco", 150.0),
            SaleLine::new("p2", "Cera de abeja en barra", 1, "Pieza", 45.5),
        ];
        let totals = SaleTotals::compute(&lines, 20.0, None, "MXN");
        Sale {
            id: Some("V-0042".into()),
            date: "2024-05-02T10:15:00Z".into(),
            customer: SaleCustomer {
                kind: "visitante".into(),
                user_id: None,
                name: "Ana López".into(),
                email: Some("ana@example.com".into()),
            },
            lines,
            totals,
            payment_method: "tarjeta".into(),
            status: None,
            seller: None,
            notes: Some("Entregar en mostrador".into()),
            point_of_sale: None,
        }
    }

    fn texts(doc: &PdfDocument) -> Vec<&str> {
        doc.pages()
            .iter()
            .flat_map(|page| page.items())
            .map(|i| i.text.as_str())
            .collect()
    }

    #[test]
    fn receipt_totals_come_from_the_sale() {
        let receipt = Receipt::from_sale(&sale());
        assert_eq!(receipt.subtotal, 345.5);
        assert_eq!(receipt.discount, 20.0);
        assert_eq!(receipt.vat, 0.0);
        assert_eq!(receipt.total, 325.5);
        assert_eq!(receipt.payment_method, "Tarjeta");
        assert_eq!(receipt.date, "02/05/2024");
        assert_eq!(receipt.filename(), "comprobante_V-0042.pdf");
    }

    #[test]
    fn layout_follows_the_printed_form() {
        let doc = Receipt::from_sale(&sale()).layout();
        assert_eq!(doc.pages().len(), 1);
        let items = doc.pages()[0].items();

        let title = &items[0];
        assert_eq!(title.text, "Comprobante de Pago");
        assert_eq!((title.x_mm, title.y_mm, title.size), (105.0, 15.0, 12.0));

        let all = texts(&doc);
        for expected in [
            "Folio: V-0042",
            "Cliente: Ana López",
            "Email: ana@example.com",
            "Productos:",
            "Subtotal: $345.50",
            "IVA: $0.00",
            "Descuento: $20.00",
            "Total: $325.50 MXN",
            "Método de pago: Tarjeta",
            "Estatus: Registrada",
            "Entregar en mostrador",
        ] {
            assert!(all.contains(&expected), "missing {expected}");
        }

        let header = items.iter().find(|i| i.text == "Cant.").unwrap();
        assert_eq!(header.y_mm, 66.0);
        let first_row = items.iter().find(|i| i.text == "300.00").unwrap();
        assert_eq!((first_row.x_mm, first_row.y_mm), (160.0, 71.0));
    }

    #[test]
    fn optional_fields_are_omitted() {
        let mut s = sale();
        s.customer.email = None;
        s.notes = Some("  ".into());
        s.id = None;
        let receipt = Receipt::from_sale(&s);
        assert_eq!(receipt.folio, "SIN-FOLIO");
        let doc = receipt.layout();
        assert!(!texts(&doc).iter().any(|t| t.starts_with("Email:")));
        assert!(receipt.notes.is_none());
    }

    #[test]
    fn long_sales_continue_on_new_pages() {
        let mut s = sale();
        s.lines = (1..=70)
            .map(|i| SaleLine::new(format!("p{i}"), format!("Miel de temporada lote {i}"), 1, "Frasco", 10.0))
            .collect();
        s.notes = Some("Entregar en mostrador. ".repeat(200));
        s.totals = SaleTotals::compute(&s.lines, 0.0, None, "MXN");

        let doc = Receipt::from_sale(&s).layout();
        assert!(doc.pages().len() >= 3);
        for page in doc.pages() {
            for item in page.items() {
                assert!(item.y_mm <= BOTTOM_MM, "{} at {}", item.text, item.y_mm);
            }
        }
        let continued = &doc.pages()[1];
        assert_eq!(continued.items()[0].text, "Cant.");
        assert_eq!(continued.items()[0].y_mm, TOP_MM);

        let all = texts(&doc);
        assert_eq!(all.iter().filter(|t| t.starts_with("Miel de temporada")).count(), 70);
        assert!(all.contains(&"Total: $700.00 MXN"));

        let pdf = String::from_utf8_lossy(&Receipt::from_sale(&s).to_pdf()).to_string();
        assert!(pdf.contains(&format!("/Count {}", doc.pages().len())));
    }

    #[test]
    fn pdf_is_a_single_page_document() {
        let pdf = Receipt::from_sale(&sale()).to_pdf();
        let body = String::from_utf8_lossy(&pdf);
        assert!(body.starts_with("%PDF-1.4"));
        assert!(body.contains("/Count 1"));
        assert!(body.contains("(Folio: V-0042) Tj"));
    }
}
