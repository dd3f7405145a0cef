use super::aggregate::{round_cents, Sale, SaleCustomer, SaleLine, SaleTotals, DEFAULT_CURRENCY};
use crate::domain::a001_product::{Presentation, Product};
use crate::shared::validation::{at_least, email, non_negative, required, ValidationError};

/// One line of the sale form, picked from a catalog presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleLineDraft {
    pub product_id: String,
    pub presentation_id: String,
    pub name: String,
    pub unit: String,
    pub unit_price: f64,
    pub quantity: u32,
}

impl Default for SaleLineDraft {
    fn default() -> Self {
        Self {
            product_id: String::new(),
            presentation_id: String::new(),
            name: String::new(),
            unit: String::new(),
            unit_price: 0.0,
            quantity: 1,
        }
    }
}

impl SaleLineDraft {
    pub fn from_catalog(product: &Product, presentation: &Presentation, quantity: u32) -> Self {
        Self {
            product_id: product.id.clone(),
            presentation_id: presentation.id.clone(),
            name: format!("{} {}", product.name, presentation.capacity)
                .trim()
                .to_string(),
            unit: presentation.format.clone(),
            unit_price: presentation.sale_price,
            quantity,
        }
    }

    pub fn subtotal(&self) -> f64 {
        super::aggregate::line_subtotal(self.quantity, self.unit_price)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        required("producto", &self.product_id)?;
        at_least("cantidad", f64::from(self.quantity), 1.0)?;
        non_negative("precio_unitario", self.unit_price)?;
        Ok(())
    }

    fn into_line(self) -> SaleLine {
        SaleLine::new(
            self.product_id,
            self.name,
            self.quantity,
            self.unit,
            self.unit_price,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaleDraft {
    pub date: String,
    pub customer_kind: String,
    pub customer_user_id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub lines: Vec<SaleLineDraft>,
    pub discount: f64,
    pub currency: String,
    pub payment_method: String,
    pub notes: String,
    pub point_of_sale: String,
}

impl SaleDraft {
    /// Empty form dated `today` (`YYYY-MM-DD`) with a single blank line.
    pub fn new(today: impl Into<String>) -> Self {
        Self {
            date: today.into(),
            customer_kind: "visitante".to_string(),
            customer_user_id: String::new(),
            customer_name: String::new(),
            customer_email: String::new(),
            lines: vec![SaleLineDraft::default()],
            discount: 0.0,
            currency: DEFAULT_CURRENCY.to_string(),
            payment_method: String::new(),
            notes: String::new(),
            point_of_sale: String::new(),
        }
    }

    pub fn subtotal(&self) -> f64 {
        round_cents(self.lines.iter().map(SaleLineDraft::subtotal).sum())
    }

    pub fn total(&self) -> f64 {
        round_cents(self.subtotal() - self.discount)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        required("fecha", &self.date)?;
        required("tipo de cliente", &self.customer_kind)?;
        required("nombre del cliente", &self.customer_name)?;
        if !self.customer_email.trim().is_empty() {
            email(&self.customer_email)?;
        }
        if self.lines.is_empty() {
            return Err(ValidationError::Empty("productos"));
        }
        for (index, line) in self.lines.iter().enumerate() {
            line.validate().map_err(|e| ValidationError::at(index, e))?;
        }
        non_negative("descuento", self.discount)?;
        let subtotal = self.subtotal();
        if self.discount > subtotal {
            return Err(ValidationError::DiscountExceedsSubtotal {
                discount: self.discount,
                subtotal,
            });
        }
        required("moneda", &self.currency)?;
        required("método de pago", &self.payment_method)?;
        Ok(())
    }

    /// Validates and builds the payload for `POST /sales`.
    pub fn into_sale(self) -> Result<Sale, ValidationError> {
        self.validate()?;

        let lines: Vec<SaleLine> = self.lines.into_iter().map(SaleLineDraft::into_line).collect();
        let totals = SaleTotals::compute(&lines, self.discount, None, self.currency.trim());

        Ok(Sale {
            id: None,
            date: self.date.trim().to_string(),
            customer: SaleCustomer {
                kind: self.customer_kind,
                user_id: non_blank(self.customer_user_id),
                name: self.customer_name.trim().to_string(),
                email: non_blank(self.customer_email),
            },
            lines,
            totals,
            payment_method: self.payment_method,
            status: None,
            seller: None,
            notes: non_blank(self.notes),
            point_of_sale: non_blank(self.point_of_sale),
        })
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(price: f64, quantity: u32) -> SaleLineDraft {
        SaleLineDraft {
            product_id: "P001".into(),
            presentation_id: "pres-1".into(),
            name: "Miel Multifloral 500g".into(),
            unit: "frasco".into(),
            unit_price: price,
            quantity,
        }
    }

    fn draft() -> SaleDraft {
        let mut d = SaleDraft::new("2024-03-15");
        d.customer_name = "Cliente Uno".into();
        d.payment_method = "efectivo".into();
        d.lines = vec![line(85.0, 2), line(120.0, 1)];
        d.discount = 10.0;
        d
    }

    #[test]
    fn builds_sale_with_totals() {
        let sale = draft().into_sale().unwrap();
        assert_eq!(sale.lines.len(), 2);
        assert_eq!(sale.lines_subtotal(), 290.0);
        assert_eq!(sale.totals.total, 280.0);
        assert_eq!(sale.totals.currency, "MXN");
        assert_eq!(sale.customer.email, None);
        assert_eq!(sale.customer.kind, "visitante");
    }

    #[test]
    fn discount_cannot_exceed_subtotal() {
        let mut d = draft();
        d.discount = 500.0;
        assert_eq!(
            d.validate(),
            Err(ValidationError::DiscountExceedsSubtotal {
                discount: 500.0,
                subtotal: 290.0
            })
        );
    }

    #[test]
    fn rejects_zero_quantity_and_missing_fields() {
        let mut d = draft();
        d.lines[1].quantity = 0;
        assert!(matches!(d.validate(), Err(ValidationError::Item { index: 2, .. })));

        let mut d = draft();
        d.payment_method.clear();
        assert_eq!(d.validate(), Err(ValidationError::Required("método de pago")));

        let mut d = draft();
        d.lines.clear();
        assert_eq!(d.validate(), Err(ValidationError::Empty("productos")));

        let mut d = draft();
        d.customer_email = "no-es-correo".into();
        assert!(matches!(d.validate(), Err(ValidationError::InvalidEmail(_))));
    }

    #[test]
    fn unpicked_line_is_rejected() {
        let mut d = draft();
        d.lines.push(SaleLineDraft::default());
        assert_eq!(
            d.validate(),
            Err(ValidationError::at(2, ValidationError::Required("producto")))
        );
    }
}
