use contracts::domain::a001_product::Product;
use contracts::domain::a002_sale::{Sale, SaleDraft, SaleLineDraft};
use contracts::shared::validation::ValidationError;
use leptos::prelude::*;

const KEY_SEPARATOR: &str = "::";

/// One sellable presentation, as offered by the line picker.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChoice {
    pub key: String,
    pub label: String,
}

pub fn choice_key(product_id: &str, presentation_id: &str) -> String {
    format!("{}{}{}", product_id, KEY_SEPARATOR, presentation_id)
}

/// Every presentation of every active product, labelled with its price.
pub fn line_choices(products: &[Product]) -> Vec<LineChoice> {
    products
        .iter()
        .filter(|p| p.is_active())
        .flat_map(|product| {
            product.presentations.iter().map(move |pres| LineChoice {
                key: choice_key(&product.id, &pres.id),
                label: format!("{} · {} · ${:.2}", product.name, pres.label(), pres.sale_price),
            })
        })
        .collect()
}

/// Line for the picked `key`, or `None` when it no longer exists.
pub fn line_for_choice(products: &[Product], key: &str, quantity: u32) -> Option<SaleLineDraft> {
    let (product_id, presentation_id) = key.split_once(KEY_SEPARATOR)?;
    let product = products.iter().find(|p| p.id == product_id)?;
    let presentation = product
        .presentations
        .iter()
        .find(|p| p.id == presentation_id)?;
    Some(SaleLineDraft::from_catalog(product, presentation, quantity))
}

/// Typed quantity; anything that is not a positive whole number is 0 and
/// fails validation.
pub fn parse_quantity(raw: &str) -> u32 {
    raw.trim().parse().unwrap_or(0)
}

pub fn parse_discount(raw: &str) -> Result<f64, ValidationError> {
    let normalized = raw.trim().replace(',', ".");
    if normalized.is_empty() {
        return Ok(0.0);
    }
    normalized
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or(ValidationError::NotANumber("descuento"))
}

#[derive(Clone, Copy)]
pub struct SaleFormVm {
    pub draft: RwSignal<SaleDraft>,
    /// Discount as typed; parsed on every change.
    pub discount_text: RwSignal<String>,
    pub error: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
}

impl SaleFormVm {
    pub fn new(today: String) -> Self {
        Self {
            draft: RwSignal::new(SaleDraft::new(today)),
            discount_text: RwSignal::new(String::new()),
            error: RwSignal::new(None),
            saving: RwSignal::new(false),
        }
    }

    pub fn pick_line(&self, index: usize, products: &[Product], key: &str) {
        self.draft.update(|d| {
            if let Some(line) = d.lines.get_mut(index) {
                let quantity = line.quantity;
                *line = line_for_choice(products, key, quantity).unwrap_or_default();
            }
        });
    }

    pub fn set_quantity(&self, index: usize, raw: &str) {
        let quantity = parse_quantity(raw);
        self.draft.update(|d| {
            if let Some(line) = d.lines.get_mut(index) {
                line.quantity = quantity;
            }
        });
    }

    pub fn add_line(&self) {
        self.draft.update(|d| d.lines.push(SaleLineDraft::default()));
    }

    pub fn remove_line(&self, index: usize) {
        self.draft.update(|d| {
            if d.lines.len() > 1 && index < d.lines.len() {
                d.lines.remove(index);
            }
        });
    }

    pub fn set_discount(&self, raw: String) {
        if let Ok(discount) = parse_discount(&raw) {
            self.draft.update(|d| d.discount = discount);
        }
        self.discount_text.set(raw);
    }

    /// Validated sale ready to submit.
    pub fn build(&self) -> Result<Sale, ValidationError> {
        let discount = parse_discount(&self.discount_text.get_untracked())?;
        let mut draft = self.draft.get_untracked();
        draft.discount = discount;
        draft.into_sale()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_product::adapter::adapt_product;
    use serde_json::json;

    fn catalog() -> Vec<Product> {
        vec![
            adapt_product(&json!({
                "_id": "p1",
                "codigo": "MIEL-01",
                "nombre": "Miel Pura de Abeja",
                "estado": "Activo",
                "atributos": { "presentaciones": [
                    { "_id": "a", "sku": "M-500", "formato": "Frasco", "capacidad": "500g", "precio_venta": 150 },
                    { "_id": "b", "sku": "M-1000", "formato": "Frasco", "capacidad": "1kg", "precio_venta": 280 }
                ]}
            })),
            adapt_product(&json!({
                "_id": "p2",
                "codigo": "CERA-01",
                "nombre": "Cera",
                "estado": "Inactivo",
                "atributos": { "presentaciones": [{ "_id": "c", "sku": "C-1", "precio_venta": 40 }] }
            })),
        ]
    }

    #[test]
    fn choices_skip_inactive_products() {
        let choices = line_choices(&catalog());
        assert_eq!(choices.len(), 2);
        assert_eq!(choices[0].key, "p1::a");
        assert!(choices[1].label.ends_with("$280.00"));
    }

    #[test]
    fn picked_line_takes_the_presentation_price() {
        let line = line_for_choice(&catalog(), "p1::b", 3).expect("line");
        assert_eq!(line.product_id, "p1");
        assert_eq!(line.unit_price, 280.0);
        assert_eq!(line.subtotal(), 840.0);
        assert!(line_for_choice(&catalog(), "p1::zz", 1).is_none());
        assert!(line_for_choice(&catalog(), "garbage", 1).is_none());
    }

    #[test]
    fn quantity_and_discount_parsing() {
        assert_eq!(parse_quantity(" 4 "), 4);
        assert_eq!(parse_quantity("-1"), 0);
        assert_eq!(parse_quantity("dos"), 0);
        assert_eq!(parse_discount("12,5"), Ok(12.5));
        assert_eq!(parse_discount(""), Ok(0.0));
        assert_eq!(parse_discount("x"), Err(ValidationError::NotANumber("descuento")));
    }

    #[test]
    fn build_rejects_discount_above_subtotal() {
        let vm = SaleFormVm::new("2024-05-02".into());
        let products = catalog();
        vm.pick_line(0, &products, "p1::a");
        vm.set_quantity(0, "2");
        vm.draft.update(|d| {
            d.customer_name = "Ana".into();
            d.payment_method = "efectivo".into();
        });

        vm.set_discount("400".into());
        assert!(matches!(
            vm.build(),
            Err(ValidationError::DiscountExceedsSubtotal { .. })
        ));

        vm.set_discount("50".into());
        let sale = vm.build().expect("valid sale");
        assert_eq!(sale.totals.total, 250.0);
        assert_eq!(sale.lines[0].subtotal, 300.0);
    }
}
