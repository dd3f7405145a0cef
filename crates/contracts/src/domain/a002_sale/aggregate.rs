use serde::{Deserialize, Serialize};

use crate::shared::json_fields::{lenient_amount, lenient_count};

pub const DEFAULT_CURRENCY: &str = "MXN";

pub const PAYMENT_METHODS: &[(&str, &str)] = &[
    ("efectivo", "Efectivo"),
    ("tarjeta", "Tarjeta"),
    ("transferencia", "Transferencia"),
];

pub const CUSTOMER_KINDS: &[(&str, &str)] = &[
    ("visitante", "Visitante"),
    ("registrado", "Registrado"),
];

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SaleCustomer {
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "usuario_id", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleLine {
    #[serde(rename = "producto_id")]
    pub product_id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "cantidad", deserialize_with = "lenient_count")]
    pub quantity: u32,
    #[serde(rename = "unidad")]
    pub unit: String,
    #[serde(rename = "precio_unitario", deserialize_with = "lenient_amount")]
    pub unit_price: f64,
    #[serde(rename = "subtotal_producto", deserialize_with = "lenient_amount")]
    pub subtotal: f64,
}

impl SaleLine {
    pub fn new(
        product_id: impl Into<String>,
        name: impl Into<String>,
        quantity: u32,
        unit: impl Into<String>,
        unit_price: f64,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            quantity,
            unit: unit.into(),
            unit_price,
            subtotal: line_subtotal(quantity, unit_price),
        }
    }
}

pub fn line_subtotal(quantity: u32, unit_price: f64) -> f64 {
    round_cents(f64::from(quantity) * unit_price)
}

pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleTotals {
    #[serde(rename = "impuestos", default, skip_serializing_if = "Option::is_none")]
    pub taxes: Option<f64>,
    #[serde(rename = "descuento", default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    #[serde(deserialize_with = "lenient_amount")]
    pub total: f64,
    #[serde(rename = "moneda")]
    pub currency: String,
}

impl SaleTotals {
    /// total = Σ line subtotals − discount + taxes
    pub fn compute(lines: &[SaleLine], discount: f64, taxes: Option<f64>, currency: &str) -> Self {
        let subtotal: f64 = lines.iter().map(|l| l.subtotal).sum();
        let total = round_cents(subtotal - discount + taxes.unwrap_or(0.0));
        Self {
            taxes,
            discount: Some(discount),
            total,
            currency: currency.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "fecha")]
    pub date: String,
    #[serde(rename = "cliente")]
    pub customer: SaleCustomer,
    #[serde(rename = "productos")]
    pub lines: Vec<SaleLine>,
    #[serde(rename = "totales")]
    pub totals: SaleTotals,
    #[serde(rename = "metodo_pago")]
    pub payment_method: String,
    #[serde(rename = "estado", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "usuario_vendedor", default, skip_serializing_if = "Option::is_none")]
    pub seller: Option<String>,
    #[serde(rename = "observaciones", default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "ubicacion_venta", default, skip_serializing_if = "Option::is_none")]
    pub point_of_sale: Option<String>,
}

impl Sale {
    pub fn lines_subtotal(&self) -> f64 {
        round_cents(self.lines.iter().map(|l| l.subtotal).sum())
    }

    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn folio(&self) -> &str {
        self.id.as_deref().unwrap_or("SIN-FOLIO")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn totals_apply_discount() {
        let lines = vec![
            SaleLine::new("P001", "Miel Multifloral 500g", 2, "frasco", 85.0),
            SaleLine::new("P003", "Propóleo Extracto 30ml", 1, "frasco", 120.0),
        ];
        assert_eq!(lines[0].subtotal, 170.0);

        let totals = SaleTotals::compute(&lines, 10.0, None, DEFAULT_CURRENCY);
        assert_eq!(totals.total, 280.0);
        assert_eq!(totals.discount, Some(10.0));
        assert_eq!(totals.currency, "MXN");
    }

    #[test]
    fn sale_decodes_backend_shape() {
        let raw = json!({
            "_id": "S001",
            "fecha": "2024-03-15T14:02:26.123Z",
            "cliente": {"tipo": "registrado", "usuario_id": "U001", "nombre": "Cliente Uno"},
            "productos": [
                {"producto_id": "P001", "nombre": "Miel", "cantidad": 2, "unidad": "frasco",
                 "precio_unitario": 85.0, "subtotal_producto": 170.0}
            ],
            "totales": {"descuento": 10.0, "total": 160.0, "moneda": "MXN"},
            "metodo_pago": "tarjeta",
            "estado": "completada"
        });
        let sale: Sale = serde_json::from_value(raw).unwrap();
        assert_eq!(sale.folio(), "S001");
        assert_eq!(sale.lines_subtotal(), 170.0);
        assert_eq!(sale.item_count(), 2);
        assert_eq!(sale.customer.email, None);
    }

    #[test]
    fn float_quantities_and_string_amounts_decode() {
        let raw = json!([{
            "_id": "S002",
            "fecha": "2024-03-16",
            "cliente": {"tipo": "visitante", "nombre": "Mostrador"},
            "productos": [
                {"producto_id": "P001", "nombre": "Miel", "cantidad": 2.0, "unidad": "frasco",
                 "precio_unitario": "85.00", "subtotal_producto": 170}
            ],
            "totales": {"total": "170.00", "moneda": "MXN"},
            "metodo_pago": "efectivo"
        }]);
        let sales: Vec<Sale> = serde_json::from_value(raw).unwrap();
        assert_eq!(sales[0].item_count(), 2);
        assert_eq!(sales[0].lines[0].unit_price, 85.0);
        assert_eq!(sales[0].totals.total, 170.0);
    }
}
