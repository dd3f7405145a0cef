use serde::{Deserialize, Serialize};

// ============================================================================
// Presentation
// ============================================================================

/// Sellable packaging variant of a product (a 500 g jar, a 1 kg jar, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Presentation {
    pub id: String,
    pub sku: String,
    #[serde(rename = "formato")]
    pub format: String,
    #[serde(rename = "capacidad")]
    pub capacity: String,
    #[serde(rename = "precio_venta")]
    pub sale_price: f64,
    #[serde(rename = "precio_compra")]
    pub purchase_price: f64,
    pub stock: i64,
    #[serde(rename = "stock_minimo")]
    pub min_stock: i64,
    #[serde(rename = "lote")]
    pub lot: String,
    #[serde(rename = "fecha_ingreso")]
    pub intake_date: String,
    #[serde(rename = "fecha_vencimiento")]
    pub expiry_date: String,
    #[serde(rename = "proveedor")]
    pub supplier: String,
    #[serde(rename = "ubicacion")]
    pub location: String,
    #[serde(rename = "observaciones")]
    pub notes: String,
}

impl Presentation {
    pub fn is_below_min_stock(&self) -> bool {
        self.stock < self.min_stock
    }

    /// Short human label used in pickers: "Frasco de vidrio 500g".
    pub fn label(&self) -> String {
        format!("{} {}", self.format, self.capacity).trim().to_string()
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Normalized catalog product. After adaptation `presentations` is never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "subcategoria")]
    pub subcategory: String,
    #[serde(rename = "estado")]
    pub status: String,
    #[serde(rename = "fecha_creacion")]
    pub created_at: String,
    #[serde(rename = "presentaciones")]
    pub presentations: Vec<Presentation>,
    #[serde(rename = "imagenes")]
    pub images: Vec<String>,
}

impl Product {
    pub fn presentation(&self, presentation_id: &str) -> Option<&Presentation> {
        self.presentations.iter().find(|p| p.id == presentation_id)
    }

    pub fn has_presentation(&self, presentation_id: &str) -> bool {
        self.presentation(presentation_id).is_some()
    }

    pub fn total_stock(&self) -> i64 {
        self.presentations.iter().map(|p| p.stock).sum()
    }

    pub fn is_active(&self) -> bool {
        self.status.eq_ignore_ascii_case("activo")
    }
}
