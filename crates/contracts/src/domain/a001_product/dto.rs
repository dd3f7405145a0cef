use super::adapter::PLACEHOLDER_IMAGE;
use super::aggregate::{Presentation, Product};
use crate::shared::validation::{non_negative, required, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Form drafts
// ============================================================================

/// Presentation as entered in a form, before it has an identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentationDraft {
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

impl Default for PresentationDraft {
    fn default() -> Self {
        Self {
            sku: String::new(),
            format: String::new(),
            capacity: String::new(),
            sale_price: 0.0,
            purchase_price: 0.0,
            stock: 0,
            min_stock: 0,
            lot: String::new(),
            intake_date: String::new(),
            expiry_date: String::new(),
            supplier: String::new(),
            location: String::new(),
            notes: String::new(),
        }
    }
}

impl PresentationDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        required("sku", &self.sku)?;
        required("formato", &self.format)?;
        required("capacidad", &self.capacity)?;
        non_negative("precio_venta", self.sale_price)?;
        non_negative("precio_compra", self.purchase_price)?;
        non_negative("stock", self.stock as f64)?;
        non_negative("stock_minimo", self.min_stock as f64)?;
        Ok(())
    }

    /// Assigns a fresh identifier; blank dates become "N/A" as the backend expects.
    pub fn into_presentation(self) -> Presentation {
        Presentation {
            id: format!("pres-{}", Uuid::new_v4().simple()),
            sku: self.sku.trim().to_string(),
            format: self.format.trim().to_string(),
            capacity: self.capacity.trim().to_string(),
            sale_price: self.sale_price,
            purchase_price: self.purchase_price,
            stock: self.stock,
            min_stock: self.min_stock,
            lot: self.lot,
            intake_date: or_na(self.intake_date),
            expiry_date: or_na(self.expiry_date),
            supplier: self.supplier,
            location: self.location,
            notes: self.notes,
        }
    }
}

impl From<&Presentation> for PresentationDraft {
    fn from(p: &Presentation) -> Self {
        Self {
            sku: p.sku.clone(),
            format: p.format.clone(),
            capacity: p.capacity.clone(),
            sale_price: p.sale_price,
            purchase_price: p.purchase_price,
            stock: p.stock,
            min_stock: p.min_stock,
            lot: p.lot.clone(),
            intake_date: p.intake_date.clone(),
            expiry_date: p.expiry_date.clone(),
            supplier: p.supplier.clone(),
            location: p.location.clone(),
            notes: p.notes.clone(),
        }
    }
}

/// Validates an edited presentation before it replaces the stored one.
pub fn validate_presentation(p: &Presentation) -> Result<(), ValidationError> {
    PresentationDraft::from(p).validate()
}

/// New product as submitted from the creation form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
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
    #[serde(rename = "presentaciones")]
    pub presentations: Vec<PresentationDraft>,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            code: String::new(),
            name: String::new(),
            description: String::new(),
            kind: String::new(),
            category: String::new(),
            subcategory: String::new(),
            status: "Activo".to_string(),
            presentations: vec![PresentationDraft::default()],
        }
    }
}

impl ProductDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        required("codigo", &self.code)?;
        required("nombre", &self.name)?;
        required("tipo", &self.kind)?;
        required("categoria", &self.category)?;
        required("estado", &self.status)?;
        if self.presentations.is_empty() {
            return Err(ValidationError::Empty("presentaciones"));
        }
        for (index, pres) in self.presentations.iter().enumerate() {
            pres.validate().map_err(|e| ValidationError::at(index, e))?;
        }
        Ok(())
    }

    /// Builds the creation payload in the shape the backend stores: root
    /// price/stock taken from the first presentation, the full form kept
    /// under `atributos`.
    pub fn into_payload(self) -> ProductPayload {
        let presentations: Vec<Presentation> = self
            .presentations
            .into_iter()
            .map(PresentationDraft::into_presentation)
            .collect();
        ProductPayload::build(
            None,
            self.code,
            self.name,
            self.description,
            self.kind,
            self.category,
            self.subcategory,
            self.status,
            vec![PLACEHOLDER_IMAGE.to_string()],
            presentations,
        )
    }
}

fn or_na(value: String) -> String {
    if value.trim().is_empty() {
        "N/A".to_string()
    } else {
        value
    }
}

// ============================================================================
// Wire payload
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductAttributes {
    pub categoria_original: String,
    pub subcategoria_original: String,
    pub presentaciones: Vec<Presentation>,
}

/// Body of `POST /products` and `PUT /products/:id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPayload {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub codigo: String,
    pub nombre: String,
    pub descripcion: String,
    pub tipo: String,
    pub estado: String,
    pub estado_fisico: String,
    pub precio: f64,
    pub stock: i64,
    pub imagenes: Vec<String>,
    pub activo: bool,
    pub atributos: ProductAttributes,
}

impl ProductPayload {
    #[allow(clippy::too_many_arguments)]
    fn build(
        id: Option<String>,
        code: String,
        name: String,
        description: String,
        kind: String,
        category: String,
        subcategory: String,
        status: String,
        images: Vec<String>,
        presentations: Vec<Presentation>,
    ) -> Self {
        let (precio, stock) = presentations
            .first()
            .map(|p| (p.sale_price, p.stock))
            .unwrap_or((0.0, 0));
        let estado_fisico = if kind == "Miel" { "Líquido" } else { "Sólido" };
        Self {
            id,
            codigo: code.trim().to_string(),
            nombre: name.trim().to_string(),
            descripcion: description,
            activo: status.eq_ignore_ascii_case("activo"),
            estado: status,
            estado_fisico: estado_fisico.to_string(),
            tipo: kind,
            precio,
            stock,
            imagenes: images,
            atributos: ProductAttributes {
                categoria_original: category,
                subcategoria_original: subcategory,
                presentaciones: presentations,
            },
        }
    }
}

impl From<&Product> for ProductPayload {
    fn from(p: &Product) -> Self {
        ProductPayload::build(
            Some(p.id.clone()),
            p.code.clone(),
            p.name.clone(),
            p.description.clone(),
            p.kind.clone(),
            p.category.clone(),
            p.subcategory.clone(),
            p.status.clone(),
            p.images.clone(),
            p.presentations.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_product::adapter::adapt_product_at;

    fn valid_presentation() -> PresentationDraft {
        PresentationDraft {
            sku: "MIEL-500".into(),
            format: "Frasco de vidrio".into(),
            capacity: "500g".into(),
            sale_price: 120.5,
            purchase_price: 60.0,
            stock: 150,
            min_stock: 20,
            lot: "LOTE20230110".into(),
            supplier: "Apícola de los Altos".into(),
            location: "Almacén A, Estante 3".into(),
            ..PresentationDraft::default()
        }
    }

    fn valid_product() -> ProductDraft {
        ProductDraft {
            code: "MIEL-PUR".into(),
            name: "Miel Pura de Abeja".into(),
            kind: "Miel".into(),
            category: "Productos Apícolas".into(),
            subcategory: "Miel".into(),
            presentations: vec![valid_presentation()],
            ..ProductDraft::default()
        }
    }

    #[test]
    fn draft_validation_rejects_negative_numbers() {
        assert!(valid_product().validate().is_ok());

        let mut draft = valid_product();
        draft.presentations[0].sale_price = -1.0;
        assert!(matches!(
            draft.validate(),
            Err(ValidationError::Item { index: 1, .. })
        ));

        let mut draft = valid_product();
        draft.presentations.clear();
        assert_eq!(draft.validate(), Err(ValidationError::Empty("presentaciones")));

        let mut draft = valid_product();
        draft.name = "  ".into();
        assert_eq!(draft.validate(), Err(ValidationError::Required("nombre")));
    }

    #[test]
    fn payload_mirrors_first_presentation_at_root() {
        let payload = valid_product().into_payload();
        assert_eq!(payload.precio, 120.5);
        assert_eq!(payload.stock, 150);
        assert_eq!(payload.estado_fisico, "Líquido");
        assert!(payload.activo);
        assert_eq!(payload.atributos.categoria_original, "Productos Apícolas");
        assert_eq!(payload.atributos.presentaciones[0].expiry_date, "N/A");
        assert!(payload.atributos.presentaciones[0].id.starts_with("pres-"));
        assert!(payload.id.is_none());
    }

    #[test]
    fn payload_adapts_back_to_the_same_product() {
        let payload = valid_product().into_payload();
        let mut raw = serde_json::to_value(&payload).unwrap();
        raw["_id"] = serde_json::json!("srv-1");

        let product = adapt_product_at(&raw, "2024-01-01").product;
        assert_eq!(product.id, "srv-1");
        assert_eq!(product.category, "Productos Apícolas");
        assert_eq!(product.presentations, payload.atributos.presentaciones);

        let again = ProductPayload::from(&product);
        assert_eq!(again.atributos, payload.atributos);
        assert_eq!(again.id.as_deref(), Some("srv-1"));
    }
}
