//! Normalization of raw backend product records.
//!
//! Backend versions disagree on the record shape: some keep the full
//! presentation list under `atributos.presentaciones`, older ones only carry
//! root-level price and stock fields. Every record is repaired with defaults
//! rather than rejected, and the result always holds at least one
//! [`Presentation`].

use super::aggregate::{Presentation, Product};
use crate::shared::json_fields::{first_number, first_text, flag, nested, number, text};
use serde_json::Value;
use uuid::Uuid;

pub const NOT_AVAILABLE: &str = "N/A";
pub const NO_CATEGORY: &str = "Sin Categoría";
pub const NO_SUBCATEGORY: &str = "Sin Subcategoría";
pub const NO_NAME: &str = "Nombre no disponible";
pub const NO_KIND: &str = "Tipo no disponible";
pub const DEFAULT_CODE: &str = "COD-DEFAULT";
pub const PLACEHOLDER_IMAGE: &str = "assets/images/placeholder.jpg";
pub const DEFAULT_MIN_STOCK: i64 = 10;

pub const NESTED_SKU: &str = "SKU-ATTR-DEFAULT";
pub const ROOT_SKU: &str = "SKU-ROOT-DEFAULT";
pub const EMERGENCY_SKU: &str = "SKU-EMERGENCY";

const NESTED_PATHS: [&[&str]; 3] = [
    &["atributos", "presentaciones"],
    &["attributes", "presentations"],
    &["presentaciones"],
];

// ============================================================================
// Branch decision
// ============================================================================

/// Where the presentations of a record come from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PresentationSource<'a> {
    /// A nested list with at least one object entry.
    Nested(&'a [Value]),
    /// Exactly one presentation synthesized from root price/stock fields.
    RootFields,
    /// Nothing usable: a single placeholder presentation.
    Emergency,
}

impl PresentationSource<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            PresentationSource::Nested(_) => "nested",
            PresentationSource::RootFields => "root-fields",
            PresentationSource::Emergency => "emergency",
        }
    }
}

pub fn choose_presentation_source(raw: &Value) -> PresentationSource<'_> {
    if !raw.is_object() {
        return PresentationSource::Emergency;
    }
    NESTED_PATHS
        .iter()
        .filter_map(|path| nested(raw, path).and_then(Value::as_array))
        .find(|items| items.iter().any(Value::is_object))
        .map(|items| PresentationSource::Nested(items.as_slice()))
        .unwrap_or(PresentationSource::RootFields)
}

// ============================================================================
// Adaptation
// ============================================================================

/// Product together with the branch its presentations were built from.
#[derive(Debug, Clone, PartialEq)]
pub struct Adapted {
    pub product: Product,
    pub source: &'static str,
}

pub fn adapt_product(raw: &Value) -> Product {
    adapt_product_at(raw, &chrono::Utc::now().to_rfc3339()).product
}

/// Same as [`adapt_product`] with an explicit "now" used for missing dates.
pub fn adapt_product_at(raw: &Value, now: &str) -> Adapted {
    let id = first_text(raw, &["_id", "id"])
        .map(str::to_string)
        .unwrap_or_else(|| format!("temp-id-{}", short_uuid()));

    let source = choose_presentation_source(raw);
    let presentations = match source {
        PresentationSource::Nested(items) => items
            .iter()
            .filter(|item| item.is_object())
            .map(|item| from_nested(item, raw, now))
            .collect(),
        PresentationSource::RootFields => vec![from_root(raw, &id, now)],
        PresentationSource::Emergency => vec![emergency(&id, now)],
    };

    let product = Product {
        code: first_text(raw, &["codigo", "sku"])
            .unwrap_or(DEFAULT_CODE)
            .to_string(),
        name: text(raw, "nombre").unwrap_or(NO_NAME).to_string(),
        description: text(raw, "descripcion").unwrap_or_default().to_string(),
        kind: text(raw, "tipo").unwrap_or(NO_KIND).to_string(),
        category: classification(raw, "categoria_original", "categoria_id", "categoria")
            .unwrap_or_else(|| NO_CATEGORY.to_string()),
        subcategory: classification(raw, "subcategoria_original", "subcategoria_id", "subcategoria")
            .unwrap_or_else(|| NO_SUBCATEGORY.to_string()),
        status: status(raw),
        created_at: text(raw, "fecha_creacion").unwrap_or(now).to_string(),
        presentations,
        images: images(raw),
        id,
    };

    Adapted {
        product,
        source: source.name(),
    }
}

pub fn adapt_products(records: &[Value]) -> Vec<Product> {
    let now = chrono::Utc::now().to_rfc3339();
    records
        .iter()
        .map(|raw| adapt_product_at(raw, &now).product)
        .collect()
}

/// Adapts a `{success, data[], message?}` payload. A payload that is not
/// successful or whose `data` is not an array yields `Err(message)`.
pub fn adapt_list_payload(payload: &Value) -> Result<Vec<Product>, String> {
    let success = flag(payload, "success").unwrap_or(false);
    match payload.get("data").and_then(Value::as_array) {
        Some(records) if success => Ok(adapt_products(records)),
        _ => Err(text(payload, "message")
            .unwrap_or("Respuesta inválida del servidor o sin datos.")
            .to_string()),
    }
}

fn from_nested(pres: &Value, root: &Value, now: &str) -> Presentation {
    Presentation {
        id: first_text(pres, &["id", "_id"])
            .map(str::to_string)
            .unwrap_or_else(|| format!("pres-attr-{}", short_uuid())),
        sku: text(pres, "sku")
            .or_else(|| text(root, "codigo"))
            .unwrap_or(NESTED_SKU)
            .to_string(),
        format: text(pres, "formato").unwrap_or(NOT_AVAILABLE).to_string(),
        capacity: text(pres, "capacidad").unwrap_or(NOT_AVAILABLE).to_string(),
        sale_price: number(pres, "precio_venta")
            .or_else(|| first_number(root, &["precio_venta", "precio"]))
            .unwrap_or(0.0),
        purchase_price: number(pres, "precio_compra")
            .or_else(|| number(root, "precio_compra"))
            .unwrap_or(0.0),
        stock: number(pres, "stock")
            .or_else(|| number(root, "stock"))
            .map(whole)
            .unwrap_or(0),
        min_stock: number(pres, "stock_minimo")
            .map(whole)
            .unwrap_or(DEFAULT_MIN_STOCK),
        lot: text(pres, "lote").unwrap_or("LOTE-ATTR-DEFAULT").to_string(),
        intake_date: text(pres, "fecha_ingreso")
            .or_else(|| text(root, "fecha_creacion"))
            .unwrap_or(now)
            .to_string(),
        expiry_date: text(pres, "fecha_vencimiento")
            .unwrap_or(NOT_AVAILABLE)
            .to_string(),
        supplier: text(pres, "proveedor")
            .unwrap_or("Proveedor Atributos")
            .to_string(),
        location: text(pres, "ubicacion")
            .unwrap_or("Ubicación Atributos")
            .to_string(),
        notes: text(pres, "observaciones").unwrap_or_default().to_string(),
    }
}

fn from_root(root: &Value, product_id: &str, now: &str) -> Presentation {
    Presentation {
        id: format!("pres-def-{product_id}"),
        sku: first_text(root, &["codigo", "sku"])
            .unwrap_or(ROOT_SKU)
            .to_string(),
        format: text(root, "formato")
            .unwrap_or("Formato estándar")
            .to_string(),
        capacity: first_text(root, &["capacidad", "estado_fisico"])
            .unwrap_or(NOT_AVAILABLE)
            .to_string(),
        sale_price: first_number(root, &["precio_venta", "precio"]).unwrap_or(0.0),
        purchase_price: number(root, "precio_compra").unwrap_or(0.0),
        stock: number(root, "stock").map(whole).unwrap_or(0),
        min_stock: number(root, "stock_minimo")
            .map(whole)
            .unwrap_or(DEFAULT_MIN_STOCK),
        lot: text(root, "lote").unwrap_or("LOTE-ROOT-DEFAULT").to_string(),
        intake_date: first_text(root, &["fecha_ingreso", "fecha_creacion"])
            .unwrap_or(now)
            .to_string(),
        expiry_date: text(root, "fecha_vencimiento")
            .unwrap_or(NOT_AVAILABLE)
            .to_string(),
        supplier: text(root, "proveedor").unwrap_or("Proveedor Raíz").to_string(),
        location: text(root, "ubicacion").unwrap_or("Ubicación Raíz").to_string(),
        notes: text(root, "observaciones").unwrap_or_default().to_string(),
    }
}

fn emergency(product_id: &str, now: &str) -> Presentation {
    Presentation {
        id: format!("pres-emerg-{product_id}"),
        sku: EMERGENCY_SKU.to_string(),
        format: "Emergencia".to_string(),
        capacity: NOT_AVAILABLE.to_string(),
        sale_price: 0.0,
        purchase_price: 0.0,
        stock: 0,
        min_stock: 0,
        lot: "LOTE-EMERGENCY".to_string(),
        intake_date: now.to_string(),
        expiry_date: NOT_AVAILABLE.to_string(),
        supplier: NOT_AVAILABLE.to_string(),
        location: NOT_AVAILABLE.to_string(),
        notes: "Presentación de emergencia creada.".to_string(),
    }
}

/// `atributos.<original>` → `<ref_key>.nombre` → `<ref_key>` as string → `<flat_key>`.
fn classification(raw: &Value, original: &str, ref_key: &str, flat_key: &str) -> Option<String> {
    nested(raw, &["atributos", original])
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or_else(|| raw.get(ref_key).and_then(|r| text(r, "nombre")))
        .or_else(|| text(raw, ref_key))
        .or_else(|| text(raw, flat_key))
        .map(str::to_string)
}

fn status(raw: &Value) -> String {
    if let Some(estado) = text(raw, "estado") {
        return estado.to_string();
    }
    match flag(raw, "activo") {
        Some(true) => "Activo".to_string(),
        _ => "Inactivo".to_string(),
    }
}

fn images(raw: &Value) -> Vec<String> {
    let images: Vec<String> = raw
        .get("imagenes")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    if images.is_empty() {
        vec![PLACEHOLDER_IMAGE.to_string()]
    } else {
        images
    }
}

fn whole(n: f64) -> i64 {
    n.round() as i64
}

fn short_uuid() -> String {
    Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const NOW: &str = "2024-05-01T10:00:00+00:00";

    #[test]
    fn root_record_synthesizes_one_presentation_with_code_as_sku() {
        let raw = json!({
            "_id": "abc123",
            "codigo": "MIEL-PUR-500",
            "nombre": "Miel Pura de Abeja",
            "precio": 120.5,
            "stock": 40,
            "estado_fisico": "Líquido",
            "activo": true
        });

        let adapted = adapt_product_at(&raw, NOW);
        assert_eq!(adapted.source, "root-fields");

        let product = adapted.product;
        assert_eq!(product.id, "abc123");
        assert_eq!(product.presentations.len(), 1);

        let pres = &product.presentations[0];
        assert_eq!(pres.id, "pres-def-abc123");
        assert_eq!(pres.sku, "MIEL-PUR-500");
        assert_eq!(pres.sale_price, 120.5);
        assert_eq!(pres.stock, 40);
        assert_eq!(pres.min_stock, DEFAULT_MIN_STOCK);
        assert_eq!(pres.capacity, "Líquido");
        assert_eq!(pres.intake_date, NOW);
        assert_eq!(product.status, "Activo");
    }

    #[test]
    fn root_record_without_code_uses_sentinel_sku() {
        let product = adapt_product_at(&json!({"nombre": "Sin código"}), NOW).product;
        assert_eq!(product.presentations.len(), 1);
        assert_eq!(product.presentations[0].sku, ROOT_SKU);
        assert_eq!(product.code, DEFAULT_CODE);
        assert_eq!(product.status, "Inactivo");
    }

    #[test]
    fn nested_presentations_win_and_fall_back_to_root_prices() {
        let raw = json!({
            "_id": "p1",
            "codigo": "POL-250",
            "precio": 90,
            "stock": "12",
            "atributos": {
                "categoria_original": "Productos Apícolas",
                "presentaciones": [
                    {"id": "pres-a", "sku": "POL-250-B", "precio_venta": 95.0, "proveedor": "Apiario Sur"},
                    {"formato": "Bolsa"}
                ]
            }
        });

        let adapted = adapt_product_at(&raw, NOW);
        assert_eq!(adapted.source, "nested");

        let product = adapted.product;
        assert_eq!(product.category, "Productos Apícolas");
        assert_eq!(product.presentations.len(), 2);

        let first = &product.presentations[0];
        assert_eq!(first.id, "pres-a");
        assert_eq!(first.sale_price, 95.0);
        assert_eq!(first.stock, 12);
        assert_eq!(first.supplier, "Apiario Sur");

        let second = &product.presentations[1];
        assert!(second.id.starts_with("pres-attr-"));
        assert_eq!(second.sku, "POL-250");
        assert_eq!(second.sale_price, 90.0);
        assert_eq!(second.format, "Bolsa");
        assert_eq!(second.capacity, NOT_AVAILABLE);
        assert_eq!(second.supplier, "Proveedor Atributos");
    }

    #[test]
    fn empty_or_junk_nested_list_falls_back_to_root_fields() {
        let empty = json!({"codigo": "X", "atributos": {"presentaciones": []}});
        assert_eq!(choose_presentation_source(&empty), PresentationSource::RootFields);

        let junk = json!({"codigo": "X", "presentaciones": [null, 3, "a"]});
        assert_eq!(choose_presentation_source(&junk), PresentationSource::RootFields);
        assert_eq!(adapt_product_at(&junk, NOW).product.presentations.len(), 1);
    }

    #[test]
    fn frontend_shaped_record_keeps_its_presentations() {
        let raw = json!({
            "id": "prod-001",
            "codigo": "MIEL-PUR-500",
            "nombre": "Miel Pura de Abeja",
            "categoria": "Alimentos",
            "estado": "Activo",
            "presentaciones": [{"id": "pres-001", "sku": "MIEL-PUR-500-FR", "stock_minimo": 0}]
        });
        let product = adapt_product_at(&raw, NOW).product;
        assert_eq!(product.id, "prod-001");
        assert_eq!(product.category, "Alimentos");
        assert_eq!(product.presentations[0].sku, "MIEL-PUR-500-FR");
        assert_eq!(product.presentations[0].min_stock, 0);
    }

    #[test]
    fn non_object_record_gets_emergency_placeholder() {
        for raw in [json!(null), json!("oops"), json!(42), json!([1, 2])] {
            assert_eq!(choose_presentation_source(&raw), PresentationSource::Emergency);
            let product = adapt_product_at(&raw, NOW).product;
            assert_eq!(product.presentations.len(), 1);
            assert_eq!(product.presentations[0].sku, EMERGENCY_SKU);
            assert!(product.id.starts_with("temp-id-"));
            assert_eq!(product.name, NO_NAME);
        }
    }

    #[test]
    fn classification_fallback_chain() {
        let by_ref = json!({"categoria_id": {"nombre": "Miel"}, "subcategoria_id": "sub-1"});
        let product = adapt_product_at(&by_ref, NOW).product;
        assert_eq!(product.category, "Miel");
        assert_eq!(product.subcategory, "sub-1");

        let bare = adapt_product_at(&json!({}), NOW).product;
        assert_eq!(bare.category, NO_CATEGORY);
        assert_eq!(bare.subcategory, NO_SUBCATEGORY);
        assert_eq!(bare.images, vec![PLACEHOLDER_IMAGE.to_string()]);
        assert_eq!(bare.created_at, NOW);
    }

    #[test]
    fn every_adapted_product_has_a_presentation() {
        let records = vec![
            json!({}),
            json!(null),
            json!({"atributos": null}),
            json!({"atributos": {"presentaciones": {}}}),
            json!({"attributes": {"presentations": [{"sku": "EN-1"}]}}),
            json!({"presentaciones": [{}]}),
            json!({"precio_venta": "no-es-numero", "stock": null}),
        ];
        for product in adapt_products(&records) {
            assert!(!product.presentations.is_empty(), "{product:?}");
            assert!(product.presentations.iter().all(|p| p.sale_price.is_finite()));
        }
    }

    #[test]
    fn list_payload_requires_success_and_array() {
        let ok = json!({"success": true, "data": [{"codigo": "A"}, {"codigo": "B"}]});
        assert_eq!(adapt_list_payload(&ok).unwrap().len(), 2);

        let not_array = json!({"success": true, "data": {"codigo": "A"}});
        assert!(adapt_list_payload(&not_array).is_err());

        let failed = json!({"success": false, "message": "sin permisos"});
        assert_eq!(adapt_list_payload(&failed).unwrap_err(), "sin permisos");
    }
}
