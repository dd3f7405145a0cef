//! Catalog store: the last known product list, its write ordering and the
//! mutations that patch it.
//!
//! [`CatalogState`] holds the sequencing rules and is plain data. [`CatalogStore`]
//! wraps it in a signal and performs the remote calls.

use contracts::domain::a001_product::dto::{
    validate_presentation, PresentationDraft, ProductDraft, ProductPayload,
};
use contracts::domain::a001_product::{adapter::adapt_product, Presentation, Product};
use contracts::shared::api_response::ApiListResponse;
use contracts::shared::validation::ValidationError;
use leptos::prelude::*;

use super::api;
use crate::shared::http::{ApiClient, ApiError};

/// Issued by [`CatalogState::begin_load`]; identifies one in-flight load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogState {
    products: Vec<Product>,
    last_ticket: u64,
    applied: u64,
    in_flight: usize,
    loaded: bool,
}

impl CatalogState {
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Whether a load ever succeeded.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// True while any issued load has not finished, whatever its order.
    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.last_ticket += 1;
        self.in_flight += 1;
        LoadTicket(self.last_ticket)
    }

    /// Applies a load outcome. Failures keep the previous list; a response
    /// issued before the last applied write is discarded.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        outcome: Result<Vec<Product>, String>,
    ) -> ApiListResponse<Product> {
        self.in_flight = self.in_flight.saturating_sub(1);
        match outcome {
            Err(message) => {
                log::warn!("catalog load #{} failed: {}", ticket.0, message);
                ApiListResponse::failed(message)
            }
            Ok(_) if ticket.0 < self.applied => {
                log::debug!(
                    "catalog load #{} discarded, #{} already applied",
                    ticket.0,
                    self.applied
                );
                ApiListResponse::failed("Respuesta obsoleta descartada")
            }
            Ok(products) => {
                self.applied = ticket.0;
                self.loaded = true;
                self.products = products;
                ApiListResponse::ok(
                    self.products.clone(),
                    format!("{} productos cargados", self.products.len()),
                )
            }
        }
    }

    /// Replaces the list directly; loads started earlier become stale.
    pub fn set_all(&mut self, products: Vec<Product>) {
        self.last_ticket += 1;
        self.applied = self.last_ticket;
        self.products = products;
    }

    pub fn find(&self, product_id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == product_id)
    }
}

/// List with `product` replacing the entry of the same id, or appended.
pub fn upsert(products: &[Product], product: Product) -> Vec<Product> {
    let mut next = products.to_vec();
    match next.iter_mut().find(|p| p.id == product.id) {
        Some(slot) => *slot = product,
        None => next.push(product),
    }
    next
}

pub fn without(products: &[Product], product_id: &str) -> Vec<Product> {
    products
        .iter()
        .filter(|p| p.id != product_id)
        .cloned()
        .collect()
}

pub fn with_presentation(product: &Product, presentation: Presentation) -> Product {
    let mut next = product.clone();
    next.presentations.push(presentation);
    next
}

pub fn with_replaced_presentation(
    product: &Product,
    presentation: Presentation,
) -> Result<Product, ApiError> {
    let mut next = product.clone();
    let slot = next
        .presentations
        .iter_mut()
        .find(|p| p.id == presentation.id)
        .ok_or_else(|| presentation_not_found(&presentation.id))?;
    *slot = presentation;
    Ok(next)
}

/// What removing a presentation amounts to on the server.
#[derive(Debug, Clone, PartialEq)]
pub enum RemovalPlan {
    /// Other presentations remain: `PUT` the product without it.
    UpdateProduct(Product),
    /// It was the only one: `DELETE` the product.
    DeleteProduct(String),
}

pub fn plan_presentation_removal(
    product: &Product,
    presentation_id: &str,
) -> Result<RemovalPlan, ApiError> {
    if !product.has_presentation(presentation_id) {
        return Err(presentation_not_found(presentation_id));
    }
    if product.presentations.len() == 1 {
        return Ok(RemovalPlan::DeleteProduct(product.id.clone()));
    }
    let mut next = product.clone();
    next.presentations.retain(|p| p.id != presentation_id);
    Ok(RemovalPlan::UpdateProduct(next))
}

/// Local checks applied before `PUT /products/:id`.
pub fn validate_product(product: &Product) -> Result<(), ValidationError> {
    contracts::shared::validation::required("nombre", &product.name)?;
    contracts::shared::validation::required("codigo", &product.code)?;
    if product.presentations.is_empty() {
        return Err(ValidationError::Empty("presentaciones"));
    }
    for (index, pres) in product.presentations.iter().enumerate() {
        validate_presentation(pres).map_err(|e| ValidationError::at(index, e))?;
    }
    Ok(())
}

fn presentation_not_found(id: &str) -> ApiError {
    ApiError::Rejected(format!("La presentación {} no existe", id))
}

fn product_not_found(id: &str) -> ApiError {
    ApiError::Rejected(format!("El producto {} no existe en el catálogo", id))
}

// ============================================================================
// Reactive store
// ============================================================================

#[derive(Clone, Copy)]
pub struct CatalogStore {
    state: RwSignal<CatalogState>,
    loading: RwSignal<bool>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(CatalogState::default()),
            loading: RwSignal::new(false),
        }
    }

    /// Fetches `/products` and replaces the list on success. Never fails:
    /// errors come back as `success: false` with the previous list kept.
    pub async fn load(&self, client: &ApiClient) -> ApiListResponse<Product> {
        let Some(ticket) = self.state.try_update_untracked(CatalogState::begin_load) else {
            return ApiListResponse::failed("Catálogo no disponible");
        };
        self.sync_loading();

        let outcome = api::fetch_products(client)
            .await
            .map_err(|e| e.to_string());
        let response = self
            .state
            .try_update(|s| s.finish_load(ticket, outcome))
            .unwrap_or_else(|| ApiListResponse::failed("Catálogo no disponible"));

        self.sync_loading();
        response
    }

    fn sync_loading(&self) {
        if let Some(busy) = self.state.try_with_untracked(CatalogState::is_loading) {
            let _ = self.loading.try_set(busy);
        }
    }

    pub fn set_all(&self, products: Vec<Product>) {
        let _ = self.state.try_update(|s| s.set_all(products));
    }

    /// Snapshot of the list, without tracking.
    pub fn current(&self) -> Vec<Product> {
        self.state
            .try_with_untracked(|s| s.products().to_vec())
            .unwrap_or_default()
    }

    /// The list as a reactive signal; every applied write is observed.
    pub fn as_stream(&self) -> Signal<Vec<Product>> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.products().to_vec()))
    }

    pub fn is_loading(&self) -> Signal<bool> {
        self.loading.into()
    }

    fn find(&self, product_id: &str) -> Result<Product, ApiError> {
        self.state
            .try_with_untracked(|s| s.find(product_id).cloned())
            .flatten()
            .ok_or_else(|| product_not_found(product_id))
    }

    pub async fn create_product(
        &self,
        client: &ApiClient,
        draft: ProductDraft,
    ) -> Result<Product, ApiError> {
        draft.validate()?;
        let payload = draft.into_payload();
        let created = match api::create_product(client, &payload).await? {
            Some(product) => product,
            None => adapt_product(&serde_json::to_value(&payload).unwrap_or_default()),
        };
        log::info!("product {} created", created.id);
        self.set_all(upsert(&self.current(), created.clone()));
        Ok(created)
    }

    pub async fn update_product(
        &self,
        client: &ApiClient,
        product: Product,
    ) -> Result<Product, ApiError> {
        validate_product(&product)?;
        let payload = ProductPayload::from(&product);
        let updated = api::update_product(client, &product.id, &payload)
            .await?
            .unwrap_or(product);
        log::info!("product {} updated", updated.id);
        self.set_all(upsert(&self.current(), updated.clone()));
        Ok(updated)
    }

    pub async fn delete_product(&self, client: &ApiClient, product_id: &str) -> Result<(), ApiError> {
        api::delete_product(client, product_id).await?;
        log::info!("product {} deleted", product_id);
        self.set_all(without(&self.current(), product_id));
        Ok(())
    }

    pub async fn add_presentation(
        &self,
        client: &ApiClient,
        product_id: &str,
        draft: PresentationDraft,
    ) -> Result<Product, ApiError> {
        draft.validate()?;
        let product = self.find(product_id)?;
        let next = with_presentation(&product, draft.into_presentation());
        self.update_product(client, next).await
    }

    pub async fn update_presentation(
        &self,
        client: &ApiClient,
        product_id: &str,
        presentation: Presentation,
    ) -> Result<Product, ApiError> {
        validate_presentation(&presentation)?;
        let product = self.find(product_id)?;
        let next = with_replaced_presentation(&product, presentation)?;
        self.update_product(client, next).await
    }

    /// Removing the last presentation deletes the product itself.
    pub async fn delete_presentation(
        &self,
        client: &ApiClient,
        product_id: &str,
        presentation_id: &str,
    ) -> Result<Option<Product>, ApiError> {
        let product = self.find(product_id)?;
        match plan_presentation_removal(&product, presentation_id)? {
            RemovalPlan::UpdateProduct(next) => self.update_product(client, next).await.map(Some),
            RemovalPlan::DeleteProduct(id) => {
                self.delete_product(client, &id).await?;
                Ok(None)
            }
        }
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_catalog() -> CatalogStore {
    use_context::<CatalogStore>().expect("CatalogStore not found in context")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn product(id: &str, skus: &[&str]) -> Product {
        let presentations: Vec<_> = skus
            .iter()
            .enumerate()
            .map(|(i, sku)| {
                json!({
                    "id": format!("{}-p{}", id, i),
                    "sku": sku,
                    "formato": "Frasco",
                    "capacidad": "500 g",
                    "precio_venta": 85,
                    "stock": 20,
                    "proveedor": "Apiario Sur"
                })
            })
            .collect();
        adapt_product(&json!({
            "_id": id,
            "codigo": id.to_uppercase(),
            "nombre": format!("Producto {}", id),
            "atributos": { "presentaciones": presentations }
        }))
    }

    #[test]
    fn load_replaces_list() {
        let mut state = CatalogState::default();
        let ticket = state.begin_load();
        let resp = state.finish_load(ticket, Ok(vec![product("a", &["A1"])]));
        assert!(resp.success);
        assert_eq!(resp.data.len(), 1);
        assert!(state.is_loaded());
        assert_eq!(state.products()[0].id, "a");
    }

    #[test]
    fn failed_load_keeps_last_known_good() {
        let mut state = CatalogState::default();
        let t1 = state.begin_load();
        state.finish_load(t1, Ok(vec![product("a", &["A1"]), product("b", &["B1"])]));

        let t2 = state.begin_load();
        let resp = state.finish_load(t2, Err("Error de red".into()));
        assert!(!resp.success);
        assert_eq!(resp.message.as_deref(), Some("Error de red"));
        assert_eq!(state.products().len(), 2);
    }

    #[test]
    fn failed_first_load_leaves_empty_list() {
        let mut state = CatalogState::default();
        let t = state.begin_load();
        let resp = state.finish_load(t, Err("boom".into()));
        assert!(!resp.success);
        assert!(state.products().is_empty());
        assert!(!state.is_loaded());
    }

    #[test]
    fn older_load_cannot_overwrite_newer() {
        let mut state = CatalogState::default();
        let slow = state.begin_load();
        let fast = state.begin_load();

        state.finish_load(fast, Ok(vec![product("new", &["N1"])]));
        let resp = state.finish_load(slow, Ok(vec![product("old", &["O1"])]));

        assert!(!resp.success);
        assert_eq!(state.products()[0].id, "new");
    }

    #[test]
    fn load_started_before_set_all_is_stale() {
        let mut state = CatalogState::default();
        let ticket = state.begin_load();
        state.set_all(vec![product("patched", &["P1"])]);

        let resp = state.finish_load(ticket, Ok(vec![]));
        assert!(!resp.success);
        assert_eq!(state.products()[0].id, "patched");

        let later = state.begin_load();
        assert!(state.finish_load(later, Ok(vec![])).success);
        assert!(state.products().is_empty());
    }

    #[test]
    fn loading_lasts_until_every_load_finishes() {
        let mut state = CatalogState::default();
        assert!(!state.is_loading());
        let first = state.begin_load();
        let second = state.begin_load();

        state.finish_load(first, Ok(vec![product("a", &["A1"])]));
        assert!(state.is_loading());

        state.finish_load(second, Err("timeout".into()));
        assert!(!state.is_loading());
        assert_eq!(state.products()[0].id, "a");
    }

    #[test]
    fn stale_load_still_ends_its_loading() {
        let mut state = CatalogState::default();
        let slow = state.begin_load();
        let fast = state.begin_load();
        state.finish_load(fast, Ok(vec![]));
        assert!(state.is_loading());
        assert!(!state.finish_load(slow, Ok(vec![])).success);
        assert!(!state.is_loading());
    }

    #[test]
    fn upsert_keeps_position() {
        let list = vec![product("a", &["A1"]), product("b", &["B1"])];
        let mut changed = list[0].clone();
        changed.name = "Miel Pura de Abeja".into();

        let next = upsert(&list, changed);
        assert_eq!(next[0].name, "Miel Pura de Abeja");
        assert_eq!(next.len(), 2);

        let next = upsert(&next, product("c", &["C1"]));
        assert_eq!(next.last().map(|p| p.id.as_str()), Some("c"));
        assert_eq!(without(&next, "a").len(), 2);
    }

    #[test]
    fn removing_last_presentation_deletes_product() {
        let single = product("a", &["A1"]);
        assert_eq!(
            plan_presentation_removal(&single, "a-p0").unwrap(),
            RemovalPlan::DeleteProduct("a".into())
        );

        let double = product("b", &["B1", "B2"]);
        match plan_presentation_removal(&double, "b-p0").unwrap() {
            RemovalPlan::UpdateProduct(next) => {
                assert_eq!(next.presentations.len(), 1);
                assert_eq!(next.presentations[0].sku, "B2");
            }
            other => panic!("unexpected plan {:?}", other),
        }

        assert!(plan_presentation_removal(&double, "missing").is_err());
    }

    #[test]
    fn replace_presentation_requires_existing_id() {
        let p = product("a", &["A1", "A2"]);
        let mut edited = p.presentations[1].clone();
        edited.stock = 3;
        let next = with_replaced_presentation(&p, edited).unwrap();
        assert_eq!(next.presentations[1].stock, 3);

        let mut stray = p.presentations[0].clone();
        stray.id = "ghost".into();
        assert!(with_replaced_presentation(&p, stray).is_err());
    }

    #[test]
    fn product_validation() {
        let mut p = product("a", &["A1"]);
        assert!(validate_product(&p).is_ok());

        p.presentations[0].sale_price = -1.0;
        assert!(matches!(
            validate_product(&p),
            Err(ValidationError::Item { index: 1, .. })
        ));

        p.presentations.clear();
        assert_eq!(validate_product(&p), Err(ValidationError::Empty("presentaciones")));
    }
}
