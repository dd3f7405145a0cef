//! Remote calls for `/products`. Every record coming back is repaired by the
//! adapter before it reaches the UI.

use contracts::domain::a001_product::adapter::{adapt_list_payload, adapt_product};
use contracts::domain::a001_product::dto::ProductPayload;
use contracts::domain::a001_product::Product;
use serde_json::Value;

use crate::shared::http::{ApiClient, ApiError};

/// `GET /products`. Only the catalog store calls this.
pub(super) async fn fetch_products(client: &ApiClient) -> Result<Vec<Product>, ApiError> {
    let payload = client.get_value("/products").await?;
    adapt_list_payload(&payload).map_err(ApiError::Rejected)
}

pub async fn fetch_product(client: &ApiClient, id: &str) -> Result<Product, ApiError> {
    let payload = client
        .get_value(&format!("/products/{}", urlencoding::encode(id)))
        .await?;
    single_product(&payload)?
        .ok_or_else(|| ApiError::Decode("la respuesta no contiene un producto".to_string()))
}

/// Server-side search; results are not written to the store.
pub async fn search_products(client: &ApiClient, query: &str) -> Result<Vec<Product>, ApiError> {
    let payload = client
        .get_value(&format!(
            "/products/search?query={}",
            urlencoding::encode(query.trim())
        ))
        .await?;
    adapt_list_payload(&payload).map_err(ApiError::Rejected)
}

/// `POST /products`. Returns the stored record when the server echoes it.
pub async fn create_product(
    client: &ApiClient,
    payload: &ProductPayload,
) -> Result<Option<Product>, ApiError> {
    let response = client.post_value("/products", payload).await?;
    single_product(&response)
}

pub async fn update_product(
    client: &ApiClient,
    id: &str,
    payload: &ProductPayload,
) -> Result<Option<Product>, ApiError> {
    let response = client
        .put_value(&format!("/products/{}", urlencoding::encode(id)), payload)
        .await?;
    single_product(&response)
}

pub async fn delete_product(client: &ApiClient, id: &str) -> Result<(), ApiError> {
    client
        .delete(&format!("/products/{}", urlencoding::encode(id)))
        .await
}

/// Accepts `{success, data}` or the bare record. A successful envelope
/// without a record yields `None`.
fn single_product(payload: &Value) -> Result<Option<Product>, ApiError> {
    if payload.get("success").and_then(Value::as_bool) == Some(false) {
        let message = payload
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Operación rechazada por el servidor");
        return Err(ApiError::Rejected(message.to_string()));
    }
    match payload.get("data") {
        Some(data) if data.is_object() => Ok(Some(adapt_product(data))),
        _ if payload.is_object() && payload.get("success").is_none() => {
            Ok(Some(adapt_product(payload)))
        }
        _ if payload.get("success").and_then(Value::as_bool) == Some(true) || payload.is_null() => {
            Ok(None)
        }
        _ => Err(ApiError::Decode("la respuesta no contiene un producto".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn single_product_shapes() {
        let wrapped = json!({"success": true, "data": {"_id": "p1", "nombre": "Miel", "codigo": "M-1"}});
        assert_eq!(single_product(&wrapped).unwrap().unwrap().id, "p1");

        let bare = json!({"_id": "p2", "nombre": "Cera"});
        assert_eq!(single_product(&bare).unwrap().unwrap().id, "p2");

        let rejected = json!({"success": false, "message": "Código duplicado"});
        assert_eq!(
            single_product(&rejected).unwrap_err(),
            ApiError::Rejected("Código duplicado".into())
        );

        let ack = json!({"success": true, "message": "Actualizado"});
        assert_eq!(single_product(&ack).unwrap(), None);

        assert!(matches!(single_product(&json!([1, 2])), Err(ApiError::Decode(_))));
    }
}
