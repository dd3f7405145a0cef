//! Remote calls for `/sales`.

use contracts::domain::a002_sale::Sale;
use serde_json::Value;

use crate::shared::http::{ApiClient, ApiError};

pub async fn fetch_sales(client: &ApiClient) -> Result<Vec<Sale>, ApiError> {
    client.get::<Vec<Sale>>("/sales").await
}

pub async fn fetch_sale(client: &ApiClient, id: &str) -> Result<Sale, ApiError> {
    client
        .get::<Sale>(&format!("/sales/{}", urlencoding::encode(id)))
        .await
}

/// `POST /sales`. When the server only acknowledges, the submitted sale is
/// returned as is.
pub async fn create_sale(client: &ApiClient, sale: &Sale) -> Result<Sale, ApiError> {
    let response = client.post_value("/sales", sale).await?;
    Ok(stored_sale(response)?.unwrap_or_else(|| sale.clone()))
}

fn stored_sale(payload: Value) -> Result<Option<Sale>, ApiError> {
    if payload.get("success").and_then(Value::as_bool) == Some(false) {
        let message = payload
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("No se pudo registrar la venta");
        return Err(ApiError::Rejected(message.to_string()));
    }
    let record = match payload.get("data") {
        Some(data) if data.is_object() => data.clone(),
        _ if payload.get("success").is_some() || !payload.is_object() => return Ok(None),
        _ => payload,
    };
    serde_json::from_value(record)
        .map(Some)
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sale_json() -> Value {
        json!({
            "_id": "V-0042",
            "fecha": "2024-05-02",
            "cliente": { "tipo": "visitante", "nombre": "Ana" },
            "productos": [{
                "producto_id": "p1", "nombre": "Miel 500g", "cantidad": 2,
                "unidad": "Frasco", "precio_unitario": 150.0, "subtotal_producto": 300.0
            }],
            "totales": { "total": 300.0, "moneda": "MXN" },
            "metodo_pago": "efectivo"
        })
    }

    #[test]
    fn stored_sale_accepts_wrapped_and_bare() {
        let wrapped = json!({ "success": true, "data": sale_json() });
        assert_eq!(
            stored_sale(wrapped).unwrap().unwrap().id.as_deref(),
            Some("V-0042")
        );
        assert_eq!(stored_sale(sale_json()).unwrap().unwrap().folio(), "V-0042");
    }

    #[test]
    fn acknowledgement_without_record_is_none() {
        assert_eq!(stored_sale(json!({ "success": true })).unwrap(), None);
        assert_eq!(stored_sale(Value::Null).unwrap(), None);
    }

    #[test]
    fn rejection_carries_server_message() {
        let err = stored_sale(json!({ "success": false, "message": "Sin stock" })).unwrap_err();
        assert_eq!(err, ApiError::Rejected("Sin stock".into()));
    }
}
