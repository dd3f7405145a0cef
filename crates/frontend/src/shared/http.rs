//! Single HTTP entry point for the remote API.
//!
//! Every request goes through [`ApiClient`], which attaches the bearer token,
//! unwraps the `{success, data, message}` envelope and turns 401/403 into a
//! session invalidation.

use contracts::shared::api_response::{ApiAck, Enveloped};
use contracts::shared::validation::ValidationError;
use gloo_net::http::{Request, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::shared::api_utils::api_base;
use crate::system::auth::context::SessionContext;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Error de red: {0}")]
    Network(String),
    #[error("Error HTTP {status}: {message}")]
    Http { status: u16, message: String },
    #[error("Sesión expirada o sin permisos. Inicia sesión nuevamente.")]
    Unauthorized,
    #[error("Respuesta inválida del servidor: {0}")]
    Decode(String),
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

#[derive(Debug, Clone, Copy)]
enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

#[derive(Clone)]
pub struct ApiClient {
    base: String,
    session: Option<SessionContext>,
}

impl ApiClient {
    /// Client bound to the current session; its token is sent with every call.
    pub fn new(session: SessionContext) -> Self {
        Self {
            base: api_base(),
            session: Some(session),
        }
    }

    /// Client for the login and register endpoints.
    pub fn anonymous() -> Self {
        Self {
            base: api_base(),
            session: None,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub async fn get_value(&self, path: &str) -> Result<Value, ApiError> {
        let body = self.send(Verb::Get, path, None).await?;
        parse_value(&body)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let body = self.send(Verb::Get, path, None).await?;
        decode_enveloped(&body)
    }

    /// POST returning the raw JSON body, for payloads the adapter must repair.
    pub async fn post_value<B: Serialize>(&self, path: &str, body: &B) -> Result<Value, ApiError> {
        let body = self.send(Verb::Post, path, Some(to_value(body)?)).await?;
        parse_value(&body)
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = self.send(Verb::Post, path, Some(to_value(body)?)).await?;
        decode_enveloped(&body)
    }

    pub async fn put_value<B: Serialize>(&self, path: &str, body: &B) -> Result<Value, ApiError> {
        let body = self.send(Verb::Put, path, Some(to_value(body)?)).await?;
        parse_value(&body)
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let body = self.send(Verb::Delete, path, None).await?;
        decode_ack(&body)
    }

    async fn send(&self, verb: Verb, path: &str, body: Option<Value>) -> Result<String, ApiError> {
        let url = self.url(path);
        let mut builder: RequestBuilder = match verb {
            Verb::Get => Request::get(&url),
            Verb::Post => Request::post(&url),
            Verb::Put => Request::put(&url),
            Verb::Delete => Request::delete(&url),
        };
        builder = builder.header("Accept", "application/json");

        let token = self.session.and_then(|s| s.token());
        if let Some(header) = bearer_for(&url, &self.base, token.as_deref()) {
            builder = builder.header("Authorization", &header);
        }

        let request = match body {
            Some(json) => builder
                .json(&json)
                .map_err(|e| ApiError::Decode(format!("Failed to serialize request: {}", e)))?,
            None => builder
                .build()
                .map_err(|e| ApiError::Network(format!("Failed to build request: {}", e)))?,
        };

        log::debug!("{:?} {}", verb, url);
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        match interpret(status, text) {
            Err(ApiError::Unauthorized) => {
                log::warn!("{:?} {} answered {}; closing session", verb, url, status);
                if let Some(session) = self.session {
                    session.invalidate();
                }
                Err(ApiError::Unauthorized)
            }
            other => other,
        }
    }
}

/// `Authorization` header value, only for URLs under the API base.
pub fn bearer_for(url: &str, base: &str, token: Option<&str>) -> Option<String> {
    let token = token.filter(|t| !t.is_empty())?;
    if base.is_empty() || !url.starts_with(base) {
        return None;
    }
    Some(format!("Bearer {}", token))
}

/// Maps a status code and body to the body or a typed error.
pub fn interpret(status: u16, body: String) -> Result<String, ApiError> {
    match status {
        200..=299 => Ok(body),
        401 | 403 => Err(ApiError::Unauthorized),
        _ => Err(ApiError::Http {
            status,
            message: server_message(&body).unwrap_or_else(|| status_text(status).to_string()),
        }),
    }
}

fn server_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

fn status_text(status: u16) -> &'static str {
    match status {
        400 => "Solicitud inválida",
        404 => "Recurso no encontrado",
        409 => "Conflicto con el estado actual",
        422 => "Datos no procesables",
        500..=599 => "Error interno del servidor",
        _ => "Respuesta inesperada",
    }
}

fn to_value<B: Serialize>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}

pub fn parse_value(body: &str) -> Result<Value, ApiError> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Decodes a wrapped or bare payload; `success: false` becomes `Rejected`.
pub fn decode_enveloped<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let enveloped: Enveloped<T> =
        serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    enveloped.into_result().map_err(ApiError::Rejected)
}

fn decode_ack(body: &str) -> Result<(), ApiError> {
    if body.trim().is_empty() {
        return Ok(());
    }
    match serde_json::from_str::<ApiAck>(body) {
        Ok(ack) if !ack.success => Err(ApiError::Rejected(if ack.message.is_empty() {
            "Operación rechazada por el servidor".to_string()
        } else {
            ack.message
        })),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[test]
    fn bearer_only_for_api_urls() {
        let base = "http://localhost:3000/api";
        assert_eq!(
            bearer_for("http://localhost:3000/api/products", base, Some("t0k")),
            Some("Bearer t0k".to_string())
        );
        assert_eq!(bearer_for("https://cdn.example.com/x", base, Some("t0k")), None);
        assert_eq!(bearer_for("http://localhost:3000/api/products", base, None), None);
        assert_eq!(bearer_for("http://localhost:3000/api/products", base, Some("")), None);
    }

    #[test]
    fn status_mapping() {
        assert_eq!(interpret(200, "{}".into()), Ok("{}".to_string()));
        assert_eq!(interpret(401, String::new()), Err(ApiError::Unauthorized));
        assert_eq!(interpret(403, String::new()), Err(ApiError::Unauthorized));
        assert_eq!(
            interpret(409, r#"{"success":false,"message":"Código duplicado"}"#.into()),
            Err(ApiError::Http {
                status: 409,
                message: "Código duplicado".into()
            })
        );
        assert_eq!(
            interpret(500, "<html>".into()),
            Err(ApiError::Http {
                status: 500,
                message: "Error interno del servidor".into()
            })
        );
    }

    #[test]
    fn envelope_decoding() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Folio {
            folio: String,
        }

        let ok: Folio = decode_enveloped(r#"{"success":true,"data":{"folio":"S1"}}"#).unwrap();
        assert_eq!(ok.folio, "S1");
        let bare: Folio = decode_enveloped(r#"{"folio":"S2"}"#).unwrap();
        assert_eq!(bare.folio, "S2");
        assert_eq!(
            decode_enveloped::<Folio>(r#"{"success":false,"data":null,"message":"sin stock"}"#),
            Err(ApiError::Rejected("sin stock".into()))
        );
        assert!(matches!(
            decode_enveloped::<Folio>("not json"),
            Err(ApiError::Decode(_))
        ));
    }

    #[test]
    fn ack_decoding() {
        assert_eq!(decode_ack(""), Ok(()));
        assert_eq!(decode_ack(r#"{"success":true,"message":"ok"}"#), Ok(()));
        assert_eq!(
            decode_ack(r#"{"success":false,"message":"no existe"}"#),
            Err(ApiError::Rejected("no existe".into()))
        );
    }
}
