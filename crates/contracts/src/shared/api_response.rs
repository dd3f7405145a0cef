use serde::{Deserialize, Serialize};

/// Envelope used by the remote API for single-entity responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

/// Envelope used by the remote API for collections
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiListResponse<T> {
    pub success: bool,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
}

impl<T> ApiListResponse<T> {
    pub fn ok(data: Vec<T>, message: impl Into<String>) -> Self {
        let total = data.len();
        Self {
            success: true,
            data,
            message: Some(message.into()),
            total: Some(total),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: Vec::new(),
            message: Some(message.into()),
            total: Some(0),
        }
    }

    pub fn message_or(&self, fallback: &str) -> String {
        self.message.clone().unwrap_or_else(|| fallback.to_string())
    }
}

/// Acknowledgement returned by deletions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiAck {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// Some endpoints answer with the bare entity, others wrap it in the envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Enveloped<T> {
    Wrapped(ApiResponse<T>),
    Bare(T),
}

impl<T> Enveloped<T> {
    /// Unwraps the payload; a wrapped response with `success: false` or
    /// without data becomes `Err(message)`.
    pub fn into_result(self) -> Result<T, String> {
        match self {
            Enveloped::Bare(value) => Ok(value),
            Enveloped::Wrapped(resp) if resp.success => resp
                .data
                .ok_or_else(|| resp.message.unwrap_or_else(|| "Respuesta sin datos".into())),
            Enveloped::Wrapped(resp) => Err(resp
                .message
                .unwrap_or_else(|| "Operación rechazada por el servidor".into())),
        }
    }
}
