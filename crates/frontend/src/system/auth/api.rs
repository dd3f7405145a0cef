use contracts::system::auth::{LoginRequest, LoginResponse, RegisterRequest};
use serde_json::Value;

use crate::shared::http::{ApiClient, ApiError};

/// Login with email and password
pub async fn login(
    client: &ApiClient,
    email: String,
    password: String,
) -> Result<LoginResponse, ApiError> {
    let request = LoginRequest {
        email: email.trim().to_string(),
        password,
    };
    client.post("/auth/login", &request).await
}

/// Register a new account; returns the server's confirmation message.
pub async fn register(client: &ApiClient, request: RegisterRequest) -> Result<String, ApiError> {
    let response = client.post_value("/auth/register", &request).await?;
    if response.get("success").and_then(Value::as_bool) == Some(false) {
        return Err(ApiError::Rejected(message_of(&response).unwrap_or_else(|| {
            "Ocurrió un error durante el registro. Por favor, inténtalo de nuevo.".to_string()
        })));
    }
    Ok(message_of(&response)
        .unwrap_or_else(|| "¡Registro exitoso! Serás redirigido al login.".to_string()))
}

fn message_of(value: &Value) -> Option<String> {
    value
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}
