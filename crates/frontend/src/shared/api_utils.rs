//! API utilities for frontend-backend communication
//!
//! The base URL comes from the compile-time `MELARIUM_API_URL` variable when
//! it is set, otherwise it is derived from the page location with the API
//! served on port 3000 under `/api`.

const API_URL_OVERRIDE: Option<&str> = option_env!("MELARIUM_API_URL");
const API_PORT: u16 = 3000;
const API_PREFIX: &str = "/api";

/// Get the base URL for API requests, e.g. `"http://localhost:3000/api"`.
///
/// Returns an empty string if there is no window and no override.
pub fn api_base() -> String {
    let location = web_sys::window().map(|w| w.location());
    let protocol = location
        .as_ref()
        .and_then(|l| l.protocol().ok())
        .unwrap_or_else(|| "http:".to_string());
    let hostname = location.as_ref().and_then(|l| l.hostname().ok());
    resolve_api_base(API_URL_OVERRIDE, &protocol, hostname.as_deref())
}

pub fn resolve_api_base(overridden: Option<&str>, protocol: &str, hostname: Option<&str>) -> String {
    if let Some(url) = overridden.map(str::trim).filter(|u| !u.is_empty()) {
        return url.trim_end_matches('/').to_string();
    }
    match hostname {
        Some(host) if !host.is_empty() => {
            format!("{}//{}:{}{}", protocol, host, API_PORT, API_PREFIX)
        }
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_from_location() {
        assert_eq!(
            resolve_api_base(None, "https:", Some("melarium.mx")),
            "https://melarium.mx:3000/api"
        );
        assert_eq!(resolve_api_base(None, "http:", None), "");
    }

    #[test]
    fn override_wins_and_is_normalized() {
        assert_eq!(
            resolve_api_base(Some("http://10.0.0.5:8080/api/"), "https:", Some("x")),
            "http://10.0.0.5:8080/api"
        );
        assert_eq!(
            resolve_api_base(Some("  "), "http:", Some("localhost")),
            "http://localhost:3000/api"
        );
    }
}
