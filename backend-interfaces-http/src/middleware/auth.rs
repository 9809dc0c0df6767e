use axum::http::HeaderMap;

use backend_domain::RuntimeConfig;

/// Guards registration, ticket and ops routes.
pub fn authorize(config: &RuntimeConfig, headers: &HeaderMap) -> bool {
    matches_token(config.api_token.as_deref(), headers)
}

/// Guards gate and roster routes. Falls back to the api token when no
/// dedicated scanner token is configured.
pub fn authorize_scanner(config: &RuntimeConfig, headers: &HeaderMap) -> bool {
    let token = config
        .scanner_token
        .as_deref()
        .or(config.api_token.as_deref());
    matches_token(token, headers)
}

fn matches_token(expected: Option<&str>, headers: &HeaderMap) -> bool {
    if let Some(expected) = expected {
        return extract_bearer(headers)
            .map(|v| v == expected)
            .unwrap_or(false);
    }
    true
}

fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("Authorization")?.to_str().ok()?.trim();
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn config(api: Option<&str>, scanner: Option<&str>) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: "127.0.0.1:0".to_string(),
            api_token: api.map(str::to_string),
            scanner_token: scanner.map(str::to_string),
            public_base_url: "http://localhost".to_string(),
            max_body_bytes: 1024,
            request_timeout_seconds: 5,
        }
    }

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            "Authorization",
            HeaderValue::from_str(&format!("Bearer {token}")).expect("header"),
        );
        headers
    }

    #[test]
    fn open_when_no_token_configured() {
        let config = config(None, None);
        assert!(authorize(&config, &HeaderMap::new()));
        assert!(authorize_scanner(&config, &HeaderMap::new()));
    }

    #[test]
    fn scanner_token_is_separate_from_api_token() {
        let config = config(Some("api"), Some("gate"));
        assert!(authorize(&config, &bearer("api")));
        assert!(!authorize(&config, &bearer("gate")));
        assert!(authorize_scanner(&config, &bearer("gate")));
        assert!(!authorize_scanner(&config, &bearer("api")));
    }

    #[test]
    fn scanner_falls_back_to_api_token() {
        let config = config(Some("api"), None);
        assert!(authorize_scanner(&config, &bearer("api")));
        assert!(!authorize_scanner(&config, &HeaderMap::new()));
    }

    #[test]
    fn rejects_empty_or_non_bearer_credentials() {
        let config = config(Some("api"), None);
        let mut headers = HeaderMap::new();
        headers.insert("Authorization", HeaderValue::from_static("Basic api"));
        assert!(!authorize(&config, &headers));
        assert!(!authorize(&config, &bearer(" ")));
    }
}
