//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs and making requests.
//! Every call goes through the `{ success, data, pagination, message }`
//! envelope and returns a typed [`ApiError`].

use contracts::shared::api::ApiResponse;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::shared::api_error::ApiError;
use crate::shared::config::config;
use crate::system::auth::storage;

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location,
/// using the configured backend port and path prefix.
///
/// # Returns
/// - API base URL like "http://localhost:3000/api"
/// - Only the prefix if window is not available
pub fn api_base() -> String {
    let cfg = &config().api;
    let window = match web_sys::window() {
        Some(w) => w,
        None => return cfg.prefix.clone(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    base_url(&protocol, &hostname, cfg.port, &cfg.prefix)
}

fn base_url(protocol: &str, hostname: &str, port: u16, prefix: &str) -> String {
    format!(
        "{}//{}:{}/{}",
        protocol,
        hostname,
        port,
        prefix.trim_matches('/')
    )
    .trim_end_matches('/')
    .to_string()
}

/// Build a full API URL from a resource path and an optional query struct
///
/// # Example
/// ```ignore
/// let url = api_url("/contractors", Some(&query))?;
/// ```
pub fn api_url<Q: Serialize>(path: &str, query: Option<&Q>) -> Result<String, ApiError> {
    let mut url = format!("{}/{}", api_base(), path.trim_start_matches('/'));
    if let Some(q) = query {
        let qs = query_string(q)?;
        if !qs.is_empty() {
            url.push('?');
            url.push_str(&qs);
        }
    }
    Ok(url)
}

/// Serialize a query struct; `None` fields are skipped by the struct itself
pub fn query_string<Q: Serialize>(query: &Q) -> Result<String, ApiError> {
    serde_qs::to_string(query).map_err(|e| ApiError::Decode(format!("query: {}", e)))
}

/// Path segment escaping for ids
pub fn encode_id(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

fn with_auth(builder: RequestBuilder) -> RequestBuilder {
    match storage::get_access_token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

async fn read_envelope<T: DeserializeOwned>(response: Response) -> Result<ApiResponse<T>, ApiError> {
    let status = response.status();
    if !response.ok() {
        // бэкенд кладёт причину в тот же конверт
        let message = response
            .json::<ApiResponse<serde_json::Value>>()
            .await
            .ok()
            .and_then(|r| r.message);
        log::warn!("API request failed: HTTP {} {:?}", status, message);
        if status == 401 {
            storage::clear_access_token();
        }
        return Err(ApiError::Http { status, message });
    }
    response
        .json::<ApiResponse<T>>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// GET returning the envelope
pub async fn get_json<T: DeserializeOwned>(url: &str) -> Result<ApiResponse<T>, ApiError> {
    log::debug!("GET {}", url);
    let response = with_auth(Request::get(url))
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    read_envelope(response).await
}

#[derive(Debug, Clone, Copy)]
pub enum Method {
    Post,
    Put,
}

/// POST/PUT with a JSON body
pub async fn send_json<B: Serialize, T: DeserializeOwned>(
    method: Method,
    url: &str,
    body: &B,
) -> Result<ApiResponse<T>, ApiError> {
    log::debug!("{:?} {}", method, url);
    let builder = match method {
        Method::Post => Request::post(url),
        Method::Put => Request::put(url),
    };
    let response = with_auth(builder)
        .json(body)
        .map_err(|e| ApiError::Decode(format!("Failed to serialize request: {}", e)))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    read_envelope(response).await
}

/// DELETE
pub async fn delete(url: &str) -> Result<ApiResponse<serde_json::Value>, ApiError> {
    log::debug!("DELETE {}", url);
    let response = with_auth(Request::delete(url))
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    read_envelope(response).await
}

/// GET of a binary payload (exports)
pub async fn get_bytes(url: &str) -> Result<Vec<u8>, ApiError> {
    log::debug!("GET (binary) {}", url);
    let response = with_auth(Request::get(url))
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    if !response.ok() {
        return Err(ApiError::Http {
            status: response.status(),
            message: None,
        });
    }
    response
        .binary()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_contractor::aggregate::ContractorListQuery;

    #[test]
    fn test_base_url() {
        assert_eq!(
            base_url("https:", "console.example.cl", 3000, "/api"),
            "https://console.example.cl:3000/api"
        );
        assert_eq!(base_url("http:", "localhost", 8080, "/"), "http://localhost:8080");
    }

    #[test]
    fn test_query_string_skips_empty_filters() {
        let q = ContractorListQuery {
            page: 1,
            limit: 25,
            search: Some("pérez".into()),
            ..Default::default()
        };
        let qs = query_string(&q).unwrap();
        assert!(qs.starts_with("page=1&limit=25&search="));
        assert!(!qs.contains("status"));
        assert!(!qs.contains("companyId"));
    }

    #[test]
    fn test_encode_id() {
        assert_eq!(encode_id("a/b c"), "a%2Fb%20c");
    }
}
