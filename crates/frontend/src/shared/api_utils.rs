//! API utilities for frontend-backend communication
//!
//! Every request goes through [`get_json`] / [`send_json`]: absolute URL from
//! the configured service path, bearer token from local storage, and the
//! response body decoded with or without the `{ success, data }` envelope.

use contracts::shared::config::Service;
use contracts::shared::envelope::decode_body;
use contracts::shared::{ApiError, ApiResult};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::shared::config::endpoints;
use crate::system::auth::storage;

/// Get the base URL for API requests
///
/// Built from the current window location and the configured gateway port;
/// port `0` keeps the page origin.
///
/// # Returns
/// - API base URL like "http://localhost:8080"
/// - Empty string if window is not available
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    match endpoints().api_port {
        0 => format!("{}//{}", protocol, location.host().unwrap_or(hostname)),
        port => format!("{}//{}:{}", protocol, hostname, port),
    }
}

/// Absolute URL of `path` on `service`.
///
/// # Example
/// ```rust,no_run
/// # use contracts::shared::config::Service;
/// # use frontend::shared::api_utils::service_url;
/// # let id = 1;
/// let url = service_url(Service::Contract, &format!("contracts/{}", id));
/// ```
pub fn service_url(service: Service, path: &str) -> String {
    format!("{}{}", api_base(), endpoints().path(service, path))
}

/// Same as [`service_url`] with a query string built by `serde_qs`.
pub fn service_url_with_query<Q: Serialize>(service: Service, path: &str, query: &Q) -> String {
    let url = service_url(service, path);
    match serde_qs::to_string(query) {
        Ok(qs) if !qs.is_empty() => format!("{url}?{qs}"),
        Ok(_) => url,
        Err(e) => {
            log::warn!("query string for {url} dropped: {e}");
            url
        }
    }
}

fn with_auth(builder: RequestBuilder) -> RequestBuilder {
    match storage::get_access_token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

async fn read_response<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(ApiError::from_status(status, &body));
    }
    decode_body(&body)
}

/// GET `url` and decode the JSON payload.
pub async fn get_json<T: DeserializeOwned>(url: &str) -> ApiResult<T> {
    log::debug!("GET {}", url);
    let response = with_auth(Request::get(url))
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    read_response(response).await
}

#[derive(Debug, Clone, Copy)]
pub enum Method {
    Post,
    Put,
    Patch,
}

/// Send `body` as JSON and decode the JSON answer.
pub async fn send_json<B, T>(method: Method, url: &str, body: &B) -> ApiResult<T>
where
    B: Serialize,
    T: DeserializeOwned,
{
    log::debug!("{:?} {}", method, url);
    let builder = match method {
        Method::Post => Request::post(url),
        Method::Put => Request::put(url),
        Method::Patch => Request::patch(url),
    };
    let response = with_auth(builder)
        .json(body)
        .map_err(|e| ApiError::Decode(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    read_response(response).await
}

pub async fn post_json<B: Serialize, T: DeserializeOwned>(url: &str, body: &B) -> ApiResult<T> {
    send_json(Method::Post, url, body).await
}

/// POST where the answer carries nothing the page needs.
pub async fn post_no_content<B: Serialize>(url: &str, body: &B) -> ApiResult<()> {
    let response = with_auth(Request::post(url))
        .json(body)
        .map_err(|e| ApiError::Decode(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    if response.ok() {
        return Ok(());
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::from_status(status, &body))
}
