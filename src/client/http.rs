//! HTTP Client
//!
//! Performs a single authenticated GET per call. No retries, no pooling.

use crate::error::{BasecampError, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, StatusCode};

/// Longest slice of an error body carried in an error message
const MAX_ERROR_BODY: usize = 500;

/// HTTP client issuing Basic-Auth GET requests
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// Inner reqwest client
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new() -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/xml"));

        // Idle connections are not kept, so each request opens and closes its own.
        let client = Client::builder()
            .user_agent(concat!("basecamp-classic/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| {
                BasecampError::Transport(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }

    /// GET `url` with Basic Auth and return the response body
    pub async fn get(&self, url: &str, user: &str, password: &str) -> Result<String> {
        tracing::debug!(%url, "GET");

        let response = self
            .client
            .get(url)
            .basic_auth(user, Some(password))
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(%url, status = status.as_u16(), "response received");

        if status.is_success() {
            return Ok(response.text().await?);
        }

        // The status decides the error kind even if the body cannot be read.
        let body = response.text().await.unwrap_or_default();
        Err(status_error(url, status, &body))
    }
}

/// Map a non-success status to the matching error
fn status_error(url: &str, status: StatusCode, body: &str) -> BasecampError {
    let snippet = &body[..floor_char_boundary(body, MAX_ERROR_BODY)];

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        tracing::warn!(%url, status = status.as_u16(), "credentials rejected");
        return BasecampError::Authentication(format!(
            "server rejected credentials ({}): {}",
            status, snippet
        ));
    }

    tracing::warn!(%url, status = status.as_u16(), "request failed");
    BasecampError::Transport(format!(
        "Request failed with status {}: {}",
        status, snippet
    ))
}

/// Largest index `<= max` that falls on a char boundary of `s`
fn floor_char_boundary(s: &str, max: usize) -> usize {
    if s.len() <= max {
        return s.len();
    }
    (0..=max).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0)
}
