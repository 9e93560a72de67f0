//! Blocking Client
//!
//! Synchronous wrapper around [`crate::BasecampClient`]. Each call blocks the
//! current thread until the single request completes.
//!
//! Must not be used from inside an async runtime.

use crate::client::Endpoint;
use crate::config::{Credentials, ResponseFormat};
use crate::error::{BasecampError, Result};
use crate::transcode::Response;
use tokio::runtime::{Builder, Runtime};

/// Blocking Basecamp client
#[derive(Debug)]
pub struct BasecampClient {
    inner: crate::BasecampClient,
    runtime: Runtime,
}

impl BasecampClient {
    /// Create a client for `https://{account}.basecamphq.com/`
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::from_async(crate::BasecampClient::new(credentials)?)
    }

    /// Create a client against another root URL
    pub fn with_base_url(credentials: Credentials, base_url: &str) -> Result<Self> {
        Self::from_async(crate::BasecampClient::with_base_url(credentials, base_url)?)
    }

    fn from_async(inner: crate::BasecampClient) -> Result<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(runtime_error)?;

        Ok(Self { inner, runtime })
    }

    pub fn credentials(&self) -> &Credentials {
        self.inner.credentials()
    }

    pub fn base_url(&self) -> &str {
        self.inner.base_url()
    }

    pub fn fetch(&self, endpoint: Endpoint) -> Result<Response> {
        self.runtime.block_on(self.inner.fetch(endpoint))
    }

    pub fn fetch_as(&self, endpoint: Endpoint, format: ResponseFormat) -> Result<Response> {
        self.runtime.block_on(self.inner.fetch_as(endpoint, format))
    }

    pub fn get_projects(&self) -> Result<Response> {
        self.fetch(Endpoint::Projects)
    }

    pub fn get_project(&self, id: u64) -> Result<Response> {
        self.fetch(Endpoint::Project(id))
    }

    pub fn get_files(&self, project_id: u64, offset: Option<u32>) -> Result<Response> {
        self.fetch(Endpoint::Files { project_id, offset })
    }

    pub fn get_messages(&self, project_id: u64) -> Result<Response> {
        self.fetch(Endpoint::Messages(project_id))
    }

    pub fn get_todo_lists(&self) -> Result<Response> {
        self.fetch(Endpoint::TodoLists)
    }

    pub fn get_todo_items(&self, list_id: u64) -> Result<Response> {
        self.fetch(Endpoint::TodoItems(list_id))
    }

    pub fn get_users(&self) -> Result<Response> {
        self.fetch(Endpoint::People)
    }

    pub fn get_companies(&self) -> Result<Response> {
        self.fetch(Endpoint::Companies)
    }
}

fn runtime_error(err: std::io::Error) -> BasecampError {
    BasecampError::Runtime(format!("Failed to create runtime: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_account_fails_without_request() {
        let creds = Credentials::builder().user("jane").password("pw").build();
        let client = BasecampClient::new(creds).unwrap();

        let err = client.get_users().unwrap_err();
        assert!(err.is_authentication());
    }

    #[test]
    fn test_runtime_failure_is_not_a_transport_error() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "no threads");
        let err = runtime_error(io);
        assert!(matches!(err, BasecampError::Runtime(msg) if msg.contains("no threads")));
    }
}
