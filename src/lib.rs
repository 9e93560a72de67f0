//! Basecamp Classic - read-only API client
//!
//! Fetches projects, files, messages, to-do lists, people and companies from
//! the Basecamp Classic XML API with HTTP Basic Auth, and returns each
//! response as an XML tree, JSON text or a nested map.
//!
//! ```no_run
//! use basecamp_classic::{BasecampClient, Credentials, ResponseFormat};
//!
//! # async fn run() -> basecamp_classic::Result<()> {
//! let credentials = Credentials::builder()
//!     .account("acme")
//!     .user("jane")
//!     .password("secret")
//!     .response_format(ResponseFormat::Map)
//!     .build();
//!
//! let client = BasecampClient::new(credentials)?;
//! let projects = client.get_projects().await?;
//! # Ok(())
//! # }
//! ```

pub mod blocking;
pub mod client;
pub mod config;
pub mod error;
pub mod transcode;

pub use client::{Endpoint, HttpClient};
pub use config::{ConfigLoader, Credentials, CredentialsBuilder, ResponseFormat};
pub use error::{BasecampError, Result};
pub use transcode::{transcode, Response, XmlNode};

/// The main Basecamp client
#[derive(Debug, Clone)]
pub struct BasecampClient {
    /// Account credentials and preferred output format
    credentials: Credentials,

    /// Root URL every resource path is appended to, always ending in `/`
    base_url: String,

    /// HTTP client
    http_client: HttpClient,
}

impl BasecampClient {
    /// Create a client for `https://{account}.basecamphq.com/`
    pub fn new(credentials: Credentials) -> Result<Self> {
        let base_url = credentials.base_url();
        Self::with_base_url(credentials, &base_url)
    }

    /// Create a client against another root URL (a proxy or a test server)
    pub fn with_base_url(credentials: Credentials, base_url: &str) -> Result<Self> {
        let base_url = format!("{}/", base_url.trim_end_matches('/'));

        Ok(Self {
            credentials,
            base_url,
            http_client: HttpClient::new()?,
        })
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of an endpoint
    pub fn url_for(&self, endpoint: &Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    /// Fetch an endpoint in the configured response format
    pub async fn fetch(&self, endpoint: Endpoint) -> Result<Response> {
        self.fetch_as(endpoint, self.credentials.response_format())
            .await
    }

    /// Fetch an endpoint in an explicit response format.
    ///
    /// Fails with [`BasecampError::Authentication`] before any network
    /// activity when account, user or password is empty.
    pub async fn fetch_as(&self, endpoint: Endpoint, format: ResponseFormat) -> Result<Response> {
        self.credentials.ensure_complete()?;

        let url = self.url_for(&endpoint);
        let body = self
            .http_client
            .get(&url, self.credentials.user(), self.credentials.password())
            .await?;

        transcode(&body, format)
    }

    /// All projects visible to the user
    pub async fn get_projects(&self) -> Result<Response> {
        self.fetch(Endpoint::Projects).await
    }

    /// A single project
    pub async fn get_project(&self, id: u64) -> Result<Response> {
        self.fetch(Endpoint::Project(id)).await
    }

    /// Files attached to a project; `offset` pages through long lists
    pub async fn get_files(&self, project_id: u64, offset: Option<u32>) -> Result<Response> {
        self.fetch(Endpoint::Files { project_id, offset }).await
    }

    /// Messages posted in a project
    pub async fn get_messages(&self, project_id: u64) -> Result<Response> {
        self.fetch(Endpoint::Messages(project_id)).await
    }

    /// All to-do lists
    pub async fn get_todo_lists(&self) -> Result<Response> {
        self.fetch(Endpoint::TodoLists).await
    }

    /// Items of one to-do list
    pub async fn get_todo_items(&self, list_id: u64) -> Result<Response> {
        self.fetch(Endpoint::TodoItems(list_id)).await
    }

    /// People visible to (and including) the user
    pub async fn get_users(&self) -> Result<Response> {
        self.fetch(Endpoint::People).await
    }

    /// Companies visible to the user
    pub async fn get_companies(&self) -> Result<Response> {
        self.fetch(Endpoint::Companies).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials::builder()
            .account("acme")
            .user("jane")
            .password("secret")
            .build()
    }

    #[test]
    fn test_base_url_from_account() {
        let client = BasecampClient::new(credentials()).unwrap();
        assert_eq!(client.base_url(), "https://acme.basecamphq.com/");
        assert_eq!(
            client.url_for(&Endpoint::Project(42)),
            "https://acme.basecamphq.com/projects/42.xml"
        );
    }

    #[test]
    fn test_custom_base_url_gets_trailing_slash() {
        let client = BasecampClient::with_base_url(credentials(), "http://127.0.0.1:8080").unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:8080/");

        let client = BasecampClient::with_base_url(credentials(), "http://proxy/bc/").unwrap();
        assert_eq!(
            client.url_for(&Endpoint::People),
            "http://proxy/bc/people.xml"
        );
    }

    #[tokio::test]
    async fn test_incomplete_credentials_fail_before_request() {
        // Port 9 is never contacted; the credential check comes first.
        let creds = Credentials::builder().account("acme").user("jane").build();
        let client = BasecampClient::with_base_url(creds, "http://127.0.0.1:9").unwrap();

        let err = client.get_projects().await.unwrap_err();
        assert!(err.is_authentication());
    }
}
