//! Account Credentials
//!
//! Immutable account settings, built once and shared by every request.

use crate::error::{BasecampError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output shape produced from a response body
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ResponseFormat {
    /// Parsed XML tree
    #[default]
    Xml,

    /// JSON text
    Json,

    /// Nested map
    Map,
}

impl FromStr for ResponseFormat {
    type Err = BasecampError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xml" => Ok(ResponseFormat::Xml),
            "json" => Ok(ResponseFormat::Json),
            "map" | "array" => Ok(ResponseFormat::Map),
            other => Err(BasecampError::Config(format!(
                "Unknown response format '{}'. Expected 'xml', 'json' or 'map'",
                other
            ))),
        }
    }
}

// Config files accept the same spellings as the environment.
impl TryFrom<String> for ResponseFormat {
    type Error = BasecampError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseFormat::Xml => write!(f, "xml"),
            ResponseFormat::Json => write!(f, "json"),
            ResponseFormat::Map => write!(f, "map"),
        }
    }
}

/// Basecamp account credentials
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    account: String,
    user: String,
    password: String,
    api_key: Option<String>,
    format: ResponseFormat,
}

impl Credentials {
    pub fn builder() -> CredentialsBuilder {
        CredentialsBuilder::default()
    }

    /// Account slug, the subdomain of `basecamphq.com`
    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// API token from the user settings page. Not sent with requests.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn response_format(&self) -> ResponseFormat {
        self.format
    }

    /// Root URL of the account's API
    pub fn base_url(&self) -> String {
        format!("https://{}.basecamphq.com/", self.account)
    }

    /// Fail unless account, user and password are all non-empty
    pub fn ensure_complete(&self) -> Result<()> {
        let missing = [
            ("account", &self.account),
            ("user", &self.user),
            ("password", &self.password),
        ]
        .into_iter()
        .find(|(_, value)| value.is_empty());

        match missing {
            Some((field, _)) => Err(BasecampError::Authentication(format!(
                "missing {}",
                field
            ))),
            None => Ok(()),
        }
    }
}

// Keeps the password out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("account", &self.account)
            .field("user", &self.user)
            .field("password", &if self.password.is_empty() { "" } else { "***" })
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("format", &self.format)
            .finish()
    }
}

/// Chainable builder for [`Credentials`]
#[derive(Debug, Clone, Default)]
pub struct CredentialsBuilder {
    inner: Credentials,
}

impl CredentialsBuilder {
    pub fn account(mut self, account: impl Into<String>) -> Self {
        self.inner.account = account.into();
        self
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.inner.user = user.into();
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.inner.password = password.into();
        self
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.inner.api_key = Some(api_key.into());
        self
    }

    pub fn response_format(mut self, format: ResponseFormat) -> Self {
        self.inner.format = format;
        self
    }

    /// Finish building. Presence of the required fields is checked per request.
    pub fn build(self) -> Credentials {
        self.inner
    }
}
