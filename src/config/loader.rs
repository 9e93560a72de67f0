//! Configuration Loader
//!
//! Builds [`Credentials`] from JSON files and environment variables.

use crate::config::credentials::{Credentials, ResponseFormat};
use crate::error::{BasecampError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Credential fields as they appear in a config file. Every field is optional
/// so that several sources can be layered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CredentialsFile {
    #[serde(default)]
    pub account: Option<String>,

    #[serde(default)]
    pub user: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default)]
    pub response: Option<ResponseFormat>,
}

/// Configuration loader with support for multiple sources
#[derive(Debug, Default)]
pub struct ConfigLoader {
    config: CredentialsFile,
}

impl ConfigLoader {
    /// Create a loader from the default file locations and the environment
    pub fn new() -> Result<Self> {
        let mut loader = Self::default();
        loader.load_from_default_paths()?;
        loader.apply_env(|name| std::env::var(name).ok())?;
        Ok(loader)
    }

    /// Create a loader from a specific file, still honouring the environment
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let mut loader = Self::default();
        loader.load_from_file(path)?;
        loader.apply_env(|name| std::env::var(name).ok())?;
        Ok(loader)
    }

    /// Load configuration from default paths
    fn load_from_default_paths(&mut self) -> Result<()> {
        for path in Self::get_config_paths() {
            if path.exists() {
                self.load_from_file(&path)?;
            }
        }

        Ok(())
    }

    /// Get list of config paths to check, lowest priority first
    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".basecamp").join("config.json"));
        }

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("basecamp").join("config.json"));
        }

        paths.push(PathBuf::from("basecamp.json"));

        if let Ok(custom_path) = std::env::var("BASECAMP_CONFIG") {
            paths.push(PathBuf::from(custom_path));
        }

        paths
    }

    /// Load configuration from a specific file
    fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            BasecampError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config: CredentialsFile = serde_json::from_str(&content).map_err(|e| {
            BasecampError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        tracing::debug!(path = %path.display(), "loaded credentials file");
        self.merge_config(config);
        Ok(())
    }

    /// Override fields from `BASECAMP_*` variables resolved through `lookup`
    fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let response = match lookup("BASECAMP_RESPONSE_FORMAT") {
            Some(value) => Some(value.parse::<ResponseFormat>()?),
            None => None,
        };

        self.merge_config(CredentialsFile {
            account: lookup("BASECAMP_ACCOUNT"),
            user: lookup("BASECAMP_USER"),
            password: lookup("BASECAMP_PASSWORD"),
            api_key: lookup("BASECAMP_API_KEY"),
            response,
        });
        Ok(())
    }

    /// Merge another config into this one (fields present in `other` win)
    fn merge_config(&mut self, other: CredentialsFile) {
        if other.account.is_some() {
            self.config.account = other.account;
        }
        if other.user.is_some() {
            self.config.user = other.user;
        }
        if other.password.is_some() {
            self.config.password = other.password;
        }
        if other.api_key.is_some() {
            self.config.api_key = other.api_key;
        }
        if other.response.is_some() {
            self.config.response = other.response;
        }
    }

    /// Get the merged configuration
    pub fn config(&self) -> &CredentialsFile {
        &self.config
    }

    /// Build the credentials. Missing fields stay empty and are reported
    /// when a request is attempted.
    pub fn into_credentials(self) -> Credentials {
        let config = self.config;
        let mut builder = Credentials::builder()
            .account(config.account.unwrap_or_default())
            .user(config.user.unwrap_or_default())
            .password(config.password.unwrap_or_default())
            .response_format(config.response.unwrap_or_default());

        if let Some(api_key) = config.api_key {
            builder = builder.api_key(api_key);
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_load_from_custom_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{
                "account": "acme",
                "user": "jane",
                "password": "hunter2",
                "api_key": "k-1",
                "response": "json"
            }}"#
        )
        .unwrap();

        let mut loader = ConfigLoader::default();
        loader.load_from_file(file.path()).unwrap();
        let creds = loader.into_credentials();

        assert_eq!(creds.account(), "acme");
        assert_eq!(creds.user(), "jane");
        assert_eq!(creds.password(), "hunter2");
        assert_eq!(creds.api_key(), Some("k-1"));
        assert_eq!(creds.response_format(), ResponseFormat::Json);
    }

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_file_format_ignores_case() {
        let file = write_config(r#"{ "response": "JSON" }"#);

        let mut loader = ConfigLoader::default();
        loader.load_from_file(file.path()).unwrap();
        assert_eq!(loader.config().response, Some(ResponseFormat::Json));

        let file = write_config(r#"{ "response": "Array" }"#);
        loader.load_from_file(file.path()).unwrap();
        assert_eq!(loader.config().response, Some(ResponseFormat::Map));
    }

    #[test]
    fn test_unknown_file_format_is_config_error() {
        let file = write_config(r#"{ "response": "csv" }"#);

        let mut loader = ConfigLoader::default();
        let err = loader.load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, BasecampError::Config(_)));
    }

    #[test]
    fn test_later_file_overrides_field_by_field() {
        let base = write_config(
            r#"{ "account": "acme", "user": "jane", "password": "old", "response": "xml" }"#,
        );
        let local = write_config(r#"{ "password": "new", "response": "map" }"#);

        let mut loader = ConfigLoader::default();
        loader.load_from_file(base.path()).unwrap();
        loader.load_from_file(local.path()).unwrap();

        let creds = loader.into_credentials();
        assert_eq!(creds.account(), "acme");
        assert_eq!(creds.user(), "jane");
        assert_eq!(creds.password(), "new");
        assert_eq!(creds.api_key(), None);
        assert_eq!(creds.response_format(), ResponseFormat::Map);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{{ not json").unwrap();

        let mut loader = ConfigLoader::default();
        let err = loader.load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, BasecampError::Config(_)));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let mut loader = ConfigLoader::default();
        let err = loader
            .load_from_file("/nonexistent/basecamp/config.json")
            .unwrap_err();
        assert!(matches!(err, BasecampError::Config(msg) if msg.contains("Failed to read")));
    }

    #[test]
    fn test_env_overrides_file() {
        let mut loader = ConfigLoader::default();
        loader.merge_config(CredentialsFile {
            account: Some("from-file".to_string()),
            user: Some("jane".to_string()),
            ..Default::default()
        });

        loader
            .apply_env(env(&[
                ("BASECAMP_ACCOUNT", "from-env"),
                ("BASECAMP_PASSWORD", "pw"),
                ("BASECAMP_RESPONSE_FORMAT", "array"),
            ]))
            .unwrap();

        let config = loader.config();
        assert_eq!(config.account.as_deref(), Some("from-env"));
        assert_eq!(config.user.as_deref(), Some("jane"));
        assert_eq!(config.password.as_deref(), Some("pw"));
        assert_eq!(config.response, Some(ResponseFormat::Map));
    }

    #[test]
    fn test_unknown_env_format_fails() {
        let mut loader = ConfigLoader::default();
        let err = loader
            .apply_env(env(&[("BASECAMP_RESPONSE_FORMAT", "csv")]))
            .unwrap_err();
        assert!(matches!(err, BasecampError::Config(_)));
    }

    #[test]
    fn test_partial_config_yields_incomplete_credentials() {
        let mut loader = ConfigLoader::default();
        loader.apply_env(env(&[("BASECAMP_ACCOUNT", "acme")])).unwrap();

        let creds = loader.into_credentials();
        assert_eq!(creds.account(), "acme");
        assert!(creds.ensure_complete().unwrap_err().is_authentication());
    }
}
