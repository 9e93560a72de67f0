//! Configuration Module
//!
//! Account credentials and the loader that assembles them.

pub mod credentials;
pub mod loader;

pub use credentials::{Credentials, CredentialsBuilder, ResponseFormat};
pub use loader::{ConfigLoader, CredentialsFile};
