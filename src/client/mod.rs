//! Client Module
//!
//! Resource endpoints and the HTTP transport.

pub mod endpoint;
pub mod http;

pub use endpoint::Endpoint;
pub use http::HttpClient;
