//! # Activity HTTP Client
//!
//! A reqwest-based HTTP client and a declarative [`RestClient`] on top of it.
//!
//! ## Features
//!
//! - **Timeouts**: connect, read and overall request timeouts
//! - **Pool limits**: cap on in-flight requests, keep-alive, idle timeout
//! - **Header factories**: per-request headers computed from the incoming request
//! - **Exception mappers**: turn responses into errors before decoding
//! - **Query styles**: multi-valued parameters as pairs, comma lists or `k[]`
//! - **Logging**: request/response logging with a body size limit
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use activity_http_client::{HeaderMap, RestClient, StaticHeadersFactory};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RestClient::builder()
//!         .base_uri("http://localhost:8080/api")
//!         .connect_timeout(Duration::from_millis(500))
//!         .headers_factory(StaticHeadersFactory::new().header("x-client", "docs"))
//!         .build()?;
//!
//!     let body: serde_json::Value = client.get_json("/activities", &HeaderMap::new()).await?;
//!     println!("{}", body);
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod exception;
mod headers;
mod logging;
mod query;
mod request;
mod response;
mod rest_client;

pub use client::HttpClient;
pub use config::{HttpClientConfig, HttpClientConfigBuilder};
pub use error::{BoxError, HttpClientError, Result};
pub use exception::{DefaultExceptionMapper, ResponseExceptionMapper};
pub use headers::{HeadersFactory, NoopHeadersFactory, StaticHeadersFactory};
pub use logging::LoggingScope;
pub use query::QueryParamStyle;
pub use request::RequestBuilder;
pub use response::Response;
pub use rest_client::{RestClient, RestClientBuilder, RestClientSettings};

// Re-export common types
pub use bytes::Bytes;
pub use http::{HeaderMap, HeaderValue, Method, StatusCode, header};
pub use url::Url;

/// Prelude for common imports.
///
/// ```
/// use activity_http_client::prelude::*;
/// ```
pub mod prelude {
    pub use crate::client::HttpClient;
    pub use crate::config::{HttpClientConfig, HttpClientConfigBuilder};
    pub use crate::error::{HttpClientError, Result};
    pub use crate::exception::ResponseExceptionMapper;
    pub use crate::headers::{HeadersFactory, StaticHeadersFactory};
    pub use crate::logging::LoggingScope;
    pub use crate::query::QueryParamStyle;
    pub use crate::response::Response;
    pub use crate::rest_client::{RestClient, RestClientBuilder, RestClientSettings};
    pub use http::{HeaderMap, HeaderValue, StatusCode, header};
}
