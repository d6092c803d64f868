//! HTTP client implementation.

use http::Method;
use reqwest::Request;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::logging::{log_request, log_response};
use crate::response::header_block_size;
use crate::{HttpClientConfig, HttpClientError, RequestBuilder, Response, Result};

/// HTTP client with pooling limits, header size checks and exchange logging.
#[derive(Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    config: Arc<HttpClientConfig>,
    permits: Option<Arc<Semaphore>>,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration.
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .user_agent(&config.user_agent)
            .gzip(config.gzip)
            .brotli(config.brotli);

        builder = if config.keep_alive {
            builder.pool_max_idle_per_host(config.pool_max_idle_per_host)
        } else {
            builder.pool_max_idle_per_host(0)
        };

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.read_timeout {
            builder = builder.read_timeout(timeout);
        }

        builder = if config.follow_redirects {
            builder.redirect(reqwest::redirect::Policy::limited(config.max_redirects))
        } else {
            builder.redirect(reqwest::redirect::Policy::none())
        };

        let inner = builder
            .build()
            .map_err(|e| HttpClientError::RequestBuild(e.to_string()))?;

        let permits = match config.max_pool_size {
            Some(0) => {
                warn!("max_pool_size of 0 would block every request, ignoring");
                None
            }
            Some(size) => Some(Arc::new(Semaphore::new(size))),
            None => None,
        };

        Ok(Self {
            inner,
            config: Arc::new(config),
            permits,
        })
    }

    /// Create a new HTTP client with default configuration.
    pub fn default_client() -> Result<Self> {
        Self::new(HttpClientConfig::default())
    }

    /// Get the underlying reqwest client.
    pub fn inner(&self) -> &reqwest::Client {
        &self.inner
    }

    /// Get the client configuration.
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Requests that can start right now without waiting on the pool.
    pub fn available_permits(&self) -> Option<usize> {
        self.permits.as_ref().map(|p| p.available_permits())
    }

    /// Create a GET request builder.
    pub fn get(&self, url: impl Into<String>) -> RequestBuilder<'_> {
        RequestBuilder::new(self, Method::GET, url.into())
    }

    /// Execute a request, holding a pool permit for its whole duration.
    pub(crate) async fn execute(&self, request: Request) -> Result<Response> {
        let _permit = match &self.permits {
            Some(permits) => Some(
                permits
                    .acquire()
                    .await
                    .map_err(|_| HttpClientError::Connection("connection pool closed".into()))?,
            ),
            None => None,
        };

        let scope = self.config.logging_scope;
        log_request(scope, request.method(), request.url(), request.headers());

        let started = Instant::now();
        let timeout = request.timeout().copied();
        let response = self
            .inner
            .execute(request)
            .await
            .map_err(|e| self.classify(e, timeout))?;

        if let Some(limit) = self.config.max_header_size {
            let size = header_block_size(response.headers());
            if size > limit {
                debug!(size, limit, url = %response.url(), "Rejecting oversized response headers");
                return Err(HttpClientError::HeadersTooLarge { size, limit });
            }
        }

        let response = Response::from_reqwest(response)
            .await
            .map_err(|e| match e {
                HttpClientError::Http(e) => self.classify(e, timeout),
                other => other,
            })?;

        log_response(scope, self.config.logging_body_limit, &response, started.elapsed());

        Ok(response)
    }

    /// Turn reqwest timeouts and connect failures into their own variants.
    fn classify(&self, error: reqwest::Error, request_timeout: Option<Duration>) -> HttpClientError {
        if error.is_timeout() {
            let limit = request_timeout
                .or(self.config.read_timeout)
                .or(self.config.timeout)
                .unwrap_or(self.config.connect_timeout);
            HttpClientError::Timeout(limit)
        } else if error.is_connect() {
            HttpClientError::Connection(error.to_string())
        } else {
            HttpClientError::Http(error)
        }
    }
}
