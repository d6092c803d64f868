//! Declarative REST client: a base URI, settings that configuration can
//! override, header factories and response exception mappers.

use crate::exception::map_response;
use crate::{
    HeadersFactory, HttpClient, HttpClientConfig, HttpClientError, LoggingScope, QueryParamStyle,
    Response, ResponseExceptionMapper, Result,
};
use http::{HeaderMap, HeaderName, HeaderValue, header};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Client settings as they appear in a `rest-client.<key>` configuration section.
///
/// Every field is optional; a present field overrides whatever the builder
/// was given programmatically.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct RestClientSettings {
    pub url: Option<String>,
    /// Milliseconds.
    pub connect_timeout: Option<u64>,
    /// Milliseconds.
    pub read_timeout: Option<u64>,
    pub user_agent: Option<String>,
    pub follow_redirects: Option<bool>,
    pub query_param_style: Option<QueryParamStyle>,
    pub connection_pool_size: Option<usize>,
    pub keep_alive_enabled: Option<bool>,
    /// Seconds.
    pub connection_ttl: Option<u64>,
    pub max_header_size: Option<usize>,
    pub headers: HashMap<String, String>,
    pub logging_scope: Option<LoggingScope>,
    pub logging_body_limit: Option<usize>,
}

impl RestClientSettings {
    fn apply(&self, config: &mut HttpClientConfig) {
        if let Some(url) = &self.url {
            config.base_url = Some(url.clone());
        }
        if let Some(ms) = self.connect_timeout {
            config.connect_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = self.read_timeout {
            config.read_timeout = Some(Duration::from_millis(ms));
        }
        if let Some(agent) = &self.user_agent {
            config.user_agent = agent.clone();
        }
        if let Some(follow) = self.follow_redirects {
            config.follow_redirects = follow;
        }
        if let Some(style) = self.query_param_style {
            config.query_param_style = style;
        }
        if let Some(size) = self.connection_pool_size {
            config.max_pool_size = Some(size);
        }
        if let Some(keep_alive) = self.keep_alive_enabled {
            config.keep_alive = keep_alive;
        }
        if let Some(secs) = self.connection_ttl {
            config.pool_idle_timeout = Duration::from_secs(secs);
        }
        if let Some(size) = self.max_header_size {
            config.max_header_size = Some(size);
        }
        for (name, value) in &self.headers {
            set_default_header(config, name, value);
        }
        if let Some(scope) = self.logging_scope {
            config.logging_scope = scope;
        }
        if let Some(limit) = self.logging_body_limit {
            config.logging_body_limit = limit;
        }
    }
}

fn set_default_header(config: &mut HttpClientConfig, name: &str, value: &str) {
    config
        .default_headers
        .retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
    config
        .default_headers
        .push((name.to_string(), value.to_string()));
}

/// Builder for [`RestClient`].
pub struct RestClientBuilder {
    config: HttpClientConfig,
    headers_factories: Vec<Arc<dyn HeadersFactory>>,
    exception_mappers: Vec<Arc<dyn ResponseExceptionMapper>>,
    query: Vec<(String, Vec<String>)>,
    settings: Option<RestClientSettings>,
}

impl Default for RestClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RestClientBuilder {
    pub fn new() -> Self {
        Self {
            config: HttpClientConfig::default(),
            headers_factories: Vec::new(),
            exception_mappers: Vec::new(),
            query: Vec::new(),
            settings: None,
        }
    }

    pub fn base_uri(mut self, uri: impl Into<String>) -> Self {
        self.config.base_url = Some(uri.into());
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.config.read_timeout = Some(timeout);
        self
    }

    /// Factories run in registration order; later ones see earlier output.
    pub fn headers_factory<F: HeadersFactory + 'static>(mut self, factory: F) -> Self {
        self.headers_factories.push(Arc::new(factory));
        self
    }

    /// Static header sent with every request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        set_default_header(&mut self.config, &name.into(), &value.into());
        self
    }

    pub fn follow_redirects(mut self, follow: bool) -> Self {
        self.config.follow_redirects = follow;
        self
    }

    pub fn logging_scope(mut self, scope: LoggingScope) -> Self {
        self.config.logging_scope = scope;
        self
    }

    pub fn logging_body_limit(mut self, limit: usize) -> Self {
        self.config.logging_body_limit = limit;
        self
    }

    pub fn query_param_style(mut self, style: QueryParamStyle) -> Self {
        self.config.query_param_style = style;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    pub fn property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.properties.insert(key.into(), value.into());
        self
    }

    pub fn max_header_size(mut self, size: usize) -> Self {
        self.config.max_header_size = Some(size);
        self
    }

    pub fn max_pool_size(mut self, size: usize) -> Self {
        self.config.max_pool_size = Some(size);
        self
    }

    pub fn keep_alive(mut self, enabled: bool) -> Self {
        self.config.keep_alive = enabled;
        self
    }

    /// How long an idle pooled connection is kept open.
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.config.pool_idle_timeout = timeout;
        self
    }

    /// Query parameter added to every call.
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.query.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(value),
            None => self.query.push((key, vec![value])),
        }
        self
    }

    /// Mappers run in registration order; the first error returned wins.
    /// With none registered, any 4xx/5xx becomes [`HttpClientError::Response`].
    pub fn exception_mapper<M: ResponseExceptionMapper + 'static>(mut self, mapper: M) -> Self {
        self.exception_mappers.push(Arc::new(mapper));
        self
    }

    /// Settings applied at build time, over anything set programmatically.
    pub fn settings(mut self, settings: RestClientSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn build(mut self) -> Result<RestClient> {
        if let Some(settings) = self.settings.take() {
            settings.apply(&mut self.config);
        }

        let base_uri = self
            .config
            .base_url
            .clone()
            .ok_or_else(|| HttpClientError::InvalidUrl("no base URI configured".to_string()))?;
        url::Url::parse(&base_uri).map_err(|e| HttpClientError::InvalidUrl(format!("{}: {}", base_uri, e)))?;

        debug!(
            base_uri = %base_uri,
            connect_timeout_ms = self.config.connect_timeout.as_millis() as u64,
            read_timeout_ms = self.config.read_timeout.map(|t| t.as_millis() as u64),
            max_pool_size = self.config.max_pool_size,
            query_param_style = %self.config.query_param_style,
            "Building REST client"
        );

        Ok(RestClient {
            http: HttpClient::new(self.config)?,
            base_uri,
            headers_factories: self.headers_factories,
            exception_mappers: self.exception_mappers,
            query: self.query,
        })
    }
}

/// A built REST client. Cheap to clone.
#[derive(Clone)]
pub struct RestClient {
    http: HttpClient,
    base_uri: String,
    headers_factories: Vec<Arc<dyn HeadersFactory>>,
    exception_mappers: Vec<Arc<dyn ResponseExceptionMapper>>,
    query: Vec<(String, Vec<String>)>,
}

impl RestClient {
    pub fn builder() -> RestClientBuilder {
        RestClientBuilder::new()
    }

    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    pub fn config(&self) -> &HttpClientConfig {
        self.http.config()
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.http.config().properties.get(key).map(String::as_str)
    }

    /// GET `path` under the base URI and return the response once it has
    /// passed the exception mappers.
    pub async fn get(&self, path: &str, incoming: &HeaderMap) -> Result<Response> {
        let mut outgoing = self.base_headers();
        outgoing.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        for factory in &self.headers_factories {
            let extra = factory.update(incoming, &outgoing).await?;
            outgoing.extend(extra);
        }

        let mut request = self.http.get(path).headers(outgoing);
        for (key, values) in &self.query {
            request = request.query_values(key.clone(), values.iter().cloned());
        }

        let response = request.send().await?;

        match map_response(&self.exception_mappers, &response) {
            Some(error) => Err(error),
            None => Ok(response),
        }
    }

    /// Headers every request starts from: the user agent and the configured
    /// defaults. Entries that are not valid header names or values are left
    /// to the request builder to reject.
    fn base_headers(&self) -> HeaderMap {
        let config = self.http.config();
        let mut headers = HeaderMap::new();

        if let Ok(agent) = HeaderValue::try_from(config.user_agent.as_str()) {
            headers.insert(header::USER_AGENT, agent);
        }
        for (name, value) in &config.default_headers {
            if let (Ok(name), Ok(value)) = (
                HeaderName::try_from(name.as_str()),
                HeaderValue::try_from(value.as_str()),
            ) {
                headers.insert(name, value);
            }
        }

        headers
    }

    /// GET `path` and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str, incoming: &HeaderMap) -> Result<T> {
        self.get(path, incoming).await?.json()
    }
}
