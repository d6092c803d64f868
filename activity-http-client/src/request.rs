//! Request builder.

use crate::{HttpClient, HttpClientError, Response, Result};
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use std::time::Duration;

/// HTTP request builder.
pub struct RequestBuilder<'a> {
    client: &'a HttpClient,
    method: Method,
    url: String,
    headers: HeaderMap,
    query: Vec<(String, Vec<String>)>,
    timeout: Option<Duration>,
}

impl<'a> RequestBuilder<'a> {
    /// Create a new request builder.
    pub(crate) fn new(client: &'a HttpClient, method: Method, url: String) -> Self {
        Self {
            client,
            method,
            url,
            headers: HeaderMap::new(),
            query: Vec::new(),
            timeout: None,
        }
    }

    /// Add a header to the request, replacing any previous value.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        if let (Ok(name), Ok(value)) = (
            HeaderName::try_from(name.as_str()),
            HeaderValue::try_from(value.as_str()),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Add multiple headers to the request.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Add a value to a query parameter. Repeated calls with the same key
    /// collect values, encoded with the client's query param style.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.query.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(value),
            None => self.query.push((key, vec![value])),
        }
        self
    }

    /// Add a query parameter with several values.
    pub fn query_values<I, V>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let key = key.into();
        for value in values {
            self = self.query(key.clone(), value);
        }
        self
    }

    /// Set a custom timeout for this request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the URL with query parameters.
    pub(crate) fn build_url(&self) -> Result<url::Url> {
        let mut url = match &self.client.config().base_url {
            Some(base) => join_url(base, &self.url)?,
            None => url::Url::parse(&self.url).map_err(|e| HttpClientError::InvalidUrl(e.to_string()))?,
        };

        let pairs = self.client.config().query_param_style.encode(&self.query);
        if !pairs.is_empty() {
            let encoded = serde_urlencoded::to_string(&pairs)
                .map_err(|e| HttpClientError::RequestBuild(e.to_string()))?;
            let query = match url.query() {
                Some(existing) if !existing.is_empty() => format!("{}&{}", existing, encoded),
                _ => encoded,
            };
            url.set_query(Some(&query));
        }

        Ok(url)
    }

    /// Send the request.
    pub async fn send(self) -> Result<Response> {
        let url = self.build_url()?;

        let mut request = self.client.inner().request(self.method.clone(), url);

        for (name, value) in &self.client.config().default_headers {
            request = request.header(name.as_str(), value.as_str());
        }

        // Request-specific headers last so they win over defaults
        request = request.headers(self.headers);

        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let request = request
            .build()
            .map_err(|e| HttpClientError::RequestBuild(e.to_string()))?;
        self.client.execute(request).await
    }
}

/// Append `path` to `base`, keeping the base's own path.
///
/// `Url::join` drops the last base segment unless it ends with '/', which
/// would turn `http://h/api` + `activities` into `http://h/activities`.
fn join_url(base: &str, path: &str) -> Result<url::Url> {
    if path.starts_with("http://") || path.starts_with("https://") {
        return url::Url::parse(path).map_err(|e| HttpClientError::InvalidUrl(e.to_string()));
    }

    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    let joined = if path.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base, path)
    };

    url::Url::parse(&joined).map_err(|e| HttpClientError::InvalidUrl(e.to_string()))
}
