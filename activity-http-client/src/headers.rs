//! Per-request header factories.

use crate::Result;
use async_trait::async_trait;
use http::{HeaderMap, HeaderName, HeaderValue};

/// Produces extra headers for each outgoing request.
///
/// `incoming` holds the headers of the server request being handled when
/// the call is made (empty outside a request), `outgoing` the headers the
/// client is about to send. The returned headers are added on top.
#[async_trait]
pub trait HeadersFactory: Send + Sync {
    async fn update(&self, incoming: &HeaderMap, outgoing: &HeaderMap) -> Result<HeaderMap>;
}

/// Adds nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHeadersFactory;

#[async_trait]
impl HeadersFactory for NoopHeadersFactory {
    async fn update(&self, _incoming: &HeaderMap, _outgoing: &HeaderMap) -> Result<HeaderMap> {
        Ok(HeaderMap::new())
    }
}

/// Adds the same headers to every request.
#[derive(Debug, Default, Clone)]
pub struct StaticHeadersFactory {
    headers: HeaderMap,
}

impl StaticHeadersFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header. Invalid names or values are skipped with a warning.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        match (HeaderName::try_from(name), HeaderValue::try_from(value)) {
            (Ok(name), Ok(value)) => {
                self.headers.append(name, value);
            }
            _ => tracing::warn!(header = name, "Ignoring invalid static header"),
        }
        self
    }
}

#[async_trait]
impl HeadersFactory for StaticHeadersFactory {
    async fn update(&self, _incoming: &HeaderMap, _outgoing: &HeaderMap) -> Result<HeaderMap> {
        Ok(self.headers.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_noop_factory() {
        let headers = NoopHeadersFactory
            .update(&HeaderMap::new(), &HeaderMap::new())
            .await
            .unwrap();
        assert!(headers.is_empty());
    }

    #[tokio::test]
    async fn test_static_factory() {
        let factory = StaticHeadersFactory::new()
            .header("x-one", "1")
            .header("bad header", "skipped")
            .header("x-one", "2");

        let headers = factory
            .update(&HeaderMap::new(), &HeaderMap::new())
            .await
            .unwrap();
        assert_eq!(headers.len(), 2);
        let values: Vec<_> = headers.get_all("x-one").iter().collect();
        assert_eq!(values, ["1", "2"]);
    }
}
