use activity_http_client::{HeaderMap, HeaderValue, HeadersFactory, Result};
use async_trait::async_trait;

pub const CLIENT_HEADER: &str = "x-activity-client";

/// Identifies the calling client flavour on every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct ActivityHeadersFactory;

#[async_trait]
impl HeadersFactory for ActivityHeadersFactory {
    async fn update(&self, _incoming: &HeaderMap, _outgoing: &HeaderMap) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CLIENT_HEADER, HeaderValue::from_static("quarkus"));
        Ok(headers)
    }
}
