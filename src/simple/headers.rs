use activity_http_client::{HeaderMap, HeaderValue, HeadersFactory, Result};
use async_trait::async_trait;
use rand::Rng;

pub const SIMPLE_HEADER: &str = "x-activity-simple";

/// Tags each outgoing request with a random number in `0..1000`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ActivitySimpleHeadersFactory;

#[async_trait]
impl HeadersFactory for ActivitySimpleHeadersFactory {
    async fn update(&self, _incoming: &HeaderMap, _outgoing: &HeaderMap) -> Result<HeaderMap> {
        let value: u32 = rand::rng().random_range(0..1000);

        let mut headers = HeaderMap::new();
        headers.insert(SIMPLE_HEADER, HeaderValue::from(value));
        Ok(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_value_in_range() {
        for _ in 0..50 {
            let headers = ActivitySimpleHeadersFactory
                .update(&HeaderMap::new(), &HeaderMap::new())
                .await
                .unwrap();

            let value: u32 = headers[SIMPLE_HEADER].to_str().unwrap().parse().unwrap();
            assert!(value < 1000);
        }
    }
}
