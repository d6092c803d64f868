use crate::shared::{Activity, ApplicationError};
use activity_core::Error;
use activity_http_client::{HeaderMap, HttpClientError, Response, ResponseExceptionMapper, RestClient};
use async_trait::async_trait;

/// Path of the backend collection, relative to a client's base URI.
pub const ACTIVITIES_PATH: &str = "/activities";

/// A typed view of the remote activity endpoint.
#[async_trait]
pub trait ActivityService: Send + Sync {
    /// `incoming` are the headers of the server request being handled, made
    /// available to headers factories.
    async fn get_activities(&self, incoming: &HeaderMap) -> Result<Vec<Activity>, HttpClientError>;
}

/// [`ActivityService`] over a configured [`RestClient`].
#[derive(Clone)]
pub struct RestActivityService {
    client: RestClient,
}

impl RestActivityService {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &RestClient {
        &self.client
    }
}

#[async_trait]
impl ActivityService for RestActivityService {
    async fn get_activities(&self, incoming: &HeaderMap) -> Result<Vec<Activity>, HttpClientError> {
        self.client.get_json(ACTIVITIES_PATH, incoming).await
    }
}

/// Any status other than 200, 2xx included, becomes an [`ApplicationError`].
pub fn remote_status_mapper() -> impl ResponseExceptionMapper + 'static {
    |response: &Response| {
        let status = response.status().as_u16();
        (status != 200).then(|| HttpClientError::application(ApplicationError::remote_status(status)))
    }
}

/// Server error for a failed backend call.
pub fn client_failure(err: HttpClientError) -> Error {
    if err.is_timeout() {
        Error::GatewayTimeout(err.to_string())
    } else if err.is_connection() {
        Error::BadGateway(err.to_string())
    } else {
        Error::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use activity_http_client::{StatusCode, Url};
    use std::time::Duration;

    fn response(status: u16) -> Response {
        Response::new(
            StatusCode::from_u16(status).unwrap(),
            HeaderMap::new(),
            Vec::<u8>::new(),
            Url::parse("http://localhost/api/activities").unwrap(),
        )
    }

    #[test]
    fn test_mapper_passes_200() {
        assert!(remote_status_mapper().map(&response(200)).is_none());
    }

    #[test]
    fn test_mapper_rejects_other_statuses() {
        for status in [201, 204, 302, 404, 503] {
            let err = remote_status_mapper().map(&response(status)).unwrap();
            let app = err.downcast_ref::<ApplicationError>().unwrap();
            assert_eq!(app.status(), Some(status));
            assert_eq!(
                err.to_string(),
                format!("The remote service responded with HTTP {}", status)
            );
        }
    }

    #[test]
    fn test_client_failure_statuses() {
        let timeout = client_failure(HttpClientError::Timeout(Duration::from_millis(100)));
        assert_eq!(timeout.status_code(), 504);

        let refused = client_failure(HttpClientError::Connection("refused".into()));
        assert_eq!(refused.status_code(), 502);

        let mapped = client_failure(HttpClientError::application(
            ApplicationError::remote_status(503),
        ));
        assert_eq!(mapped.status_code(), 500);
        assert!(mapped.to_string().contains("The remote service responded with HTTP 503"));
    }
}
