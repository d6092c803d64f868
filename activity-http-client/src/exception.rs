//! Response to error mapping.

use crate::{HttpClientError, Response};
use std::sync::Arc;

/// Turns a received response into an error, or lets it through.
///
/// Implemented for any `Fn(&Response) -> Option<HttpClientError>`.
pub trait ResponseExceptionMapper: Send + Sync {
    fn map(&self, response: &Response) -> Option<HttpClientError>;
}

impl<F> ResponseExceptionMapper for F
where
    F: Fn(&Response) -> Option<HttpClientError> + Send + Sync,
{
    fn map(&self, response: &Response) -> Option<HttpClientError> {
        self(response)
    }
}

/// Maps any 4xx/5xx status to [`HttpClientError::Response`].
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultExceptionMapper;

impl ResponseExceptionMapper for DefaultExceptionMapper {
    fn map(&self, response: &Response) -> Option<HttpClientError> {
        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            Some(HttpClientError::Response {
                status: status.as_u16(),
                message: response
                    .text()
                    .unwrap_or_else(|_| "Unknown error".to_string()),
            })
        } else {
            None
        }
    }
}

/// Run mappers in order; the first that yields an error wins.
pub(crate) fn map_response(
    mappers: &[Arc<dyn ResponseExceptionMapper>],
    response: &Response,
) -> Option<HttpClientError> {
    if mappers.is_empty() {
        return DefaultExceptionMapper.map(response);
    }

    mappers.iter().find_map(|mapper| mapper.map(response))
}
