use activity_http_client::BoxError;
use thiserror::Error;

/// The one application-level error raised when talking to the backend.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApplicationError {
    message: String,
    status: Option<u16>,
    #[source]
    cause: Option<BoxError>,
}

impl ApplicationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            cause: None,
        }
    }

    pub fn with_cause<E>(message: impl Into<String>, cause: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            message: message.into(),
            status: None,
            cause: Some(Box::new(cause)),
        }
    }

    /// The backend answered with something other than 200.
    pub fn remote_status(status: u16) -> Self {
        Self {
            message: format!("The remote service responded with HTTP {}", status),
            status: Some(status),
            cause: None,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Status of the backend response, when this error came from one.
    pub fn status(&self) -> Option<u16> {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_remote_status_message() {
        let err = ApplicationError::remote_status(503);
        assert_eq!(err.to_string(), "The remote service responded with HTTP 503");
        assert_eq!(err.status(), Some(503));
        assert!(err.source().is_none());
    }

    #[test]
    fn test_with_cause() {
        let io = std::io::Error::other("socket closed");
        let err = ApplicationError::with_cause("backend unavailable", io);
        assert_eq!(err.message(), "backend unavailable");
        assert_eq!(err.status(), None);
        assert_eq!(err.source().map(|s| s.to_string()).as_deref(), Some("socket closed"));
    }
}
