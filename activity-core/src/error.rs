// Error types for the activity server

use crate::HttpResponse;
use ::http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Route not found: {0}")]
    RouteNotFound(String),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Dependency injection error: {0}")]
    DependencyInjection(String),

    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Bad Gateway: {0}")]
    BadGateway(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Gateway Timeout: {0}")]
    GatewayTimeout(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        self.status().as_u16()
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Error::RouteNotFound(_) => StatusCode::NOT_FOUND,
            Error::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Error::BadRequest(_) | Error::Deserialization(_) => StatusCode::BAD_REQUEST,
            Error::BadGateway(_) => StatusCode::BAD_GATEWAY,
            Error::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::GatewayTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Check if this is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        self.status().is_client_error()
    }

    /// Check if this is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        self.status().is_server_error()
    }

    /// Render the error as a JSON body: `{"error": "...", "status": n}`.
    pub fn into_response(self) -> HttpResponse {
        let status = self.status_code();
        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status,
        });
        HttpResponse::new(status)
            .with_json(&body)
            .unwrap_or_else(|_| HttpResponse::internal_server_error())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(Error::RouteNotFound("GET /x".into()).status_code(), 404);
        assert_eq!(Error::MethodNotAllowed("POST /x".into()).status_code(), 405);
        assert_eq!(Error::Deserialization("bad".into()).status_code(), 400);
        assert_eq!(Error::BadGateway("down".into()).status_code(), 502);
        assert_eq!(Error::GatewayTimeout("slow".into()).status_code(), 504);
        assert_eq!(Error::ProviderNotFound("Foo".into()).status_code(), 500);
    }

    #[test]
    fn test_categories() {
        assert!(Error::RouteNotFound("x".into()).is_client_error());
        assert!(Error::Internal("x".into()).is_server_error());
        assert!(!Error::Internal("x".into()).is_client_error());
    }

    #[test]
    fn test_into_response_body() {
        let response = Error::BadGateway("backend refused".into()).into_response();
        assert_eq!(response.status, 502);

        let body: serde_json::Value = response.body_json().unwrap();
        assert_eq!(body["status"], 502);
        assert_eq!(body["error"], "Bad Gateway: backend refused");
    }
}
