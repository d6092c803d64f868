// Core traits for wiring providers, controllers and modules

use crate::{Container, Error, Router};
use std::sync::Arc;

/// Anything that can live in the DI container
pub trait Provider: Send + Sync + 'static {}

impl<T: Send + Sync + 'static> Provider for T {}

/// An HTTP controller: a group of routes under one base path
pub trait Controller: Send + Sync + 'static {
    /// Returns the base path for this controller
    fn base_path(&self) -> &'static str;

    /// Register this controller's routes. The router keeps the controller
    /// alive through the handler closures.
    fn register_routes(self: Arc<Self>, router: &mut Router);
}

/// A unit of application wiring
pub trait Module: Send + Sync + 'static {
    /// Modules registered before this one
    fn imports(&self) -> Vec<Box<dyn Module>> {
        Vec::new()
    }

    /// Register providers into the container
    fn register_providers(&self, container: &Container) -> Result<(), Error>;

    /// Build controllers, resolving their dependencies from the container
    fn controllers(&self, container: &Container) -> Result<Vec<Arc<dyn Controller>>, Error>;
}

/// HTTP methods
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    GET,
    POST,
    PUT,
    DELETE,
    PATCH,
    HEAD,
    OPTIONS,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::DELETE => "DELETE",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::HEAD => "HEAD",
            HttpMethod::OPTIONS => "OPTIONS",
        }
    }
}
