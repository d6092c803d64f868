//! Programmatically built client whose settings configuration can override.

mod headers;
mod resource;

pub use headers::{ActivityHeadersFactory, CLIENT_HEADER};
pub use resource::ActivityQuarkusResource;

use activity_config::ConfigService;
use activity_core::{Container, Controller, Error, Module};
use std::sync::Arc;

/// Mounts `/quarkus`. Needs a [`ConfigService`] in the container.
#[derive(Debug, Default)]
pub struct QuarkusModule;

impl Module for QuarkusModule {
    fn register_providers(&self, _container: &Container) -> Result<(), Error> {
        Ok(())
    }

    fn controllers(&self, container: &Container) -> Result<Vec<Arc<dyn Controller>>, Error> {
        let config = container.resolve::<ConfigService>()?;
        Ok(vec![Arc::new(ActivityQuarkusResource::from_config(&config)?)])
    }
}
