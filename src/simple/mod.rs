//! Config-keyed client resolved through the DI container.

mod headers;
mod resource;
mod service;

pub use headers::{ActivitySimpleHeadersFactory, SIMPLE_HEADER};
pub use resource::ActivitySimpleResource;
pub use service::ActivitySimpleService;

use activity_config::ConfigService;
use activity_core::{Container, Controller, Error, Module};
use std::sync::Arc;

/// Registers [`ActivitySimpleService`] and mounts `/simple`.
///
/// Needs a [`ConfigService`] in the container.
#[derive(Debug, Default)]
pub struct SimpleModule;

impl Module for SimpleModule {
    fn register_providers(&self, container: &Container) -> Result<(), Error> {
        container.register_factory(|c| {
            let config = c.resolve::<ConfigService>()?;
            ActivitySimpleService::from_config(&config)
        })
    }

    fn controllers(&self, container: &Container) -> Result<Vec<Arc<dyn Controller>>, Error> {
        Ok(vec![Arc::new(ActivitySimpleResource::from_container(
            container,
        )?)])
    }
}
