//! Builder-made client with blocking and non-blocking endpoints.

mod resource;

pub use resource::{ActivityMicroprofileResource, OTHER_HEADER};

use activity_config::ConfigService;
use activity_core::{Container, Controller, Error, Module};
use std::sync::Arc;

/// Mounts `/microprofile/*`. Needs a [`ConfigService`] in the container.
#[derive(Debug, Default)]
pub struct MicroprofileModule;

impl Module for MicroprofileModule {
    fn register_providers(&self, _container: &Container) -> Result<(), Error> {
        Ok(())
    }

    fn controllers(&self, container: &Container) -> Result<Vec<Arc<dyn Controller>>, Error> {
        let config = container.resolve::<ConfigService>()?;
        Ok(vec![Arc::new(ActivityMicroprofileResource::from_config(
            &config,
        )?)])
    }
}
