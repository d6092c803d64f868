//! Pieces shared by every client flavour: the data type, the backend
//! resource and the error handling rules.

mod activity;
mod error;
mod resource;
mod service;

pub use activity::Activity;
pub use error::ApplicationError;
pub use resource::ActivityResource;
pub use service::{
    ACTIVITIES_PATH, ActivityService, RestActivityService, client_failure, remote_status_mapper,
};

use activity_core::{Container, Controller, Error, Module};
use std::sync::Arc;

/// Mounts the backend resource.
#[derive(Debug, Default)]
pub struct SharedModule;

impl Module for SharedModule {
    fn register_providers(&self, _container: &Container) -> Result<(), Error> {
        Ok(())
    }

    fn controllers(&self, _container: &Container) -> Result<Vec<Arc<dyn Controller>>, Error> {
        Ok(vec![Arc::new(ActivityResource)])
    }
}
