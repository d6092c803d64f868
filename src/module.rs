use crate::microprofile::MicroprofileModule;
use crate::quarkus::QuarkusModule;
use crate::shared::SharedModule;
use crate::simple::SimpleModule;
use activity_config::ConfigService;
use activity_core::{Application, Container, Controller, Error, Module};
use std::sync::Arc;

/// Root module: the backend plus the three client flavours.
#[derive(Debug, Default)]
pub struct ActivityModule;

impl Module for ActivityModule {
    fn imports(&self) -> Vec<Box<dyn Module>> {
        vec![
            Box::new(SharedModule),
            Box::new(SimpleModule),
            Box::new(QuarkusModule),
            Box::new(MicroprofileModule),
        ]
    }

    fn register_providers(&self, _container: &Container) -> Result<(), Error> {
        Ok(())
    }

    fn controllers(&self, _container: &Container) -> Result<Vec<Arc<dyn Controller>>, Error> {
        Ok(Vec::new())
    }
}

/// Bootstrap the whole application around `config`.
pub fn build_application(config: ConfigService) -> Result<Application, Error> {
    let container = Container::new();
    container.register(config);
    Application::from_module(container, &ActivityModule)
}
