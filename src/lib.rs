// activity-rest - REST client configuration demos
//
// A small backend serving two activities, and three ways of calling it: a
// client keyed purely by configuration, a builder whose settings
// configuration can override, and a builder used both async and blocking.

pub mod microprofile;
pub mod module;
pub mod quarkus;
pub mod settings;
pub mod shared;
pub mod simple;

pub use module::{ActivityModule, build_application};
pub use settings::{ServerSettings, load_config};
pub use shared::{Activity, ApplicationError};

pub use activity_config;
pub use activity_core;
pub use activity_http_client;
pub use activity_log;

// Prelude for common imports
pub mod prelude {
    pub use crate::microprofile::ActivityMicroprofileResource;
    pub use crate::quarkus::{ActivityHeadersFactory, ActivityQuarkusResource};
    pub use crate::shared::{
        Activity, ActivityResource, ActivityService, ApplicationError, RestActivityService,
    };
    pub use crate::simple::{
        ActivitySimpleHeadersFactory, ActivitySimpleResource, ActivitySimpleService,
    };
    pub use crate::{ActivityModule, ServerSettings, build_application, load_config};
    pub use activity_config::ConfigService;
    pub use activity_core::{Application, Container};
}
