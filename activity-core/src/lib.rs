// Core library for the activity demo server
// Request/response types, routing, the DI container and the hyper-based runtime

pub mod application;
pub mod container;
pub mod error;
pub mod http;
pub mod routing;
pub mod traits;

pub use application::*;
pub use container::*;
pub use error::*;
pub use http::*;
pub use routing::{HandlerFn, Route, Router};
pub use traits::*;

pub mod prelude {
    pub use crate::{
        Application, Container, Controller, Error, HttpMethod, HttpRequest, HttpResponse, Json,
        Module, Provider, Router,
    };
}
