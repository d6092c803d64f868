use crate::shared::{ActivityService, client_failure};
use crate::simple::ActivitySimpleService;
use activity_core::{Container, Controller, Error, HttpRequest, HttpResponse, Json, Router};
use std::sync::Arc;
use tracing::info;

/// `/simple`: forwards to the container-provided [`ActivitySimpleService`].
pub struct ActivitySimpleResource {
    service: Arc<ActivitySimpleService>,
}

impl ActivitySimpleResource {
    pub fn new(service: Arc<ActivitySimpleService>) -> Self {
        Self { service }
    }

    pub fn from_container(container: &Container) -> Result<Self, Error> {
        Ok(Self::new(container.resolve::<ActivitySimpleService>()?))
    }

    async fn get_activities(&self, req: HttpRequest) -> Result<HttpResponse, Error> {
        info!("Get activities using simple API");

        let activities = self
            .service
            .get_activities(&req.header_map())
            .await
            .map_err(client_failure)?;

        Json(activities).into_response()
    }
}

impl Controller for ActivitySimpleResource {
    fn base_path(&self) -> &'static str {
        "/simple"
    }

    fn register_routes(self: Arc<Self>, router: &mut Router) {
        router.get("/simple", move |req| {
            let this = self.clone();
            async move { this.get_activities(req).await }
        });
    }
}
