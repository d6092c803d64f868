use crate::quarkus::ActivityHeadersFactory;
use crate::settings::{rest_client_settings, rest_client_url};
use crate::shared::{ActivityService, RestActivityService, client_failure, remote_status_mapper};
use activity_config::ConfigService;
use activity_core::{Controller, Error, HttpRequest, HttpResponse, Json, Router};
use activity_http_client::{HttpClientError, QueryParamStyle, RestClient, RestClientSettings};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// `/quarkus`: a client built in code, with every setting open to override
/// from `rest-client.activities-quarkus`.
pub struct ActivityQuarkusResource {
    service: RestActivityService,
}

impl ActivityQuarkusResource {
    pub const CONFIG_KEY: &'static str = "activities-quarkus";

    pub fn new(base_uri: &str, overrides: RestClientSettings) -> Result<Self, HttpClientError> {
        let client = RestClient::builder()
            .base_uri(base_uri)
            .headers_factory(ActivityHeadersFactory)
            .connect_timeout(Duration::from_millis(100))
            .read_timeout(Duration::from_millis(100))
            .max_header_size(1024)
            .max_pool_size(10)
            .keep_alive(true)
            .idle_timeout(Duration::from_secs(10))
            .user_agent("Quarkus-Rest-Client")
            .property("some.config.key", "value")
            .query_param_style(QueryParamStyle::MultiPairs)
            .exception_mapper(remote_status_mapper())
            .settings(overrides)
            .build()?;

        Ok(Self {
            service: RestActivityService::new(client),
        })
    }

    pub fn from_config(config: &ConfigService) -> Result<Self, Error> {
        let url = rest_client_url(config, Self::CONFIG_KEY)?;
        let overrides = rest_client_settings(config, Self::CONFIG_KEY)?;

        Self::new(&url, overrides).map_err(|e| Error::DependencyInjection(e.to_string()))
    }

    pub fn client(&self) -> &RestClient {
        self.service.client()
    }

    async fn get_activities(&self, req: HttpRequest) -> Result<HttpResponse, Error> {
        info!("Get activities using quarkus builder non-blocking way");

        let activities = self
            .service
            .get_activities(&req.header_map())
            .await
            .map_err(client_failure)?;

        Json(activities).into_response()
    }
}

impl Controller for ActivityQuarkusResource {
    fn base_path(&self) -> &'static str {
        "/quarkus"
    }

    fn register_routes(self: Arc<Self>, router: &mut Router) {
        router.get("/quarkus", move |req| {
            let this = self.clone();
            async move { this.get_activities(req).await }
        });
    }
}
