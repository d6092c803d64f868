use crate::settings::{rest_client_settings, rest_client_url};
use crate::shared::{
    Activity, ActivityService, RestActivityService, client_failure, remote_status_mapper,
};
use activity_config::ConfigService;
use activity_core::{Controller, Error, HttpRequest, Json, Router};
use activity_http_client::{
    HeaderMap, HttpClientError, LoggingScope, QueryParamStyle, RestClient, RestClientSettings,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::info;

pub const OTHER_HEADER: &str = "x-other-header";

/// `/microprofile`: one builder-made client exposed two ways, awaited on
/// the async workers or blocked on from a blocking thread.
pub struct ActivityMicroprofileResource {
    service: RestActivityService,
}

impl ActivityMicroprofileResource {
    pub const CONFIG_KEY: &'static str = "activities-microprofile";

    pub fn new(base_uri: &str, overrides: RestClientSettings) -> Result<Self, HttpClientError> {
        let client = RestClient::builder()
            .base_uri(base_uri)
            .connect_timeout(Duration::from_millis(1000))
            .follow_redirects(true)
            .logging_scope(LoggingScope::All)
            .logging_body_limit(50_000)
            .header(OTHER_HEADER, "any-value")
            .query_param_style(QueryParamStyle::MultiPairs)
            .read_timeout(Duration::from_millis(1000))
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

    /// Await the call on the current task.
    pub async fn get_activities(&self, incoming: &HeaderMap) -> Result<Vec<Activity>, Error> {
        info!("Get activities using microprofile builder non-blocking way");

        self.service
            .get_activities(incoming)
            .await
            .map_err(client_failure)
    }

    /// Run the call on a blocking worker and wait there until it completes.
    pub async fn get_activities_blocking(&self, incoming: HeaderMap) -> Result<Vec<Activity>, Error> {
        info!("Get activities using microprofile builder blocking way");

        let service = self.service.clone();
        let handle = Handle::current();

        tokio::task::spawn_blocking(move || {
            handle.block_on(async move { service.get_activities(&incoming).await })
        })
        .await
        .map_err(|e| Error::Internal(format!("blocking call failed: {}", e)))?
        .map_err(client_failure)
    }
}

impl Controller for ActivityMicroprofileResource {
    fn base_path(&self) -> &'static str {
        "/microprofile"
    }

    fn register_routes(self: Arc<Self>, router: &mut Router) {
        let this = self.clone();
        router.get("/microprofile/non-blocking", move |req: HttpRequest| {
            let this = this.clone();
            async move {
                let activities = this.get_activities(&req.header_map()).await?;
                Json(activities).into_response()
            }
        });

        router.get("/microprofile/blocking", move |req: HttpRequest| {
            let this = self.clone();
            async move {
                let activities = this.get_activities_blocking(req.header_map()).await?;
                Json(activities).into_response()
            }
        });
    }
}
