use crate::settings::rest_client_settings;
use crate::shared::{Activity, ActivityService, RestActivityService, remote_status_mapper};
use crate::simple::ActivitySimpleHeadersFactory;
use activity_config::ConfigService;
use activity_core::Error;
use activity_http_client::{HeaderMap, HttpClientError, RestClient};
use async_trait::async_trait;

/// Client configured entirely from the `rest-client.activities-simple` section.
///
/// Every call sends `other-param=other`, the random simple header and maps
/// any non-200 answer to an `ApplicationError`.
#[derive(Clone)]
pub struct ActivitySimpleService {
    inner: RestActivityService,
}

impl ActivitySimpleService {
    pub const CONFIG_KEY: &'static str = "activities-simple";

    pub fn from_config(config: &ConfigService) -> Result<Self, Error> {
        let settings = rest_client_settings(config, Self::CONFIG_KEY)?;
        if settings.url.is_none() {
            return Err(Error::DependencyInjection(format!(
                "rest-client.{}.url is not configured",
                Self::CONFIG_KEY
            )));
        }

        let client = RestClient::builder()
            .query_param("other-param", "other")
            .headers_factory(ActivitySimpleHeadersFactory)
            .exception_mapper(remote_status_mapper())
            .settings(settings)
            .build()
            .map_err(|e| Error::DependencyInjection(e.to_string()))?;

        Ok(Self {
            inner: RestActivityService::new(client),
        })
    }

    pub fn client(&self) -> &RestClient {
        self.inner.client()
    }
}

#[async_trait]
impl ActivityService for ActivitySimpleService {
    async fn get_activities(&self, incoming: &HeaderMap) -> Result<Vec<Activity>, HttpClientError> {
        self.inner.get_activities(incoming).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_url() {
        let err = ActivitySimpleService::from_config(&ConfigService::new())
            .err()
            .unwrap();
        assert!(err.to_string().contains("rest-client.activities-simple.url"));
    }

    #[test]
    fn test_built_from_section() {
        let config = ConfigService::new();
        config
            .set("rest-client.activities-simple.url", "http://localhost:1/api")
            .unwrap();
        config
            .set("rest-client.activities-simple.connect-timeout", 250)
            .unwrap();

        let service = ActivitySimpleService::from_config(&config).unwrap();
        assert_eq!(service.client().base_uri(), "http://localhost:1/api");
        assert_eq!(
            service.client().config().connect_timeout,
            std::time::Duration::from_millis(250)
        );
    }
}
