//! Shared helpers for the application tests.

#![allow(dead_code)]

use activity_rest::activity_config::ConfigService;
use activity_rest::build_application;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

pub const CLIENT_KEYS: [&str; 3] = [
    "activities-simple",
    "activities-quarkus",
    "activities-microprofile",
];

/// Configuration pointing every client at `backend` (a base URI ending in `/api`).
pub fn config_for(backend: &str) -> ConfigService {
    let config = ConfigService::new();
    for key in CLIENT_KEYS {
        config
            .set(&format!("rest-client.{key}.url"), backend)
            .unwrap();
    }
    config
}

pub struct TestApp {
    pub base: String,
    _shutdown: oneshot::Sender<()>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

/// Serve the application on an ephemeral port. `configure` receives the
/// app's own `/api` base URI and returns the configuration to use.
pub async fn spawn_app<F>(configure: F) -> TestApp
where
    F: FnOnce(&str) -> ConfigService,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let config = configure(&format!("{base}/api"));
    let app = build_application(config).unwrap();

    let (tx, rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        let _ = app
            .serve_with_shutdown(listener, async {
                let _ = rx.await;
            })
            .await;
    });

    TestApp {
        base,
        _shutdown: tx,
    }
}
