use crate::shared::Activity;
use activity_core::{Controller, Json, Router};
use std::sync::Arc;
use tracing::info;

/// The backend: serves a fixed list of activities under `/api`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ActivityResource;

impl ActivityResource {
    pub fn activities() -> Vec<Activity> {
        vec![Activity::new("Running", 10), Activity::new("Swimming", 20)]
    }
}

impl Controller for ActivityResource {
    fn base_path(&self) -> &'static str {
        "/api"
    }

    fn register_routes(self: Arc<Self>, router: &mut Router) {
        router.get("/api/activities", |_req| async {
            info!("Serving activities");
            Json(ActivityResource::activities()).into_response()
        });
    }
}
