//! End-to-end tests for the hyper runtime

use activity_core::prelude::*;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

struct GreetingController {
    greeting: String,
}

impl Controller for GreetingController {
    fn base_path(&self) -> &'static str {
        "/greet"
    }

    fn register_routes(self: Arc<Self>, router: &mut Router) {
        router.get("/greet/:name", move |req: HttpRequest| {
            let this = self.clone();
            async move {
                let name = req.param("name").cloned().unwrap_or_default();
                HttpResponse::ok().with_json(&serde_json::json!({
                    "message": format!("{}, {}", this.greeting, name),
                    "agent": req.header("user-agent"),
                }))
            }
        });
    }
}

#[derive(Default)]
struct GreetingModule;

impl Module for GreetingModule {
    fn register_providers(&self, container: &Container) -> Result<(), Error> {
        container.register(String::from("Hello"));
        Ok(())
    }

    fn controllers(&self, container: &Container) -> Result<Vec<Arc<dyn Controller>>, Error> {
        let greeting = container.resolve::<String>()?;
        Ok(vec![Arc::new(GreetingController {
            greeting: greeting.as_ref().clone(),
        })])
    }
}

async fn spawn_app() -> (String, oneshot::Sender<()>) {
    let app = Application::from_module(Container::new(), &GreetingModule).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        let _ = app
            .serve_with_shutdown(listener, async {
                let _ = rx.await;
            })
            .await;
    });

    (format!("http://{}", addr), tx)
}

#[tokio::test]
async fn test_serves_routes_over_http() {
    let (base, _shutdown) = spawn_app().await;

    let response = reqwest::Client::new()
        .get(format!("{}/greet/ada", base))
        .header("user-agent", "server-test")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()["content-type"],
        "application/json"
    );
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Hello, ada");
    assert_eq!(body["agent"], "server-test");
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let (base, _shutdown) = spawn_app().await;

    let response = reqwest::get(format!("{}/nope", base)).await.unwrap();
    assert_eq!(response.status(), 404);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], 404);
}

#[tokio::test]
async fn test_in_process_handle() {
    let app = Application::from_module(Container::new(), &GreetingModule).unwrap();

    let response = app.handle(HttpRequest::new("GET", "/greet/bob")).await;
    assert_eq!(response.status, 200);

    let response = app.handle(HttpRequest::new("DELETE", "/greet/bob")).await;
    assert_eq!(response.status, 405);
}

#[tokio::test]
async fn test_shutdown_stops_accepting() {
    let app = Application::from_module(Container::new(), &GreetingModule).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let (tx, rx) = oneshot::channel::<()>();

    let server = tokio::spawn(app.serve_with_shutdown(listener, async {
        let _ = rx.await;
    }));

    tx.send(()).unwrap();
    let result = tokio::time::timeout(std::time::Duration::from_secs(5), server)
        .await
        .unwrap()
        .unwrap();
    assert!(result.is_ok());
}
