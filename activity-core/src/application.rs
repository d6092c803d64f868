// Application bootstrapper and HTTP server

use crate::{Container, Error, HttpRequest, HttpResponse, Module, Router};
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode, body::Incoming as IncomingBody};
use hyper_util::rt::TokioIo;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

/// The main application struct
pub struct Application {
    container: Container,
    router: Arc<Router>,
}

impl Application {
    /// Create an application with a container and router
    pub fn new(container: Container, router: Router) -> Self {
        Self {
            container,
            router: Arc::new(router),
        }
    }

    /// Bootstrap an application from a root module.
    ///
    /// Imports are registered depth-first before the importing module, so a
    /// module's controllers can resolve providers of the modules it imports.
    pub fn from_module(container: Container, module: &dyn Module) -> Result<Self, Error> {
        info!("Bootstrapping application");

        let mut router = Router::new();
        Self::register_module(&container, &mut router, module)?;

        info!(
            routes = router.routes.len(),
            providers = container.len(),
            "Application bootstrap complete"
        );

        Ok(Self::new(container, router))
    }

    fn register_module(
        container: &Container,
        router: &mut Router,
        module: &dyn Module,
    ) -> Result<(), Error> {
        for imported in module.imports() {
            Self::register_module(container, router, imported.as_ref())?;
        }

        module.register_providers(container)?;

        for controller in module.controllers(container)? {
            let base_path = controller.base_path();
            controller.register_routes(router);
            info!(base_path, "Registered controller");
        }

        Ok(())
    }

    /// Get a reference to the DI container
    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Dispatch a request in-process, converting errors into JSON responses
    pub async fn handle(&self, request: HttpRequest) -> HttpResponse {
        dispatch(&self.router, request).await
    }

    /// Bind `host:port` and serve until the process ends
    pub async fn listen(self, host: &str, port: u16) -> Result<(), Error> {
        let listener = TcpListener::bind((host, port)).await?;
        self.serve(listener).await
    }

    /// Serve connections from an already bound listener
    pub async fn serve(self, listener: TcpListener) -> Result<(), Error> {
        self.serve_with_shutdown(listener, std::future::pending::<()>())
            .await
    }

    /// Serve connections until `shutdown` resolves.
    ///
    /// Stops accepting on shutdown; connections already accepted finish on
    /// their own tasks.
    pub async fn serve_with_shutdown<F>(self, listener: TcpListener, shutdown: F) -> Result<(), Error>
    where
        F: Future<Output = ()> + Send,
    {
        let addr = listener.local_addr()?;
        info!(%addr, "Server listening");

        let router = self.router.clone();
        tokio::pin!(shutdown);

        loop {
            let (stream, peer) = tokio::select! {
                accepted = listener.accept() => match accepted {
                    Ok(conn) => conn,
                    Err(e) => {
                        warn!(error = %e, "Failed to accept connection");
                        continue;
                    }
                },
                () = &mut shutdown => {
                    info!(%addr, "Shutdown signal received, no longer accepting connections");
                    return Ok(());
                }
            };

            let io = TokioIo::new(stream);
            let router = router.clone();

            tokio::spawn(async move {
                let service = service_fn(move |req: Request<IncomingBody>| {
                    let router = router.clone();
                    async move { handle_request(req, router, peer).await }
                });

                if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                    debug!(%peer, error = ?err, "Error serving connection");
                }
            });
        }
    }
}

async fn dispatch(router: &Router, request: HttpRequest) -> HttpResponse {
    match router.route(request).await {
        Ok(response) => response,
        Err(err) => {
            if err.is_server_error() {
                error!(error = %err, "Request failed");
            }
            err.into_response()
        }
    }
}

/// Handle an incoming HTTP request
async fn handle_request(
    req: Request<IncomingBody>,
    router: Arc<Router>,
    peer: SocketAddr,
) -> Result<Response<Full<Bytes>>, hyper::Error> {
    let started = Instant::now();
    let method = req.method().to_string();
    let target = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let mut request = HttpRequest::new(method.clone(), target.clone());

    for (name, value) in req.headers() {
        if let Ok(value_str) = value.to_str() {
            request
                .headers
                .insert(name.as_str().to_string(), value_str.to_string());
        }
    }

    request.body = req.collect().await?.to_bytes().to_vec();

    let response = dispatch(&router, request).await;
    let status = response.status;

    debug!(
        %peer,
        method = %method,
        target = %target,
        status,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Request handled"
    );

    Ok(into_hyper(response))
}

fn into_hyper(response: HttpResponse) -> Response<Full<Bytes>> {
    let mut builder = Response::builder().status(response.status);
    for (key, value) in response.headers {
        builder = builder.header(key, value);
    }

    builder
        .body(Full::new(Bytes::from(response.body)))
        .unwrap_or_else(|e| {
            error!(error = %e, "Invalid response, replacing with 500");
            let mut fallback = Response::new(Full::new(Bytes::new()));
            *fallback.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            fallback
        })
}
