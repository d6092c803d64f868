use activity_log::LogConfig;
use activity_rest::{ServerSettings, build_application, load_config};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _guard = LogConfig::from_env().try_init()?;

    let config = load_config()?;
    let server = ServerSettings::from_config(&config)?;
    let app = build_application(config)?;

    let listener = TcpListener::bind((server.host.as_str(), server.port)).await?;
    info!(host = %server.host, port = server.port, "Starting activity server");

    app.serve_with_shutdown(listener, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
        info!("Ctrl-C received, shutting down");
    })
    .await?;

    Ok(())
}
