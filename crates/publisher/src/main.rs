use eyre::Result;
use tracing::{error, info};

use hc_common::config::PublisherConfig;
use hc_publisher::service::start_publisher;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting hookcast publisher");

    let config = PublisherConfig::default();
    config.validate()?;

    info!(
        port = config.port,
        subscribers_file = %config.subscribers_file.display(),
        notify_timeout_secs = config.notify_timeout_secs,
        "Loaded publisher configuration"
    );

    // Set up graceful shutdown
    let shutdown = tokio::signal::ctrl_c();
    let server = start_publisher(config);

    tokio::select! {
        _ = shutdown => {
            info!("Received shutdown signal, stopping gracefully...");
        }
        result = server => {
            if let Err(e) = result {
                error!("Publisher error: {}", e);
                return Err(e);
            }
        }
    }

    info!("Publisher shutdown complete");
    Ok(())
}
