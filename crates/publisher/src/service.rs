use tokio::net::TcpListener;
use tracing::info;

use hc_common::config::PublisherConfig;

use crate::{
    dispatch::SubscriberNotifier, registry::SubscriberRegistry, routes::create_router,
    state::AppState, store::SubscriberStore,
};

/// Start the publisher service.
///
/// Loads the subscriber file (creating it if absent), builds the shared
/// state and serves until the listener shuts down. Errors reading the
/// subscriber file at startup are fatal.
pub async fn start_publisher(config: PublisherConfig) -> eyre::Result<()> {
    let store = SubscriberStore::new(&config.subscribers_file);
    let registry = SubscriberRegistry::load(store)?;
    let notifier = SubscriberNotifier::new(&config)?;

    let app = create_router(AppState::new(registry, notifier));

    let addr = format!("0.0.0.0:{}", config.port);
    info!("Publisher listening on {}", addr);

    axum::serve(TcpListener::bind(&addr).await?, app).await?;

    Ok(())
}
