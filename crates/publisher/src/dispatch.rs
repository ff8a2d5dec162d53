use std::time::Duration;

use eyre::WrapErr;
use reqwest::{Client, ClientBuilder};
use serde_json::json;
use tracing::{info, warn};

use hc_common::config::PublisherConfig;

use crate::{
    error::{PublisherError, Result},
    registry::SubscriberRegistry,
};

/// Outbound push delivery over a shared HTTP client.
pub struct SubscriberNotifier {
    client: Client,
}

impl SubscriberNotifier {
    pub fn new(config: &PublisherConfig) -> eyre::Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.notify_timeout_secs))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .wrap_err("Failed to create notification client")?;
        Ok(Self { client })
    }

    /// Deliver one push notification. Success is any 2xx status; transport
    /// errors and non-2xx responses both count as failed delivery.
    pub async fn notify(&self, url: &str) -> Result<()> {
        let response = self
            .client
            .post(url)
            .json(&json!({}))
            .send()
            .await
            .map_err(|err| PublisherError::Delivery {
                url: url.to_string(),
                reason: err.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PublisherError::Delivery {
                url: url.to_string(),
                reason: format!("responded with status {status}"),
            });
        }
        Ok(())
    }
}

/// Run one push cycle: notify every subscriber in sorted order, then drop
/// the ones that failed and rewrite the backing file.
///
/// The registry lock is held across the whole cycle, outbound calls
/// included, so registrations and concurrent pushes wait for it to finish.
/// Removals are applied only after the full iteration; a subscriber that
/// fails is still counted among the attempted targets. Returns the sorted
/// list of URLs that were attempted.
pub async fn push_all(
    registry: &SubscriberRegistry,
    notifier: &SubscriberNotifier,
) -> Result<Vec<String>> {
    let mut guard = registry.lock().await;
    let targets = guard.snapshot();

    let mut failed = Vec::new();
    for url in &targets {
        match notifier.notify(url).await {
            Ok(()) => info!(url = %url, "push delivered"),
            Err(err) => {
                warn!(url = %url, %err, "push failed, dropping subscriber");
                failed.push(url.clone());
            }
        }
    }

    if !failed.is_empty() {
        for url in &failed {
            guard.remove(url);
        }
        guard.persist()?;
        info!(removed = failed.len(), remaining = guard.len(), "pruned failed subscribers");
    }

    Ok(targets)
}
