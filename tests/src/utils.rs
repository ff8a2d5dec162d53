use std::{sync::Once, time::Duration};

use eyre::{bail, Result};
use hc_common::{config::PublisherConfig, types::Subscriber};
use hc_publisher::service::start_publisher;
use tempfile::TempDir;
use tokio::time::sleep;

use crate::mock_subscriber::HOOK_PATH;

static INIT: Once = Once::new();

pub fn setup_test_env() {
    INIT.call_once(|| {
        tracing_subscriber::fmt().with_env_filter("info").init();
    });
}

/// Publisher config pointing at a scratch directory, with a short
/// notification timeout so failing deliveries do not stall the tests.
pub fn get_publisher_config(dir: &TempDir, port: u16) -> PublisherConfig {
    PublisherConfig {
        port,
        subscribers_file: dir.path().join("subscribers"),
        notify_timeout_secs: 2,
        accept_invalid_certs: false,
    }
}

/// Spawn a publisher and wait until its health endpoint answers.
pub async fn start_test_publisher(config: PublisherConfig) -> Result<()> {
    let port = config.port;
    tokio::spawn(start_publisher(config));
    wait_for_ready(port).await
}

async fn wait_for_ready(port: u16) -> Result<()> {
    let url = publisher_url(port, "/health");
    for _ in 0..50 {
        if let Ok(res) = reqwest::get(&url).await {
            if res.status().is_success() {
                return Ok(());
            }
        }
        sleep(Duration::from_millis(20)).await;
    }
    bail!("publisher on port {port} did not become ready")
}

pub fn publisher_url(port: u16, path: &str) -> String {
    format!("http://127.0.0.1:{port}{path}")
}

/// Webhook URL a mock subscriber on `port` is reachable at.
pub fn subscriber_hook_url(port: u16) -> String {
    format!("http://127.0.0.1:{port}{HOOK_PATH}")
}

pub async fn register_subscriber(port: u16, webhook_url: &str) -> Result<reqwest::Response> {
    let res = reqwest::Client::new()
        .post(publisher_url(port, "/subscribers"))
        .json(&Subscriber::new(webhook_url))
        .send()
        .await?;
    Ok(res)
}

pub async fn trigger_push(port: u16) -> Result<reqwest::Response> {
    let res = reqwest::Client::new().post(publisher_url(port, "/push")).send().await?;
    Ok(res)
}
