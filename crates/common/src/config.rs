use std::path::PathBuf;

use serde::Deserialize;

/// Runtime settings for the publisher service.
///
/// There is no external configuration surface: the binary runs on
/// [`PublisherConfig::default`], which matches the wire contract (port 8080,
/// a `subscribers` file in the working directory). Tests and embedders
/// construct custom values, typically pointing `subscribers_file` at a
/// temporary directory.
#[derive(Debug, Clone, Deserialize)]
pub struct PublisherConfig {
    /// Port the HTTP surface listens on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Path of the flat file mirroring the subscriber set
    #[serde(default = "default_subscribers_file")]
    pub subscribers_file: PathBuf,

    /// Per-notification timeout in seconds
    #[serde(default = "default_notify_timeout_secs")]
    pub notify_timeout_secs: u64,

    /// Skip TLS certificate verification, scoped to the notifier's client
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

fn default_port() -> u16 {
    8080
}

fn default_subscribers_file() -> PathBuf {
    PathBuf::from("subscribers")
}

fn default_notify_timeout_secs() -> u64 {
    10
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            subscribers_file: default_subscribers_file(),
            notify_timeout_secs: default_notify_timeout_secs(),
            accept_invalid_certs: false,
        }
    }
}

impl PublisherConfig {
    /// Validate the configuration
    pub fn validate(&self) -> eyre::Result<()> {
        if self.port == 0 {
            return Err(eyre::eyre!("Listen port must be non-zero"));
        }

        if self.subscribers_file.as_os_str().is_empty() {
            return Err(eyre::eyre!("Subscribers file path must not be empty"));
        }

        if self.notify_timeout_secs < 1 || self.notify_timeout_secs > 300 {
            return Err(eyre::eyre!(
                "Notification timeout must be between 1 second and 5 minutes"
            ));
        }

        Ok(())
    }
}
