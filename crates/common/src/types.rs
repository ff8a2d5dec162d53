use serde::{Deserialize, Serialize};

/// Subscriber information: a single webhook URL.
///
/// Wire shape of the registration payload: `{"WebhookURL": "<url>"}`.
/// Identity is the URL value itself; the registry deduplicates on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscriber {
    #[serde(rename = "WebhookURL")]
    pub webhook_url: String,
}

impl Subscriber {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self { webhook_url: webhook_url.into() }
    }
}
