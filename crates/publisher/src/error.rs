use std::path::PathBuf;

use thiserror::Error;

/// Error taxonomy for the publisher service
#[derive(Debug, Error)]
pub enum PublisherError {
    /// Malformed registration payload; surfaced to the caller as 400
    #[error("invalid registration payload: {0}")]
    Decode(String),

    /// Backing file unreadable or unwritable; fatal at startup, a reported
    /// error on the registration and push paths
    #[error("failed to persist subscribers to {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Per-URL send failure or non-2xx response; recovered locally by
    /// removing the subscriber, never surfaced to the push caller
    #[error("delivery to '{url}' failed: {reason}")]
    Delivery { url: String, reason: String },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, PublisherError>;
