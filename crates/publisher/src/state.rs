use std::sync::Arc;

use crate::{dispatch::SubscriberNotifier, registry::SubscriberRegistry};

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<SubscriberRegistry>,
    pub notifier: Arc<SubscriberNotifier>,
}

impl AppState {
    pub fn new(registry: SubscriberRegistry, notifier: SubscriberNotifier) -> Self {
        Self { registry: Arc::new(registry), notifier: Arc::new(notifier) }
    }
}
