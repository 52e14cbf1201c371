use lineup_core::config::Config;
use lineup_core::queue::BatchQueue;
use lineup_core::store::{SharedStore, Store};
use parking_lot::RwLock;
use std::sync::Arc;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub queue: Arc<BatchQueue>,
    pub default_page_size: usize,
}

impl AppState {
    /// Seed the catalog and start the batch-flush timers.
    pub fn new(config: &Config) -> Self {
        let store: SharedStore = Arc::new(RwLock::new(Store::seeded(config.seed_count)));
        tracing::info!(elements = store.read().len(), "catalog seeded");

        let queue = Arc::new(BatchQueue::new(store.clone(), config.queue_config()));

        Self {
            store,
            queue,
            default_page_size: config.default_page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_seeds_catalog() {
        let config = Config {
            seed_count: 25,
            ..Config::default()
        };
        let state = AppState::new(&config);
        assert_eq!(state.store.read().len(), 25);
        assert_eq!(state.default_page_size, 20);
    }
}
