//! Single-slot forecast store.
//!
//! The store holds at most one forecast: the most recently generated one.
//! There is no history, expiry or per-client scoping; a `set` replaces
//! whatever was there and concurrent writers race with the last one winning.

use std::sync::Arc;

use tokio::sync::RwLock;

use solarcast_types::forecast::Forecast;

/// Storage port for the latest forecast.
///
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait ForecastStore: Send + Sync {
    /// Replace the stored forecast.
    fn set(&self, forecast: Arc<Forecast>) -> impl std::future::Future<Output = ()> + Send;

    /// The stored forecast, if any.
    fn get(&self) -> impl std::future::Future<Output = Option<Arc<Forecast>>> + Send;
}

/// Process-memory store. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct InMemoryForecastStore {
    slot: Arc<RwLock<Option<Arc<Forecast>>>>,
}

impl InMemoryForecastStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ForecastStore for InMemoryForecastStore {
    async fn set(&self, forecast: Arc<Forecast>) {
        *self.slot.write().await = Some(forecast);
    }

    async fn get(&self) -> Option<Arc<Forecast>> {
        self.slot.read().await.clone()
    }
}
