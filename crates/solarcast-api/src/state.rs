//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both the CLI and the
//! HTTP API. Services are generic over model/store traits; AppState pins them
//! to the infra implementations. Both services share one forecast store.

use std::sync::Arc;

use solarcast_core::chat::gateway::ChatGateway;
use solarcast_core::chat::service::ChatService;
use solarcast_core::forecast::service::ForecastService;
use solarcast_core::forecast::store::InMemoryForecastStore;
use solarcast_infra::llm::build_gateway;
use solarcast_infra::model::DecompositionModel;
use solarcast_types::config::AppConfig;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteForecastService = ForecastService<DecompositionModel, InMemoryForecastStore>;

pub type ConcreteChatService = ChatService<InMemoryForecastStore>;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub forecast_service: Arc<ConcreteForecastService>,
    pub chat_service: Arc<ConcreteChatService>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Load the model artifact and wire services.
    ///
    /// Fails if the model cannot be loaded; a missing LLM configuration only
    /// leaves the chat gateway unconfigured.
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let model = DecompositionModel::load(&config.model.path).await?;
        let gateway = build_gateway(&config.llm);
        Ok(Self::from_parts(model, gateway, config))
    }

    /// Wire services from an already loaded model and gateway.
    pub fn from_parts(model: DecompositionModel, gateway: ChatGateway, config: AppConfig) -> Self {
        let store = InMemoryForecastStore::new();
        let forecast_service = ForecastService::new(model, store.clone(), &config.model);
        let chat_service = ChatService::new(store, gateway);

        Self {
            forecast_service: Arc::new(forecast_service),
            chat_service: Arc::new(chat_service),
            config: Arc::new(config),
        }
    }

    /// Horizon used when a caller does not pass `days`.
    pub fn default_days(&self) -> i64 {
        i64::from(self.config.model.default_horizon_days)
    }
}
