//! Chat service: reads the latest forecast, builds the prompt, asks the gateway.
//!
//! The service keeps no conversation state. Each question is answered against
//! whatever forecast the store holds at that moment.

use solarcast_types::llm::GatewayError;

use crate::chat::fallback::fallback_answer;
use crate::chat::gateway::ChatGateway;
use crate::chat::prompt;
use crate::forecast::store::ForecastStore;
use crate::forecast::summary::summary_or_placeholder;

/// A question paired with the forecast context it will be answered against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedChat {
    /// Rendered forecast summary or the "no forecast" placeholder.
    pub context: String,
    pub question: String,
    pub prompt: String,
}

impl PreparedChat {
    /// The deterministic answer to give when the gateway fails.
    pub fn fallback_answer(&self) -> String {
        fallback_answer(&self.context, &self.question)
    }
}

/// Answers questions about the latest forecast.
pub struct ChatService<S: ForecastStore> {
    store: S,
    gateway: ChatGateway,
}

impl<S: ForecastStore> ChatService<S> {
    pub fn new(store: S, gateway: ChatGateway) -> Self {
        Self { store, gateway }
    }

    pub fn gateway(&self) -> &ChatGateway {
        &self.gateway
    }

    /// Snapshot the latest forecast and build the prompt for `question`.
    pub async fn prepare(&self, question: &str) -> PreparedChat {
        let forecast = self.store.get().await;
        let context = summary_or_placeholder(forecast.as_deref());
        let prompt = prompt::build(&context, question);
        PreparedChat {
            context,
            question: question.to_string(),
            prompt,
        }
    }

    /// Send a prepared prompt through the gateway.
    pub async fn ask(&self, prepared: &PreparedChat) -> Result<String, GatewayError> {
        self.gateway.ask(&prepared.prompt).await
    }
}
