//! Chat endpoint.
//!
//! POST /chat - answer a question about the latest forecast.
//!
//! Gateway failures never surface as errors: the handler answers with the
//! deterministic fallback text and a 200.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::http::error::AppError;
use crate::state::AppState;

/// Request body for the chat endpoint.
#[derive(Debug, Deserialize, Serialize)]
pub struct ChatRequest {
    pub question: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ChatResponse {
    pub answer: String,
}

/// POST /chat - Ask the assistant about the latest forecast.
pub async fn chat(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(body) = body?;
    if body.question.trim().is_empty() {
        return Err(AppError::Validation("question must not be empty".to_string()));
    }

    let prepared = state.chat_service.prepare(&body.question).await;
    let answer = match state.chat_service.ask(&prepared).await {
        Ok(answer) => answer,
        Err(e) => {
            tracing::warn!(error = %e, "chat gateway failed, serving fallback answer");
            prepared.fallback_answer()
        }
    };

    Ok(Json(ChatResponse { answer }))
}
