//! Forecast endpoint.
//!
//! POST /forecast?days=N - generate an hourly forecast for the next N days
//! (default from config), store it as the latest forecast and return it.

use std::time::Instant;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use solarcast_types::forecast::Forecast;

use crate::http::error::AppError;
use crate::state::AppState;

/// Query parameters for the forecast endpoint.
#[derive(Debug, Deserialize, Default)]
pub struct ForecastQuery {
    /// Horizon in days. Signed so that negative values reach validation.
    pub days: Option<i64>,
}

/// POST /forecast - Generate and store a forecast.
pub async fn create_forecast(
    State(state): State<AppState>,
    query: Result<Query<ForecastQuery>, QueryRejection>,
) -> Result<Json<Forecast>, AppError> {
    let start = Instant::now();
    let Query(query) = query?;
    let days = query.days.unwrap_or_else(|| state.default_days());

    let forecast = state.forecast_service.generate(days).await?;

    tracing::info!(
        days,
        points = forecast.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "forecast served"
    );
    Ok(Json(Forecast::clone(&forecast)))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::Value;

    use crate::http::router::build_router;
    use crate::state::test_support::failing_state;

    fn server() -> TestServer {
        TestServer::new(build_router(failing_state())).unwrap()
    }

    #[tokio::test]
    async fn test_one_day_returns_24_hourly_records() {
        let server = server();
        let response = server.post("/forecast").add_query_param("days", 1).await;
        response.assert_status_ok();

        let body: Vec<Value> = response.json();
        assert_eq!(body.len(), 24);
        assert_eq!(body[0]["ds"], "2024-07-01 00:00:00");
        assert_eq!(body[23]["ds"], "2024-07-01 23:00:00");
        assert!(body.iter().all(|row| row["yhat"].is_f64()));
    }

    #[tokio::test]
    async fn test_default_horizon_is_seven_days() {
        let server = server();
        let response = server.post("/forecast").await;
        response.assert_status_ok();

        let body: Vec<Value> = response.json();
        assert_eq!(body.len(), 7 * 24);

        let stamps: Vec<&str> = body.iter().map(|r| r["ds"].as_str().unwrap()).collect();
        // Fixed-width timestamps sort lexically in time order.
        assert!(stamps.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test]
    async fn test_second_call_replaces_latest_forecast() {
        let state = failing_state();
        let server = TestServer::new(build_router(state.clone())).unwrap();

        server.post("/forecast").add_query_param("days", 3).await.assert_status_ok();
        assert_eq!(state.forecast_service.latest().await.unwrap().len(), 72);

        server.post("/forecast").add_query_param("days", 1).await.assert_status_ok();
        assert_eq!(state.forecast_service.latest().await.unwrap().len(), 24);
    }

    #[tokio::test]
    async fn test_invalid_days_are_bad_request() {
        let server = server();
        for days in ["0", "-1", "91", "abc", "1.5"] {
            let response = server.post("/forecast").add_query_param("days", days).await;
            response.assert_status(StatusCode::BAD_REQUEST);

            let body: Value = response.json();
            assert!(body["data"].is_null(), "days={days}");
            assert_eq!(body["errors"][0]["code"], "VALIDATION_ERROR", "days={days}");
            assert!(!body["meta"]["request_id"].as_str().unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_rejected_request_leaves_store_untouched() {
        let state = failing_state();
        let server = TestServer::new(build_router(state.clone())).unwrap();

        server.post("/forecast").add_query_param("days", 0).await;
        assert!(state.forecast_service.latest().await.is_none());
    }

    #[tokio::test]
    async fn test_model_failure_is_internal_error() {
        use solarcast_types::config::AppConfig;

        // No default for the model's regressor -> MissingRegressor
        let mut config = AppConfig::default();
        config.model.regressor_defaults.clear();
        let state = crate::state::AppState::from_parts(
            crate::state::test_support::model(),
            solarcast_core::chat::gateway::ChatGateway::unconfigured("test"),
            config,
        );
        let server = TestServer::new(build_router(state)).unwrap();

        let response = server.post("/forecast").add_query_param("days", 1).await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["errors"][0]["code"], "MODEL_ERROR");
    }
}
