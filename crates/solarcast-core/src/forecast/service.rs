//! Forecast service: the model adapter plus the store write.
//!
//! `ForecastService` validates the requested horizon, builds the hourly future
//! frame beyond the model's training horizon, fills regressor defaults, runs
//! the model and records the result as the latest forecast.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info};

use solarcast_types::config::ModelConfig;
use solarcast_types::error::{ForecastError, ModelError};
use solarcast_types::forecast::{Forecast, ForecastPoint, POINTS_PER_DAY};

use super::model::{ForecastModel, FutureFrame, hours_after};
use super::store::ForecastStore;

/// Generates forecasts and keeps the most recent one.
///
/// Generic over `ForecastModel` and `ForecastStore` to maintain clean
/// architecture (solarcast-core never depends on solarcast-infra).
pub struct ForecastService<M: ForecastModel, S: ForecastStore> {
    model: M,
    store: S,
    regressor_defaults: BTreeMap<String, f64>,
    max_horizon_days: u32,
}

impl<M: ForecastModel, S: ForecastStore> ForecastService<M, S> {
    /// Create a forecast service from a model, a store and the model settings.
    pub fn new(model: M, store: S, settings: &ModelConfig) -> Self {
        Self {
            model,
            store,
            regressor_defaults: settings.regressor_defaults.clone(),
            max_horizon_days: settings.max_horizon_days,
        }
    }

    /// Check a horizon in days and return the number of hourly rows it covers.
    pub fn horizon_rows(&self, days: i64) -> Result<usize, ForecastError> {
        if days < 1 {
            return Err(ForecastError::HorizonTooShort(days));
        }
        if days > i64::from(self.max_horizon_days) {
            return Err(ForecastError::HorizonTooLong {
                days,
                max: self.max_horizon_days,
            });
        }
        Ok(days as usize * POINTS_PER_DAY as usize)
    }

    /// Run the model for `days` of hourly points without touching the store.
    pub fn predict(&self, days: i64) -> Result<Forecast, ForecastError> {
        let rows = self.horizon_rows(days)?;
        let start = hours_after(self.model.history_end(), 1)?;

        let mut frame = FutureFrame::hourly(start, rows)?;
        frame.fill_missing(&self.regressor_defaults);
        frame.require(&self.model.required_regressors())?;

        let values = self.model.predict(&frame)?;
        if values.len() != rows {
            return Err(ModelError::LengthMismatch {
                expected: rows,
                actual: values.len(),
            }
            .into());
        }
        if let Some(row) = values.iter().position(|v| !v.is_finite()) {
            return Err(ModelError::NonFinite(row).into());
        }

        let points = frame
            .timestamps()
            .iter()
            .zip(values)
            .map(|(&ds, yhat)| ForecastPoint { ds, yhat })
            .collect::<Vec<_>>();

        debug!(model = self.model.name(), rows, "model prediction complete");
        Ok(Forecast::new(points))
    }

    /// Generate a forecast and make it the latest one.
    pub async fn generate(&self, days: i64) -> Result<Arc<Forecast>, ForecastError> {
        let forecast = Arc::new(self.predict(days)?);
        self.store.set(Arc::clone(&forecast)).await;
        info!(days, points = forecast.len(), "forecast generated and stored");
        Ok(forecast)
    }

    /// The most recently generated forecast, if any.
    pub async fn latest(&self) -> Option<Arc<Forecast>> {
        self.store.get().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::store::InMemoryForecastStore;
    use chrono::{NaiveDate, NaiveDateTime, Timelike};

    /// Output follows the hour of day, plus the temperature column.
    struct HourOfDayModel {
        history_end: NaiveDateTime,
        required: Vec<&'static str>,
        poison_row: Option<usize>,
        short_by: usize,
    }

    impl HourOfDayModel {
        fn new() -> Self {
            Self {
                history_end: NaiveDate::from_ymd_opt(2024, 6, 30)
                    .unwrap()
                    .and_hms_opt(23, 0, 0)
                    .unwrap(),
                required: vec!["temperature", "humidity"],
                poison_row: None,
                short_by: 0,
            }
        }
    }

    impl ForecastModel for HourOfDayModel {
        fn name(&self) -> &str {
            "hour-of-day"
        }

        fn history_end(&self) -> NaiveDateTime {
            self.history_end
        }

        fn required_regressors(&self) -> Vec<&str> {
            self.required.clone()
        }

        fn predict(&self, frame: &FutureFrame) -> Result<Vec<f64>, ModelError> {
            let temperature = frame
                .regressor("temperature")
                .ok_or_else(|| ModelError::MissingRegressor("temperature".into()))?;
            let mut values: Vec<f64> = frame
                .timestamps()
                .iter()
                .zip(temperature)
                .map(|(ts, t)| ts.hour() as f64 + t)
                .collect();
            if let Some(row) = self.poison_row {
                values[row] = f64::NAN;
            }
            values.truncate(values.len() - self.short_by);
            Ok(values)
        }
    }

    fn service(model: HourOfDayModel) -> ForecastService<HourOfDayModel, InMemoryForecastStore> {
        ForecastService::new(model, InMemoryForecastStore::new(), &ModelConfig::default())
    }

    #[test]
    fn test_predict_has_24_points_per_day_strictly_increasing() {
        let svc = service(HourOfDayModel::new());
        for days in [1, 2, 7, 90] {
            let forecast = svc.predict(days).unwrap();
            assert_eq!(forecast.len(), 24 * days as usize);
            assert!(forecast.is_strictly_increasing());
        }
    }

    #[test]
    fn test_predict_starts_one_hour_after_history() {
        let svc = service(HourOfDayModel::new());
        let forecast = svc.predict(1).unwrap();
        let first = &forecast.points()[0];
        assert_eq!(
            first.ds,
            NaiveDate::from_ymd_opt(2024, 7, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
        // hour 0 + default temperature of -15
        assert_eq!(first.yhat, -15.0);
        assert_eq!(forecast.points()[23].yhat, 23.0 - 15.0);
    }

    #[test]
    fn test_rejects_non_positive_horizon() {
        let svc = service(HourOfDayModel::new());
        for days in [0, -1, -30] {
            let err = svc.predict(days).unwrap_err();
            assert!(matches!(err, ForecastError::HorizonTooShort(d) if d == days));
            assert!(err.is_validation());
        }
    }

    #[test]
    fn test_rejects_horizon_above_maximum() {
        let svc = service(HourOfDayModel::new());
        let err = svc.predict(91).unwrap_err();
        assert!(matches!(err, ForecastError::HorizonTooLong { days: 91, max: 90 }));
    }

    #[test]
    fn test_missing_regressor_without_default_is_model_error() {
        let mut model = HourOfDayModel::new();
        model.required.push("wind_speed");
        let err = service(model).predict(1).unwrap_err();
        assert!(matches!(
            err,
            ForecastError::Model(ModelError::MissingRegressor(ref name)) if name == "wind_speed"
        ));
        assert!(!err.is_validation());
    }

    #[test]
    fn test_non_finite_prediction_is_model_error() {
        let mut model = HourOfDayModel::new();
        model.poison_row = Some(5);
        let err = service(model).predict(1).unwrap_err();
        assert!(matches!(err, ForecastError::Model(ModelError::NonFinite(5))));
    }

    #[test]
    fn test_short_prediction_is_model_error() {
        let mut model = HourOfDayModel::new();
        model.short_by = 1;
        let err = service(model).predict(1).unwrap_err();
        assert!(matches!(
            err,
            ForecastError::Model(ModelError::LengthMismatch { expected: 24, actual: 23 })
        ));
    }

    #[test]
    fn test_history_end_at_max_datetime_is_model_error() {
        let mut model = HourOfDayModel::new();
        model.history_end = NaiveDateTime::MAX;
        let err = service(model).predict(1).unwrap_err();
        assert!(matches!(
            err,
            ForecastError::Model(ModelError::TimestampOverflow { hours: 1, .. })
        ));
        assert!(!err.is_validation());
    }

    #[test]
    fn test_horizon_running_past_max_datetime_is_model_error() {
        let mut model = HourOfDayModel::new();
        model.history_end = NaiveDateTime::MAX - chrono::Duration::hours(10);
        let err = service(model).predict(1).unwrap_err();
        assert!(matches!(
            err,
            ForecastError::Model(ModelError::TimestampOverflow { .. })
        ));
    }

    #[tokio::test]
    async fn test_generate_replaces_latest() {
        let svc = service(HourOfDayModel::new());
        assert!(svc.latest().await.is_none());

        svc.generate(3).await.unwrap();
        assert_eq!(svc.latest().await.unwrap().len(), 72);

        let second = svc.generate(1).await.unwrap();
        let latest = svc.latest().await.unwrap();
        assert_eq!(latest.len(), 24);
        assert_eq!(*latest, *second);
    }

    #[tokio::test]
    async fn test_failed_generate_keeps_previous_forecast() {
        let svc = service(HourOfDayModel::new());
        svc.generate(2).await.unwrap();
        assert!(svc.generate(0).await.is_err());
        assert_eq!(svc.latest().await.unwrap().len(), 48);
    }
}
