//! Evaluation of a fitted decomposition model.
//!
//! `yhat = trend * (1 + multiplicative) + additive * y_scale`, where
//! seasonal and regressor components are summed into the additive or the
//! multiplicative term according to their mode.

use std::f64::consts::PI;
use std::path::Path;

use chrono::NaiveDateTime;
use tracing::info;

use solarcast_core::forecast::model::{ForecastModel, FutureFrame};
use solarcast_types::error::ModelError;

use super::artifact::{ComponentMode, ModelArtifact};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Forecasting model backed by a [`ModelArtifact`].
#[derive(Debug, Clone)]
pub struct DecompositionModel {
    artifact: ModelArtifact,
}

impl DecompositionModel {
    /// Wrap an artifact after validating it.
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, ModelError> {
        artifact.validate()?;
        Ok(Self { artifact })
    }

    /// Read, parse and validate an artifact file.
    pub async fn load(path: &Path) -> Result<Self, ModelError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ModelError::Load(format!("{}: {e}", path.display())))?;
        let artifact = ModelArtifact::from_json(&raw)?;
        info!(
            path = %path.display(),
            model = %artifact.name,
            history_end = %artifact.history_end,
            regressors = artifact.regressors.len(),
            "loaded model artifact"
        );
        Ok(Self { artifact })
    }

    /// Trend value in model units (before `y_scale`).
    fn trend(&self, ds: NaiveDateTime) -> f64 {
        let trend = &self.artifact.trend;
        let t = (ds - trend.t_start).num_seconds() as f64 / trend.t_scale_secs;

        let mut k = trend.k;
        let mut m = trend.m;
        for cp in trend.changepoints.iter().take_while(|cp| cp.t <= t) {
            k += cp.delta;
            m -= cp.t * cp.delta;
        }
        k * t + m
    }

    /// Seasonal contributions at `ds`, split into (additive, multiplicative).
    fn seasonal(&self, ds: NaiveDateTime) -> (f64, f64) {
        let days = ds.and_utc().timestamp() as f64 / SECONDS_PER_DAY;
        let mut additive = 0.0;
        let mut multiplicative = 0.0;

        for season in &self.artifact.seasonalities {
            let mut value = 0.0;
            for (i, pair) in season.coefficients.chunks_exact(2).enumerate() {
                let angle = 2.0 * PI * (i + 1) as f64 * days / season.period_days;
                value += pair[0] * angle.sin() + pair[1] * angle.cos();
            }
            match season.mode {
                ComponentMode::Additive => additive += value,
                ComponentMode::Multiplicative => multiplicative += value,
            }
        }

        (additive, multiplicative)
    }
}

impl ForecastModel for DecompositionModel {
    fn name(&self) -> &str {
        &self.artifact.name
    }

    fn history_end(&self) -> NaiveDateTime {
        self.artifact.history_end
    }

    fn required_regressors(&self) -> Vec<&str> {
        self.artifact
            .regressors
            .iter()
            .map(|r| r.name.as_str())
            .collect()
    }

    fn predict(&self, frame: &FutureFrame) -> Result<Vec<f64>, ModelError> {
        frame.require(&self.required_regressors())?;

        let columns = self
            .artifact
            .regressors
            .iter()
            .map(|r| {
                frame
                    .regressor(&r.name)
                    .map(|values| (r, values))
                    .ok_or_else(|| ModelError::MissingRegressor(r.name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let y_scale = self.artifact.trend.y_scale;
        let predictions = frame
            .timestamps()
            .iter()
            .enumerate()
            .map(|(row, &ds)| {
                let (mut additive, mut multiplicative) = self.seasonal(ds);
                for (params, values) in &columns {
                    let effect = (values[row] - params.mu) / params.std * params.coefficient;
                    match params.mode {
                        ComponentMode::Additive => additive += effect,
                        ComponentMode::Multiplicative => multiplicative += effect,
                    }
                }

                let trend = self.trend(ds) * y_scale;
                let yhat = trend * (1.0 + multiplicative) + additive * y_scale;
                match self.artifact.floor {
                    Some(floor) => yhat.max(floor),
                    None => yhat,
                }
            })
            .collect();

        Ok(predictions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::artifact::{Changepoint, RegressorParams, SeasonalityParams, TrendParams};
    use chrono::{Duration, NaiveDate};
    use std::collections::BTreeMap;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 7, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn flat_artifact() -> ModelArtifact {
        ModelArtifact {
            name: "flat".into(),
            history_end: at(1, 0) - Duration::hours(1),
            trend: TrendParams {
                k: 0.0,
                m: 1.0,
                t_start: at(1, 0),
                t_scale_secs: SECONDS_PER_DAY,
                y_scale: 10.0,
                changepoints: Vec::new(),
            },
            seasonalities: Vec::new(),
            regressors: Vec::new(),
            floor: None,
        }
    }

    fn frame(periods: usize) -> FutureFrame {
        FutureFrame::hourly(at(1, 0), periods).unwrap()
    }

    #[test]
    fn test_flat_trend() {
        let model = DecompositionModel::from_artifact(flat_artifact()).unwrap();
        let values = model.predict(&frame(3)).unwrap();
        assert_eq!(values, vec![10.0, 10.0, 10.0]);
    }

    #[test]
    fn test_linear_trend_with_changepoint() {
        let mut artifact = flat_artifact();
        artifact.trend.k = 1.0;
        artifact.trend.m = 0.0;
        artifact.trend.y_scale = 1.0;
        artifact.trend.changepoints = vec![Changepoint { t: 1.0, delta: 1.0 }];
        let model = DecompositionModel::from_artifact(artifact).unwrap();

        // before the changepoint: slope 1
        assert!((model.trend(at(1, 12)) - 0.5).abs() < 1e-12);
        // after it: slope 2, continuous at t = 1
        assert!((model.trend(at(2, 0)) - 1.0).abs() < 1e-12);
        assert!((model.trend(at(3, 0)) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_daily_seasonality_cosine_term() {
        let mut artifact = flat_artifact();
        artifact.seasonalities.push(SeasonalityParams {
            name: "daily".into(),
            period_days: 1.0,
            fourier_order: 1,
            mode: ComponentMode::Additive,
            coefficients: vec![0.0, 0.5],
        });
        let model = DecompositionModel::from_artifact(artifact).unwrap();
        let values = model.predict(&frame(13)).unwrap();

        // midnight UTC: cos(2π·n) = 1 -> 10 + 0.5·10
        assert!((values[0] - 15.0).abs() < 1e-9);
        // noon: cos(π) = -1 -> 10 - 5
        assert!((values[12] - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_multiplicative_seasonality_scales_trend() {
        let mut artifact = flat_artifact();
        artifact.seasonalities.push(SeasonalityParams {
            name: "daily".into(),
            period_days: 1.0,
            fourier_order: 1,
            mode: ComponentMode::Multiplicative,
            coefficients: vec![0.0, 0.2],
        });
        let model = DecompositionModel::from_artifact(artifact).unwrap();
        let values = model.predict(&frame(1)).unwrap();
        assert!((values[0] - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_regressor_effect_is_standardized() {
        let mut artifact = flat_artifact();
        artifact.regressors.push(RegressorParams {
            name: "irradiance_ground".into(),
            coefficient: 0.1,
            mu: 100.0,
            std: 50.0,
            mode: ComponentMode::Additive,
        });
        let model = DecompositionModel::from_artifact(artifact).unwrap();

        let mut input = frame(2);
        input.set_regressor("irradiance_ground", vec![100.0, 200.0]).unwrap();
        let values = model.predict(&input).unwrap();
        assert!((values[0] - 10.0).abs() < 1e-9);
        // (200 - 100) / 50 * 0.1 * 10
        assert!((values[1] - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_regressor_rejected() {
        let mut artifact = flat_artifact();
        artifact.regressors.push(RegressorParams {
            name: "humidity".into(),
            coefficient: 1.0,
            mu: 0.0,
            std: 1.0,
            mode: ComponentMode::Additive,
        });
        let model = DecompositionModel::from_artifact(artifact).unwrap();
        assert_eq!(model.required_regressors(), vec!["humidity"]);

        let err = model.predict(&frame(2)).unwrap_err();
        assert!(matches!(err, ModelError::MissingRegressor(name) if name == "humidity"));

        let mut filled = frame(2);
        filled.fill_missing(&BTreeMap::from([("humidity".to_string(), 0.001)]));
        assert!(model.predict(&filled).is_ok());
    }

    #[test]
    fn test_floor_clips_predictions() {
        let mut artifact = flat_artifact();
        artifact.trend.m = -1.0;
        artifact.floor = Some(0.0);
        let model = DecompositionModel::from_artifact(artifact).unwrap();
        assert_eq!(model.predict(&frame(2)).unwrap(), vec![0.0, 0.0]);
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("model.json");
        tokio::fs::write(&path, serde_json::to_string(&flat_artifact()).unwrap())
            .await
            .unwrap();

        let model = DecompositionModel::load(&path).await.unwrap();
        assert_eq!(model.name(), "flat");
        assert_eq!(model.history_end(), at(1, 0) - Duration::hours(1));
    }

    #[tokio::test]
    async fn test_load_missing_file_is_load_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let err = DecompositionModel::load(&tmp.path().join("absent.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, ModelError::Load(msg) if msg.contains("absent.json")));
    }
}
