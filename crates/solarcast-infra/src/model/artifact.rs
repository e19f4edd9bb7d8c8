//! Serialized model parameters and their load-time validation.

use std::collections::HashSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use solarcast_types::error::ModelError;
use solarcast_types::forecast::ds_format;

/// Fitted parameters of a decomposition model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub name: String,

    /// Last timestamp of the training data.
    #[serde(with = "ds_format")]
    pub history_end: NaiveDateTime,

    pub trend: TrendParams,

    #[serde(default)]
    pub seasonalities: Vec<SeasonalityParams>,

    /// Every regressor listed here must be present in each prediction frame.
    #[serde(default)]
    pub regressors: Vec<RegressorParams>,

    /// Lower bound applied to every prediction (e.g. 0 for generated power).
    #[serde(default)]
    pub floor: Option<f64>,
}

/// Piecewise-linear growth on normalized time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendParams {
    /// Base growth rate.
    pub k: f64,
    /// Base offset.
    pub m: f64,
    /// Timestamp mapped to normalized time 0.
    #[serde(with = "ds_format")]
    pub t_start: NaiveDateTime,
    /// Seconds per unit of normalized time.
    pub t_scale_secs: f64,
    /// Multiplier from model units back to output units.
    pub y_scale: f64,
    /// Rate changes, ascending by normalized time.
    #[serde(default)]
    pub changepoints: Vec<Changepoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Changepoint {
    /// Normalized time at which the rate changes.
    pub t: f64,
    /// Rate adjustment applied from `t` onwards.
    pub delta: f64,
}

/// How a component combines with the trend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentMode {
    #[default]
    Additive,
    Multiplicative,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalityParams {
    pub name: String,
    pub period_days: f64,
    pub fourier_order: usize,
    #[serde(default)]
    pub mode: ComponentMode,
    /// `[sin_1, cos_1, sin_2, cos_2, ...]`, length `2 * fourier_order`.
    pub coefficients: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressorParams {
    pub name: String,
    pub coefficient: f64,
    /// Standardization mean.
    #[serde(default)]
    pub mu: f64,
    /// Standardization scale.
    #[serde(default = "default_std")]
    pub std: f64,
    #[serde(default)]
    pub mode: ComponentMode,
}

fn default_std() -> f64 {
    1.0
}

impl ModelArtifact {
    /// Parse and validate an artifact from JSON text.
    pub fn from_json(raw: &str) -> Result<Self, ModelError> {
        let artifact: ModelArtifact =
            serde_json::from_str(raw).map_err(|e| ModelError::Load(e.to_string()))?;
        artifact.validate()?;
        Ok(artifact)
    }

    /// Reject parameter sets that cannot produce finite predictions.
    pub fn validate(&self) -> Result<(), ModelError> {
        let invalid = |msg: String| Err(ModelError::InvalidArtifact(msg));

        let trend = &self.trend;
        if !(trend.t_scale_secs.is_finite() && trend.t_scale_secs > 0.0) {
            return invalid(format!("trend.t_scale_secs must be positive, got {}", trend.t_scale_secs));
        }
        if !trend.y_scale.is_finite() || !trend.k.is_finite() || !trend.m.is_finite() {
            return invalid("trend parameters must be finite".to_string());
        }
        if trend.changepoints.windows(2).any(|w| w[0].t > w[1].t) {
            return invalid("trend.changepoints must be sorted by t".to_string());
        }

        for season in &self.seasonalities {
            if !(season.period_days.is_finite() && season.period_days > 0.0) {
                return invalid(format!(
                    "seasonality '{}' has non-positive period {}",
                    season.name, season.period_days
                ));
            }
            if season.coefficients.len() != 2 * season.fourier_order {
                return invalid(format!(
                    "seasonality '{}' needs {} coefficients, has {}",
                    season.name,
                    2 * season.fourier_order,
                    season.coefficients.len()
                ));
            }
        }

        let mut seen = HashSet::new();
        for regressor in &self.regressors {
            if !seen.insert(regressor.name.as_str()) {
                return invalid(format!("regressor '{}' is listed twice", regressor.name));
            }
            if !(regressor.std.is_finite() && regressor.std > 0.0) {
                return invalid(format!(
                    "regressor '{}' has non-positive std {}",
                    regressor.name, regressor.std
                ));
            }
        }

        Ok(())
    }
}
