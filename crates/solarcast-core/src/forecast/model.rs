//! Forecasting model port and the future frame it predicts over.
//!
//! A [`FutureFrame`] is the column-oriented input handed to a model: one
//! timestamp per row plus any regressor columns. The model either fills every
//! row with a prediction or rejects the frame with a [`ModelError`].

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDateTime};

use solarcast_types::error::ModelError;

/// A pre-fitted forecasting model.
///
/// Implementations live in solarcast-infra (e.g., the JSON artifact model).
/// Prediction is synchronous CPU work.
pub trait ForecastModel: Send + Sync {
    /// Human-readable model name.
    fn name(&self) -> &str;

    /// Last timestamp of the training data.
    fn history_end(&self) -> NaiveDateTime;

    /// Names of the regressor columns the model needs in every frame.
    fn required_regressors(&self) -> Vec<&str>;

    /// Predict one value per frame row.
    fn predict(&self, frame: &FutureFrame) -> Result<Vec<f64>, ModelError>;
}

/// Rows to predict: timestamps plus regressor columns.
#[derive(Debug, Clone, PartialEq)]
pub struct FutureFrame {
    timestamps: Vec<NaiveDateTime>,
    regressors: BTreeMap<String, Vec<f64>>,
}

impl FutureFrame {
    /// `periods` hourly timestamps starting at `start` (inclusive).
    pub fn hourly(start: NaiveDateTime, periods: usize) -> Result<Self, ModelError> {
        let timestamps = (0..periods as i64)
            .map(|i| hours_after(start, i))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            timestamps,
            regressors: BTreeMap::new(),
        })
    }

    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn has_regressor(&self, name: &str) -> bool {
        self.regressors.contains_key(name)
    }

    pub fn regressor(&self, name: &str) -> Option<&[f64]> {
        self.regressors.get(name).map(Vec::as_slice)
    }

    /// Set (or replace) a regressor column.
    pub fn set_regressor(
        &mut self,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<(), ModelError> {
        let name = name.into();
        if values.len() != self.len() {
            return Err(ModelError::RegressorLength {
                name,
                expected: self.len(),
                actual: values.len(),
            });
        }
        self.regressors.insert(name, values);
        Ok(())
    }

    /// Add a constant column for every default the frame does not already carry.
    pub fn fill_missing(&mut self, defaults: &BTreeMap<String, f64>) {
        let rows = self.len();
        for (name, value) in defaults {
            self.regressors
                .entry(name.clone())
                .or_insert_with(|| vec![*value; rows]);
        }
    }

    /// Fail with [`ModelError::MissingRegressor`] for the first absent column.
    pub fn require(&self, names: &[&str]) -> Result<(), ModelError> {
        match names.iter().find(|name| !self.has_regressor(name)) {
            Some(missing) => Err(ModelError::MissingRegressor(missing.to_string())),
            None => Ok(()),
        }
    }
}

/// `start` shifted by `hours`, or [`ModelError::TimestampOverflow`] past chrono's range.
pub fn hours_after(start: NaiveDateTime, hours: i64) -> Result<NaiveDateTime, ModelError> {
    Duration::try_hours(hours)
        .and_then(|delta| start.checked_add_signed(delta))
        .ok_or(ModelError::TimestampOverflow { start, hours })
}
