//! Forecast and forecast summary types.
//!
//! A [`Forecast`] is the ordered hourly output of the forecasting model.
//! On the wire every point is `{"ds": "YYYY-MM-DD HH:MM:SS", "yhat": <f64>}`.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Text format used for forecast timestamps.
pub const DS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Number of forecast points per horizon day.
pub const POINTS_PER_DAY: u32 = 24;

/// A single predicted value at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Timestamp of the prediction.
    #[serde(with = "ds_format")]
    pub ds: NaiveDateTime,
    /// Predicted output.
    pub yhat: f64,
}

/// An ordered sequence of forecast points.
///
/// Serializes transparently as a JSON array of [`ForecastPoint`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Forecast {
    points: Vec<ForecastPoint>,
}

impl Forecast {
    pub fn new(points: Vec<ForecastPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether every timestamp is strictly later than the one before it.
    pub fn is_strictly_increasing(&self) -> bool {
        self.points.windows(2).all(|w| w[0].ds < w[1].ds)
    }

    /// The last `n` points (all of them if `n` exceeds the length).
    pub fn tail(&self, n: usize) -> &[ForecastPoint] {
        let start = self.points.len().saturating_sub(n);
        &self.points[start..]
    }
}

impl From<Vec<ForecastPoint>> for Forecast {
    fn from(points: Vec<ForecastPoint>) -> Self {
        Self::new(points)
    }
}

/// Descriptive statistics of a forecast, computed on demand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastSummary {
    #[serde(with = "ds_format")]
    pub start: NaiveDateTime,
    #[serde(with = "ds_format")]
    pub end: NaiveDateTime,
    pub average: f64,
    pub peak_value: f64,
    #[serde(with = "ds_format")]
    pub peak_time: NaiveDateTime,
    pub min_value: f64,
}

impl fmt::Display for ForecastSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Forecast period: {} → {}",
            self.start.format(DS_FORMAT),
            self.end.format(DS_FORMAT)
        )?;
        writeln!(f, "Average predicted generation: {:.2}", self.average)?;
        writeln!(
            f,
            "Peak generation: {:.2} at {}",
            self.peak_value,
            self.peak_time.format(DS_FORMAT)
        )?;
        write!(f, "Minimum generation: {:.2}", self.min_value)
    }
}

/// Serde adapter for `ds` timestamps.
pub mod ds_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::DS_FORMAT;

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(DS_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, DS_FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn hourly(values: &[f64]) -> Forecast {
        let start = NaiveDate::from_ymd_opt(2024, 7, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, &yhat)| ForecastPoint {
                ds: start + Duration::hours(i as i64),
                yhat,
            })
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn test_point_serializes_as_ds_yhat() {
        let forecast = hourly(&[1.5]);
        let json = serde_json::to_value(&forecast).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{"ds": "2024-07-01 00:00:00", "yhat": 1.5}])
        );
    }

    #[test]
    fn test_point_deserializes_from_ds_text() {
        let forecast: Forecast =
            serde_json::from_str(r#"[{"ds":"2024-07-01 05:00:00","yhat":3.0}]"#).unwrap();
        assert_eq!(forecast.len(), 1);
        assert_eq!(forecast.points()[0].ds.format(DS_FORMAT).to_string(), "2024-07-01 05:00:00");
    }

    #[test]
    fn test_summary_display() {
        let at = |h| {
            NaiveDate::from_ymd_opt(2024, 7, 1)
                .unwrap()
                .and_hms_opt(h, 0, 0)
                .unwrap()
        };
        let summary = ForecastSummary {
            start: at(0),
            end: at(3),
            average: 5.0,
            peak_value: 10.0,
            peak_time: at(2),
            min_value: 0.0,
        };
        let text = summary.to_string();
        assert_eq!(
            text,
            "Forecast period: 2024-07-01 00:00:00 → 2024-07-01 03:00:00\n\
             Average predicted generation: 5.00\n\
             Peak generation: 10.00 at 2024-07-01 02:00:00\n\
             Minimum generation: 0.00"
        );
    }

    #[test]
    fn test_tail_and_ordering() {
        let forecast = hourly(&[1.0, 2.0, 3.0]);
        assert!(forecast.is_strictly_increasing());
        assert_eq!(forecast.tail(2).len(), 2);
        assert_eq!(forecast.tail(10).len(), 3);
        assert_eq!(forecast.tail(1)[0].yhat, 3.0);
    }
}
