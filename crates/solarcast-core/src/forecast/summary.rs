//! Summary extraction.
//!
//! Reduces a forecast to peak, trough, average and time range. The chat path
//! renders the summary as text, or a fixed placeholder when no forecast exists.

use solarcast_types::error::SummaryError;
use solarcast_types::forecast::{Forecast, ForecastSummary};

/// Context text used when no forecast has been generated.
pub const NO_FORECAST_PLACEHOLDER: &str = "No forecast has been generated yet.";

/// Compute descriptive statistics for a non-empty forecast.
///
/// Ties for the peak resolve to the earliest timestamp.
pub fn summarize(forecast: &Forecast) -> Result<ForecastSummary, SummaryError> {
    let points = forecast.points();
    let (first, last) = match (points.first(), points.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(SummaryError::EmptyForecast),
    };

    let mut peak = first;
    let mut min_value = first.yhat;
    let mut total = 0.0;

    for point in points {
        if point.yhat > peak.yhat {
            peak = point;
        }
        if point.yhat < min_value {
            min_value = point.yhat;
        }
        total += point.yhat;
    }

    // Floating-point summation can land a hair outside [min, max].
    let average = (total / points.len() as f64).clamp(min_value, peak.yhat);

    Ok(ForecastSummary {
        start: first.ds,
        end: last.ds,
        average,
        peak_value: peak.yhat,
        peak_time: peak.ds,
        min_value,
    })
}

/// Rendered summary of the forecast, or the placeholder when there is none.
pub fn summary_or_placeholder(forecast: Option<&Forecast>) -> String {
    match forecast.map(summarize) {
        Some(Ok(summary)) => summary.to_string(),
        Some(Err(SummaryError::EmptyForecast)) | None => NO_FORECAST_PLACEHOLDER.to_string(),
    }
}
