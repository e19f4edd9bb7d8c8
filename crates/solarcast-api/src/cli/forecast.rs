//! `solarcast forecast`: generate a forecast and print it.

use anyhow::Result;
use comfy_table::{presets, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;

use solarcast_core::forecast::summary::summarize;
use solarcast_types::forecast::{Forecast, DS_FORMAT};

use crate::state::AppState;

/// Rows shown in the table, matching the dashboard's tail view.
const TABLE_ROWS: usize = 10;

/// Generate a forecast for `days` (or the configured default) and print it.
pub async fn forecast(state: &AppState, days: Option<i64>, json: bool) -> Result<()> {
    let days = days.unwrap_or_else(|| state.default_days());
    let forecast = state.forecast_service.generate(days).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(forecast.as_ref())?);
        return Ok(());
    }

    let summary = summarize(&forecast)?;

    println!();
    println!(
        "  {} Forecast for the next {} day(s) ({} hourly points)",
        style("☀").bold(),
        style(days).cyan(),
        forecast.len()
    );
    println!();
    println!("{}", render_table(&forecast));
    println!();
    println!("  {}", style("── Summary ──").dim());
    for line in summary.to_string().lines() {
        println!("  {line}");
    }
    println!();

    Ok(())
}

fn render_table(forecast: &Forecast) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Time").fg(Color::White),
        Cell::new("Predicted generation").fg(Color::White),
    ]);

    for point in forecast.tail(TABLE_ROWS) {
        table.add_row(vec![
            Cell::new(point.ds.format(DS_FORMAT)).fg(Color::Cyan),
            Cell::new(format!("{:.2}", point.yhat)).set_alignment(CellAlignment::Right),
        ]);
    }

    table
}
