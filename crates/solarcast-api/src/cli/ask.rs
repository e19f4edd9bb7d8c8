//! `solarcast ask`: answer one question from the command line.
//!
//! Runs the same path as `POST /chat`: latest forecast summary, prompt,
//! gateway, and the fallback answer when the gateway fails.

use anyhow::{bail, Result};
use console::style;

use crate::state::AppState;

/// Optionally generate a forecast, then answer `question`.
pub async fn ask(state: &AppState, question: &str, days: Option<i64>, json: bool) -> Result<()> {
    let answer = answer(state, question, days).await?;

    if json {
        let body = serde_json::json!({ "answer": answer });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        println!();
        println!("  {} {}", style("?").cyan().bold(), style(question).bold());
        println!();
        for line in answer.lines() {
            println!("  {line}");
        }
        println!();
    }

    Ok(())
}

async fn answer(state: &AppState, question: &str, days: Option<i64>) -> Result<String> {
    if question.trim().is_empty() {
        bail!("question must not be empty");
    }
    if let Some(days) = days {
        state.forecast_service.generate(days).await?;
    }

    let prepared = state.chat_service.prepare(question).await;
    Ok(match state.chat_service.ask(&prepared).await {
        Ok(answer) => answer,
        Err(e) => {
            tracing::warn!(error = %e, "chat gateway failed, serving fallback answer");
            prepared.fallback_answer()
        }
    })
}
