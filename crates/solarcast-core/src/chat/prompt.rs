//! Prompt template for forecast questions.

/// Build the single user prompt sent to the language model.
///
/// `context` is either a rendered forecast summary or the "no forecast"
/// placeholder. Deterministic: the same inputs always yield the same text.
pub fn build(context: &str, question: &str) -> String {
    format!(
        "You are SOLAR_AI — expert in solar forecasting and PV engineering.

FORECAST SUMMARY:
{context}

USER QUESTION:
{question}

Guidelines:
- If forecast exists → analyze peak, dips, trends and provide insights.
- Include technical causes (temperature, irradiance, shading, etc.)
- Provide practical actions to boost solar energy generation.
- If no forecast exists → answer normally as an AI assistant.
- Use simple, clean language and bullet points.
"
    )
}
