//! Locally generated answer used when the language model is unavailable.

/// Static advice appended to every fallback answer.
pub const GENERAL_ADVICE: &str =
    "clean panels, check shading, schedule heavy loads during peak hours.";

/// Deterministic answer built from the forecast context and the question.
pub fn fallback_answer(context: &str, question: &str) -> String {
    format!(
        "⚠️ AI unavailable.\n\nForecast summary:\n{context}\n\nYou asked: {question}\nGeneral advice: {GENERAL_ADVICE}"
    )
}
