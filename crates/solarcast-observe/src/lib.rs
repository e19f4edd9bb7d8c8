//! Observability for Solarcast: tracing subscriber setup and the GenAI
//! attribute names used on LLM spans.

pub mod genai_attrs;
pub mod tracing_setup;
