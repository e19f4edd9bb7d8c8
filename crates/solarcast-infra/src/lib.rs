//! Infrastructure layer for Solarcast.
//!
//! Contains implementations of the ports defined in `solarcast-core`:
//! the JSON model artifact, the Azure / OpenAI-compatible chat provider,
//! and configuration loading from file and environment.

pub mod config;
pub mod llm;
pub mod model;
