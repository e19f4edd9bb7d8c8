//! Shared domain types for Solarcast.
//!
//! This crate contains the types used across the Solarcast service:
//! forecasts and their summaries, LLM request/response shapes,
//! configuration, and the associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod config;
pub mod error;
pub mod forecast;
pub mod llm;
