//! Forecast orchestration and port definitions for Solarcast.
//!
//! This crate defines the "ports" (model, store and LLM provider traits) that
//! the infrastructure layer implements, plus the pure coordination logic:
//! horizon validation, summary extraction, prompt building and the chat
//! gateway. It depends only on `solarcast-types` -- never on
//! `solarcast-infra` or any network/IO crate.

pub mod chat;
pub mod forecast;
pub mod llm;
