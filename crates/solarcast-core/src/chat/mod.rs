//! Forecast Q&A: prompt building, the chat gateway and its fallback.

pub mod fallback;
pub mod gateway;
pub mod prompt;
pub mod service;
