//! HTTP API layer for Solarcast.
//!
//! Two routes, `POST /forecast` and `POST /chat`, with JSON error envelopes
//! and CORS support.

pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
