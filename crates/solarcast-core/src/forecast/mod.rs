//! Forecast generation, storage and summary extraction.

pub mod model;
pub mod service;
pub mod store;
pub mod summary;
