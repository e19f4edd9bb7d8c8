//! Pre-fitted forecasting model loaded from a JSON artifact.
//!
//! The artifact describes a decomposable time-series model: a piecewise-linear
//! trend, Fourier seasonalities and linear regressor effects. Training happens
//! elsewhere; this module only validates and evaluates the fitted parameters.

pub mod artifact;
pub mod decomposition;

pub use artifact::ModelArtifact;
pub use decomposition::DecompositionModel;
