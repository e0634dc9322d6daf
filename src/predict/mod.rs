//! Prediction and inference
//!
//! Decode model output into labels and decorate tables with predictions.

pub mod pipeline;
pub mod predictor;
pub mod summary;

pub use pipeline::LatamGenderize;
pub use predictor::Predictor;
pub use summary::PredictionSummary;
