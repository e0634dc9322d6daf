//! Batched prediction over encoded names

use crate::features::EncodedBatch;
use crate::model::GenderModel;
use crate::{GenderizeError, Prediction, Result};

/// Wraps a loaded model and decodes its output into labels
///
/// Holds no per-call state; `predict_batch` only reads the model.
#[derive(Debug)]
pub struct Predictor<M: GenderModel> {
    model: M,
    threshold: f32,
}

impl<M: GenderModel> Predictor<M> {
    pub fn new(model: M) -> Self {
        Predictor {
            model,
            threshold: 0.5,
        }
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// One forward pass, one prediction per row, in row order
    pub fn predict_batch(&self, batch: &EncodedBatch) -> Result<Vec<Prediction>> {
        let expected = self.model.input_len();
        if batch.width() != expected {
            return Err(GenderizeError::ModelInputShape {
                expected,
                actual: batch.width(),
                rows: batch.rows(),
            });
        }
        if batch.is_empty() {
            return Ok(Vec::new());
        }

        let output = self.model.forward_batch(batch)?;
        if output.rows() != batch.rows() {
            return Err(GenderizeError::Inference(format!(
                "model returned {} rows for a batch of {}",
                output.rows(),
                batch.rows()
            )));
        }

        log::debug!(
            "Predicted {} rows ({} output classes)",
            output.rows(),
            output.classes()
        );

        Ok(output
            .male_probabilities()
            .into_iter()
            .map(|p| Prediction::from_probability(p, self.threshold))
            .collect())
    }
}
