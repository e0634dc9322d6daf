//! Model interface and the burn character-level classifier
//!
//! The pipeline only talks to [`GenderModel`]: declared input width, one batched
//! forward pass, one probability row per input row. [`BurnGenderModel`] is the
//! burn-backed implementation loaded from a record file.

pub mod classifier;
pub mod handle;

pub use classifier::{NameClassifier, NameClassifierConfig};
pub use handle::BurnGenderModel;

use crate::features::EncodedBatch;
use crate::{GenderizeError, Result};

/// A loaded, read-only gender classifier
///
/// Implementations are not required to be `Sync`. Sharing one handle across
/// threads is only sound when the underlying runtime's inference is reentrant.
pub trait GenderModel: Send {
    /// Sequence length every input row must have
    fn input_len(&self) -> usize;

    /// Number of embedding rows, when the model declares it
    fn vocab_size(&self) -> Option<usize> {
        None
    }

    /// Run one forward pass over the whole batch
    fn forward_batch(&self, batch: &EncodedBatch) -> Result<ModelOutput>;
}

impl<M: GenderModel + ?Sized> GenderModel for Box<M> {
    fn input_len(&self) -> usize {
        (**self).input_len()
    }

    fn vocab_size(&self) -> Option<usize> {
        (**self).vocab_size()
    }

    fn forward_batch(&self, batch: &EncodedBatch) -> Result<ModelOutput> {
        (**self).forward_batch(batch)
    }
}

/// Raw model probabilities, `rows x classes` row-major
///
/// One class is a sigmoid output (probability of male). Two classes are
/// `[female, male]` scores.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelOutput {
    rows: usize,
    classes: usize,
    values: Vec<f32>,
}

impl ModelOutput {
    pub fn new(rows: usize, classes: usize, values: Vec<f32>) -> Result<Self> {
        if classes == 0 || classes > 2 {
            return Err(GenderizeError::Inference(format!(
                "expected 1 or 2 output classes, model produced {}",
                classes
            )));
        }
        if values.len() != rows * classes {
            return Err(GenderizeError::Inference(format!(
                "model produced {} values for {} rows x {} classes",
                values.len(),
                rows,
                classes
            )));
        }
        Ok(ModelOutput {
            rows,
            classes,
            values,
        })
    }

    /// Single sigmoid output per row
    pub fn from_sigmoid(values: Vec<f32>) -> Self {
        ModelOutput {
            rows: values.len(),
            classes: 1,
            values,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn classes(&self) -> usize {
        self.classes
    }

    /// Probability of the male class for row `i`
    pub fn male_probability(&self, i: usize) -> Option<f32> {
        if i >= self.rows {
            return None;
        }
        let row = &self.values[i * self.classes..(i + 1) * self.classes];
        Some(match row {
            [p] => *p,
            [female, male] => {
                let total = female + male;
                if total > 0.0 {
                    male / total
                } else {
                    0.5
                }
            }
            _ => return None,
        })
    }

    pub fn male_probabilities(&self) -> Vec<f32> {
        (0..self.rows)
            .filter_map(|i| self.male_probability(i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sigmoid_output() {
        let out = ModelOutput::from_sigmoid(vec![0.7, 0.3, 0.8]);
        assert_eq!(out.rows(), 3);
        assert_eq!(out.male_probabilities(), vec![0.7, 0.3, 0.8]);
        assert_eq!(out.male_probability(3), None);
    }

    #[test]
    fn test_two_class_output_is_normalized() {
        let out = ModelOutput::new(2, 2, vec![0.2, 0.6, 3.0, 1.0]).unwrap();
        assert!((out.male_probability(0).unwrap() - 0.75).abs() < 1e-6);
        assert!((out.male_probability(1).unwrap() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_bad_output_shape() {
        assert!(ModelOutput::new(2, 1, vec![0.1]).is_err());
        assert!(ModelOutput::new(1, 3, vec![0.1, 0.2, 0.7]).is_err());
    }
}
