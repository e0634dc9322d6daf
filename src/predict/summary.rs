//! Aggregate statistics over a batch of predictions

use serde::Serialize;
use std::fmt;

use crate::{Gender, Prediction};

/// Confidence at or above which a prediction counts as high confidence
pub const HIGH_CONFIDENCE: f32 = 0.8;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PredictionSummary {
    pub total: usize,
    pub male: usize,
    pub female: usize,
    pub avg_confidence: f32,
    pub high_confidence: usize,
}

impl PredictionSummary {
    pub fn from_predictions(predictions: &[Prediction]) -> Self {
        if predictions.is_empty() {
            return Self::default();
        }

        let male = predictions
            .iter()
            .filter(|p| p.gender == Gender::Male)
            .count();
        let sum: f32 = predictions.iter().map(|p| p.confidence).sum();
        let high_confidence = predictions
            .iter()
            .filter(|p| p.confidence >= HIGH_CONFIDENCE)
            .count();

        PredictionSummary {
            total: predictions.len(),
            male,
            female: predictions.len() - male,
            avg_confidence: sum / predictions.len() as f32,
            high_confidence,
        }
    }
}

impl fmt::Display for PredictionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary")?;
        writeln!(f, "───────────────────────────────")?;
        writeln!(f, "  Names:              {}", self.total)?;
        writeln!(f, "  Male predictions:   {}", self.male)?;
        writeln!(f, "  Female predictions: {}", self.female)?;
        writeln!(f, "  Average confidence: {:.2}", self.avg_confidence)?;
        write!(
            f,
            "  High confidence (>= {:.0}%): {}",
            HIGH_CONFIDENCE * 100.0,
            self.high_confidence
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts() {
        let preds: Vec<Prediction> = [0.9, 0.1, 0.7, 0.45]
            .into_iter()
            .map(|p| Prediction::from_probability(p, 0.5))
            .collect();
        let summary = PredictionSummary::from_predictions(&preds);

        assert_eq!(summary.total, 4);
        assert_eq!(summary.male, 2);
        assert_eq!(summary.female, 2);
        // confidences: 0.9, 0.9, 0.7, 0.55
        assert_eq!(summary.high_confidence, 2);
        assert!((summary.avg_confidence - 0.7625).abs() < 1e-5);
    }

    #[test]
    fn test_empty_summary() {
        let summary = PredictionSummary::from_predictions(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.avg_confidence, 0.0);
    }
}
