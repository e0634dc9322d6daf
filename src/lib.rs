//! Gender prediction for Latin-American names
//!
//! A character-level neural classifier applied to batches of names held in a table.

pub mod data;
pub mod features;
pub mod model;
pub mod predict;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub use data::{Cell, Column, Table};
pub use predict::{LatamGenderize, Predictor};

/// Packaged default model under the crate's `models/` directory, without extension
pub const DEFAULT_MODEL_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/models/boyorgirl_CO_ES");

/// Predicted gender label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    pub fn code(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }

}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Per-row model output decoded into a label
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub gender: Gender,
    /// Probability of `gender`, in [0, 1]
    pub confidence: f32,
}

impl Prediction {
    /// Decode a male-class probability with the given threshold
    ///
    /// A non-finite probability decodes as 0.5.
    pub fn from_probability(p_male: f32, threshold: f32) -> Self {
        let p_male = if p_male.is_finite() {
            p_male.clamp(0.0, 1.0)
        } else {
            0.5
        };
        if p_male > threshold {
            Prediction {
                gender: Gender::Male,
                confidence: p_male,
            }
        } else {
            Prediction {
                gender: Gender::Female,
                confidence: 1.0 - p_male,
            }
        }
    }

    /// Round confidence to a fixed number of decimals
    pub fn rounded(self, digits: u32) -> Self {
        let scale = 10f32.powi(digits as i32);
        Prediction {
            confidence: (self.confidence * scale).round() / scale,
            ..self
        }
    }

    /// Confidence widened to `f64` and rounded there, so the decimals survive output
    pub fn rounded_confidence(&self, digits: u32) -> f64 {
        let scale = 10f64.powi(digits as i32);
        (self.confidence as f64 * scale).round() / scale
    }
}

/// What the column resolver was looking for when it failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnLookup {
    /// An explicitly requested column that the table does not have
    Explicit {
        column: String,
        available: Vec<String>,
    },
    /// None of the known aliases matched
    Aliases { tried: Vec<String> },
}

impl fmt::Display for ColumnLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnLookup::Explicit { column, available } => write!(
                f,
                "Column '{}' not found in table (available: {})",
                column,
                available.join(", ")
            ),
            ColumnLookup::Aliases { tried } => write!(
                f,
                "No name column found. Pass the name column explicitly. Supported column names: {}",
                tried.join(", ")
            ),
        }
    }
}

/// Library-wide errors
#[derive(Debug, Error)]
pub enum GenderizeError {
    #[error("Failed to load model from {}: {message}", .path.display())]
    ModelLoad { path: PathBuf, message: String },

    #[error("{0}")]
    ColumnNotFound(ColumnLookup),

    #[error("Model expects sequences of length {expected}, got a batch of {rows} rows x {actual}")]
    ModelInputShape {
        expected: usize,
        actual: usize,
        rows: usize,
    },

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Table error: {0}")]
    Table(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GenderizeError>;

/// Which end of a short sequence receives padding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PadSide {
    Left,
    Right,
}

/// Application configuration loaded from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub encoder: EncoderConfig,
    pub model: ModelConfig,
    pub predict: PredictConfig,
    pub columns: ColumnsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    pub max_len: usize,
    /// Ordered alphabet; the i-th character encodes to i + 1
    pub alphabet: String,
    pub pad_side: PadSide,
    pub strip_accents: bool,
    /// Drop characters outside `[a-z0-9 ]` instead of encoding them as unknown
    pub strip_symbols: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        EncoderConfig {
            max_len: 50,
            alphabet: "abcdefghijklmnopqrstuvwxyz".to_string(),
            pad_side: PadSide::Right,
            strip_accents: true,
            strip_symbols: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Artifact path without extension; `None` uses the packaged default
    pub path: Option<String>,
}

impl ModelConfig {
    pub fn resolved_path(&self) -> PathBuf {
        self.path
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictConfig {
    pub threshold: f32,
    pub label_column: String,
    pub confidence_column: String,
    pub round_digits: Option<u32>,
}

impl Default for PredictConfig {
    fn default() -> Self {
        PredictConfig {
            threshold: 0.5,
            label_column: "predicted_gender".to_string(),
            confidence_column: "confidence".to_string(),
            round_digits: Some(2),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnsConfig {
    /// Candidate name columns in priority order, matched case-insensitively
    pub aliases: Vec<String>,
    pub name_column: Option<String>,
}

impl Default for ColumnsConfig {
    fn default() -> Self {
        ColumnsConfig {
            aliases: data::columns::DEFAULT_ALIASES
                .iter()
                .map(|a| a.to_string())
                .collect(),
            name_column: None,
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            GenderizeError::Config(format!("Failed to read config file {}: {}", path, e))
        })?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| GenderizeError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| GenderizeError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.encoder.max_len == 0 {
            return Err(GenderizeError::Config("encoder.max_len must be positive".into()));
        }
        if self.encoder.alphabet.is_empty() {
            return Err(GenderizeError::Config("encoder.alphabet must not be empty".into()));
        }
        if !(0.0..=1.0).contains(&self.predict.threshold) {
            return Err(GenderizeError::Config(format!(
                "predict.threshold must be in [0, 1], got {}",
                self.predict.threshold
            )));
        }
        if self.predict.label_column == self.predict.confidence_column {
            return Err(GenderizeError::Config(
                "predict.label_column and predict.confidence_column must differ".into(),
            ));
        }
        Ok(())
    }
}
