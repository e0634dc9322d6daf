//! Table-in, table-out gender prediction
//!
//! Resolves the name column, encodes every row, runs a single batched forward
//! pass and appends label and confidence columns to a copy of the input.

use std::path::Path;

use burn::tensor::backend::Backend;

use super::predictor::Predictor;
use crate::data::{Cell, Column, ColumnResolver, Table};
use crate::features::Encoder;
use crate::model::{BurnGenderModel, GenderModel};
use crate::{Config, GenderizeError, Prediction, PredictConfig, Result};

/// Owns one model handle and everything needed to decorate tables with predictions
pub struct LatamGenderize<M: GenderModel> {
    predictor: Predictor<M>,
    encoder: Encoder,
    resolver: ColumnResolver,
    output: PredictConfig,
    default_column: Option<String>,
}

impl<B: Backend> LatamGenderize<BurnGenderModel<B>>
where
    B::FloatElem: serde::Serialize + serde::de::DeserializeOwned,
    B::IntElem: serde::Serialize + serde::de::DeserializeOwned,
{
    /// Load the model named by `config.model` (or the packaged default)
    pub fn from_config(config: &Config, device: &B::Device) -> Result<Self> {
        let model = BurnGenderModel::load(config.model.resolved_path(), device)?;
        Self::with_model(model, config)
    }

    /// Load a model from `model_path`, or the packaged default when `None`
    pub fn load(model_path: Option<&Path>, device: &B::Device) -> Result<Self> {
        let mut config = Config::default();
        config.model.path = model_path.map(|p| p.to_string_lossy().into_owned());
        Self::from_config(&config, device)
    }
}

impl<M: GenderModel> LatamGenderize<M> {
    /// Wrap an already loaded model
    pub fn with_model(model: M, config: &Config) -> Result<Self> {
        config.validate()?;
        let encoder = Encoder::from_config(&config.encoder)?;

        // Codes beyond the embedding table would index out of range
        if let Some(vocab_size) = model.vocab_size() {
            if encoder.vocab().code_space() > vocab_size {
                return Err(GenderizeError::ModelLoad {
                    path: config.model.resolved_path(),
                    message: format!(
                        "encoder emits {} codes but the model embeds only {}",
                        encoder.vocab().code_space(),
                        vocab_size
                    ),
                });
            }
        }

        Ok(LatamGenderize {
            predictor: Predictor::new(model).with_threshold(config.predict.threshold),
            encoder,
            resolver: ColumnResolver::new(config.columns.aliases.clone()),
            output: config.predict.clone(),
            default_column: config.columns.name_column.clone(),
        })
    }

    pub fn encoder(&self) -> &Encoder {
        &self.encoder
    }

    pub fn predictor(&self) -> &Predictor<M> {
        &self.predictor
    }

    pub fn resolver(&self) -> &ColumnResolver {
        &self.resolver
    }

    /// Predictions for a list of names, in order
    pub fn predict_names<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<Prediction>> {
        let batch = self.encoder.encode_batch(names);
        let predictions = self.predictor.predict_batch(&batch)?;
        Ok(match self.output.round_digits {
            Some(digits) => predictions.into_iter().map(|p| p.rounded(digits)).collect(),
            None => predictions,
        })
    }

    /// Return a copy of `table` with prediction columns appended
    ///
    /// `name_column` overrides the configured column; without either, the
    /// column is found through the alias list. The input is never modified.
    pub fn genderize(&self, table: &Table, name_column: Option<&str>) -> Result<Table> {
        self.genderize_detailed(table, name_column)
            .map(|(table, _)| table)
    }

    /// Like [`LatamGenderize::genderize`], also returning the per-row predictions
    pub fn genderize_detailed(
        &self,
        table: &Table,
        name_column: Option<&str>,
    ) -> Result<(Table, Vec<Prediction>)> {
        let explicit = name_column.or(self.default_column.as_deref());
        let column = self.resolver.resolve(table, explicit)?;
        let names = table
            .column(&column)
            .map(Column::texts)
            .unwrap_or_default();

        log::debug!(
            "Genderizing {} rows from column '{}' (width {})",
            names.len(),
            column,
            self.encoder.max_len()
        );

        let predictions = self.predict_names(&names)?;

        let mut result = table.clone();
        result.set_column(Column::new(
            self.output.label_column.clone(),
            predictions.iter().map(|p| Cell::from(p.gender.code())),
        ))?;
        result.set_column(Column::new(
            self.output.confidence_column.clone(),
            predictions.iter().map(|p| {
                Cell::Float(match self.output.round_digits {
                    Some(digits) => p.rounded_confidence(digits),
                    None => p.confidence as f64,
                })
            }),
        ))?;
        Ok((result, predictions))
    }
}
