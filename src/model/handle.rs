//! Burn-backed model handle
//!
//! An artifact is two files sharing a stem: `<path>.json` with the
//! [`NameClassifierConfig`] and `<path>.mpk` with the named MessagePack record.

use std::path::{Path, PathBuf};

use burn::module::Module;
use burn::prelude::*;
use burn::record::{FullPrecisionSettings, NamedMpkFileRecorder, Recorder};

use super::classifier::{NameClassifier, NameClassifierConfig};
use super::{GenderModel, ModelOutput};
use crate::features::EncodedBatch;
use crate::{GenderizeError, Result};

/// A loaded [`NameClassifier`] plus the device it lives on
#[derive(Debug)]
pub struct BurnGenderModel<B: Backend> {
    model: NameClassifier<B>,
    config: NameClassifierConfig,
    device: B::Device,
}

impl<B: Backend> BurnGenderModel<B> {
    pub fn new(model: NameClassifier<B>, config: NameClassifierConfig, device: B::Device) -> Self {
        BurnGenderModel {
            model,
            config,
            device,
        }
    }

    /// Freshly initialized weights, mostly useful for tests and exports
    pub fn init(config: NameClassifierConfig, device: B::Device) -> Self {
        let model = config.init(&device);
        Self::new(model, config, device)
    }

    pub fn config(&self) -> &NameClassifierConfig {
        &self.config
    }

    pub fn device(&self) -> &B::Device {
        &self.device
    }

    /// Load an artifact saved with [`BurnGenderModel::save`]
    pub fn load<P: AsRef<Path>>(path: P, device: &B::Device) -> Result<Self>
    where
        B::FloatElem: serde::Serialize + serde::de::DeserializeOwned,
        B::IntElem: serde::Serialize + serde::de::DeserializeOwned,
    {
        let path = path.as_ref();
        let config_file = path.with_extension("json");
        let record_file = path.with_extension("mpk");

        for file in [&config_file, &record_file] {
            if !file.exists() {
                return Err(model_load_error(path, format!("{} not found", file.display())));
            }
        }

        let config = NameClassifierConfig::load(&config_file)
            .map_err(|e| model_load_error(path, format!("invalid architecture file: {}", e)))?;

        let recorder = NamedMpkFileRecorder::<FullPrecisionSettings>::new();
        let record = recorder
            .load(path.to_path_buf(), device)
            .map_err(|e| model_load_error(path, e.to_string()))?;

        let model = config.init::<B>(device).load_record(record);
        log::info!(
            "Loaded model from {} (vocab {}, length {})",
            path.display(),
            config.vocab_size,
            config.max_len
        );

        Ok(Self::new(model, config, device.clone()))
    }

    /// Write `<path>.json` and `<path>.mpk`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()>
    where
        B::FloatElem: serde::Serialize + serde::de::DeserializeOwned,
        B::IntElem: serde::Serialize + serde::de::DeserializeOwned,
    {
        let path = path.as_ref();
        self.config.save(path.with_extension("json"))?;

        let recorder = NamedMpkFileRecorder::<FullPrecisionSettings>::new();
        recorder
            .record(self.model.clone().into_record(), path.to_path_buf())
            .map_err(|e| GenderizeError::Io(std::io::Error::other(e.to_string())))
    }
}

impl<B: Backend> GenderModel for BurnGenderModel<B> {
    fn input_len(&self) -> usize {
        self.config.max_len
    }

    fn vocab_size(&self) -> Option<usize> {
        Some(self.config.vocab_size)
    }

    fn forward_batch(&self, batch: &EncodedBatch) -> Result<ModelOutput> {
        let [rows, width] = batch.shape();
        let codes = Tensor::<B, 1, Int>::from_ints(batch.as_slice(), &self.device)
            .reshape([rows, width]);

        let probabilities = self
            .model
            .forward_probability(codes)
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| GenderizeError::Inference(format!("{:?}", e)))?;

        ModelOutput::new(rows, 1, probabilities)
    }
}

fn model_load_error(path: &Path, message: String) -> GenderizeError {
    GenderizeError::ModelLoad {
        path: PathBuf::from(path),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{CharVocabulary, Encoder};
    use burn::backend::NdArray;

    type TestBackend = NdArray<f32>;

    fn small_config() -> NameClassifierConfig {
        NameClassifierConfig::new(27, 10)
            .with_embed_dim(8)
            .with_hidden_size(4)
    }

    #[test]
    fn test_forward_batch() {
        let model = BurnGenderModel::<TestBackend>::init(small_config(), Default::default());
        let encoder = Encoder::new(CharVocabulary::default(), 10);
        let batch = encoder.encode_batch(&["Maria", "Jose", ""]);

        let output = model.forward_batch(&batch).unwrap();

        assert_eq!(output.rows(), 3);
        assert_eq!(output.classes(), 1);
        for p in output.male_probabilities() {
            assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("names");
        let device = Default::default();

        let model = BurnGenderModel::<TestBackend>::init(small_config(), device);
        model.save(&path).unwrap();
        assert!(path.with_extension("json").exists());
        assert!(path.with_extension("mpk").exists());

        let loaded = BurnGenderModel::<TestBackend>::load(&path, &Default::default()).unwrap();
        assert_eq!(loaded.input_len(), 10);
        assert_eq!(loaded.vocab_size(), Some(27));

        // Same weights, same outputs
        let encoder = Encoder::new(CharVocabulary::default(), 10);
        let batch = encoder.encode_batch(&["Carmen", "Luis"]);
        let before = model.forward_batch(&batch).unwrap().male_probabilities();
        let after = loaded.forward_batch(&batch).unwrap().male_probabilities();
        for (a, b) in before.iter().zip(&after) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = BurnGenderModel::<TestBackend>::load(dir.path().join("nope"), &Default::default());
        assert!(matches!(result, Err(GenderizeError::ModelLoad { .. })));
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken");
        std::fs::write(path.with_extension("json"), "{ not json").unwrap();
        std::fs::write(path.with_extension("mpk"), b"garbage").unwrap();

        let result = BurnGenderModel::<TestBackend>::load(&path, &Default::default());
        assert!(matches!(result, Err(GenderizeError::ModelLoad { .. })));
    }
}
