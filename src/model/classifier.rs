//! Character-level name classifier
//!
//! Embedding -> bidirectional LSTM -> mean over time -> linear -> sigmoid.

use burn::module::Module;
use burn::nn::{BiLstm, BiLstmConfig, Embedding, EmbeddingConfig, Linear, LinearConfig};
use burn::prelude::*;
use burn::tensor::activation::sigmoid;

/// Architecture of a [`NameClassifier`], stored next to its weights
#[derive(Config, Debug)]
pub struct NameClassifierConfig {
    /// Embedding rows; must cover every code the encoder can emit
    pub vocab_size: usize,
    /// Input sequence length
    pub max_len: usize,
    #[config(default = 64)]
    pub embed_dim: usize,
    #[config(default = 64)]
    pub hidden_size: usize,
}

impl NameClassifierConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> NameClassifier<B> {
        NameClassifier {
            embedding: EmbeddingConfig::new(self.vocab_size, self.embed_dim).init(device),
            lstm: BiLstmConfig::new(self.embed_dim, self.hidden_size, true).init(device),
            output: LinearConfig::new(self.hidden_size * 2, 1).init(device),
            hidden_size: self.hidden_size,
        }
    }
}

#[derive(Module, Debug)]
pub struct NameClassifier<B: Backend> {
    embedding: Embedding<B>,
    lstm: BiLstm<B>,
    output: Linear<B>,
    hidden_size: usize,
}

impl<B: Backend> NameClassifier<B> {
    /// Forward pass
    ///
    /// # Arguments
    /// * `codes` - Encoded names [batch, max_len]
    ///
    /// # Returns
    /// Male logit [batch, 1]
    pub fn forward(&self, codes: Tensor<B, 2, Int>) -> Tensor<B, 2> {
        let [batch, _seq] = codes.dims();

        let x = self.embedding.forward(codes);
        let (sequence, _) = self.lstm.forward(x, None);
        // [batch, seq, 2 * hidden] -> [batch, 2 * hidden]
        let pooled = sequence.mean_dim(1).reshape([batch, self.hidden_size * 2]);

        self.output.forward(pooled)
    }

    /// Male probability [batch, 1]
    pub fn forward_probability(&self, codes: Tensor<B, 2, Int>) -> Tensor<B, 2> {
        sigmoid(self.forward(codes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray<f32>;

    #[test]
    fn test_forward_shape() {
        let device = Default::default();
        let model = NameClassifierConfig::new(27, 6)
            .with_embed_dim(8)
            .with_hidden_size(4)
            .init::<TestBackend>(&device);

        let codes = Tensor::<TestBackend, 2, Int>::from_ints(
            [[1, 14, 1, 0, 0, 0], [10, 15, 19, 5, 0, 0], [0, 0, 0, 0, 0, 0]],
            &device,
        );
        let logits = model.forward(codes);

        assert_eq!(logits.dims(), [3, 1]);
    }

    #[test]
    fn test_probabilities_in_range() {
        let device = Default::default();
        let model = NameClassifierConfig::new(27, 4)
            .with_embed_dim(8)
            .with_hidden_size(4)
            .init::<TestBackend>(&device);

        let codes =
            Tensor::<TestBackend, 2, Int>::from_ints([[13, 1, 18, 9], [12, 21, 9, 19]], &device);
        let probs: Vec<f32> = model
            .forward_probability(codes)
            .into_data()
            .to_vec::<f32>()
            .unwrap();

        assert_eq!(probs.len(), 2);
        for p in probs {
            assert!((0.0..=1.0).contains(&p));
        }
    }
}
