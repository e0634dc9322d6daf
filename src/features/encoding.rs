//! Fixed-length character encoding of names

use serde::Serialize;

use super::normalize::{normalize_name, NormalizeOptions};
use super::vocab::{CharVocabulary, PAD_CODE};
use crate::{EncoderConfig, PadSide, Result};

/// Row-major matrix of encoded names, `rows x width`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodedBatch {
    rows: usize,
    width: usize,
    data: Vec<i32>,
}

impl EncodedBatch {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn shape(&self) -> [usize; 2] {
        [self.rows, self.width]
    }

    /// Flat row-major codes
    pub fn as_slice(&self) -> &[i32] {
        &self.data
    }

    pub fn row(&self, i: usize) -> Option<&[i32]> {
        if i >= self.rows {
            return None;
        }
        Some(&self.data[i * self.width..(i + 1) * self.width])
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }
}

/// Converts names into sequences of exactly `max_len` codes
#[derive(Debug, Clone)]
pub struct Encoder {
    vocab: CharVocabulary,
    max_len: usize,
    pad_side: PadSide,
    options: NormalizeOptions,
}

impl Default for Encoder {
    fn default() -> Self {
        Encoder {
            vocab: CharVocabulary::default(),
            max_len: 50,
            pad_side: PadSide::Right,
            options: NormalizeOptions::default(),
        }
    }
}

impl Encoder {
    pub fn new(vocab: CharVocabulary, max_len: usize) -> Self {
        Encoder {
            vocab,
            max_len,
            ..Self::default()
        }
    }

    pub fn from_config(config: &EncoderConfig) -> Result<Self> {
        Ok(Encoder {
            vocab: CharVocabulary::from_alphabet(&config.alphabet)?,
            max_len: config.max_len,
            pad_side: config.pad_side,
            options: NormalizeOptions {
                strip_accents: config.strip_accents,
                strip_symbols: config.strip_symbols,
            },
        })
    }

    pub fn with_pad_side(mut self, pad_side: PadSide) -> Self {
        self.pad_side = pad_side;
        self
    }

    pub fn with_normalize_options(mut self, options: NormalizeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn vocab(&self) -> &CharVocabulary {
        &self.vocab
    }

    pub fn normalize(&self, name: &str) -> String {
        normalize_name(name, self.options)
    }

    /// Characters of the normalized name that fall outside the vocabulary
    pub fn unknown_chars(&self, name: &str) -> Vec<char> {
        self.normalize(name)
            .chars()
            .filter(|c| !self.vocab.contains(*c))
            .collect()
    }

    /// Render codes back to text, `_` for the reserved code
    pub fn decode(&self, codes: &[i32]) -> String {
        codes
            .iter()
            .map(|&code| self.vocab.char_for(code).unwrap_or('_'))
            .collect()
    }

    /// Encode one name
    pub fn encode(&self, name: &str) -> Vec<i32> {
        let mut out = Vec::with_capacity(self.max_len);
        self.encode_into(name, &mut out);
        out
    }

    /// Encode names in order into a `names.len() x max_len` batch
    pub fn encode_batch<S: AsRef<str>>(&self, names: &[S]) -> EncodedBatch {
        let mut data = Vec::with_capacity(names.len() * self.max_len);
        for name in names {
            self.encode_into(name.as_ref(), &mut data);
        }
        EncodedBatch {
            rows: names.len(),
            width: self.max_len,
            data,
        }
    }

    fn encode_into(&self, name: &str, out: &mut Vec<i32>) {
        let normalized = self.normalize(name);
        // Truncation keeps the leading characters
        let codes: Vec<i32> = normalized
            .chars()
            .take(self.max_len)
            .map(|c| self.vocab.code(c))
            .collect();
        let padding = self.max_len - codes.len();

        match self.pad_side {
            PadSide::Right => {
                out.extend(codes);
                out.extend(std::iter::repeat(PAD_CODE).take(padding));
            }
            PadSide::Left => {
                out.extend(std::iter::repeat(PAD_CODE).take(padding));
                out.extend(codes);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_known_name() {
        let encoder = Encoder::default();
        let codes = encoder.encode("Ana");
        assert_eq!(codes.len(), 50);
        assert_eq!(&codes[..4], &[1, 14, 1, 0]);
        assert!(codes[3..].iter().all(|&c| c == PAD_CODE));
    }

    #[test]
    fn test_encode_full_name_space_is_pad_code() {
        let codes = Encoder::default().encode("Ana Sofía");
        assert_eq!(&codes[..9], &[1, 14, 1, 0, 19, 15, 6, 9, 1]);
    }

    #[test]
    fn test_shape_invariant() {
        let encoder = Encoder::new(CharVocabulary::default(), 8);
        let long = "Maximiliano Alejandro de la Santisima Trinidad";
        for name in ["", "   ", "Jo", long, "123-456", "Ñandú"] {
            assert_eq!(encoder.encode(name).len(), 8, "name: {name:?}");
        }
    }

    #[test]
    fn test_empty_is_all_pad() {
        let codes = Encoder::default().encode("");
        assert!(codes.iter().all(|&c| c == PAD_CODE));
    }

    #[test]
    fn test_truncates_from_right() {
        let encoder = Encoder::new(CharVocabulary::default(), 3);
        assert_eq!(encoder.encode("Carolina"), vec![3, 1, 18]);
    }

    #[test]
    fn test_left_padding() {
        let encoder = Encoder::new(CharVocabulary::default(), 5).with_pad_side(PadSide::Left);
        assert_eq!(encoder.encode("Eva"), vec![0, 0, 5, 22, 1]);
    }

    #[test]
    fn test_unknown_characters_when_symbols_kept() {
        let encoder = Encoder::new(CharVocabulary::default(), 4).with_normalize_options(
            NormalizeOptions {
                strip_accents: true,
                strip_symbols: false,
            },
        );
        assert_eq!(encoder.encode("a-b"), vec![1, 0, 2, 0]);
    }

    #[test]
    fn test_batch_preserves_order() {
        let encoder = Encoder::new(CharVocabulary::default(), 4);
        let batch = encoder.encode_batch(&["Jose", "Maria", ""]);
        assert_eq!(batch.shape(), [3, 4]);
        assert_eq!(batch.row(0).unwrap(), encoder.encode("Jose").as_slice());
        assert_eq!(batch.row(1).unwrap(), encoder.encode("Maria").as_slice());
        assert_eq!(batch.row(2).unwrap(), &[0, 0, 0, 0]);
        assert!(batch.row(3).is_none());
    }

    #[test]
    fn test_from_config() {
        let config = EncoderConfig {
            max_len: 10,
            ..EncoderConfig::default()
        };
        let encoder = Encoder::from_config(&config).unwrap();
        assert_eq!(encoder.max_len(), 10);
        assert_eq!(encoder.encode("Luis").len(), 10);
    }

    #[test]
    fn test_decode_shows_what_the_model_sees() {
        let encoder = Encoder::new(CharVocabulary::default(), 8);
        let codes = encoder.encode("Ana María");
        assert_eq!(encoder.decode(&codes), "ana_mari");
    }

    #[test]
    fn test_unknown_chars() {
        let encoder = Encoder::default();
        assert_eq!(encoder.unknown_chars("Luis 2do"), vec![' ', '2']);
        assert!(encoder.unknown_chars("Pérez").is_empty());
    }

}
