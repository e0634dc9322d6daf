//! Feature extraction and encoding
//!
//! Converts raw names into model-ready integer sequences.

pub mod encoding;
pub mod normalize;
pub mod vocab;

pub use encoding::{EncodedBatch, Encoder};
pub use normalize::{normalize_name, NormalizeOptions};
pub use vocab::{CharVocabulary, PAD_CODE};
