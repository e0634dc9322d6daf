//! Character vocabulary
//!
//! Maps each permitted character to a positive code. Code 0 is reserved for
//! padding and for characters outside the vocabulary.

use std::collections::HashMap;

use crate::{GenderizeError, Result};

/// Reserved code for padding and unknown characters
pub const PAD_CODE: i32 = 0;

/// Ordered, fixed character-to-code mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharVocabulary {
    chars: Vec<char>,
    char_to_code: HashMap<char, i32>,
}

impl Default for CharVocabulary {
    /// Lowercase latin letters, `a` = 1 .. `z` = 26
    fn default() -> Self {
        let chars: Vec<char> = ('a'..='z').collect();
        let char_to_code = chars
            .iter()
            .enumerate()
            .map(|(i, &c)| (c, i as i32 + 1))
            .collect();
        CharVocabulary {
            chars,
            char_to_code,
        }
    }
}

impl CharVocabulary {
    /// Build from an ordered alphabet; the i-th character encodes to i + 1
    pub fn from_chars<I: IntoIterator<Item = char>>(chars: I) -> Result<Self> {
        let mut ordered = Vec::new();
        let mut char_to_code = HashMap::new();
        for c in chars {
            let code = ordered.len() as i32 + 1;
            if char_to_code.insert(c, code).is_some() {
                return Err(GenderizeError::Config(format!(
                    "character '{}' appears twice in the alphabet",
                    c
                )));
            }
            ordered.push(c);
        }
        if ordered.is_empty() {
            return Err(GenderizeError::Config("alphabet must not be empty".into()));
        }
        Ok(CharVocabulary {
            chars: ordered,
            char_to_code,
        })
    }

    pub fn from_alphabet(alphabet: &str) -> Result<Self> {
        Self::from_chars(alphabet.chars())
    }

    /// Code for `c`, or [`PAD_CODE`] when it is not in the vocabulary
    pub fn code(&self, c: char) -> i32 {
        self.char_to_code.get(&c).copied().unwrap_or(PAD_CODE)
    }

    pub fn contains(&self, c: char) -> bool {
        self.char_to_code.contains_key(&c)
    }

    /// Character for a code, `None` for the reserved code or out of range
    pub fn char_for(&self, code: i32) -> Option<char> {
        if code < 1 {
            return None;
        }
        self.chars.get(code as usize - 1).copied()
    }

    /// Number of permitted characters
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Number of distinct codes, including the reserved one
    pub fn code_space(&self) -> usize {
        self.chars.len() + 1
    }
}
