//! Name normalization
//!
//! Must match the preprocessing the shipped model was trained with:
//! lowercase, accents transliterated, symbols removed, outer whitespace trimmed.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Normalization switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub strip_accents: bool,
    pub strip_symbols: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        NormalizeOptions {
            strip_accents: true,
            strip_symbols: true,
        }
    }
}

/// Normalize a raw name
pub fn normalize_name(raw: &str, options: NormalizeOptions) -> String {
    let lowered = raw.to_lowercase();

    let folded: String = if options.strip_accents {
        lowered
            .nfd()
            .filter(|c| !is_combining_mark(*c))
            .map(fold_special)
            .collect()
    } else {
        lowered
    };

    let kept: String = if options.strip_symbols {
        folded
            .chars()
            .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == ' ')
            .collect()
    } else {
        folded
    };

    kept.trim().to_string()
}

// Letters with no canonical decomposition
fn fold_special(c: char) -> char {
    match c {
        'ø' => 'o',
        'đ' => 'd',
        'ł' => 'l',
        'ı' => 'i',
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(s: &str) -> String {
        normalize_name(s, NormalizeOptions::default())
    }

    #[test]
    fn test_basic_cleanup() {
        assert_eq!(norm("Juan-Pérez"), "juanperez");
        assert_eq!(norm("María José"), "maria jose");
        assert_eq!(norm("Carlos123"), "carlos123");
    }

    #[test]
    fn test_spanish_letters() {
        assert_eq!(norm("Begoña"), "begona");
        assert_eq!(norm("GÜERO"), "guero");
        assert_eq!(norm("  Ángel  "), "angel");
    }

    #[test]
    fn test_empty_and_symbols_only() {
        assert_eq!(norm(""), "");
        assert_eq!(norm("   "), "");
        assert_eq!(norm("--!!"), "");
    }

    #[test]
    fn test_keep_symbols() {
        let options = NormalizeOptions {
            strip_accents: true,
            strip_symbols: false,
        };
        assert_eq!(normalize_name("O'Neil", options), "o'neil");
    }

    #[test]
    fn test_keep_accents() {
        let options = NormalizeOptions {
            strip_accents: false,
            strip_symbols: false,
        };
        assert_eq!(normalize_name("Inés", options), "inés");
    }
}
