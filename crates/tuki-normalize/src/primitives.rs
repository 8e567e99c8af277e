//! Scalar normalizers for loosely-typed backend JSON.
//!
//! Every function here is total: unrecognised input yields `None`, never an
//! error. Callers decide what a missing value means.

use std::collections::HashSet;
use std::sync::LazyLock;

use serde_json::Value;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

const DEFAULT_TRUTHY: &[&str] = &[
    "true",
    "1",
    "yes",
    "y",
    "si",
    "sí",
    "activo",
    "activa",
    "activos",
    "activas",
    "disponible",
    "disponibles",
    "habilitado",
    "habilitada",
    "habilitados",
    "habilitadas",
    "enabled",
    "available",
];

const DEFAULT_FALSY: &[&str] = &[
    "false",
    "0",
    "no",
    "inactive",
    "inactivo",
    "inactiva",
    "inactivos",
    "inactivas",
    "no disponible",
    "no disponibles",
    "deshabilitado",
    "deshabilitada",
    "deshabilitados",
    "deshabilitadas",
    "disabled",
    "eliminado",
    "eliminada",
    "eliminados",
    "eliminadas",
];

static DEFAULT_VOCABULARY: LazyLock<BooleanVocabulary> = LazyLock::new(|| BooleanVocabulary {
    truthy: DEFAULT_TRUTHY.iter().map(|s| (*s).to_string()).collect(),
    falsy: DEFAULT_FALSY.iter().map(|s| (*s).to_string()).collect(),
});

/// Words accepted as `true`/`false` by [`normalize_boolean`].
#[derive(Debug, Clone)]
pub struct BooleanVocabulary {
    truthy: HashSet<String>,
    falsy: HashSet<String>,
}

impl BooleanVocabulary {
    /// The shared Spanish/English default word lists.
    #[must_use]
    pub fn standard() -> &'static BooleanVocabulary {
        &DEFAULT_VOCABULARY
    }

    /// The default lists plus call-site specific words.
    ///
    /// Extra words are trimmed and lowercased before insertion.
    #[must_use]
    pub fn extended(truthy: &[&str], falsy: &[&str]) -> Self {
        let mut vocabulary = DEFAULT_VOCABULARY.clone();
        vocabulary
            .truthy
            .extend(truthy.iter().map(|w| w.trim().to_lowercase()));
        vocabulary
            .falsy
            .extend(falsy.iter().map(|w| w.trim().to_lowercase()));
        vocabulary
    }
}

/// Trimmed non-empty string, or a finite number rendered as text.
#[must_use]
pub fn normalize_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => number_to_string(n),
        _ => None,
    }
}

/// Finite number, accepting strings with a comma as decimal separator.
#[must_use]
pub fn normalize_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed
                .replace(',', ".")
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
        }
        _ => None,
    }
}

/// Booleans, `1`/`0`, or a word from the vocabulary (case-insensitive).
///
/// Truthy words win when a word appears in both lists.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn normalize_boolean(value: &Value, vocabulary: &BooleanVocabulary) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f == 1.0 => Some(true),
            Some(f) if f == 0.0 => Some(false),
            _ => None,
        },
        Value::String(s) => {
            let word = s.trim().to_lowercase();
            if word.is_empty() {
                None
            } else if vocabulary.truthy.contains(&word) {
                Some(true)
            } else if vocabulary.falsy.contains(&word) {
                Some(false)
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Non-negative integer id from a number or the leading digits of a string.
///
/// Fractional numbers and negative values are rejected.
#[must_use]
pub fn normalize_id(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(integral_id)),
        Value::String(s) => {
            let trimmed = s.trim_start();
            let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
            let digits: String = unsigned.chars().take_while(char::is_ascii_digit).collect();
            digits.parse::<u64>().ok()
        }
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn integral_id(f: f64) -> Option<u64> {
    (f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= 9_007_199_254_740_991.0)
        .then_some(f as u64)
}

/// Lowercased, trimmed text with diacritics removed (`"En Preparación "` → `"en preparacion"`).
#[must_use]
pub fn normalize_status_text(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .trim()
        .to_string()
}

/// Renders a JSON number the way the backend's JavaScript clients print it:
/// integral floats lose their `.0`.
#[allow(clippy::cast_possible_truncation)]
fn number_to_string(n: &serde_json::Number) -> Option<String> {
    if n.is_i64() || n.is_u64() {
        return Some(n.to_string());
    }
    let f = n.as_f64().filter(|f| f.is_finite())?;
    if f.fract() == 0.0 && f.abs() < 1e15 {
        return Some((f as i64).to_string());
    }
    Some(f.to_string())
}
