//! Alias-driven field access over a JSON object.
//!
//! Each accessor takes an ordered list of alias keys and returns the first
//! one whose value survives the matching primitive normalizer. A key holding
//! `""` or `"abc"` where a number is expected does not stop the search.

use serde_json::{Map, Value};

use crate::primitives::{
    normalize_boolean, normalize_id, normalize_number, normalize_string, BooleanVocabulary,
};

#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> Record<'a> {
    /// `None` unless `value` is a JSON object.
    #[must_use]
    pub fn new(value: &'a Value) -> Option<Self> {
        value.as_object().map(|map| Self { map })
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|v| !v.is_null())
    }

    /// `true` if any of `keys` is present with a non-null value.
    #[must_use]
    pub fn has_any(&self, keys: &[&str]) -> bool {
        keys.iter().any(|key| self.get(key).is_some())
    }

    /// The first present, non-null value among `keys`, un-normalized.
    #[must_use]
    pub fn first(&self, keys: &[&str]) -> Option<&'a Value> {
        keys.iter().find_map(|key| self.get(key))
    }

    /// The first of `keys` holding a nested object.
    #[must_use]
    pub fn nested(&self, keys: &[&str]) -> Option<Record<'a>> {
        keys.iter()
            .find_map(|key| self.get(key).and_then(Record::new))
    }

    #[must_use]
    pub fn string(&self, keys: &[&str]) -> Option<String> {
        keys.iter()
            .find_map(|key| self.get(key).and_then(normalize_string))
    }

    #[must_use]
    pub fn number(&self, keys: &[&str]) -> Option<f64> {
        keys.iter()
            .find_map(|key| self.get(key).and_then(normalize_number))
    }

    #[must_use]
    pub fn boolean(&self, keys: &[&str]) -> Option<bool> {
        self.boolean_with(keys, BooleanVocabulary::standard())
    }

    #[must_use]
    pub fn boolean_with(&self, keys: &[&str], vocabulary: &BooleanVocabulary) -> Option<bool> {
        keys.iter()
            .find_map(|key| self.get(key).and_then(|v| normalize_boolean(v, vocabulary)))
    }

    #[must_use]
    pub fn id(&self, keys: &[&str]) -> Option<u64> {
        keys.iter().find_map(|key| self.get(key).and_then(normalize_id))
    }

    /// Non-negative integer, truncating fractions and clamping negatives to 0.
    #[must_use]
    pub fn count(&self, keys: &[&str]) -> Option<u64> {
        self.number(keys).map(truncate_non_negative)
    }

    /// Looks up `(parent, child)` pairs, e.g. `("categoria", "id")`.
    ///
    /// Parents that are not objects are skipped.
    #[must_use]
    pub fn nested_string(&self, paths: &[(&str, &str)]) -> Option<String> {
        paths.iter().find_map(|(parent, child)| {
            self.get(parent)
                .and_then(Record::new)
                .and_then(|nested| nested.string(&[*child]))
        })
    }

    #[must_use]
    pub fn nested_id(&self, paths: &[(&str, &str)]) -> Option<u64> {
        paths.iter().find_map(|(parent, child)| {
            self.get(parent)
                .and_then(Record::new)
                .and_then(|nested| nested.id(&[*child]))
        })
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub(crate) fn truncate_non_negative(value: f64) -> u64 {
    if value <= 0.0 {
        0
    } else {
        value.trunc().min(u64::MAX as f64) as u64
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn new_rejects_non_objects() {
        assert!(Record::new(&json!([1])).is_none());
        assert!(Record::new(&json!("x")).is_none());
        assert!(Record::new(&json!({})).is_some());
    }

    #[test]
    fn string_skips_unusable_aliases() {
        let value = json!({ "nombre": "   ", "name": "Pizza" });
        let record = Record::new(&value).unwrap();
        assert_eq!(record.string(&["nombre", "name"]), Some("Pizza".into()));
        assert_eq!(record.string(&["titulo"]), None);
    }

    #[test]
    fn number_and_count_normalize() {
        let value = json!({ "precio": "abc", "price": "12,5", "stock": -3, "cantidad": 4.8 });
        let record = Record::new(&value).unwrap();
        assert_eq!(record.number(&["precio", "price"]), Some(12.5));
        assert_eq!(record.count(&["stock"]), Some(0));
        assert_eq!(record.count(&["cantidad"]), Some(4));
    }

    #[test]
    fn nested_paths_skip_non_objects() {
        let value = json!({ "categoria": "Bebidas", "category": { "id": "7", "name": "Drinks" } });
        let record = Record::new(&value).unwrap();
        assert_eq!(
            record.nested_id(&[("categoria", "id"), ("category", "id")]),
            Some(7)
        );
        assert_eq!(
            record.nested_string(&[("categoria", "nombre"), ("category", "name")]),
            Some("Drinks".into())
        );
    }

    #[test]
    fn null_values_count_as_absent() {
        let value = json!({ "id": null, "ID": 4 });
        let record = Record::new(&value).unwrap();
        assert_eq!(record.id(&["id", "ID"]), Some(4));
        assert!(!record.has_any(&["id"]));
        assert_eq!(record.first(&["id", "ID"]), Some(&json!(4)));
    }
}
