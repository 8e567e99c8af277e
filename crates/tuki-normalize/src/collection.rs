//! Locating the list of records inside an arbitrary response body.

use serde_json::Value;

/// Container keys probed when a caller does not supply its own.
pub const DEFAULT_COLLECTION_KEYS: &[&str] = &[
    "data",
    "items",
    "results",
    "content",
    "lista",
    "list",
    "values",
    "rows",
    "orders",
    "order",
    "pedidos",
    "pedido",
    "productos",
    "producto",
    "categories",
    "category",
];

/// How [`unwrap_collection`] searches an object payload.
#[derive(Debug, Clone, Copy)]
pub struct UnwrapOptions<'a> {
    pub candidates: &'a [&'a str],
    /// Treat a candidate key holding a single object as a one-element list.
    pub unwrap_nested_object: bool,
    /// Fall back to the payload object itself as a one-element list.
    pub include_source_object: bool,
}

impl Default for UnwrapOptions<'_> {
    fn default() -> Self {
        Self {
            candidates: DEFAULT_COLLECTION_KEYS,
            unwrap_nested_object: false,
            include_source_object: false,
        }
    }
}

impl<'a> UnwrapOptions<'a> {
    #[must_use]
    pub fn with_candidates(candidates: &'a [&'a str]) -> Self {
        Self {
            candidates,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn unwrap_nested_object(mut self, enabled: bool) -> Self {
        self.unwrap_nested_object = enabled;
        self
    }

    #[must_use]
    pub fn include_source_object(mut self, enabled: bool) -> Self {
        self.include_source_object = enabled;
        self
    }
}

/// Returns the records held by `value`.
///
/// Arrays are returned as-is. For objects, every candidate key is first
/// checked for an array; only then, if enabled, for a nested object; and
/// finally, if enabled, the object itself is returned. Anything else is an
/// empty list.
#[must_use]
pub fn unwrap_collection<'v>(value: &'v Value, options: &UnwrapOptions<'_>) -> Vec<&'v Value> {
    let map = match value {
        Value::Array(items) => return items.iter().collect(),
        Value::Object(map) => map,
        _ => return Vec::new(),
    };

    if let Some(items) = options
        .candidates
        .iter()
        .find_map(|key| map.get(*key).and_then(Value::as_array))
    {
        return items.iter().collect();
    }

    if options.unwrap_nested_object {
        if let Some(nested) = options
            .candidates
            .iter()
            .filter_map(|key| map.get(*key))
            .find(|candidate| candidate.is_object())
        {
            return vec![nested];
        }
    }

    if options.include_source_object {
        return vec![value];
    }

    Vec::new()
}
