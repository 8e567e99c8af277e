use serde_json::Value;
use tuki_core::Category;

use crate::collection::{unwrap_collection, UnwrapOptions};
use crate::record::Record;

const ID: &[&str] = &["id", "ID", "identifier", "categoriaId", "categoryId", "codigo"];
const NAME: &[&str] = &["nombre", "name", "titulo"];
const DESCRIPTION: &[&str] = &["descripcion", "description", "detalle"];
const IMAGE: &[&str] = &["urlImagen", "imagen", "image", "imageUrl", "imagenUrl", "foto"];

const COLLECTION_KEYS: &[&str] = &[
    "categorias",
    "categories",
    "data",
    "items",
    "results",
    "content",
    "lista",
    "list",
    "values",
    "rows",
    "categoria",
    "category",
];

/// Adapts one category record. Rejected without an id and a name.
#[must_use]
pub fn adapt_category(value: &Value) -> Option<Category> {
    let record = Record::new(value)?;

    Some(Category {
        id: record.id(ID)?,
        name: record.string(NAME)?,
        description: record.string(DESCRIPTION).unwrap_or_default(),
        image_url: record.string(IMAGE),
    })
}

/// Adapts every usable category in a response body.
#[must_use]
pub fn adapt_categories(value: &Value) -> Vec<Category> {
    let options = UnwrapOptions::with_candidates(COLLECTION_KEYS).unwrap_nested_object(true);
    unwrap_collection(value, &options)
        .into_iter()
        .filter_map(adapt_category)
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn adapts_string_id_and_missing_image() {
        let category = adapt_category(&json!({ "id": "5", "nombre": "Bebidas", "descripcion": "x" }));
        assert_eq!(
            category,
            Some(Category {
                id: 5,
                name: "Bebidas".into(),
                description: "x".into(),
                image_url: None,
            })
        );
    }

    #[test]
    fn rejects_without_id_or_name() {
        assert!(adapt_category(&json!({ "nombre": "Bebidas" })).is_none());
        assert!(adapt_category(&json!({ "id": 3 })).is_none());
        assert!(adapt_category(&json!({ "id": -3, "nombre": "Bebidas" })).is_none());
        assert!(adapt_category(&json!("Bebidas")).is_none());
        assert!(adapt_category(&json!([{ "id": 1, "nombre": "x" }])).is_none());
    }

    #[test]
    fn english_aliases_are_accepted() {
        let category = adapt_category(&json!({
            "identifier": 8,
            "name": " Postres ",
            "description": "Dulces",
            "imageUrl": "https://cdn.test/postres.png"
        }))
        .unwrap();
        assert_eq!(category.id, 8);
        assert_eq!(category.name, "Postres");
        assert_eq!(category.image_url.as_deref(), Some("https://cdn.test/postres.png"));
    }

    #[test]
    fn list_drops_rejects() {
        let categories = adapt_categories(&json!({
            "categorias": [
                { "id": 1, "nombre": "Pizzas" },
                { "nombre": "Sin id" },
                null,
                { "id": 2, "name": "Empanadas" }
            ]
        }));
        let ids: Vec<u64> = categories.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn single_wrapped_category_is_unwrapped() {
        let categories = adapt_categories(&json!({ "categoria": { "id": 4, "nombre": "Bebidas" } }));
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name, "Bebidas");
    }

    #[test]
    fn serialized_category_is_a_fixed_point() {
        let original = Category {
            id: 12,
            name: "Bebidas".into(),
            description: "Frías".into(),
            image_url: Some("https://cdn.test/b.png".into()),
        };
        let json = serde_json::to_value(&original).unwrap();
        assert_eq!(adapt_category(&json), Some(original));
    }
}
