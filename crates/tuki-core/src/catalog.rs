use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// A product category as the storefront shows it.
///
/// Serializes to the backend's canonical shape (`nombre`, `descripcion`,
/// `urlImagen`), so adapting that output again yields the same value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "urlImagen")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "precio")]
    pub price: f64,
    pub stock: u64,
    #[serde(rename = "urlImagen")]
    pub image_url: Option<String>,
    #[serde(rename = "categoriaId")]
    pub category_id: Option<u64>,
    #[serde(rename = "categoriaNombre")]
    pub category_name: String,
    #[serde(rename = "disponible")]
    pub available: bool,
}

impl Product {
    /// Available and with at least one unit left.
    #[must_use]
    pub fn is_purchasable(&self) -> bool {
        self.available && self.stock > 0
    }
}

/// Body sent when creating or updating a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryInput {
    pub nombre: String,
    pub descripcion: String,
    #[serde(rename = "urlImagen")]
    pub url_imagen: String,
}

impl CategoryInput {
    /// Trims and validates the form values.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when a field is blank or the image URL
    /// does not parse.
    pub fn new(name: &str, description: &str, image_url: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            nombre: required("name", name)?,
            descripcion: required("description", description)?,
            url_imagen: image_url_field(image_url)?,
        })
    }
}

/// Body sent when creating or updating a product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductInput {
    pub nombre: String,
    pub descripcion: String,
    pub precio: f64,
    pub stock: u64,
    #[serde(rename = "urlImagen")]
    pub url_imagen: String,
    #[serde(rename = "categoriaId")]
    pub categoria_id: u64,
}

impl ProductInput {
    /// Trims and validates the form values.
    ///
    /// The category must be one of `known_categories`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] for blank fields, a price that is not
    /// greater than zero, a negative stock, an unknown category or an image
    /// URL that does not parse.
    pub fn new(
        name: &str,
        description: &str,
        price: f64,
        stock: i64,
        category_id: u64,
        image_url: &str,
        known_categories: &[Category],
    ) -> Result<Self, ValidationError> {
        let nombre = required("name", name)?;
        let descripcion = required("description", description)?;

        if !price.is_finite() || price <= 0.0 {
            return Err(ValidationError::Invalid {
                field: "price",
                reason: "must be greater than 0".to_string(),
            });
        }

        let stock = u64::try_from(stock).map_err(|_| ValidationError::Invalid {
            field: "stock",
            reason: "must be 0 or more".to_string(),
        })?;

        if !known_categories.iter().any(|c| c.id == category_id) {
            return Err(ValidationError::Invalid {
                field: "category",
                reason: format!("no category with id {category_id}"),
            });
        }

        Ok(Self {
            nombre,
            descripcion,
            precio: price,
            stock,
            url_imagen: image_url_field(image_url)?,
            categoria_id: category_id,
        })
    }
}

fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(trimmed.to_string())
}

fn image_url_field(value: &str) -> Result<String, ValidationError> {
    let trimmed = required("image URL", value)?;
    url::Url::parse(&trimmed).map_err(|e| ValidationError::Invalid {
        field: "image URL",
        reason: e.to_string(),
    })?;
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bebidas() -> Category {
        Category {
            id: 5,
            name: "Bebidas".into(),
            description: "Frías".into(),
            image_url: None,
        }
    }

    #[test]
    fn category_serializes_to_backend_shape() {
        let json = serde_json::to_value(bebidas()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 5,
                "nombre": "Bebidas",
                "descripcion": "Frías",
                "urlImagen": null
            })
        );
    }

    #[test]
    fn category_input_trims_fields() {
        let input =
            CategoryInput::new("  Postres ", " Dulces ", " https://cdn.test/p.png ").unwrap();
        assert_eq!(input.nombre, "Postres");
        assert_eq!(input.descripcion, "Dulces");
        assert_eq!(input.url_imagen, "https://cdn.test/p.png");
    }

    #[test]
    fn category_input_requires_name() {
        let err = CategoryInput::new("  ", "x", "https://cdn.test/p.png").unwrap_err();
        assert_eq!(err, ValidationError::Required("name"));
    }

    #[test]
    fn category_input_rejects_relative_image_url() {
        let err = CategoryInput::new("Postres", "x", "img/p.png").unwrap_err();
        assert!(matches!(err, ValidationError::Invalid { field: "image URL", .. }));
    }

    #[test]
    fn product_input_serializes_backend_field_names() {
        let input = ProductInput::new(
            "Pizza",
            "Muzzarella",
            1500.0,
            3,
            5,
            "https://cdn.test/pizza.png",
            &[bebidas()],
        )
        .unwrap();
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["categoriaId"], 5);
        assert_eq!(json["urlImagen"], "https://cdn.test/pizza.png");
        assert_eq!(json["precio"], 1500.0);
    }

    #[test]
    fn product_input_rejects_zero_price() {
        let err = ProductInput::new("Pizza", "x", 0.0, 1, 5, "https://cdn.test/a.png", &[bebidas()])
            .unwrap_err();
        assert!(matches!(err, ValidationError::Invalid { field: "price", .. }));
    }

    #[test]
    fn product_input_rejects_negative_stock() {
        let err =
            ProductInput::new("Pizza", "x", 10.0, -1, 5, "https://cdn.test/a.png", &[bebidas()])
                .unwrap_err();
        assert!(matches!(err, ValidationError::Invalid { field: "stock", .. }));
    }

    #[test]
    fn product_input_rejects_unknown_category() {
        let err =
            ProductInput::new("Pizza", "x", 10.0, 1, 99, "https://cdn.test/a.png", &[bebidas()])
                .unwrap_err();
        assert!(matches!(err, ValidationError::Invalid { field: "category", .. }));
    }

    #[test]
    fn purchasable_requires_stock_and_availability() {
        let mut product = Product {
            id: 1,
            name: "Pizza".into(),
            description: String::new(),
            price: 10.0,
            stock: 0,
            image_url: None,
            category_id: None,
            category_name: "Uncategorized".into(),
            available: true,
        };
        assert!(!product.is_purchasable());
        product.stock = 2;
        assert!(product.is_purchasable());
        product.available = false;
        assert!(!product.is_purchasable());
    }
}
