//! Product domain model.
//!
//! A [`Product`] is the record shape served by the remote catalog API. The console
//! treats it as an opaque value except for the fields it searches and sorts on
//! (`title`, `price`) and the ones it aggregates (`category.id`, `price`).
//! [`ProductDraft`] is the payload sent on create and update.

use serde::{Deserialize, Deserializer, Serialize};

/// Decodes `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A product category as embedded in product records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// A product record as returned by the remote API.
///
/// Missing or `null` fields are tolerated on decode: `price` falls back to `0`,
/// `title` and `description` to an empty string, `images` to an empty list, and
/// the category to `None`. Unknown fields are ignored.
///
/// # Examples
///
/// ```
/// use catalog_console::Product;
///
/// let product: Product = serde_json::from_str(r#"{"id": 7, "title": "Lamp"}"#).unwrap();
/// assert_eq!(product.price, 0.0);
/// assert!(product.category.is_none());
/// assert!(product.images.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<String>,
}

impl Product {
    /// Returns the category id, if the product has a category.
    #[must_use]
    pub fn category_id(&self) -> Option<i64> {
        self.category.as_ref().map(|c| c.id)
    }

    /// Returns the category name, if the product has a category with a non-empty name.
    #[must_use]
    pub fn category_name(&self) -> Option<&str> {
        self.category
            .as_ref()
            .map(|c| c.name.as_str())
            .filter(|name| !name.is_empty())
    }

    /// Builds a product from a draft and the id assigned by the server.
    ///
    /// Used by in-memory transports that have to echo records the way the real API
    /// does. The category name is unknown at this point and left empty.
    #[must_use]
    pub fn from_draft(id: i64, draft: &ProductDraft) -> Self {
        Self {
            id,
            title: draft.title.clone(),
            price: draft.price,
            description: draft.description.clone(),
            category: Some(Category {
                id: draft.category_id,
                name: String::new(),
            }),
            images: draft.images.clone(),
        }
    }
}

/// Create/update payload for the remote API.
///
/// Serializes to `{ "title", "price", "description", "categoryId", "images" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category_id: i64,
    pub images: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_api_record_with_nested_category() {
        let json = r#"{
            "id": 4,
            "title": "Handmade Fresh Table",
            "price": 687,
            "description": "Andy shoes are designed",
            "category": {"id": 5, "name": "Others", "image": "https://x"},
            "images": ["https://placeimg.com/640/480/any"],
            "creationAt": "2023-01-01T00:00:00.000Z"
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, 4);
        assert_eq!(product.price, 687.0);
        assert_eq!(product.category_id(), Some(5));
        assert_eq!(product.category_name(), Some("Others"));
        assert_eq!(product.images.len(), 1);
    }

    #[test]
    fn null_category_decodes_as_none() {
        let product: Product =
            serde_json::from_str(r#"{"id": 1, "title": "A", "price": 1.5, "category": null}"#).unwrap();
        assert!(product.category.is_none());
        assert_eq!(product.category_name(), None);
    }

    #[test]
    fn null_fields_decode_as_defaults() {
        let json = r#"{
            "id": 1,
            "title": null,
            "price": null,
            "description": null,
            "category": {"id": 2, "name": null},
            "images": null
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.title, "");
        assert_eq!(product.price, 0.0);
        assert_eq!(product.description, "");
        assert!(product.images.is_empty());
        assert_eq!(product.category_id(), Some(2));
        assert_eq!(product.category_name(), None);
    }

    #[test]
    fn one_null_description_does_not_fail_the_list() {
        let json = r#"[
            {"id": 1, "title": "A", "price": 5, "description": null, "images": []},
            {"id": 2, "title": "B", "price": 7, "description": "ok", "images": []}
        ]"#;

        let products: Vec<Product> = serde_json::from_str(json).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].description, "");
    }

    #[test]
    fn draft_uses_camel_case_category_key() {
        let draft = ProductDraft {
            title: "Chair".to_string(),
            price: 12.5,
            description: String::new(),
            category_id: 3,
            images: vec!["https://img/1.png".to_string()],
        };

        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["categoryId"], 3);
        assert!(value.get("category_id").is_none());
    }
}
