//! Product entity shapes as the REST backend returns them.
//!
//! These are pure server shapes. Transient editing state (soft-delete flags,
//! staged image files) belongs to the client crate's view models, which map
//! explicitly to and from these types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::category::Category;
use super::flexible::flexible_bool;
use super::id::{AttributeId, CategoryId, InformationId, ProductId, VariantId};

/// A product as returned by `GET /product/{slug}`.
///
/// The backend always stores a variant list: products without real variant
/// differentiation carry a single variant named `no_variant`, so the simple
/// and the advanced case share one wire shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub category_id: CategoryId,
    pub sku: String,
    pub slug: String,
    pub name: String,
    /// Embedded category, present on single-entity reads.
    #[serde(default)]
    pub category: Option<Category>,
    pub description: String,
    /// Physical dimensions, nested under a `dimensions` key.
    pub dimensions: Dimensions,
    #[serde(deserialize_with = "flexible_bool")]
    pub status: bool,
    #[serde(deserialize_with = "flexible_bool")]
    pub use_variant: bool,
    #[serde(default)]
    pub created_by: Option<String>,
    /// Persisted image URLs, in display order.
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
    #[serde(default)]
    pub attributes: Vec<ProductAttribute>,
    #[serde(default)]
    pub informations: Vec<ProductInformation>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Physical dimensions of a product. Weight is always present; the other
/// axes are optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dimensions {
    pub weight: Decimal,
    #[serde(default)]
    pub height: Option<Decimal>,
    #[serde(default)]
    pub width: Option<Decimal>,
    #[serde(default)]
    pub length: Option<Decimal>,
}

/// A purchasable SKU facet (e.g. one color/size combination).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: VariantId,
    pub name: String,
    pub price: Decimal,
    pub stock: u32,
    #[serde(default)]
    pub sold: Option<u32>,
    /// Persisted image URL, if the variant has one.
    #[serde(default)]
    pub image: Option<String>,
}

/// A named set of option values (e.g. "Color" -> ["Red", "Blue"]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductAttribute {
    pub id: AttributeId,
    pub name: String,
    /// Option values; the wire name is `lists`.
    #[serde(rename = "lists")]
    pub values: Vec<String>,
}

/// A named free-text spec entry (e.g. "Warranty" -> "1 year").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductInformation {
    pub id: InformationId,
    pub name: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product_json() -> &'static str {
        r#"{
            "id": 12,
            "category_id": 3,
            "sku": "SKU-001",
            "slug": "walnut-desk",
            "name": "Walnut Desk",
            "description": "A desk.",
            "dimensions": {"weight": "12.5", "height": null, "width": 80, "length": 120},
            "status": 1,
            "use_variant": false,
            "created_by": null,
            "images": ["https://cdn.example.com/a.jpg"],
            "variants": [
                {"id": 7, "name": "no_variant", "price": 150000, "stock": 4, "sold": 1, "image": null}
            ],
            "attributes": [
                {"id": 2, "name": "Finish", "lists": ["Matte", "Gloss"]}
            ],
            "informations": [],
            "tags": ["desk"],
            "created_at": "2025-11-02T08:00:00Z",
            "updated_at": "2025-11-03T08:00:00Z"
        }"#
    }

    #[test]
    fn test_product_deserializes_nested_dimensions() {
        let product: Product = serde_json::from_str(product_json()).expect("product");
        assert_eq!(product.dimensions.weight, Decimal::new(125, 1));
        assert_eq!(product.dimensions.height, None);
        assert_eq!(product.dimensions.width, Some(Decimal::from(80)));
    }

    #[test]
    fn test_product_status_accepts_integer() {
        let product: Product = serde_json::from_str(product_json()).expect("product");
        assert!(product.status);
        assert!(!product.use_variant);
    }

    #[test]
    fn test_attribute_values_use_wire_name_lists() {
        let product: Product = serde_json::from_str(product_json()).expect("product");
        let attribute = product.attributes.first().expect("one attribute");
        assert_eq!(attribute.values, vec!["Matte", "Gloss"]);

        let json = serde_json::to_string(attribute).expect("serialize");
        assert!(json.contains("\"lists\""));
    }

    #[test]
    fn test_missing_collections_default_to_empty() {
        let json = r#"{
            "id": 1, "category_id": 1, "sku": "S", "slug": "s", "name": "N",
            "description": "D", "dimensions": {"weight": 1},
            "status": true, "use_variant": false,
            "created_at": "2025-11-02T08:00:00Z",
            "updated_at": "2025-11-02T08:00:00Z"
        }"#;
        let product: Product = serde_json::from_str(json).expect("product");
        assert!(product.variants.is_empty());
        assert!(product.tags.is_empty());
        assert!(product.category.is_none());
    }
}
