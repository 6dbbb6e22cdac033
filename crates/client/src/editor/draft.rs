//! View-model types for the product edit session.
//!
//! These are deliberately distinct from the server shapes in
//! `backoffice-core`: they carry transient editing state (the soft-delete
//! flag, staged-file-vs-URL image unions) that the server never stores, and
//! they map explicitly in each direction - server to view on load, view to
//! wire on submit.

use backoffice_core::{
    AttributeId, CategoryId, Dimensions, InformationId, Product, ProductAttribute,
    ProductInformation, ProductVariant, VariantId,
};
use rust_decimal::Decimal;

use crate::multipart::FileUpload;

use super::collection::{EntityCollection, SoftDelete};

/// Sentinel variant name for products without real variant differentiation.
///
/// The backend always stores a variant list; the simple case rides through
/// the same wire shape as the advanced case under this name.
pub const NO_VARIANT: &str = "no_variant";

/// A variant's image during editing: untouched, already on the server, or a
/// newly staged upload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum VariantImage {
    #[default]
    None,
    /// Persisted URL; serialized as "no change" (no field sent).
    Existing(String),
    /// Staged file; serialized as a binary field.
    Staged(FileUpload),
}

/// One variant row under edit.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantDraft {
    /// Server identity; absent until the first successful round-trip.
    pub id: Option<VariantId>,
    pub name: String,
    pub price: Decimal,
    pub stock: u32,
    pub image: VariantImage,
    /// Pending server-side deletion; never rendered in edit affordances.
    pub deleted: bool,
}

impl VariantDraft {
    /// The implicit single variant of a product without real variants.
    #[must_use]
    pub fn sentinel() -> Self {
        Self {
            id: None,
            name: NO_VARIANT.to_owned(),
            price: Decimal::ZERO,
            stock: 0,
            image: VariantImage::None,
            deleted: false,
        }
    }

    fn from_server(variant: &ProductVariant) -> Self {
        Self {
            id: Some(variant.id),
            name: variant.name.clone(),
            price: variant.price,
            stock: variant.stock,
            image: variant
                .image
                .clone()
                .map_or(VariantImage::None, VariantImage::Existing),
            deleted: false,
        }
    }
}

impl SoftDelete for VariantDraft {
    fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    fn is_deleted(&self) -> bool {
        self.deleted
    }

    fn mark_deleted(&mut self) {
        self.deleted = true;
    }
}

/// One attribute row under edit.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeDraft {
    pub id: Option<AttributeId>,
    pub name: String,
    /// Ordered, distinct option values.
    pub values: Vec<String>,
    pub deleted: bool,
}

impl AttributeDraft {
    /// Create a fresh attribute with no server identity.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            values: Vec::new(),
            deleted: false,
        }
    }

    fn from_server(attribute: &ProductAttribute) -> Self {
        Self {
            id: Some(attribute.id),
            name: attribute.name.clone(),
            values: attribute.values.clone(),
            deleted: false,
        }
    }

    /// Add an option value, trimmed. Empty input and duplicates are ignored
    /// (adding an existing value twice deduplicates, it does not error).
    /// Returns whether the value was added.
    pub fn add_value(&mut self, raw: &str) -> bool {
        let trimmed = raw.trim();
        if trimmed.is_empty() || self.values.iter().any(|v| v == trimmed) {
            return false;
        }
        self.values.push(trimmed.to_owned());
        true
    }

    /// Remove the option value at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of bounds.
    pub fn remove_value(&mut self, position: usize) {
        assert!(
            position < self.values.len(),
            "attribute value position {position} out of bounds"
        );
        self.values.remove(position);
    }
}

impl SoftDelete for AttributeDraft {
    fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    fn is_deleted(&self) -> bool {
        self.deleted
    }

    fn mark_deleted(&mut self) {
        self.deleted = true;
    }
}

/// One information row under edit.
#[derive(Debug, Clone, PartialEq)]
pub struct InformationDraft {
    pub id: Option<InformationId>,
    pub name: String,
    pub description: String,
    pub deleted: bool,
}

impl InformationDraft {
    fn from_server(information: &ProductInformation) -> Self {
        Self {
            id: Some(information.id),
            name: information.name.clone(),
            description: information.description.clone(),
            deleted: false,
        }
    }
}

impl SoftDelete for InformationDraft {
    fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    fn is_deleted(&self) -> bool {
        self.deleted
    }

    fn mark_deleted(&mut self) {
        self.deleted = true;
    }
}

/// The complete in-memory form state of one product edit session.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    /// Present when editing a persisted product; drives the update route.
    pub slug: Option<String>,
    pub category: Option<CategoryId>,
    pub sku: String,
    pub name: String,
    pub description: String,
    pub dimensions: Dimensions,
    pub status: bool,
    pub use_variant: bool,
    /// Newly staged image uploads.
    pub images: Vec<FileUpload>,
    /// Persisted image URLs to retain on update.
    pub keep_images: Vec<String>,
    pub variants: EntityCollection<VariantDraft>,
    pub attributes: EntityCollection<AttributeDraft>,
    pub informations: EntityCollection<InformationDraft>,
    pub tags: Vec<String>,
}

impl ProductDraft {
    /// A fresh draft for product creation.
    ///
    /// Starts in single-variant mode, so the collection holds exactly one
    /// sentinel variant carrying the product's price and stock.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slug: None,
            category: None,
            sku: String::new(),
            name: String::new(),
            description: String::new(),
            dimensions: Dimensions {
                weight: Decimal::ZERO,
                height: None,
                width: None,
                length: None,
            },
            status: true,
            use_variant: false,
            images: Vec::new(),
            keep_images: Vec::new(),
            variants: EntityCollection::from_values([VariantDraft::sentinel()]),
            attributes: EntityCollection::new(),
            informations: EntityCollection::new(),
            tags: Vec::new(),
        }
    }

    /// Normalized form defaults for editing a loaded product.
    ///
    /// Existing images move to `keep_images`; every child entity keeps its
    /// server identity and starts with a clear deleted flag.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            slug: Some(product.slug.clone()),
            category: Some(product.category_id),
            sku: product.sku.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            dimensions: product.dimensions.clone(),
            status: product.status,
            use_variant: product.use_variant,
            images: Vec::new(),
            keep_images: product.images.clone(),
            variants: EntityCollection::from_values(
                product.variants.iter().map(VariantDraft::from_server),
            ),
            attributes: EntityCollection::from_values(
                product.attributes.iter().map(AttributeDraft::from_server),
            ),
            informations: EntityCollection::from_values(
                product
                    .informations
                    .iter()
                    .map(InformationDraft::from_server),
            ),
            tags: product.tags.clone(),
        }
    }

    /// Add a tag, trimmed; empty input and duplicates are ignored.
    pub fn add_tag(&mut self, raw: &str) -> bool {
        let trimmed = raw.trim();
        if trimmed.is_empty() || self.tags.iter().any(|t| t == trimmed) {
            return false;
        }
        self.tags.push(trimmed.to_owned());
        true
    }
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self::new()
    }
}
