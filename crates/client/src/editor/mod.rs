//! The product edit session.
//!
//! A [`ProductEditor`] owns one exclusive [`ProductDraft`] between load (or
//! creation) and submit. All collection mutations are synchronous; the only
//! asynchronous operation is [`submit`](ProductEditor::submit), which
//! validates, serializes, and performs the network round-trip. Dropping the
//! editor discards partial edits without persisting anything.
//!
//! # Example
//!
//! ```rust,ignore
//! use backoffice_client::editor::{ProductEditor, VariantInput, VariantMode};
//!
//! let mut editor = ProductEditor::edit(&product);
//! editor.set_variant_mode(VariantMode::Multiple);
//! editor.add_variant(VariantInput {
//!     name: "Red / 64GB".into(),
//!     price: price,
//!     stock: 3,
//!     image: None,
//! });
//! let saved = editor.submit(&client).await?;
//! ```

mod collection;
mod draft;
mod validate;

pub use collection::{EntityCollection, EntryKey, SoftDelete};
pub use draft::{
    AttributeDraft, InformationDraft, NO_VARIANT, ProductDraft, VariantDraft, VariantImage,
};
pub use validate::validate_draft;

use backoffice_core::Product;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::api::{ApiClient, ApiError};
use crate::multipart::FileUpload;
use crate::validate::ValidationError;

/// Variant editing mode of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantMode {
    /// One implicit variant named [`NO_VARIANT`] carries the product's
    /// price and stock.
    Single,
    /// Explicit, user-managed variant list.
    Multiple,
}

/// Fields of one variant add/edit dialog.
#[derive(Debug, Clone)]
pub struct VariantInput {
    pub name: String,
    pub price: Decimal,
    pub stock: u32,
    /// A newly staged image; `None` leaves the current image untouched.
    pub image: Option<FileUpload>,
}

/// Fields of one attribute add/edit dialog.
#[derive(Debug, Clone)]
pub struct AttributeInput {
    pub name: String,
    pub values: Vec<String>,
}

/// Fields of one information add/edit dialog.
#[derive(Debug, Clone)]
pub struct InformationInput {
    pub name: String,
    pub description: String,
}

/// Why a submission did not reach, or was refused by, the server.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Local constraints failed; no network call was made.
    #[error("validation failed ({} issue(s))", .0.len())]
    Validation(Vec<ValidationError>),
    /// The server rejected the request or the transport failed. Draft state
    /// is untouched, so the caller can retry without re-entering data.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// One product edit session.
#[derive(Debug, Clone, Default)]
pub struct ProductEditor {
    draft: ProductDraft,
    /// Sentinel variant cleared by the last SINGLE -> MULTIPLE switch, kept
    /// so switching straight back restores the original record.
    collapsed_single: Option<VariantDraft>,
}

impl ProductEditor {
    /// Start a session for a new product.
    #[must_use]
    pub fn create() -> Self {
        Self {
            draft: ProductDraft::new(),
            collapsed_single: None,
        }
    }

    /// Start a session editing a loaded product.
    #[must_use]
    pub fn edit(product: &Product) -> Self {
        Self {
            draft: ProductDraft::from_product(product),
            collapsed_single: None,
        }
    }

    /// The current draft.
    #[must_use]
    pub const fn draft(&self) -> &ProductDraft {
        &self.draft
    }

    /// Mutable access to scalar draft fields (name, sku, dimensions, ...).
    ///
    /// Entity collections should be mutated through the editor's methods so
    /// soft-delete and mode invariants hold.
    pub const fn draft_mut(&mut self) -> &mut ProductDraft {
        &mut self.draft
    }

    // =========================================================================
    // Variant mode
    // =========================================================================

    /// The current variant mode.
    #[must_use]
    pub const fn variant_mode(&self) -> VariantMode {
        if self.draft.use_variant {
            VariantMode::Multiple
        } else {
            VariantMode::Single
        }
    }

    /// Switch variant modes. Setting the current mode again is a no-op.
    ///
    /// `SINGLE -> MULTIPLE`: a lone sentinel-named variant is cleared (and
    /// stashed) so the user starts from an empty list; anything else is left
    /// untouched.
    ///
    /// `MULTIPLE -> SINGLE`: an empty list gets its stashed sentinel back
    /// (or a zeroed one on a fresh session); a non-empty list collapses to
    /// its first variant, keeping that variant's name when it has one and
    /// falling back to the sentinel. Later variants are discarded outright -
    /// a deliberate simplification of the product form.
    pub fn set_variant_mode(&mut self, mode: VariantMode) {
        if mode == self.variant_mode() {
            return;
        }

        match mode {
            VariantMode::Multiple => {
                self.draft.use_variant = true;
                let lone_sentinel = self.draft.variants.len() == 1
                    && self
                        .draft
                        .variants
                        .get(0)
                        .is_some_and(|v| v.name == NO_VARIANT);
                if lone_sentinel {
                    self.collapsed_single = Some(self.draft.variants.remove_at(0));
                }
            }
            VariantMode::Single => {
                self.draft.use_variant = false;
                if self.draft.variants.is_empty() {
                    let restored = self
                        .collapsed_single
                        .take()
                        .unwrap_or_else(VariantDraft::sentinel);
                    self.draft.variants.append(restored);
                } else {
                    self.collapsed_single = None;
                    self.draft.variants.truncate(1);
                    if let Some(first) = self.draft.variants.get_mut(0)
                        && first.name.is_empty()
                    {
                        first.name = NO_VARIANT.to_owned();
                    }
                }
            }
        }
    }

    /// The implicit variant carrying price and stock in single mode.
    #[must_use]
    pub fn single_variant(&self) -> Option<&VariantDraft> {
        self.draft.variants.get(0)
    }

    /// Set the single-mode price.
    pub fn set_single_price(&mut self, price: Decimal) {
        if let Some(variant) = self.draft.variants.get_mut(0) {
            variant.price = price;
        }
    }

    /// Set the single-mode stock.
    pub fn set_single_stock(&mut self, stock: u32) {
        if let Some(variant) = self.draft.variants.get_mut(0) {
            variant.stock = stock;
        }
    }

    // =========================================================================
    // Variants
    // =========================================================================

    /// Append a new variant with no server identity.
    pub fn add_variant(&mut self, input: VariantInput) -> EntryKey {
        self.draft.variants.append(VariantDraft {
            id: None,
            name: input.name.trim().to_owned(),
            price: input.price,
            stock: input.stock,
            image: input.image.map_or(VariantImage::None, VariantImage::Staged),
            deleted: false,
        })
    }

    /// Replace the visible fields of the variant at `position`, keeping its
    /// server identity and current image unless a new one was staged.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of bounds.
    pub fn update_variant(&mut self, position: usize, input: VariantInput) {
        let previous = self
            .draft
            .variants
            .get(position)
            .unwrap_or_else(|| panic!("variant position {position} out of bounds"))
            .clone();
        self.draft.variants.update_at(
            position,
            VariantDraft {
                id: previous.id,
                name: input.name.trim().to_owned(),
                price: input.price,
                stock: input.stock,
                image: input
                    .image
                    .map_or(previous.image, VariantImage::Staged),
                deleted: previous.deleted,
            },
        );
    }

    /// Delete-intent for the variant at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of bounds.
    pub fn delete_variant(&mut self, position: usize) {
        self.draft.variants.delete_at(position);
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    /// Append a new attribute with no server identity. Values are trimmed
    /// and deduplicated.
    pub fn add_attribute(&mut self, input: AttributeInput) -> EntryKey {
        self.draft.attributes.append(build_attribute(None, false, input))
    }

    /// Replace the visible fields of the attribute at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of bounds.
    pub fn update_attribute(&mut self, position: usize, input: AttributeInput) {
        let previous = self
            .draft
            .attributes
            .get(position)
            .unwrap_or_else(|| panic!("attribute position {position} out of bounds"));
        let (id, deleted) = (previous.id, previous.deleted);
        self.draft
            .attributes
            .update_at(position, build_attribute(id, deleted, input));
    }

    /// Delete-intent for the attribute at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of bounds.
    pub fn delete_attribute(&mut self, position: usize) {
        self.draft.attributes.delete_at(position);
    }

    // =========================================================================
    // Informations
    // =========================================================================

    /// Append a new information entry with no server identity.
    pub fn add_information(&mut self, input: InformationInput) -> EntryKey {
        self.draft.informations.append(InformationDraft {
            id: None,
            name: input.name,
            description: input.description,
            deleted: false,
        })
    }

    /// Replace the visible fields of the information entry at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of bounds.
    pub fn update_information(&mut self, position: usize, input: InformationInput) {
        let previous = self
            .draft
            .informations
            .get(position)
            .unwrap_or_else(|| panic!("information position {position} out of bounds"));
        let (id, deleted) = (previous.id, previous.deleted);
        self.draft.informations.update_at(
            position,
            InformationDraft {
                id,
                name: input.name,
                description: input.description,
                deleted,
            },
        );
    }

    /// Delete-intent for the information entry at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of bounds.
    pub fn delete_information(&mut self, position: usize) {
        self.draft.informations.delete_at(position);
    }

    // =========================================================================
    // Submission
    // =========================================================================

    /// Check all field and cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns every violation when the draft is not submittable.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let errors = validate_draft(&self.draft);
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Validate, serialize, and submit the draft.
    ///
    /// Creates when the draft has no slug, updates otherwise. On success the
    /// draft is rebound to the server's response, so freshly created child
    /// entities pick up their identities. On failure the draft is untouched.
    ///
    /// Taking `&mut self` makes the session single-flight: a second submit
    /// cannot start while one is in progress.
    ///
    /// # Errors
    ///
    /// [`SubmitError::Validation`] before any network call, or
    /// [`SubmitError::Api`] when the request fails or is rejected.
    pub async fn submit(&mut self, client: &ApiClient) -> Result<Product, SubmitError> {
        self.validate().map_err(SubmitError::Validation)?;

        let product = if self.draft.slug.is_some() {
            client.update_product(&self.draft).await?
        } else {
            client.create_product(&self.draft).await?
        };

        self.draft = ProductDraft::from_product(&product);
        self.collapsed_single = None;

        Ok(product)
    }
}

fn build_attribute(
    id: Option<backoffice_core::AttributeId>,
    deleted: bool,
    input: AttributeInput,
) -> AttributeDraft {
    let mut attribute = AttributeDraft::new(input.name.trim().to_owned());
    attribute.id = id;
    attribute.deleted = deleted;
    for value in &input.values {
        attribute.add_value(value);
    }
    attribute
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use backoffice_core::{AttributeId, VariantId};

    fn variant(name: &str, price: i64, stock: u32) -> VariantInput {
        VariantInput {
            name: name.to_owned(),
            price: Decimal::from(price),
            stock,
            image: None,
        }
    }

    fn persisted_variant(editor: &mut ProductEditor, id: i32, name: &str) {
        editor.add_variant(variant(name, 10, 1));
        let position = editor.draft().variants.len() - 1;
        editor
            .draft_mut()
            .variants
            .get_mut(position)
            .unwrap()
            .id = Some(VariantId::new(id));
    }

    #[test]
    fn test_create_session_starts_in_single_mode() {
        let editor = ProductEditor::create();
        assert_eq!(editor.variant_mode(), VariantMode::Single);
        assert_eq!(editor.single_variant().unwrap().name, NO_VARIANT);
    }

    #[test]
    fn test_single_to_multiple_clears_fresh_sentinel() {
        // A freshly created, never-saved product whose lone variant is the
        // sentinel: switching to multiple empties the list.
        let mut editor = ProductEditor::create();
        editor.set_variant_mode(VariantMode::Multiple);
        assert!(editor.draft().variants.is_empty());
    }

    #[test]
    fn test_single_to_multiple_keeps_real_variants() {
        let mut editor = ProductEditor::create();
        editor.set_variant_mode(VariantMode::Multiple);
        editor.add_variant(variant("Red", 100, 5));
        editor.set_variant_mode(VariantMode::Single);
        editor.set_variant_mode(VariantMode::Multiple);
        // One entry named "Red" is not the lone sentinel: untouched.
        assert_eq!(editor.draft().variants.len(), 1);
        assert_eq!(editor.draft().variants.get(0).unwrap().name, "Red");
    }

    #[test]
    fn test_mode_round_trip_restores_single_record() {
        // SINGLE -> MULTIPLE -> SINGLE with no edits in between reproduces
        // the original single-variant record.
        let mut editor = ProductEditor::create();
        editor.set_single_price(Decimal::from(150_000));
        editor.set_single_stock(12);

        editor.set_variant_mode(VariantMode::Multiple);
        assert!(editor.draft().variants.is_empty());
        editor.set_variant_mode(VariantMode::Single);

        let restored = editor.single_variant().unwrap();
        assert_eq!(restored.name, NO_VARIANT);
        assert_eq!(restored.price, Decimal::from(150_000));
        assert_eq!(restored.stock, 12);
    }

    #[test]
    fn test_multiple_single_multiple_preserves_first_real_variant() {
        // A true single-variant catalog item in multiple mode survives the
        // MULTIPLE -> SINGLE -> MULTIPLE round trip with name, price, and
        // stock intact.
        let mut editor = ProductEditor::create();
        editor.set_variant_mode(VariantMode::Multiple);
        editor.add_variant(variant("Oak / Large", 250, 3));

        editor.set_variant_mode(VariantMode::Single);
        editor.set_variant_mode(VariantMode::Multiple);

        assert_eq!(editor.draft().variants.len(), 1);
        let first = editor.draft().variants.get(0).unwrap();
        assert_eq!(first.name, "Oak / Large");
        assert_eq!(first.price, Decimal::from(250));
        assert_eq!(first.stock, 3);
    }

    #[test]
    fn test_multiple_to_single_collapses_to_first() {
        let mut editor = ProductEditor::create();
        editor.set_variant_mode(VariantMode::Multiple);
        editor.add_variant(variant("Red", 100, 5));
        editor.add_variant(variant("Blue", 120, 2));

        editor.set_variant_mode(VariantMode::Single);

        assert_eq!(editor.draft().variants.len(), 1);
        let first = editor.single_variant().unwrap();
        assert_eq!(first.name, "Red");
        assert_eq!(first.price, Decimal::from(100));
    }

    #[test]
    fn test_setting_current_mode_is_a_no_op() {
        let mut editor = ProductEditor::create();
        editor.set_single_price(Decimal::from(42));
        editor.set_variant_mode(VariantMode::Single);
        assert_eq!(editor.single_variant().unwrap().price, Decimal::from(42));
        assert_eq!(editor.draft().variants.len(), 1);
    }

    #[test]
    fn test_delete_persisted_variant_soft_deletes() {
        let mut editor = ProductEditor::create();
        editor.set_variant_mode(VariantMode::Multiple);
        persisted_variant(&mut editor, 9, "Red");

        editor.delete_variant(0);

        // Delete-intent never shrinks the collection for persisted rows.
        assert_eq!(editor.draft().variants.len(), 1);
        assert!(editor.draft().variants.get(0).unwrap().deleted);
        assert_eq!(editor.draft().variants.active_len(), 0);
    }

    #[test]
    fn test_delete_unpersisted_variant_removes_it() {
        let mut editor = ProductEditor::create();
        editor.set_variant_mode(VariantMode::Multiple);
        editor.add_variant(variant("Red", 100, 5));

        editor.delete_variant(0);

        assert!(editor.draft().variants.is_empty());
    }

    #[test]
    fn test_update_variant_preserves_identity_and_image() {
        let mut editor = ProductEditor::create();
        editor.set_variant_mode(VariantMode::Multiple);
        persisted_variant(&mut editor, 4, "Red");
        editor.draft_mut().variants.get_mut(0).unwrap().image =
            VariantImage::Existing("https://cdn.example.com/red.jpg".to_owned());

        editor.update_variant(0, variant("  Crimson  ", 110, 6));

        let updated = editor.draft().variants.get(0).unwrap();
        assert_eq!(updated.id, Some(VariantId::new(4)));
        assert_eq!(updated.name, "Crimson");
        assert_eq!(
            updated.image,
            VariantImage::Existing("https://cdn.example.com/red.jpg".to_owned())
        );
    }

    #[test]
    fn test_update_variant_stages_new_image() {
        let mut editor = ProductEditor::create();
        editor.set_variant_mode(VariantMode::Multiple);
        editor.add_variant(variant("Red", 100, 5));

        editor.update_variant(
            0,
            VariantInput {
                image: Some(FileUpload::new("red.png", "image/png", vec![1, 2])),
                ..variant("Red", 100, 5)
            },
        );

        assert!(matches!(
            editor.draft().variants.get(0).unwrap().image,
            VariantImage::Staged(_)
        ));
    }

    #[test]
    fn test_attribute_values_deduplicate_through_editor() {
        let mut editor = ProductEditor::create();
        editor.add_attribute(AttributeInput {
            name: "Color".to_owned(),
            values: vec!["Red".to_owned(), "Red".to_owned(), "Blue".to_owned()],
        });

        let attribute = editor.draft().attributes.get(0).unwrap();
        assert_eq!(attribute.values, vec!["Red", "Blue"]);
    }

    #[test]
    fn test_update_attribute_preserves_identity() {
        let mut editor = ProductEditor::create();
        editor.add_attribute(AttributeInput {
            name: "Color".to_owned(),
            values: vec!["Red".to_owned()],
        });
        editor.draft_mut().attributes.get_mut(0).unwrap().id = Some(AttributeId::new(2));

        editor.update_attribute(
            0,
            AttributeInput {
                name: "Finish".to_owned(),
                values: vec!["Matte".to_owned()],
            },
        );

        let attribute = editor.draft().attributes.get(0).unwrap();
        assert_eq!(attribute.id, Some(AttributeId::new(2)));
        assert_eq!(attribute.name, "Finish");
    }

    #[test]
    fn test_validate_blocks_multiple_mode_without_live_variants() {
        let mut editor = ProductEditor::create();
        let draft = editor.draft_mut();
        draft.category = Some(backoffice_core::CategoryId::new(1));
        draft.sku = "SKU-1".to_owned();
        draft.name = "Desk".to_owned();
        draft.description = "A desk".to_owned();

        editor.set_variant_mode(VariantMode::Multiple);
        persisted_variant(&mut editor, 3, "Red");
        editor.delete_variant(0);

        let errors = editor.validate().unwrap_err();
        assert!(
            errors
                .iter()
                .any(|e| e.field == "variants"
                    && e.code == crate::validate::ValidationCode::AtLeastOneVariant)
        );
    }

    #[test]
    fn test_validate_passes_for_complete_single_mode_draft() {
        let mut editor = ProductEditor::create();
        let draft = editor.draft_mut();
        draft.category = Some(backoffice_core::CategoryId::new(1));
        draft.sku = "SKU-1".to_owned();
        draft.name = "Desk".to_owned();
        draft.description = "A desk".to_owned();

        assert!(editor.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_attribute_without_values() {
        let mut editor = ProductEditor::create();
        let draft = editor.draft_mut();
        draft.category = Some(backoffice_core::CategoryId::new(1));
        draft.sku = "SKU-1".to_owned();
        draft.name = "Desk".to_owned();
        draft.description = "A desk".to_owned();

        editor.add_attribute(AttributeInput {
            name: "Color".to_owned(),
            values: vec![],
        });

        let errors = editor.validate().unwrap_err();
        assert!(
            errors
                .iter()
                .any(|e| e.field == "attributes.0.lists"
                    && e.code == crate::validate::ValidationCode::AtLeastOneValue)
        );
    }

    #[test]
    fn test_validate_skips_deleted_entries() {
        let mut editor = ProductEditor::create();
        let draft = editor.draft_mut();
        draft.category = Some(backoffice_core::CategoryId::new(1));
        draft.sku = "SKU-1".to_owned();
        draft.name = "Desk".to_owned();
        draft.description = "A desk".to_owned();

        // A persisted attribute with no values would fail validation, but a
        // deleted one is only a pending server instruction.
        editor.add_attribute(AttributeInput {
            name: "Color".to_owned(),
            values: vec![],
        });
        editor.draft_mut().attributes.get_mut(0).unwrap().id = Some(AttributeId::new(8));
        editor.delete_attribute(0);

        assert!(editor.validate().is_ok());
    }
}
