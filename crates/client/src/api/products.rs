//! Product CRUD endpoints and their wire transforms.
//!
//! The domain transforms live here, not in the generic serializer: legacy
//! status flags go out as `1`/`0`, delete markers as `1`/`0`, absent child
//! ids become nulls (and are therefore omitted), and a child image collapses
//! to file-or-null - an unchanged existing URL is dropped to signal "no
//! change".

use backoffice_core::Product;
use tracing::instrument;

use crate::editor::{AttributeDraft, InformationDraft, ProductDraft, VariantDraft, VariantImage};
use crate::multipart::{BoolStyle, FormMap, FormValue};

use super::{ApiClient, ApiError, multipart_form};

impl ApiClient {
    /// List all products.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    #[instrument(skip(self))]
    pub async fn get_products(&self) -> Result<Vec<Product>, ApiError> {
        let response = self.get("/product").await?;
        self.read_envelope(response, "products").await
    }

    /// Get a product by slug.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the product does not exist,
    /// or the response is rejected.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn get_product(&self, slug: &str) -> Result<Product, ApiError> {
        let response = self.get(&format!("/product/{slug}")).await?;
        self.read_envelope(response, slug).await
    }

    /// Create a product from a draft.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the
    /// submission.
    #[instrument(skip(self, draft), fields(sku = %draft.sku))]
    pub async fn create_product(&self, draft: &ProductDraft) -> Result<Product, ApiError> {
        let form = multipart_form(create_body(draft), BoolStyle::TrueFalse)?;
        let builder = self.http().post(self.url("/product")).multipart(form);
        let response = self.send(builder).await?;
        self.read_envelope(response, "product").await
    }

    /// Update a persisted product from a draft.
    ///
    /// Multipart bodies cannot ride a bare `PUT` through the backend's form
    /// parser, so the update goes out as `POST` with `_method=PUT`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingSlug`] for a never-persisted draft, or an
    /// error if the request fails or is rejected.
    #[instrument(skip(self, draft))]
    pub async fn update_product(&self, draft: &ProductDraft) -> Result<Product, ApiError> {
        let slug = draft.slug.as_deref().ok_or(ApiError::MissingSlug)?;

        let form = multipart_form(update_body(draft), BoolStyle::TrueFalse)?;
        let builder = self
            .http()
            .post(self.url(&format!("/product/{slug}")))
            .query(&[("_method", "PUT")])
            .multipart(form);
        let response = self.send(builder).await?;
        self.read_envelope(response, slug).await
    }

    /// Delete a product by slug.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn delete_product(&self, slug: &str) -> Result<(), ApiError> {
        let builder = self.http().delete(self.url(&format!("/product/{slug}")));
        let response = self.send(builder).await?;
        self.read_unit(response, slug).await
    }
}

/// Shared create/update body: everything except the image-retention fields.
fn base_body(draft: &ProductDraft) -> FormMap {
    let dimensions = FormMap::new()
        .with("weight", draft.dimensions.weight)
        .with("height", draft.dimensions.height)
        .with("width", draft.dimensions.width)
        .with("length", draft.dimensions.length);

    FormMap::new()
        .with("category_id", draft.category.map(|id| id.as_i32()))
        .with("sku", draft.sku.as_str())
        .with("name", draft.name.as_str())
        .with("description", draft.description.as_str())
        .with("dimensions", dimensions)
        // Legacy flags ride as 1/0 rather than true/false.
        .with("status", i32::from(draft.status))
        .with("use_variant", i32::from(draft.use_variant))
        .with(
            "variants",
            FormValue::List(draft.variants.values().map(variant_entry).collect()),
        )
        .with(
            "attributes",
            FormValue::List(draft.attributes.values().map(attribute_entry).collect()),
        )
        .with(
            "informations",
            FormValue::List(draft.informations.values().map(information_entry).collect()),
        )
        .with(
            "tags",
            FormValue::List(
                draft
                    .tags
                    .iter()
                    .filter(|tag| !tag.is_empty())
                    .map(|tag| FormValue::Text(tag.clone()))
                    .collect(),
            ),
        )
}

fn create_body(draft: &ProductDraft) -> FormMap {
    base_body(draft).with(
        "images",
        FormValue::List(
            draft
                .images
                .iter()
                .map(|file| FormValue::File(file.clone()))
                .collect(),
        ),
    )
}

fn update_body(draft: &ProductDraft) -> FormMap {
    base_body(draft)
        .with(
            "keep_images",
            FormValue::List(
                draft
                    .keep_images
                    .iter()
                    .map(|url| FormValue::Text(url.clone()))
                    .collect(),
            ),
        )
        .with(
            "images",
            FormValue::List(
                draft
                    .images
                    .iter()
                    .map(|file| FormValue::File(file.clone()))
                    .collect(),
            ),
        )
}

fn variant_entry(variant: &VariantDraft) -> FormValue {
    let image = match &variant.image {
        // A staged file is the only image payload; an existing URL means
        // "no change" and a missing image sends nothing either way.
        VariantImage::Staged(file) => FormValue::File(file.clone()),
        VariantImage::Existing(_) | VariantImage::None => FormValue::Null,
    };

    FormValue::Map(
        FormMap::new()
            .with("id", variant.id.map(|id| id.as_i32()))
            .with("name", variant.name.as_str())
            .with("price", variant.price)
            .with("stock", variant.stock)
            .with("deleted", i32::from(variant.deleted))
            .with("image", image),
    )
}

fn attribute_entry(attribute: &AttributeDraft) -> FormValue {
    FormValue::Map(
        FormMap::new()
            .with("id", attribute.id.map(|id| id.as_i32()))
            .with("name", attribute.name.as_str())
            .with(
                "lists",
                FormValue::List(
                    attribute
                        .values
                        .iter()
                        .map(|value| FormValue::Text(value.clone()))
                        .collect(),
                ),
            )
            .with("deleted", i32::from(attribute.deleted)),
    )
}

fn information_entry(information: &InformationDraft) -> FormValue {
    FormValue::Map(
        FormMap::new()
            .with("id", information.id.map(|id| id.as_i32()))
            .with("name", information.name.as_str())
            .with("description", information.description.as_str())
            .with("deleted", i32::from(information.deleted)),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use backoffice_core::{AttributeId, CategoryId, VariantId};
    use rust_decimal::Decimal;

    use crate::editor::{
        AttributeInput, ProductEditor, VariantInput, VariantMode,
    };
    use crate::multipart::{BoolStyle, FileUpload, WirePart, WireValue, flatten};

    use super::*;

    fn filled_editor() -> ProductEditor {
        let mut editor = ProductEditor::create();
        let draft = editor.draft_mut();
        draft.slug = Some("walnut-desk".to_owned());
        draft.category = Some(CategoryId::new(3));
        draft.sku = "SKU-001".to_owned();
        draft.name = "Walnut Desk".to_owned();
        draft.description = "A desk.".to_owned();
        editor
    }

    fn update_parts(draft: &ProductDraft) -> Vec<WirePart> {
        flatten(update_body(draft), BoolStyle::TrueFalse)
    }

    fn text_value<'a>(parts: &'a [WirePart], key: &str) -> Option<&'a str> {
        parts.iter().find(|p| p.key == key).and_then(|p| match &p.value {
            WireValue::Text(s) => Some(s.as_str()),
            WireValue::File(_) => None,
        })
    }

    #[test]
    fn test_status_flags_ride_as_one_zero() {
        let editor = filled_editor();
        let parts = update_parts(editor.draft());
        assert_eq!(text_value(&parts, "status"), Some("1"));
        assert_eq!(text_value(&parts, "use_variant"), Some("0"));
    }

    #[test]
    fn test_soft_deleted_entities_still_serialize() {
        // Delete-intent on a persisted variant never reduces the serialized
        // entity count; it only flips the marker.
        let mut editor = filled_editor();
        editor.set_variant_mode(VariantMode::Multiple);
        editor.add_variant(VariantInput {
            name: "Red".to_owned(),
            price: Decimal::from(100),
            stock: 5,
            image: None,
        });
        editor.add_variant(VariantInput {
            name: "Blue".to_owned(),
            price: Decimal::from(120),
            stock: 2,
            image: None,
        });
        editor.draft_mut().variants.get_mut(0).unwrap().id = Some(VariantId::new(11));

        let before = update_parts(editor.draft())
            .iter()
            .filter(|p| p.key.starts_with("variants["))
            .count();
        editor.delete_variant(0);
        let parts = update_parts(editor.draft());
        let after = parts
            .iter()
            .filter(|p| p.key.starts_with("variants["))
            .count();

        assert_eq!(before, after);
        assert_eq!(text_value(&parts, "variants[0][deleted]"), Some("1"));
        assert_eq!(text_value(&parts, "variants[0][id]"), Some("11"));
        assert_eq!(text_value(&parts, "variants[1][deleted]"), Some("0"));
    }

    #[test]
    fn test_unpersisted_delete_disappears_from_wire() {
        let mut editor = filled_editor();
        editor.set_variant_mode(VariantMode::Multiple);
        editor.add_variant(VariantInput {
            name: "Red".to_owned(),
            price: Decimal::from(100),
            stock: 5,
            image: None,
        });

        editor.delete_variant(0);

        let parts = update_parts(editor.draft());
        assert!(!parts.iter().any(|p| p.key.starts_with("variants[")));
    }

    #[test]
    fn test_variant_image_round_trip() {
        // One variant with no image, one with a staged file, one with an
        // unchanged existing URL: only the staged file produces a field.
        let mut editor = filled_editor();
        editor.set_variant_mode(VariantMode::Multiple);
        editor.add_variant(VariantInput {
            name: "Bare".to_owned(),
            price: Decimal::from(10),
            stock: 1,
            image: None,
        });
        editor.add_variant(VariantInput {
            name: "Staged".to_owned(),
            price: Decimal::from(10),
            stock: 1,
            image: Some(FileUpload::new("s.jpg", "image/jpeg", vec![9])),
        });
        editor.add_variant(VariantInput {
            name: "Existing".to_owned(),
            price: Decimal::from(10),
            stock: 1,
            image: None,
        });
        editor.draft_mut().variants.get_mut(2).unwrap().image =
            VariantImage::Existing("https://cdn.example.com/e.jpg".to_owned());

        let parts = update_parts(editor.draft());
        let image_parts: Vec<_> = parts
            .iter()
            .filter(|p| p.key.ends_with("[image]"))
            .collect();

        assert_eq!(image_parts.len(), 1);
        assert_eq!(image_parts[0].key, "variants[1][image]");
        assert!(matches!(image_parts[0].value, WireValue::File(_)));
    }

    #[test]
    fn test_deleted_and_active_attributes_both_serialize() {
        // Two attributes, one deleted with identity and one active, must
        // both appear, distinguishable by their deleted field.
        let mut editor = filled_editor();
        editor.add_attribute(AttributeInput {
            name: "Color".to_owned(),
            values: vec!["Red".to_owned()],
        });
        editor.add_attribute(AttributeInput {
            name: "Finish".to_owned(),
            values: vec!["Matte".to_owned()],
        });
        editor.draft_mut().attributes.get_mut(0).unwrap().id = Some(AttributeId::new(5));
        editor.delete_attribute(0);

        let parts = update_parts(editor.draft());
        assert_eq!(text_value(&parts, "attributes[0][deleted]"), Some("1"));
        assert_eq!(text_value(&parts, "attributes[0][id]"), Some("5"));
        assert_eq!(text_value(&parts, "attributes[0][name]"), Some("Color"));
        assert_eq!(text_value(&parts, "attributes[1][deleted]"), Some("0"));
        assert_eq!(text_value(&parts, "attributes[1][name]"), Some("Finish"));
    }

    #[test]
    fn test_absent_child_id_is_omitted() {
        let mut editor = filled_editor();
        editor.set_variant_mode(VariantMode::Multiple);
        editor.add_variant(VariantInput {
            name: "Fresh".to_owned(),
            price: Decimal::from(10),
            stock: 1,
            image: None,
        });

        let parts = update_parts(editor.draft());
        assert!(!parts.iter().any(|p| p.key == "variants[0][id]"));
        assert_eq!(text_value(&parts, "variants[0][name]"), Some("Fresh"));
    }

    #[test]
    fn test_update_body_carries_keep_images() {
        let mut editor = filled_editor();
        editor
            .draft_mut()
            .keep_images
            .push("https://cdn.example.com/a.jpg".to_owned());
        editor
            .draft_mut()
            .images
            .push(FileUpload::new("new.jpg", "image/jpeg", vec![1]));

        let parts = update_parts(editor.draft());
        assert_eq!(
            text_value(&parts, "keep_images[]"),
            Some("https://cdn.example.com/a.jpg")
        );
        assert!(parts
            .iter()
            .any(|p| p.key == "images[]" && matches!(p.value, WireValue::File(_))));

        let create_parts = flatten(create_body(editor.draft()), BoolStyle::TrueFalse);
        assert!(!create_parts.iter().any(|p| p.key.starts_with("keep_images")));
    }

    #[test]
    fn test_empty_tags_are_filtered() {
        let mut editor = filled_editor();
        editor.draft_mut().tags = vec![String::new(), "desk".to_owned()];

        let parts = update_parts(editor.draft());
        let tags: Vec<_> = parts.iter().filter(|p| p.key == "tags[]").collect();
        assert_eq!(tags.len(), 1);
        assert_eq!(text_value(&parts, "tags[]"), Some("desk"));
    }

    #[test]
    fn test_dimensions_nest_and_omit_missing_axes() {
        let mut editor = filled_editor();
        editor.draft_mut().dimensions.weight = Decimal::new(125, 1);
        editor.draft_mut().dimensions.width = Some(Decimal::from(80));

        let parts = update_parts(editor.draft());
        assert_eq!(text_value(&parts, "dimensions[weight]"), Some("12.5"));
        assert_eq!(text_value(&parts, "dimensions[width]"), Some("80"));
        assert!(!parts.iter().any(|p| p.key == "dimensions[height]"));
    }
}
