//! Category endpoints.
//!
//! Categories are a thin collaborator of the product editor: the form only
//! needs them for the category picker. Unlike products, updates go out as a
//! bare `PUT`.

use backoffice_core::{Category, CategoryId};
use tracing::instrument;

use crate::multipart::{BoolStyle, FileUpload, FormMap};

use super::{ApiClient, ApiError, multipart_form};

/// Fields of the category form.
#[derive(Debug, Clone, Default)]
pub struct CategoryInput {
    pub name: String,
    pub description: Option<String>,
    /// Newly staged image; `None` leaves the current image untouched.
    pub image: Option<FileUpload>,
}

impl ApiClient {
    /// List all categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    #[instrument(skip(self))]
    pub async fn get_categories(&self) -> Result<Vec<Category>, ApiError> {
        let response = self.get("/category").await?;
        self.read_envelope(response, "categories").await
    }

    /// Get a category by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the category does not exist.
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn get_category(&self, id: CategoryId) -> Result<Category, ApiError> {
        let response = self.get(&format!("/category/{id}")).await?;
        self.read_envelope(response, &id.to_string()).await
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_category(&self, input: &CategoryInput) -> Result<Category, ApiError> {
        let form = multipart_form(category_body(input), BoolStyle::TrueFalse)?;
        let builder = self.http().post(self.url("/category")).multipart(form);
        let response = self.send(builder).await?;
        self.read_envelope(response, "category").await
    }

    /// Update a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    #[instrument(skip(self, input), fields(category_id = %id))]
    pub async fn update_category(
        &self,
        id: CategoryId,
        input: &CategoryInput,
    ) -> Result<Category, ApiError> {
        let form = multipart_form(category_body(input), BoolStyle::TrueFalse)?;
        let builder = self
            .http()
            .put(self.url(&format!("/category/{id}")))
            .multipart(form);
        let response = self.send(builder).await?;
        self.read_envelope(response, &id.to_string()).await
    }

    /// Delete a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn delete_category(&self, id: CategoryId) -> Result<(), ApiError> {
        let builder = self.http().delete(self.url(&format!("/category/{id}")));
        let response = self.send(builder).await?;
        self.read_unit(response, &id.to_string()).await
    }
}

fn category_body(input: &CategoryInput) -> FormMap {
    FormMap::new()
        .with("name", input.name.as_str())
        .with("description", input.description.clone())
        .with("image", input.image.clone())
}
