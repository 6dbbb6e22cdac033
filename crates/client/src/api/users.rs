//! Dashboard user management endpoints.

use backoffice_core::{User, UserId};
use tracing::instrument;

use crate::multipart::{BoolStyle, FileUpload, FormMap};

use super::{ApiClient, ApiError, multipart_form};

/// Fields of the user form.
#[derive(Debug, Clone)]
pub struct UserInput {
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub status: bool,
    /// Newly staged avatar; `None` leaves the current avatar untouched.
    pub avatar: Option<FileUpload>,
    /// New password; `None` (or blank) leaves the password unchanged and
    /// drops both password fields from the body.
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

impl ApiClient {
    /// List all dashboard users.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    #[instrument(skip(self))]
    pub async fn get_users(&self) -> Result<Vec<User>, ApiError> {
        let response = self.get("/user").await?;
        self.read_envelope(response, "users").await
    }

    /// Get a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the user does not exist.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn get_user(&self, id: UserId) -> Result<User, ApiError> {
        let response = self.get(&format!("/user/{id}")).await?;
        self.read_envelope(response, &id.to_string()).await
    }

    /// Create a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn create_user(&self, input: &UserInput) -> Result<User, ApiError> {
        let form = multipart_form(user_body(input), BoolStyle::TrueFalse)?;
        let builder = self.http().post(self.url("/user")).multipart(form);
        let response = self.send(builder).await?;
        self.read_envelope(response, "user").await
    }

    /// Update a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    #[instrument(skip(self, input), fields(user_id = %id))]
    pub async fn update_user(&self, id: UserId, input: &UserInput) -> Result<User, ApiError> {
        let form = multipart_form(user_body(input), BoolStyle::TrueFalse)?;
        let builder = self
            .http()
            .put(self.url(&format!("/user/{id}")))
            .multipart(form);
        let response = self.send(builder).await?;
        self.read_envelope(response, &id.to_string()).await
    }

    /// Delete a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn delete_user(&self, id: UserId) -> Result<(), ApiError> {
        let builder = self.http().delete(self.url(&format!("/user/{id}")));
        let response = self.send(builder).await?;
        self.read_unit(response, &id.to_string()).await
    }
}

fn user_body(input: &UserInput) -> FormMap {
    let mut body = FormMap::new()
        .with("name", input.name.as_str())
        .with("username", input.username.as_str())
        .with("email", input.email.as_str())
        .with("phone_number", input.phone_number.clone())
        // Legacy status flag rides as 1/0.
        .with("status", i32::from(input.status))
        .with("avatar", input.avatar.clone());

    // A blank password means "leave unchanged": both fields stay out of the
    // body entirely.
    if let Some(password) = input.password.as_deref().filter(|p| !p.is_empty()) {
        body.insert("password", password);
        body.insert("confirmPassword", input.confirm_password.clone());
    }

    body
}
