//! Authentication endpoints.
//!
//! Login and register exchange JSON bodies (not multipart) and, unlike the
//! resource endpoints, return their payloads without the `{ "data": … }`
//! envelope; only `profile` is enveloped.

use backoffice_core::{Email, LoginResponse, RegisterResponse, User};
use serde::Serialize;
use tracing::instrument;

use crate::validate::{ValidationCode, ValidationError};

use super::{ApiClient, ApiError};

const MAX_NAME: usize = 50;
const MAX_USERNAME: usize = 20;
const MAX_PHONE: usize = 15;
const MIN_PASSWORD: usize = 8;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Fields of the registration form.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterInput {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "confirmPassword")]
    pub confirm_password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

impl RegisterInput {
    /// Check field and cross-field constraints before submission.
    ///
    /// The confirm-password mismatch is surfaced at the confirmation field,
    /// like any other per-field violation.
    #[must_use]
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.name.is_empty() {
            errors.push(ValidationError::new("name", ValidationCode::Required));
        } else if self.name.chars().count() > MAX_NAME {
            errors.push(ValidationError::new(
                "name",
                ValidationCode::MaxLength(MAX_NAME),
            ));
        }

        if self.username.is_empty() {
            errors.push(ValidationError::new("username", ValidationCode::Required));
        } else if self.username.chars().count() > MAX_USERNAME {
            errors.push(ValidationError::new(
                "username",
                ValidationCode::MaxLength(MAX_USERNAME),
            ));
        }

        if Email::parse(&self.email).is_err() {
            errors.push(ValidationError::new("email", ValidationCode::InvalidEmail));
        }

        if self.password.chars().count() < MIN_PASSWORD {
            errors.push(ValidationError::new(
                "password",
                ValidationCode::MinLength(MIN_PASSWORD),
            ));
        }

        if self.confirm_password != self.password {
            errors.push(ValidationError::new(
                "confirmPassword",
                ValidationCode::PasswordMismatch,
            ));
        }

        if let Some(phone) = &self.phone_number
            && phone.chars().count() > MAX_PHONE
        {
            errors.push(ValidationError::new(
                "phone_number",
                ValidationCode::MaxLength(MAX_PHONE),
            ));
        }

        errors
    }
}

impl ApiClient {
    /// Sign in and cache the returned bearer token for subsequent requests.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] for bad credentials, or an error
    /// if the request fails.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &Email, password: &str) -> Result<LoginResponse, ApiError> {
        let builder = self
            .http()
            .post(self.url("/auth/login"))
            .json(&LoginRequest {
                email: email.as_str(),
                password,
            });
        let response = self.send(builder).await?;
        let login: LoginResponse = self.read_body(response, "login").await?;

        self.set_token(login.token.clone()).await;

        Ok(login)
    }

    /// Register a new dashboard account.
    ///
    /// Callers validate the input first ([`RegisterInput::validate`]); this
    /// method sends it as-is.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn register(&self, input: &RegisterInput) -> Result<RegisterResponse, ApiError> {
        let builder = self.http().post(self.url("/auth/register")).json(input);
        let response = self.send(builder).await?;
        self.read_body(response, "register").await
    }

    /// Sign out and drop the cached token.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; the token is only cleared on
    /// success.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), ApiError> {
        let builder = self.http().post(self.url("/auth/logout"));
        let response = self.send(builder).await?;
        self.read_unit(response, "logout").await?;

        self.clear_token().await;

        Ok(())
    }

    /// The signed-in user's profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or no session is active.
    #[instrument(skip(self))]
    pub async fn profile(&self) -> Result<User, ApiError> {
        let response = self.get("/auth/profile").await?;
        self.read_envelope(response, "profile").await
    }
}
