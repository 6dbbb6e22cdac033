//! Back-office user entity shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::flexible::flexible_bool;
use super::id::UserId;

/// A dashboard user as returned by `GET /user`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Persisted avatar URL, if the user has one.
    #[serde(default)]
    pub avatar: Option<String>,
    pub name: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    /// Account status; some endpoints send this as `0`/`1`.
    #[serde(deserialize_with = "flexible_bool")]
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
