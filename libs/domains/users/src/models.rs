use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Login names are word characters only; the pattern implies non-empty.
static LOGIN_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("valid pattern"));

/// User domain value.
///
/// Immutable: constructed once, never mutated in place. A user with
/// `id == None` has never been persisted; the store assigns the id and both
/// timestamps on first save and refreshes `updated_at` on every later save,
/// so `updated_at >= created_at` holds for every persisted user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    /// Login name; globally unique
    pub name: String,
    /// Email address; globally unique
    pub email_address: String,
    pub first_name: String,
    pub last_name: String,
}

/// Wire representation of a user.
///
/// `id`, `createdAt` and `updatedAt` are server-managed: null when creating,
/// populated in responses. The remaining fields are required on input and
/// validated at the boundary.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    #[serde(default)]
    pub id: Option<i64>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    #[validate(
        length(min = 1, max = 255, message = "Login name must be between 1 and 255 characters long."),
        regex(path = *LOGIN_NAME_RE, message = "Login name can only contain word characters: [a-zA-Z_0-9]+")
    )]
    pub name: String,

    #[validate(email(message = "Email address must be valid."))]
    pub email_address: String,

    #[validate(length(min = 1, max = 255, message = "First name must be between 1 and 255 characters long."))]
    pub first_name: String,

    #[validate(length(min = 1, max = 255, message = "Last name must be between 1 and 255 characters long."))]
    pub last_name: String,
}
