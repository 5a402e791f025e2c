use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Form body for `POST /signup`. Fields stay optional so a missing one
/// becomes a flash message rather than an extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct SignupForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Form body for `POST /signin`.
#[derive(Debug, Default, Deserialize)]
pub struct SigninForm {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Returns the value only when it is present and non-empty.
pub(crate) fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|v| !v.is_empty())
}
