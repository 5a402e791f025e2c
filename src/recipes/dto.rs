use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

pub const DEFAULT_SERVINGS: &str = "1";
pub const DEFAULT_PREP_TIME: &str = "30";
pub const DEFAULT_REGION: &str = "Global";

/// Body of `POST /get_recipe`. Values may arrive as strings or numbers;
/// either way they are kept as opaque text.
#[derive(Debug, Default, Deserialize)]
pub struct GetRecipeRequest {
    #[serde(default)]
    pub ingredients: Option<Value>,
    #[serde(default)]
    pub servings: Option<Value>,
    #[serde(default, rename = "prepTime", alias = "prep_time")]
    pub prep_time: Option<Value>,
    #[serde(default)]
    pub region: Option<Value>,
}

/// Text form of a JSON value; `null` counts as absent.
pub(crate) fn as_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Like [`as_text`] but treats every falsy JSON value (`""`, `0`, `false`,
/// `[]`, `{}`, `null`) as absent.
pub(crate) fn non_empty_text(value: Option<&Value>) -> Option<String> {
    let empty = match value? {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    };
    if empty {
        None
    } else {
        as_text(value)
    }
}

#[derive(Debug, Serialize)]
pub struct RecipeResponse {
    pub recipe: String,
}

#[derive(Debug, Serialize)]
pub struct RecipeListItem {
    pub id: Uuid,
    pub ingredients: String,
    pub recipe: String,
    pub servings: String,
    pub prep_time: String,
    pub region: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}
fn default_limit() -> i64 { 20 }
