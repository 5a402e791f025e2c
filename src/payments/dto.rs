use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_AMOUNT: f64 = 1.0;

#[derive(Debug, Default, Deserialize)]
pub struct PayRequest {
    #[serde(default)]
    pub amount: Option<Value>,
}

/// Amount as a number. Numeric strings are accepted; `null` or a missing
/// field means the default. Anything else yields `None`.
pub(crate) fn parse_amount(value: Option<&Value>) -> Option<f64> {
    match value {
        None | Some(Value::Null) => Some(DEFAULT_AMOUNT),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|a| a.is_finite()),
        Some(_) => None,
    }
}

#[derive(Debug, Serialize)]
pub struct PayResponse {
    pub message: String,
    pub txn_id: String,
    pub status: String,
}
