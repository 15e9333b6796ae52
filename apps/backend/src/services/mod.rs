//! Resource rules shared by the HTTP handlers.

pub mod carts;
pub mod checkout;
pub mod intents;
pub mod menu;
pub mod stats;
pub mod users;

use serde_json::Value;

use crate::error::AppError;
use crate::store::{DocId, Document, ID_FIELD};

/// Parse a client-supplied document id.
pub fn parse_id(raw: &str) -> Result<DocId, AppError> {
    raw.parse()
        .map_err(|_| AppError::bad_request("invalid id"))
}

/// Drop a caller-supplied `_id`; the store assigns ids.
pub(crate) fn without_id(mut doc: Document) -> Document {
    doc.remove(ID_FIELD);
    doc
}

/// Loose truthiness for flags stored by older clients.
pub(crate) fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}
