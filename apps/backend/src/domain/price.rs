//! Price coercion shared by revenue aggregation and payment-intent amounts.
//!
//! Stored prices arrive as loosely typed JSON: numbers, numeric strings,
//! `null`, booleans. Everything funnels through [`coerce_price`] so the two
//! callers agree on what a price is.

use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::store::{DocId, Document};

/// The value could not be read as a price.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid price: {0}")]
pub struct InvalidPrice(pub String);

/// Read a JSON value as a price.
///
/// * number: its value
/// * string: trimmed; empty is 0, otherwise a decimal literal
/// * `null`: 0
/// * `true` / `false`: 1 / 0
/// * missing, array, object, non-numeric or non-finite text: invalid
pub fn coerce_price(value: Option<&Value>) -> Result<f64, InvalidPrice> {
    let Some(value) = value else {
        return Err(InvalidPrice("missing".to_string()));
    };
    let n = match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| InvalidPrice(n.to_string()))?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed
                    .parse::<f64>()
                    .map_err(|_| InvalidPrice(format!("{s:?}")))?
            }
        }
        Value::Array(_) => return Err(InvalidPrice("array".to_string())),
        Value::Object(_) => return Err(InvalidPrice("object".to_string())),
    };
    if n.is_finite() {
        Ok(n)
    } else {
        Err(InvalidPrice(value.to_string()))
    }
}

/// Convert a price in major units to whole minor units, truncating any
/// fraction of a cent. Must come out as at least one cent.
pub fn to_minor_units(price: f64) -> Result<u64, InvalidPrice> {
    let cents = (price * 100.0).trunc();
    if !cents.is_finite() || cents < 1.0 || cents >= u64::MAX as f64 {
        return Err(InvalidPrice(price.to_string()));
    }
    Ok(cents as u64)
}

/// Sum the `price` of every payment. Unreadable prices count as 0.
pub fn total_revenue(payments: &[Document]) -> f64 {
    payments
        .iter()
        .map(|payment| match coerce_price(payment.get("price")) {
            Ok(price) => price,
            Err(e) => {
                let id = DocId::of(payment);
                warn!(
                    payment_id = id.as_ref().map(DocId::as_str).unwrap_or("unknown"),
                    error = %e,
                    "revenue_price_skipped"
                );
                0.0
            }
        })
        .sum()
}
