//! Payment completion: record the payment, then clear the cart items it
//! paid for.
//!
//! The two writes are sequential and not atomic. If clearing the cart fails
//! the payment stays recorded and the failure is logged with its id.

use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

use super::{carts, parse_id};
use crate::error::AppError;
use crate::store::{Collection, DeleteResult, DocId, Document, InsertOneResult, ID_FIELD};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResult {
    pub result: InsertOneResult,
    pub clear_cart: DeleteResult,
}

/// Ids listed in the payment's `cartItems`, validated before any write.
pub fn cart_item_ids(payment: &Document) -> Result<Vec<DocId>, AppError> {
    match payment.get("cartItems") {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(raw) => parse_id(raw),
                _ => Err(AppError::bad_request("cartItems must contain ids")),
            })
            .collect(),
        _ => Err(AppError::bad_request("cartItems must be an array of ids")),
    }
}

pub async fn complete_payment(
    payments: &Collection,
    carts: &Collection,
    mut payment: Document,
) -> Result<CheckoutResult, AppError> {
    let ids = cart_item_ids(&payment)?;
    payment.remove(ID_FIELD);

    let result = payments.insert_one(payment).await?;
    let payment_id = result.inserted_id.clone();

    let clear_cart = match carts::clear(carts, ids).await {
        Ok(cleared) => cleared,
        Err(e) => {
            error!(
                payment_id = %payment_id,
                error = %e,
                "checkout_cart_clear_failed"
            );
            return Err(e);
        }
    };

    info!(
        payment_id = %payment_id,
        cleared = clear_cart.deleted_count,
        "payment_recorded"
    );
    Ok(CheckoutResult { result, clear_cart })
}
