use serde_json::Value;
use tracing::info;

use super::without_id;
use crate::error::AppError;
use crate::logging::pii::Redacted;
use crate::store::{Collection, DeleteResult, DocId, Document, Filter, InsertOneResult};

pub async fn add(carts: &Collection, item: Document) -> Result<InsertOneResult, AppError> {
    let result = carts.insert_one(without_id(item)).await?;
    info!(cart_item_id = %result.inserted_id, "cart_item_added");
    Ok(result)
}

/// Cart items owned by `email` (exact match).
pub async fn list_for(carts: &Collection, email: &str) -> Result<Vec<Document>, AppError> {
    Ok(carts.find(&Filter::eq("email", email)).await?)
}

pub async fn get(carts: &Collection, id: &DocId) -> Result<Option<Document>, AppError> {
    Ok(carts.find_one(&Filter::id(id.clone())).await?)
}

pub fn owner_of(item: &Document) -> Option<&str> {
    item.get("email").and_then(Value::as_str)
}

pub async fn delete(carts: &Collection, id: &DocId) -> Result<DeleteResult, AppError> {
    let result = carts.delete_one(&Filter::id(id.clone())).await?;
    info!(cart_item_id = %id, deleted = result.deleted_count, "cart_item_deleted");
    Ok(result)
}

/// Remove every cart item in `ids`. Duplicates count once.
pub async fn clear(carts: &Collection, ids: Vec<DocId>) -> Result<DeleteResult, AppError> {
    Ok(carts.delete_many(&Filter::id_in(ids)).await?)
}

pub(crate) fn log_owner_mismatch(item_id: &DocId, caller: &str) {
    info!(cart_item_id = %item_id, caller = %Redacted(caller), "cart_delete_denied");
}
