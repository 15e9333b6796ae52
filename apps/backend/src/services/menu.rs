use serde_json::Value;
use tracing::info;

use super::without_id;
use crate::error::AppError;
use crate::store::{Collection, DeleteResult, DocId, Document, Filter, InsertOneResult, UpdateResult};

/// Fields an upsert writes. Missing ones are stored as `null`.
pub const MENU_FIELDS: [&str; 5] = ["name", "price", "recipe", "category", "image"];

pub async fn list(menu: &Collection) -> Result<Vec<Document>, AppError> {
    Ok(menu.find(&Filter::All).await?)
}

pub async fn get(menu: &Collection, id: &DocId) -> Result<Option<Document>, AppError> {
    Ok(menu.find_one(&Filter::id(id.clone())).await?)
}

pub async fn insert(menu: &Collection, item: Document) -> Result<InsertOneResult, AppError> {
    let result = menu.insert_one(without_id(item)).await?;
    info!(item_id = %result.inserted_id, "menu_item_inserted");
    Ok(result)
}

/// Set the menu fields of item `id`, creating it if absent.
pub async fn upsert(menu: &Collection, id: &DocId, body: &Document) -> Result<UpdateResult, AppError> {
    let set: Document = MENU_FIELDS
        .iter()
        .map(|field| {
            (
                field.to_string(),
                body.get(*field).cloned().unwrap_or(Value::Null),
            )
        })
        .collect();
    let result = menu.upsert_one(&Filter::id(id.clone()), set).await?;
    info!(
        item_id = %id,
        matched = result.matched_count,
        upserted = result.upserted_count,
        "menu_item_upserted"
    );
    Ok(result)
}

pub async fn delete(menu: &Collection, id: &DocId) -> Result<DeleteResult, AppError> {
    let result = menu.delete_one(&Filter::id(id.clone())).await?;
    info!(item_id = %id, deleted = result.deleted_count, "menu_item_deleted");
    Ok(result)
}
