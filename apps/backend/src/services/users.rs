use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use super::{is_truthy, without_id};
use crate::error::AppError;
use crate::logging::pii::Redacted;
use crate::store::{Collection, DeleteResult, DocId, Document, Filter, InsertOneResult, UpdateResult};

/// Outcome of a registration attempt.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Registration {
    Exists {
        #[serde(rename = "userExist")]
        user_exist: bool,
    },
    Created(InsertOneResult),
}

pub async fn find_by_email(users: &Collection, email: &str) -> Result<Option<Document>, AppError> {
    Ok(users.find_one(&Filter::eq("email", email)).await?)
}

/// Whether the stored user with `email` carries a truthy `admin` flag.
/// Unknown users are not admins.
pub async fn is_admin(users: &Collection, email: &str) -> Result<bool, AppError> {
    Ok(find_by_email(users, email)
        .await?
        .is_some_and(|user| is_truthy(user.get("admin"))))
}

/// `Some(flag)` for a known user, `None` otherwise.
pub async fn admin_status(users: &Collection, email: &str) -> Result<Option<bool>, AppError> {
    Ok(find_by_email(users, email)
        .await?
        .map(|user| is_truthy(user.get("admin"))))
}

pub async fn list(users: &Collection) -> Result<Vec<Document>, AppError> {
    Ok(users.find(&Filter::All).await?)
}

/// Insert a user unless one with the same email exists.
///
/// Any `admin` or `_id` in the body is discarded. The existence check and
/// the insert are separate store calls.
pub async fn register(users: &Collection, body: Document) -> Result<Registration, AppError> {
    let mut user = without_id(body);
    user.remove("admin");

    let email = match user.get("email") {
        Some(Value::String(email)) => email.clone(),
        _ => return Err(AppError::bad_request("email is required")),
    };

    if find_by_email(users, &email).await?.is_some() {
        debug!(email = %Redacted(&email), "registration_exists");
        return Ok(Registration::Exists { user_exist: true });
    }

    let inserted = users.insert_one(user).await?;
    info!(
        user_id = %inserted.inserted_id,
        email = %Redacted(&email),
        "user_registered"
    );
    Ok(Registration::Created(inserted))
}

pub async fn set_admin(users: &Collection, id: &DocId, admin: bool) -> Result<UpdateResult, AppError> {
    let mut set = Document::new();
    set.insert("admin".to_string(), Value::Bool(admin));
    let result = users.update_one(&Filter::id(id.clone()), set).await?;
    info!(user_id = %id, admin, matched = result.matched_count, "admin_flag_set");
    Ok(result)
}

pub async fn delete(users: &Collection, id: &DocId) -> Result<DeleteResult, AppError> {
    let result = users.delete_one(&Filter::id(id.clone())).await?;
    info!(user_id = %id, deleted = result.deleted_count, "user_deleted");
    Ok(result)
}
