//! Document store seam.
//!
//! Handlers talk to storage through [`Collection`] handles over a shared
//! [`DocumentStore`]. Documents are JSON objects carrying a string `_id`.
//! Write results mirror the shapes clients already consume
//! (`insertedId`, `matchedCount`, `deletedCount`, ...).

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use ulid::Ulid;

pub mod filter;
pub mod memory;
pub mod sea;

pub use filter::Filter;
pub use memory::MemoryStore;
pub use sea::SeaDocumentStore;

/// A stored document.
pub type Document = Map<String, Value>;

/// Field holding a document's identifier.
pub const ID_FIELD: &str = "_id";

/// Document identifier. New ids are ULIDs; ids read back from storage are
/// taken as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocId(String);

impl DocId {
    pub fn generate() -> Self {
        DocId(Ulid::new().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Read the `_id` of a stored document.
    pub fn of(doc: &Document) -> Option<DocId> {
        doc.get(ID_FIELD)
            .and_then(Value::as_str)
            .map(|s| DocId(s.to_string()))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid id: {0:?}")]
pub struct InvalidDocId(pub String);

impl FromStr for DocId {
    type Err = InvalidDocId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ulid::from_string(&s.trim().to_ascii_uppercase())
            .map(|ulid| DocId(ulid.to_string()))
            .map_err(|_| InvalidDocId(s.to_string()))
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The collections this service reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionName {
    Users,
    Menu,
    Reviews,
    Carts,
    Payments,
}

impl CollectionName {
    pub const ALL: [CollectionName; 5] = [
        CollectionName::Users,
        CollectionName::Menu,
        CollectionName::Reviews,
        CollectionName::Carts,
        CollectionName::Payments,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CollectionName::Users => "users",
            CollectionName::Menu => "menu",
            CollectionName::Reviews => "reviews",
            CollectionName::Carts => "carts",
            CollectionName::Payments => "payments",
        }
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOneResult {
    pub acknowledged: bool,
    pub inserted_id: DocId,
}

impl InsertOneResult {
    pub fn new(inserted_id: DocId) -> Self {
        Self {
            acknowledged: true,
            inserted_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    pub upserted_id: Option<DocId>,
}

impl UpdateResult {
    pub fn unmatched() -> Self {
        Self {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_count: 0,
            upserted_id: None,
        }
    }

    pub fn matched(modified: bool) -> Self {
        Self {
            matched_count: 1,
            modified_count: u64::from(modified),
            ..Self::unmatched()
        }
    }

    pub fn upserted(id: DocId) -> Self {
        Self {
            upserted_count: 1,
            upserted_id: Some(id),
            ..Self::unmatched()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteResult {
    pub fn new(deleted_count: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count,
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Db(#[from] sea_orm::DbErr),
    #[error("duplicate id {id} in {collection}")]
    DuplicateId { collection: CollectionName, id: DocId },
    #[error("corrupt document {id} in {collection}: {detail}")]
    Corrupt {
        collection: CollectionName,
        id: String,
        detail: String,
    },
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Generic collection operations. Implementations must be safe to share
/// across all workers; no caller assumes exclusive access.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find(
        &self,
        collection: CollectionName,
        filter: &Filter,
    ) -> Result<Vec<Document>, StoreError>;

    async fn find_one(
        &self,
        collection: CollectionName,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError> {
        Ok(self.find(collection, filter).await?.into_iter().next())
    }

    /// Insert `doc`, assigning a fresh `_id` unless one is present.
    async fn insert_one(
        &self,
        collection: CollectionName,
        doc: Document,
    ) -> Result<InsertOneResult, StoreError>;

    /// Set the fields of `set` on the first document matching `filter`.
    /// With `upsert`, a missing document is created from the filter's
    /// implied fields plus `set`.
    async fn update_one(
        &self,
        collection: CollectionName,
        filter: &Filter,
        set: Document,
        upsert: bool,
    ) -> Result<UpdateResult, StoreError>;

    async fn delete_one(
        &self,
        collection: CollectionName,
        filter: &Filter,
    ) -> Result<DeleteResult, StoreError>;

    async fn delete_many(
        &self,
        collection: CollectionName,
        filter: &Filter,
    ) -> Result<DeleteResult, StoreError>;

    async fn count(&self, collection: CollectionName) -> Result<u64, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;

    /// Latest applied schema migration, for backends that have one.
    async fn schema_version(&self) -> Result<Option<String>, StoreError> {
        Ok(None)
    }

    fn backend_name(&self) -> &'static str;
}

/// A named collection bound to the shared store.
#[derive(Clone)]
pub struct Collection {
    store: Arc<dyn DocumentStore>,
    name: CollectionName,
}

impl Collection {
    pub fn new(store: Arc<dyn DocumentStore>, name: CollectionName) -> Self {
        Self { store, name }
    }

    pub fn name(&self) -> CollectionName {
        self.name
    }

    pub async fn find(&self, filter: &Filter) -> Result<Vec<Document>, StoreError> {
        self.store.find(self.name, filter).await
    }

    pub async fn find_one(&self, filter: &Filter) -> Result<Option<Document>, StoreError> {
        self.store.find_one(self.name, filter).await
    }

    pub async fn insert_one(&self, doc: Document) -> Result<InsertOneResult, StoreError> {
        self.store.insert_one(self.name, doc).await
    }

    pub async fn update_one(
        &self,
        filter: &Filter,
        set: Document,
    ) -> Result<UpdateResult, StoreError> {
        self.store.update_one(self.name, filter, set, false).await
    }

    pub async fn upsert_one(
        &self,
        filter: &Filter,
        set: Document,
    ) -> Result<UpdateResult, StoreError> {
        self.store.update_one(self.name, filter, set, true).await
    }

    pub async fn delete_one(&self, filter: &Filter) -> Result<DeleteResult, StoreError> {
        self.store.delete_one(self.name, filter).await
    }

    pub async fn delete_many(&self, filter: &Filter) -> Result<DeleteResult, StoreError> {
        self.store.delete_many(self.name, filter).await
    }

    pub async fn count(&self) -> Result<u64, StoreError> {
        self.store.count(self.name).await
    }
}

/// Apply `$set`-style field assignment. Returns whether anything changed.
/// `_id` is immutable and silently skipped.
pub(crate) fn apply_set(doc: &mut Document, set: &Document) -> bool {
    let mut changed = false;
    for (key, value) in set {
        if key == ID_FIELD {
            continue;
        }
        if doc.get(key) != Some(value) {
            doc.insert(key.clone(), value.clone());
            changed = true;
        }
    }
    changed
}

/// Build the document an upsert creates when nothing matched.
pub(crate) fn upsert_document(filter: &Filter, set: &Document) -> (DocId, Document) {
    let id = match filter {
        Filter::Id(id) => id.clone(),
        _ => DocId::generate(),
    };
    let mut doc = Document::new();
    doc.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
    if let Filter::Eq { field, value } = filter {
        doc.insert(field.clone(), value.clone());
    }
    apply_set(&mut doc, set);
    (id, doc)
}

/// Ensure `doc` carries an `_id`, generating one if absent.
pub(crate) fn ensure_id(doc: &mut Document) -> DocId {
    match DocId::of(doc) {
        Some(id) => id,
        None => {
            let id = DocId::generate();
            doc.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
            id
        }
    }
}
