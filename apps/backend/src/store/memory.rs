use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{
    apply_set, ensure_id, upsert_document, CollectionName, DeleteResult, Document, DocumentStore,
    Filter, InsertOneResult, StoreError, UpdateResult,
};

/// In-process store. Used by tests and by `STORE_BACKEND=memory` local runs.
/// Documents keep insertion order within a collection.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<CollectionName, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collection directly, bypassing id assignment rules.
    pub fn seed(&self, collection: CollectionName, docs: impl IntoIterator<Item = Document>) {
        let mut guard = self.collections.write();
        let entry = guard.entry(collection).or_default();
        for mut doc in docs {
            ensure_id(&mut doc);
            entry.push(doc);
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(
        &self,
        collection: CollectionName,
        filter: &Filter,
    ) -> Result<Vec<Document>, StoreError> {
        let guard = self.collections.read();
        Ok(guard
            .get(&collection)
            .map(|docs| docs.iter().filter(|d| filter.matches(d)).cloned().collect())
            .unwrap_or_default())
    }

    async fn insert_one(
        &self,
        collection: CollectionName,
        mut doc: Document,
    ) -> Result<InsertOneResult, StoreError> {
        let id = ensure_id(&mut doc);
        let mut guard = self.collections.write();
        let docs = guard.entry(collection).or_default();
        if docs.iter().any(|d| Filter::Id(id.clone()).matches(d)) {
            return Err(StoreError::DuplicateId { collection, id });
        }
        docs.push(doc);
        Ok(InsertOneResult::new(id))
    }

    async fn update_one(
        &self,
        collection: CollectionName,
        filter: &Filter,
        set: Document,
        upsert: bool,
    ) -> Result<UpdateResult, StoreError> {
        let mut guard = self.collections.write();
        let docs = guard.entry(collection).or_default();

        if let Some(doc) = docs.iter_mut().find(|d| filter.matches(d)) {
            return Ok(UpdateResult::matched(apply_set(doc, &set)));
        }
        if !upsert {
            return Ok(UpdateResult::unmatched());
        }
        let (id, doc) = upsert_document(filter, &set);
        docs.push(doc);
        Ok(UpdateResult::upserted(id))
    }

    async fn delete_one(
        &self,
        collection: CollectionName,
        filter: &Filter,
    ) -> Result<DeleteResult, StoreError> {
        let mut guard = self.collections.write();
        let Some(docs) = guard.get_mut(&collection) else {
            return Ok(DeleteResult::new(0));
        };
        match docs.iter().position(|d| filter.matches(d)) {
            Some(pos) => {
                docs.remove(pos);
                Ok(DeleteResult::new(1))
            }
            None => Ok(DeleteResult::new(0)),
        }
    }

    async fn delete_many(
        &self,
        collection: CollectionName,
        filter: &Filter,
    ) -> Result<DeleteResult, StoreError> {
        let mut guard = self.collections.write();
        let Some(docs) = guard.get_mut(&collection) else {
            return Ok(DeleteResult::new(0));
        };
        let before = docs.len();
        docs.retain(|d| !filter.matches(d));
        Ok(DeleteResult::new((before - docs.len()) as u64))
    }

    async fn count(&self, collection: CollectionName) -> Result<u64, StoreError> {
        let guard = self.collections.read();
        Ok(guard.get(&collection).map_or(0, |docs| docs.len() as u64))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
