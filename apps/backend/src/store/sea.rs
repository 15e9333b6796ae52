//! sea-orm backed document store: one `documents` table keyed by
//! `(collection, id)` with the JSON body alongside.
//!
//! Id filters are pushed down to SQL. Field-equality filters are evaluated
//! in process over the collection's rows.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Select, Set, SqlErr,
};
use serde_json::Value;

use super::{
    apply_set, ensure_id, upsert_document, CollectionName, DeleteResult, Document, DocumentStore,
    Filter, InsertOneResult, StoreError, UpdateResult,
};
use crate::entities::documents;

#[derive(Debug, Clone)]
pub struct SeaDocumentStore {
    db: DatabaseConnection,
}

impl SeaDocumentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    fn select(collection: CollectionName, filter: &Filter) -> Select<documents::Entity> {
        let query = documents::Entity::find()
            .filter(documents::Column::Collection.eq(collection.as_str()))
            .order_by_asc(documents::Column::Id);
        match filter {
            Filter::Id(id) => query.filter(documents::Column::Id.eq(id.as_str())),
            Filter::IdIn(ids) => query.filter(
                documents::Column::Id.is_in(ids.iter().map(|id| id.as_str().to_string())),
            ),
            Filter::All | Filter::Eq { .. } => query,
        }
    }

    async fn matching_rows(
        &self,
        collection: CollectionName,
        filter: &Filter,
    ) -> Result<Vec<(documents::Model, Document)>, StoreError> {
        if matches!(filter, Filter::IdIn(ids) if ids.is_empty()) {
            return Ok(Vec::new());
        }
        let rows = Self::select(collection, filter).all(&self.db).await?;
        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let doc = into_document(collection, &row)?;
            if filter.matches(&doc) {
                out.push((row, doc));
            }
        }
        Ok(out)
    }

    async fn delete_ids(
        &self,
        collection: CollectionName,
        ids: Vec<String>,
    ) -> Result<DeleteResult, StoreError> {
        if ids.is_empty() {
            return Ok(DeleteResult::new(0));
        }
        let res = documents::Entity::delete_many()
            .filter(documents::Column::Collection.eq(collection.as_str()))
            .filter(documents::Column::Id.is_in(ids))
            .exec(&self.db)
            .await?;
        Ok(DeleteResult::new(res.rows_affected))
    }

    /// Apply `set` to the first matching row. `None` when nothing matched,
    /// otherwise whether the stored body changed.
    async fn update_first(
        &self,
        collection: CollectionName,
        filter: &Filter,
        set: &Document,
    ) -> Result<Option<bool>, StoreError> {
        let Some((row, mut doc)) = self
            .matching_rows(collection, filter)
            .await?
            .into_iter()
            .next()
        else {
            return Ok(None);
        };
        if !apply_set(&mut doc, set) {
            return Ok(Some(false));
        }
        let mut active: documents::ActiveModel = row.into();
        active.body = Set(Value::Object(doc));
        active.update(&self.db).await?;
        Ok(Some(true))
    }

    /// Insert the document an upsert builds after missing. A concurrent
    /// writer may have created the row in between; that case falls back to
    /// updating it and reports a match.
    async fn insert_upserted(
        &self,
        collection: CollectionName,
        filter: &Filter,
        set: &Document,
    ) -> Result<UpdateResult, StoreError> {
        let (id, doc) = upsert_document(filter, set);
        match self.insert_one(collection, doc).await {
            Ok(_) => Ok(UpdateResult::upserted(id)),
            Err(dup @ StoreError::DuplicateId { .. }) => {
                match self.update_first(collection, filter, set).await? {
                    Some(changed) => {
                        tracing::debug!(%collection, %id, "upsert_lost_race_updated_instead");
                        Ok(UpdateResult::matched(changed))
                    }
                    None => Err(dup),
                }
            }
            Err(e) => Err(e),
        }
    }
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

fn into_document(
    collection: CollectionName,
    row: &documents::Model,
) -> Result<Document, StoreError> {
    match &row.body {
        Value::Object(map) => Ok(map.clone()),
        other => Err(StoreError::Corrupt {
            collection,
            id: row.id.clone(),
            detail: format!("body is not an object: {other}"),
        }),
    }
}

#[async_trait]
impl DocumentStore for SeaDocumentStore {
    async fn find(
        &self,
        collection: CollectionName,
        filter: &Filter,
    ) -> Result<Vec<Document>, StoreError> {
        Ok(self
            .matching_rows(collection, filter)
            .await?
            .into_iter()
            .map(|(_, doc)| doc)
            .collect())
    }

    async fn insert_one(
        &self,
        collection: CollectionName,
        mut doc: Document,
    ) -> Result<InsertOneResult, StoreError> {
        let id = ensure_id(&mut doc);
        let existing = Self::select(collection, &Filter::Id(id.clone()))
            .count(&self.db)
            .await?;
        if existing > 0 {
            return Err(StoreError::DuplicateId { collection, id });
        }

        let model = documents::ActiveModel {
            collection: Set(collection.as_str().to_string()),
            id: Set(id.as_str().to_string()),
            body: Set(Value::Object(doc)),
        };
        match documents::Entity::insert(model)
            .exec_without_returning(&self.db)
            .await
        {
            Ok(_) => Ok(InsertOneResult::new(id)),
            Err(e) if is_unique_violation(&e) => Err(StoreError::DuplicateId { collection, id }),
            Err(e) => Err(e.into()),
        }
    }

    async fn update_one(
        &self,
        collection: CollectionName,
        filter: &Filter,
        set: Document,
        upsert: bool,
    ) -> Result<UpdateResult, StoreError> {
        if let Some(changed) = self.update_first(collection, filter, &set).await? {
            return Ok(UpdateResult::matched(changed));
        }

        if !upsert {
            return Ok(UpdateResult::unmatched());
        }

        self.insert_upserted(collection, filter, &set).await
    }

    async fn delete_one(
        &self,
        collection: CollectionName,
        filter: &Filter,
    ) -> Result<DeleteResult, StoreError> {
        let first = self
            .matching_rows(collection, filter)
            .await?
            .into_iter()
            .next()
            .map(|(row, _)| row.id);
        self.delete_ids(collection, first.into_iter().collect()).await
    }

    async fn delete_many(
        &self,
        collection: CollectionName,
        filter: &Filter,
    ) -> Result<DeleteResult, StoreError> {
        let ids = self
            .matching_rows(collection, filter)
            .await?
            .into_iter()
            .map(|(row, _)| row.id)
            .collect();
        self.delete_ids(collection, ids).await
    }

    async fn count(&self, collection: CollectionName) -> Result<u64, StoreError> {
        Ok(Self::select(collection, &Filter::All).count(&self.db).await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(migration::ping(&self.db).await?)
    }

    async fn schema_version(&self) -> Result<Option<String>, StoreError> {
        Ok(migration::get_latest_migration_version(&self.db).await?)
    }

    fn backend_name(&self) -> &'static str {
        match self.db.get_database_backend() {
            sea_orm::DatabaseBackend::Postgres => "postgres",
            sea_orm::DatabaseBackend::Sqlite => "sqlite",
            _ => "sql",
        }
    }
}
