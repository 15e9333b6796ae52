use std::collections::BTreeSet;

use serde_json::Value;

use super::{DocId, Document, ID_FIELD};

/// Query filters understood by every store backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    All,
    Id(DocId),
    /// Membership in a set of ids. Construct with [`Filter::id_in`] so the
    /// set is de-duplicated.
    IdIn(Vec<DocId>),
    /// Exact equality on a top-level field.
    Eq { field: String, value: Value },
}

impl Filter {
    pub fn id(id: DocId) -> Self {
        Filter::Id(id)
    }

    pub fn id_in(ids: impl IntoIterator<Item = DocId>) -> Self {
        let unique: BTreeSet<DocId> = ids.into_iter().collect();
        Filter::IdIn(unique.into_iter().collect())
    }

    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn matches(&self, doc: &Document) -> bool {
        match self {
            Filter::All => true,
            Filter::Id(id) => doc_id_str(doc) == Some(id.as_str()),
            Filter::IdIn(ids) => match doc_id_str(doc) {
                Some(current) => ids.iter().any(|id| id.as_str() == current),
                None => false,
            },
            Filter::Eq { field, value } => doc.get(field) == Some(value),
        }
    }
}

fn doc_id_str(doc: &Document) -> Option<&str> {
    doc.get(ID_FIELD).and_then(Value::as_str)
}
