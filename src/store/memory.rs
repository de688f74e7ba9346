use std::collections::HashMap;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Document};
use tokio::sync::RwLock;

use super::{CollectionName, DeleteAck, DocumentStore, InsertAck, UpdateAck, Window};
use crate::error::StoreError;

/// In-process store keeping each collection as an insertion-ordered list.
/// Filters support top-level equality only, which is all the routes build.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<CollectionName, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches(doc: &Document, filter: &Document) -> bool {
    filter.iter().all(|(key, expected)| doc.get(key) == Some(expected))
}

fn has_id(doc: &Document, id: &ObjectId) -> bool {
    doc.get_object_id("_id").map(|v| v == *id).unwrap_or(false)
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, coll: CollectionName, mut doc: Document) -> Result<InsertAck, StoreError> {
        let id = ObjectId::new();
        doc.insert("_id", id);
        self.collections.write().await.entry(coll).or_default().push(doc);
        Ok(InsertAck {
            acknowledged: true,
            inserted_id: id,
        })
    }

    async fn find(
        &self,
        coll: CollectionName,
        filter: Document,
        window: Option<Window>,
    ) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        let matching = collections
            .get(&coll)
            .into_iter()
            .flatten()
            .filter(|doc| matches(doc, &filter))
            .cloned();
        let docs = match window {
            Some(w) => matching
                .skip(usize::try_from(w.skip).unwrap_or(usize::MAX))
                .take(usize::try_from(w.limit).unwrap_or(usize::MAX))
                .collect(),
            None => matching.collect(),
        };
        Ok(docs)
    }

    async fn find_by_id(
        &self,
        coll: CollectionName,
        id: ObjectId,
    ) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&coll)
            .and_then(|docs| docs.iter().find(|doc| has_id(doc, &id)))
            .cloned())
    }

    async fn upsert_by_id(
        &self,
        coll: CollectionName,
        id: ObjectId,
        fields: Document,
    ) -> Result<UpdateAck, StoreError> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(coll).or_default();

        if let Some(existing) = docs.iter_mut().find(|doc| has_id(doc, &id)) {
            let mut modified = false;
            for (key, value) in fields {
                if existing.get(&key) != Some(&value) {
                    existing.insert(key, value);
                    modified = true;
                }
            }
            return Ok(UpdateAck {
                acknowledged: true,
                matched_count: 1,
                modified_count: u64::from(modified),
                upserted_count: 0,
                upserted_id: None,
            });
        }

        let mut created = Document::new();
        created.insert("_id", id);
        for (key, value) in fields {
            created.insert(key, value);
        }
        docs.push(created);
        Ok(UpdateAck {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_count: 1,
            upserted_id: Some(id),
        })
    }

    async fn delete_by_id(
        &self,
        coll: CollectionName,
        id: ObjectId,
    ) -> Result<DeleteAck, StoreError> {
        let mut collections = self.collections.write().await;
        let deleted_count = match collections.get_mut(&coll) {
            Some(docs) => match docs.iter().position(|doc| has_id(doc, &id)) {
                Some(pos) => {
                    docs.remove(pos);
                    1
                }
                None => 0,
            },
            None => 0,
        };
        Ok(DeleteAck {
            acknowledged: true,
            deleted_count,
        })
    }

    async fn estimated_count(&self, coll: CollectionName) -> Result<u64, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections.get(&coll).map_or(0, |docs| docs.len() as u64))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
