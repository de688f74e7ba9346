//! Document store port.
//!
//! Route handlers only see [`DocumentStore`]; `MongoStore` talks to a real
//! deployment and `MemoryStore` backs the test suite.

mod memory;
mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use serde::{Serialize, Serializer};

use crate::error::StoreError;

/// The two collections the service owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionName {
    Assignments,
    Submissions,
}

impl CollectionName {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionName::Assignments => "assignments",
            CollectionName::Submissions => "submitted-assignments",
        }
    }
}

/// A skip/limit slice of a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub skip: u64,
    pub limit: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertAck {
    pub acknowledged: bool,
    #[serde(serialize_with = "hex_id")]
    pub inserted_id: ObjectId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAck {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    #[serde(serialize_with = "hex_id_opt")]
    pub upserted_id: Option<ObjectId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAck {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

fn hex_id<S: Serializer>(id: &ObjectId, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&id.to_hex())
}

fn hex_id_opt<S: Serializer>(id: &Option<ObjectId>, s: S) -> Result<S::Ok, S::Error> {
    match id {
        Some(id) => s.serialize_str(&id.to_hex()),
        None => s.serialize_none(),
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Inserts `doc` under a freshly generated `_id`.
    async fn insert(&self, coll: CollectionName, doc: Document) -> Result<InsertAck, StoreError>;

    /// Documents whose top-level fields equal every entry of `filter`, in
    /// store order.
    async fn find(
        &self,
        coll: CollectionName,
        filter: Document,
        window: Option<Window>,
    ) -> Result<Vec<Document>, StoreError>;

    async fn find_by_id(
        &self,
        coll: CollectionName,
        id: ObjectId,
    ) -> Result<Option<Document>, StoreError>;

    /// `$set`s `fields` on the document with `id`, creating it when absent.
    async fn upsert_by_id(
        &self,
        coll: CollectionName,
        id: ObjectId,
        fields: Document,
    ) -> Result<UpdateAck, StoreError>;

    async fn delete_by_id(&self, coll: CollectionName, id: ObjectId)
        -> Result<DeleteAck, StoreError>;

    async fn estimated_count(&self, coll: CollectionName) -> Result<u64, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;

    /// Releases the connection; called once after the server stops.
    async fn shutdown(&self) {}
}

/// Renders a stored document as the JSON a browser client expects: `_id` as
/// its hex string, everything else as relaxed extended JSON.
pub fn to_json(mut doc: Document) -> serde_json::Value {
    if let Ok(id) = doc.get_object_id("_id") {
        doc.insert("_id", id.to_hex());
    }
    Bson::Document(doc).into_relaxed_extjson()
}
