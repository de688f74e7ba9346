use async_trait::async_trait;
use futures_util::TryStreamExt;
use log::{debug, info};
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::ClientOptions,
    Client, Collection, Database,
};

use super::{CollectionName, DeleteAck, DocumentStore, InsertAck, UpdateAck, Window};
use crate::error::StoreError;

/// One client for the whole process; the driver pools connections itself.
pub struct MongoStore {
    client: Client,
    db: Database,
}

impl MongoStore {
    pub async fn init(uri: &str, db_name: &str) -> Result<Self, StoreError> {
        let client_options = ClientOptions::parse(uri).await?;
        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);
        info!("MongoDB client initialised for database {}", db_name);
        Ok(MongoStore { client, db })
    }

    fn collection(&self, coll: CollectionName) -> Collection<Document> {
        self.db.collection::<Document>(coll.as_str())
    }
}

/// Skip and limit as the driver takes them; both travel as BSON int64.
fn driver_bounds(window: Window) -> (u64, i64) {
    let skip = window.skip.min(i64::MAX as u64);
    let limit = i64::try_from(window.limit).unwrap_or(i64::MAX);
    (skip, limit)
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn insert(&self, coll: CollectionName, mut doc: Document) -> Result<InsertAck, StoreError> {
        let id = ObjectId::new();
        doc.insert("_id", id);
        self.collection(coll).insert_one(doc).await?;
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
        debug!("find on {} with filter {:?} window {:?}", coll.as_str(), filter, window);
        let collection = self.collection(coll);
        let mut action = collection.find(filter);
        if let Some(window) = window {
            let (skip, limit) = driver_bounds(window);
            action = action.skip(skip).limit(limit);
        }
        let cursor = action.await?;
        let docs: Vec<Document> = cursor.try_collect().await?;
        Ok(docs)
    }

    async fn find_by_id(
        &self,
        coll: CollectionName,
        id: ObjectId,
    ) -> Result<Option<Document>, StoreError> {
        Ok(self.collection(coll).find_one(doc! { "_id": id }).await?)
    }

    async fn upsert_by_id(
        &self,
        coll: CollectionName,
        id: ObjectId,
        fields: Document,
    ) -> Result<UpdateAck, StoreError> {
        let res = self
            .collection(coll)
            .update_one(doc! { "_id": id }, doc! { "$set": fields })
            .upsert(true)
            .await?;
        let upserted_id = res.upserted_id.and_then(|b| b.as_object_id());
        Ok(UpdateAck {
            acknowledged: true,
            matched_count: res.matched_count,
            modified_count: res.modified_count,
            upserted_count: u64::from(upserted_id.is_some()),
            upserted_id,
        })
    }

    async fn delete_by_id(
        &self,
        coll: CollectionName,
        id: ObjectId,
    ) -> Result<DeleteAck, StoreError> {
        let res = self.collection(coll).delete_one(doc! { "_id": id }).await?;
        Ok(DeleteAck {
            acknowledged: true,
            deleted_count: res.deleted_count,
        })
    }

    async fn estimated_count(&self, coll: CollectionName) -> Result<u64, StoreError> {
        Ok(self.collection(coll).estimated_document_count().await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }

    async fn shutdown(&self) {
        info!("Closing MongoDB client");
        self.client.clone().shutdown().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_maps_to_driver_bounds() {
        assert_eq!(driver_bounds(Window { skip: 4, limit: 2 }), (4, 2));
        assert_eq!(
            driver_bounds(Window { skip: u64::MAX, limit: u64::MAX }),
            (i64::MAX as u64, i64::MAX)
        );
    }

    #[tokio::test]
    async fn init_does_not_need_a_live_server() {
        let store = MongoStore::init("mongodb://127.0.0.1:27017", "AssignmentDB")
            .await
            .unwrap();
        assert_eq!(
            store.collection(CollectionName::Submissions).name(),
            "submitted-assignments"
        );
        assert_eq!(store.db.name(), "AssignmentDB");
    }

    #[tokio::test]
    async fn malformed_uri_is_a_driver_error() {
        let err = MongoStore::init("not-a-mongo-uri", "AssignmentDB").await.err();
        assert!(matches!(err, Some(StoreError::Driver(_))));
    }
}
