#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    cookie::Cookie,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App,
};
use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Document};

use academe_connect_server::app_state::AppState;
use academe_connect_server::config::Config;
use academe_connect_server::error::StoreError;
use academe_connect_server::routes;
use academe_connect_server::store::{
    CollectionName, DeleteAck, DocumentStore, InsertAck, MemoryStore, UpdateAck, Window,
};

pub const SECRET: &str = "test-signing-secret";

pub fn test_config() -> Config {
    Config {
        mongo_uri: "mongodb://unused".to_string(),
        database_name: "AssignmentDB".to_string(),
        jwt_secret: SECRET.to_string(),
        port: 0,
        allowed_origins: vec!["http://localhost:5173".to_string()],
    }
}

pub fn memory_state() -> (Arc<MemoryStore>, web::Data<AppState>) {
    let store = Arc::new(MemoryStore::new());
    let state = web::Data::new(AppState::new(store.clone(), &test_config()));
    (store, state)
}

pub fn failing_state() -> web::Data<AppState> {
    web::Data::new(AppState::new(Arc::new(FailingStore), &test_config()))
}

pub fn app(
    state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().app_data(state).configure(routes)
}

pub fn token_cookie(state: &AppState, email: &str) -> Cookie<'static> {
    let token = state.tokens.issue(email).unwrap();
    Cookie::new("token", token)
}

/// Every call fails as if the database were unreachable.
pub struct FailingStore;

fn down<T>() -> Result<T, StoreError> {
    Err(StoreError::Unavailable("connection refused".to_string()))
}

#[async_trait]
impl DocumentStore for FailingStore {
    async fn insert(&self, _: CollectionName, _: Document) -> Result<InsertAck, StoreError> {
        down()
    }

    async fn find(
        &self,
        _: CollectionName,
        _: Document,
        _: Option<Window>,
    ) -> Result<Vec<Document>, StoreError> {
        down()
    }

    async fn find_by_id(
        &self,
        _: CollectionName,
        _: ObjectId,
    ) -> Result<Option<Document>, StoreError> {
        down()
    }

    async fn upsert_by_id(
        &self,
        _: CollectionName,
        _: ObjectId,
        _: Document,
    ) -> Result<UpdateAck, StoreError> {
        down()
    }

    async fn delete_by_id(&self, _: CollectionName, _: ObjectId) -> Result<DeleteAck, StoreError> {
        down()
    }

    async fn estimated_count(&self, _: CollectionName) -> Result<u64, StoreError> {
        down()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        down()
    }
}
