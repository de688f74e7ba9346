// src/assignment.rs

use actix_web::{web, HttpResponse};
use log::{debug, info};
use mongodb::bson::doc;
use serde::Deserialize;
use serde_json::json;

use crate::app_state::AppState;
use crate::error::ApiError;
use crate::models::{parse_object_id, AssignmentFields};
use crate::store::{to_json, CollectionName, Window};

const COLL: CollectionName = CollectionName::Assignments;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub size: Option<u64>,
}

impl PageQuery {
    /// `page` is zero-based. Both parameters or neither.
    pub fn window(&self) -> Result<Option<Window>, ApiError> {
        match (self.page, self.size) {
            (None, None) => Ok(None),
            (Some(page), Some(size)) => {
                if size == 0 {
                    return Err(ApiError::Validation("size must be at least 1".to_string()));
                }
                // The driver sends skip as int64.
                let skip = page
                    .checked_mul(size)
                    .filter(|skip| *skip <= i64::MAX as u64)
                    .ok_or_else(|| ApiError::Validation("page is out of range".to_string()))?;
                Ok(Some(Window { skip, limit: size }))
            }
            _ => Err(ApiError::Validation(
                "page and size must be given together".to_string(),
            )),
        }
    }
}

/// POST /assignments
pub async fn create_assignment(
    data: web::Data<AppState>,
    body: web::Json<AssignmentFields>,
) -> Result<HttpResponse, ApiError> {
    let fields = body.into_inner();
    fields.validate()?;
    let ack = data.store.insert(COLL, fields.to_document()?).await?;
    info!("Assignment created {}", ack.inserted_id);
    Ok(HttpResponse::Ok().json(ack))
}

/// GET /assignments?page=&size=
pub async fn list_assignments(
    data: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError> {
    let window = query.window()?;
    debug!("Listing assignments with window {:?}", window);
    let docs = data.store.find(COLL, doc! {}, window).await?;
    let body: Vec<serde_json::Value> = docs.into_iter().map(to_json).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /assignmentsCount
pub async fn count_assignments(data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let count = data.store.estimated_count(COLL).await?;
    Ok(HttpResponse::Ok().json(json!({ "count": count })))
}

/// GET /assignments/{id}
/// A missing document is a `null` body, not a 404.
pub async fn get_assignment(
    data: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_object_id(&id)?;
    let found = data.store.find_by_id(COLL, id).await?;
    Ok(HttpResponse::Ok().json(found.map(to_json)))
}

/// PUT /assignments/{id}
pub async fn update_assignment(
    data: web::Data<AppState>,
    id: web::Path<String>,
    body: web::Json<AssignmentFields>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_object_id(&id)?;
    let fields = body.into_inner();
    fields.validate()?;
    let ack = data.store.upsert_by_id(COLL, id, fields.to_update()).await?;
    if ack.upserted_id.is_some() {
        info!("Assignment {} created by update", id);
    } else {
        info!("Assignment {} updated", id);
    }
    Ok(HttpResponse::Ok().json(ack))
}

/// DELETE /assignments/{id}
pub async fn delete_assignment(
    data: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_object_id(&id)?;
    let ack = data.store.delete_by_id(COLL, id).await?;
    info!("Assignment {} delete removed {}", id, ack.deleted_count);
    Ok(HttpResponse::Ok().json(ack))
}
