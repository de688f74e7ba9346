// src/submission.rs

use actix_web::{web, HttpRequest, HttpResponse};
use log::{debug, info, warn};
use mongodb::bson::{doc, Document};
use serde::Deserialize;

use crate::app_state::AppState;
use crate::auth::{caller, Claims};
use crate::error::ApiError;
use crate::models::submission::PENDING;
use crate::models::{parse_object_id, GradeUpdate, NewSubmission};
use crate::store::{to_json, CollectionName};

const COLL: CollectionName = CollectionName::Submissions;

#[derive(Debug, Default, Deserialize)]
pub struct SubmissionQuery {
    pub status: Option<String>,
    pub email: Option<String>,
}

impl SubmissionQuery {
    /// Only `status=pending` narrows by status; other values are ignored.
    pub fn filter(&self) -> Document {
        let mut filter = doc! {};
        if self.status.as_deref() == Some(PENDING) {
            filter.insert("status", PENDING);
        }
        if let Some(email) = &self.email {
            filter.insert("submittedUserEmail", email.clone());
        }
        filter
    }

    /// Callers may only list their own submissions. A missing `email`
    /// counts as someone else's.
    pub fn authorize(&self, claims: &Claims) -> Result<(), ApiError> {
        match &self.email {
            Some(email) if *email == claims.email => Ok(()),
            _ => Err(ApiError::Forbidden),
        }
    }
}

/// POST /submittedAssignments
pub async fn create_submission(
    data: web::Data<AppState>,
    body: web::Json<NewSubmission>,
) -> Result<HttpResponse, ApiError> {
    let submission = body.into_inner();
    submission.validate()?;
    let ack = data.store.insert(COLL, submission.to_document()?).await?;
    info!(
        "Submission {} created by {}",
        ack.inserted_id, submission.submitted_user_email
    );
    Ok(HttpResponse::Ok().json(ack))
}

/// GET /submittedAssignments?status=&email=
/// Runs behind [`TokenGate`](crate::auth::TokenGate).
pub async fn list_submissions(
    req: HttpRequest,
    data: web::Data<AppState>,
    query: web::Query<SubmissionQuery>,
) -> Result<HttpResponse, ApiError> {
    let claims = caller(&req)?;
    if let Err(e) = query.authorize(&claims) {
        warn!(
            "{} asked for submissions of {:?}",
            claims.email, query.email
        );
        return Err(e);
    }

    let filter = query.filter();
    debug!("Listing submissions with filter {:?}", filter);
    let docs = data.store.find(COLL, filter, None).await?;
    let body: Vec<serde_json::Value> = docs.into_iter().map(to_json).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// PUT /submittedAssignments/{id}
pub async fn grade_submission(
    data: web::Data<AppState>,
    id: web::Path<String>,
    body: web::Json<GradeUpdate>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_object_id(&id)?;
    let grade = body.into_inner();
    grade.validate()?;
    let ack = data.store.upsert_by_id(COLL, id, grade.to_update()).await?;
    info!("Submission {} marked {}", id, grade.status);
    Ok(HttpResponse::Ok().json(ack))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(email: &str) -> Claims {
        Claims {
            email: email.to_string(),
            iat: 0,
            exp: 3600,
        }
    }

    fn query(status: Option<&str>, email: Option<&str>) -> SubmissionQuery {
        SubmissionQuery {
            status: status.map(str::to_string),
            email: email.map(str::to_string),
        }
    }

    #[test]
    fn filters_compose() {
        assert_eq!(query(None, None).filter(), doc! {});
        assert_eq!(
            query(Some("pending"), None).filter(),
            doc! { "status": "pending" }
        );
        assert_eq!(
            query(Some("pending"), Some("a@x.com")).filter(),
            doc! { "status": "pending", "submittedUserEmail": "a@x.com" }
        );
    }

    #[test]
    fn non_pending_status_is_not_a_filter() {
        assert_eq!(
            query(Some("completed"), Some("a@x.com")).filter(),
            doc! { "submittedUserEmail": "a@x.com" }
        );
    }

    #[test]
    fn only_own_email_is_authorized() {
        let me = claims("a@x.com");
        assert!(query(None, Some("a@x.com")).authorize(&me).is_ok());
        assert!(matches!(
            query(None, Some("b@x.com")).authorize(&me),
            Err(ApiError::Forbidden)
        ));
        assert!(matches!(
            query(Some("pending"), None).authorize(&me),
            Err(ApiError::Forbidden)
        ));
        assert!(query(None, Some("A@x.com")).authorize(&me).is_err());
    }
}
