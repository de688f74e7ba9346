use mongodb::bson::{self, doc, Document};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{require_text, validate_email};
use crate::error::{ApiError, StoreError};

pub const PENDING: &str = "pending";

fn pending() -> String {
    PENDING.to_string()
}

/// Body of `POST /submittedAssignments`. Fields other than the four named
/// ones (assignment reference, answer link, notes, ...) are stored as sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubmission {
    pub submitted_user_email: String,
    #[serde(default = "pending")]
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub obtain_marks: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NewSubmission {
    pub fn validate(&self) -> Result<(), ApiError> {
        validate_email(&self.submitted_user_email)?;
        require_text("status", &self.status)?;
        Ok(())
    }

    /// The store assigns `_id`; a client supplied one is dropped.
    pub fn to_document(&self) -> Result<Document, StoreError> {
        let mut doc = bson::to_document(self)?;
        doc.remove("_id");
        Ok(doc)
    }
}

/// Body of `PUT /submittedAssignments/{id}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeUpdate {
    pub status: String,
    pub obtain_marks: Option<i32>,
    pub feedback: Option<String>,
}

impl GradeUpdate {
    pub fn validate(&self) -> Result<(), ApiError> {
        require_text("status", &self.status)?;
        if self.obtain_marks.is_some_and(|m| m < 0) {
            return Err(ApiError::Validation("obtainMarks must not be negative".to_string()));
        }
        Ok(())
    }

    /// `$set` body touching exactly `status`, `obtainMarks` and `feedback`.
    pub fn to_update(&self) -> Document {
        doc! {
            "status": self.status.clone(),
            "obtainMarks": self.obtain_marks,
            "feedback": self.feedback.clone(),
        }
    }
}
