use chrono::{DateTime, NaiveDate};
use mongodb::bson::{self, doc, Document};
use serde::{Deserialize, Serialize};

use super::require_text;
use crate::error::{ApiError, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// Body of `POST /assignments` and `PUT /assignments/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentFields {
    pub title: String,
    pub marks: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Kept exactly as sent once it parses as a date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub difficulty: Difficulty,
}

impl AssignmentFields {
    pub fn validate(&self) -> Result<(), ApiError> {
        require_text("title", &self.title)?;
        if self.marks < 0 {
            return Err(ApiError::Validation("marks must not be negative".to_string()));
        }
        if let Some(due) = &self.due_date {
            let parses = NaiveDate::parse_from_str(due, "%Y-%m-%d").is_ok()
                || DateTime::parse_from_rfc3339(due).is_ok();
            if !parses {
                return Err(ApiError::Validation(format!(
                    "dueDate must be YYYY-MM-DD or RFC 3339, got {:?}",
                    due
                )));
            }
        }
        Ok(())
    }

    /// Document for insertion; absent optional fields are left out.
    pub fn to_document(&self) -> Result<Document, StoreError> {
        Ok(bson::to_document(self)?)
    }

    /// `$set` body touching exactly the six assignment fields.
    pub fn to_update(&self) -> Document {
        doc! {
            "title": self.title.clone(),
            "marks": self.marks,
            "thumbnail": self.thumbnail.clone(),
            "dueDate": self.due_date.clone(),
            "details": self.details.clone(),
            "difficulty": self.difficulty.as_str(),
        }
    }
}
