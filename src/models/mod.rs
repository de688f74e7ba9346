//! Typed request bodies. Each payload checks its own field rules before it
//! reaches the store.

pub mod assignment;
pub mod submission;

pub use assignment::{AssignmentFields, Difficulty};
pub use submission::{GradeUpdate, NewSubmission};

use mongodb::bson::oid::ObjectId;

use crate::error::ApiError;

/// Parses a path id, rejecting anything that is not a 24-hex-digit ObjectId.
pub fn parse_object_id(raw: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(raw).map_err(|_| ApiError::InvalidId(raw.to_string()))
}

/// Loose shape check: one `@` with text on both sides and no whitespace.
pub fn validate_email(email: &str) -> Result<(), ApiError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(ApiError::Validation(format!("invalid email address: {:?}", email)))
    }
}

pub(crate) fn require_text(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::Validation(format!("{} must not be empty", field)));
    }
    Ok(())
}
