use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use log::error;
use mongodb::bson;
use serde_json::json;

/// Failures raised by a [`DocumentStore`](crate::store::DocumentStore) backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Driver(#[from] mongodb::error::Error),

    #[error("document encoding error: {0}")]
    Encoding(#[from] bson::ser::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Why a token cookie was refused.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("no token cookie")]
    MissingToken,

    #[error("invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("token expired")]
    Expired,
}

/// Every failure a route handler can return.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid id: {0}")]
    InvalidId(String),

    #[error("{0}")]
    Validation(String),

    #[error("unauthorized: {0}")]
    Unauthorized(#[from] AuthError),

    #[error("forbidden access")]
    Forbidden,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidId(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Store(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Driver details stay in the log.
        let message = match self {
            ApiError::Store(e) => {
                error!("Store failure: {}", e);
                "database operation failed".to_string()
            }
            ApiError::Internal(e) => {
                error!("Internal failure: {}", e);
                "internal server error".to_string()
            }
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(json!({ "error": message }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn status_codes_follow_the_taxonomy() {
        assert_eq!(ApiError::InvalidId("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Validation("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::from(AuthError::MissingToken).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::from(StoreError::Unavailable("down".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn store_errors_do_not_leak_details() {
        let err = ApiError::from(StoreError::Unavailable("10.0.0.7 refused".into()));
        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, json!({ "error": "database operation failed" }));
    }
}
