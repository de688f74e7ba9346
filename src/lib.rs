// src/lib.rs

pub mod app_state;
pub mod assignment;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod submission;

use actix_web::{web, HttpResponse};

use crate::assignment::{
    count_assignments, create_assignment, delete_assignment, get_assignment, list_assignments,
    update_assignment,
};
use crate::auth::{clear_token, issue_token, TokenGate};
use crate::error::ApiError;
use crate::submission::{create_submission, grade_submission, list_submissions};

pub const LIVENESS_TEXT: &str = "Academe-Connect Server is running";

/// GET /
pub async fn liveness() -> HttpResponse {
    HttpResponse::Ok().body(LIVENESS_TEXT)
}

/// Registers every route plus the extractor configs that turn malformed
/// bodies and query strings into `ApiError::Validation`.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| ApiError::Validation(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| ApiError::Validation(err.to_string()).into()),
    )
    .route("/", web::get().to(liveness))
    .route("/jwt", web::post().to(issue_token))
    .route("/logout", web::post().to(clear_token))
    // ASSIGNMENTS
    .service(
        web::resource("/assignments")
            .route(web::get().to(list_assignments))
            .route(web::post().to(create_assignment)),
    )
    .route("/assignmentsCount", web::get().to(count_assignments))
    .service(
        web::resource("/assignments/{id}")
            .route(web::get().to(get_assignment))
            .route(web::put().to(update_assignment))
            .route(web::delete().to(delete_assignment)),
    )
    // SUBMISSIONS (only the listing is gated)
    .service(
        web::resource("/submittedAssignments")
            .route(web::get().to(list_submissions).wrap(TokenGate))
            .route(web::post().to(create_submission)),
    )
    .service(
        web::resource("/submittedAssignments/{id}").route(web::put().to(grade_submission)),
    );
}
