use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, put},
};

/// Moderator Router Module
///
/// The review section, mounted under `/moderator-dashboard`. Moderators work
/// the submission queue and decide which courses go public.
pub fn moderator_routes() -> Router<AppState> {
    Router::new()
        // GET /moderator-dashboard/courses
        // The review queue listing.
        .route("/courses", get(handlers::list_courses))
        // PUT /moderator-dashboard/courses/{id}/status
        // Records a review decision by flipping the course's published flag.
        .route("/courses/{id}/status", put(handlers::review_course))
}
