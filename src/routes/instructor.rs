use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post, put},
};

/// Instructor Router Module
///
/// The instructor dashboard section, mounted under `/instructor-dashboard`.
/// Course authoring lives here: creating courses and attaching modules and
/// videos to them. Ownership of individual courses is enforced by the
/// upstream backend; the guard only establishes the INSTRUCTOR role.
pub fn instructor_routes() -> Router<AppState> {
    Router::new()
        // GET /instructor-dashboard/courses
        // The instructor's course listing.
        .route("/courses", get(handlers::list_courses))
        // POST /instructor-dashboard/courses
        // Submits a new course (starts unpublished, pending review).
        .route("/courses", post(handlers::create_course))
        // PUT/DELETE /instructor-dashboard/courses/{id}
        // Edit or remove an owned course.
        .route(
            "/courses/{id}",
            put(handlers::update_course).delete(handlers::delete_course),
        )
        // POST /instructor-dashboard/courses/{id}/modules
        // Appends a content module to a course.
        .route("/courses/{id}/modules", post(handlers::create_module))
        // POST /instructor-dashboard/modules/{id}/videos
        // Attaches an uploaded video lesson to a module.
        .route("/modules/{id}/videos", post(handlers::create_video))
        // GET /instructor-dashboard/stats
        // Aggregate counters for the instructor's dashboard landing page.
        .route("/stats", get(handlers::get_instructor_stats))
}
