use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Student Router Module
///
/// The student dashboard section, mounted under `/student-dashboard`. The
/// route guard has already required the STUDENT role by the time anything
/// here runs; no handler repeats the check.
pub fn student_routes() -> Router<AppState> {
    Router::new()
        // GET /student-dashboard/courses
        // The student's course browser. Same catalogue listing as the public
        // surface, served inside the dashboard shell.
        .route("/courses", get(handlers::list_courses))
        // GET /student-dashboard/courses/{id}/modules
        // Course outline, used by the player page's sidebar.
        .route("/courses/{id}/modules", get(handlers::get_course_modules))
        // GET /student-dashboard/modules/{id}/videos
        // The lesson list a student plays through.
        .route("/modules/{id}/videos", get(handlers::get_module_videos))
}
