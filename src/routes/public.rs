use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Public Router Module
///
/// Endpoints reachable without a session: the browse/marketing surface, the
/// auth pages the guard redirects to, and service plumbing. All of these are
/// either exempt in the guard's matcher config or simply match no rule, so
/// they bypass the guard regardless of token state.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Unauthenticated endpoint for monitoring and load balancer checks.
        .route("/health", get(|| async { "ok" }))
        // GET /auth/signin
        // The sign-in page target of the guard's unauthenticated redirect.
        // The actual credential exchange happens at the external auth service;
        // this endpoint only has to exist and stay reachable without a cookie.
        .route("/auth/signin", get(|| async { "sign in" }))
        // GET /unauthorized
        // Landing page for requests whose role failed the guard's predicate.
        .route("/unauthorized", get(|| async { "unauthorized" }))
        // GET /courses?category=...&search=...
        // Lists published courses with filtering and search.
        .route("/courses", get(handlers::list_courses))
        // GET /courses/featured
        // The ranked shortlist for the landing page.
        .route("/courses/featured", get(handlers::get_featured_courses))
        // GET /courses/{id}
        // Detailed view of a single course.
        .route("/courses/{id}", get(handlers::get_course_details))
        // GET /courses/{id}/modules
        // The course outline shown before enrollment.
        .route("/courses/{id}/modules", get(handlers::get_course_modules))
        // GET /modules/{id}/videos
        // Video listing of a module.
        .route("/modules/{id}/videos", get(handlers::get_module_videos))
}
