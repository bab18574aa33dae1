use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{delete, get, put},
};

/// Admin Router Module
///
/// The administration section, mounted under `/admin-dashboard`. Reachable
/// by ADMIN and SUPER_ADMIN per the guard's rule table; the two roles are
/// not distinguished further inside this gateway.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // GET /admin-dashboard/stats
        // Core platform metrics (users, courses, enrollments, review backlog).
        .route("/stats", get(handlers::get_admin_stats))
        // GET /admin-dashboard/users
        // Lists every account for the user management table.
        .route("/users", get(handlers::list_user_accounts))
        // PUT /admin-dashboard/users/{id}/role
        // Reassigns an account's role.
        .route("/users/{id}/role", put(handlers::update_user_role))
        // DELETE /admin-dashboard/users/{id}
        // Removes an account.
        .route("/users/{id}", delete(handlers::delete_user_account))
        // DELETE /admin-dashboard/courses/{id}
        // Force-removes any course, regardless of owner.
        .route("/courses/{id}", delete(handlers::admin_delete_course))
}
