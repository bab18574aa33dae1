use axum::{Router, extract::FromRef, http::HeaderName, middleware};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Core gateway services and components.
pub mod auth;
pub mod cache;
pub mod config;
pub mod guard;
pub mod handlers;
pub mod models;
pub mod upstream;

// Module for routing segregation (one module per guarded section).
pub mod routes;
use routes::{admin, instructor, moderator, public, student};

// --- Public Re-exports ---

// Makes core state types easily accessible to the main entry point (main.rs).
pub use cache::TagCache;
pub use config::AppConfig;
pub use upstream::{CachedUpstream, HttpUpstream, UpstreamState};

/// ApiDoc
///
/// Auto-generates the OpenAPI documentation (Swagger JSON) for the gateway,
/// aggregating every handler decorated with `#[utoipa::path]` and every schema
/// deriving `ToSchema`. Served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_courses, handlers::get_featured_courses, handlers::get_course_details,
        handlers::get_course_modules, handlers::get_module_videos, handlers::create_course,
        handlers::update_course, handlers::delete_course, handlers::create_module,
        handlers::create_video, handlers::get_admin_stats, handlers::get_instructor_stats,
        handlers::review_course,
        handlers::list_user_accounts, handlers::update_user_role, handlers::delete_user_account,
        handlers::admin_delete_course
    ),
    components(
        schemas(
            models::Course, models::CourseModule, models::Video, models::DashboardStats,
            models::UserAccount, models::CreateCourseRequest, models::UpdateCourseRequest,
            models::CreateModuleRequest, models::CreateVideoRequest,
            models::ReviewDecisionRequest, models::UpdateUserRoleRequest, auth::Role,
        )
    ),
    tags(
        (name = "course-portal", description = "Course Marketplace Gateway API")
    )
)]
struct ApiDoc;

/// AppState
///
/// The single, thread-safe, immutable container holding the gateway's shared
/// services: the (cached) upstream proxy, the tag cache itself, and the
/// loaded configuration. Cloned per request by axum; every field is cheap to
/// clone.
#[derive(Clone)]
pub struct AppState {
    /// Proxy layer: all upstream CRUD goes through here (and its cache).
    pub upstream: UpstreamState,
    /// The injected request/response cache, exposed for direct invalidation.
    pub cache: Arc<TagCache>,
    /// The loaded, immutable environment configuration.
    pub config: AppConfig,
}

// --- Axum FromRef Extractor Implementations ---

// These let middleware and handlers pull individual components out of the
// shared AppState (the route guard, for instance, only needs AppConfig).

impl FromRef<AppState> for UpstreamState {
    fn from_ref(app_state: &AppState) -> UpstreamState {
        app_state.upstream.clone()
    }
}

impl FromRef<AppState> for Arc<TagCache> {
    fn from_ref(app_state: &AppState) -> Arc<TagCache> {
        app_state.cache.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// create_router
///
/// Assembles the gateway's entire routing structure: the public surface, the
/// four role-scoped dashboard sections, the route guard in front of them, and
/// the observability layers around everything.
pub fn create_router(state: AppState) -> Router {
    // 1. CORS Configuration
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Header name constant for request correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    // 2. Base Router Assembly
    let base_router = Router::new()
        // Documentation: serve the auto-generated Swagger UI.
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Public surface: no guard interception (exempt or unmatched paths).
        .merge(public::public_routes())
        // Role-scoped dashboard sections. The mount prefixes are exactly the
        // guard's rule-table prefixes; the guard layer below is the sole
        // access-control checkpoint for all of them.
        .nest("/student-dashboard", student::student_routes())
        .nest("/instructor-dashboard", instructor::instructor_routes())
        .nest("/moderator-dashboard", moderator::moderator_routes())
        .nest("/admin-dashboard", admin::admin_routes())
        // The route guard sees every request and decides per its matcher
        // config and rule table; handlers never re-check roles.
        .layer(middleware::from_fn_with_state(
            state.clone(),
            guard::route_guard,
        ))
        .with_state(state);

    // 3. Observability and Correlation Layers (applied outermost)
    base_router
        .layer(
            ServiceBuilder::new()
                // 3a. Request ID generation: a unique UUID per incoming request.
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                // 3b. Request tracing: wraps the request/response lifecycle in
                // a span carrying the generated request ID.
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                // 3c. Request ID propagation back to the client.
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        // 4. CORS layer.
        .layer(cors)
}

/// trace_span_logger
///
/// Customizes TraceLayer's span creation: extracts the `x-request-id` header
/// (if present) and includes it alongside the method and URI, so every log
/// line of a request shares a correlation ID.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
