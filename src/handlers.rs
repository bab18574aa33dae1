use crate::{
    AppState,
    models::{
        Course, CourseModule, CreateCourseRequest, CreateModuleRequest, CreateVideoRequest,
        DashboardStats, ReviewDecisionRequest, UpdateCourseRequest, UpdateUserRoleRequest,
        UserAccount, Video,
    },
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

// --- Filter Structs ---

/// CourseFilter
///
/// Accepted query parameters for the public course listing endpoint
/// (GET /courses). Bound via axum's Query extractor and forwarded verbatim
/// to the upstream catalogue API.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct CourseFilter {
    /// Optional category slug to filter by.
    pub category: Option<String>,
    /// Optional full-text search string matched against title/description.
    pub search: Option<String>,
}

// --- Public Handlers ---

/// list_courses
///
/// [Public Route] Lists published courses with category filtering and search.
/// The upstream applies the published-only filter; this gateway only caches.
#[utoipa::path(
    get,
    path = "/courses",
    params(CourseFilter),
    responses((status = 200, description = "Filtered course list", body = [Course]))
)]
pub async fn list_courses(
    State(state): State<AppState>,
    Query(filter): Query<CourseFilter>,
) -> Result<Json<Vec<Course>>, StatusCode> {
    let courses = state
        .upstream
        .list_courses(filter.category, filter.search)
        .await
        .map_err(|e| e.status())?;
    Ok(Json(courses))
}

/// get_featured_courses
///
/// [Public Route] The small ranked list shown on the landing page.
#[utoipa::path(
    get,
    path = "/courses/featured",
    responses((status = 200, description = "Featured courses", body = [Course]))
)]
pub async fn get_featured_courses(
    State(state): State<AppState>,
) -> Result<Json<Vec<Course>>, StatusCode> {
    let featured = state
        .upstream
        .featured_courses()
        .await
        .map_err(|e| e.status())?;
    Ok(Json(featured))
}

/// get_course_details
///
/// [Public Route] A single course's detail view.
#[utoipa::path(
    get,
    path = "/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Found", body = Course),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_course_details(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Course>, StatusCode> {
    let course = state
        .upstream
        .get_course(id)
        .await
        .map_err(|e| e.status())?;
    Ok(Json(course))
}

/// get_course_modules
///
/// [Public Route] The ordered module outline of a course, shown on the
/// course detail page before enrollment.
#[utoipa::path(
    get,
    path = "/courses/{id}/modules",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses((status = 200, description = "Modules", body = [CourseModule]))
)]
pub async fn get_course_modules(
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
) -> Result<Json<Vec<CourseModule>>, StatusCode> {
    let modules = state
        .upstream
        .list_modules(course_id)
        .await
        .map_err(|e| e.status())?;
    Ok(Json(modules))
}

/// get_module_videos
///
/// [Public Route] The video listing of a module. The URLs inside point at the
/// upstream media host; playback authorization happens there, not here.
#[utoipa::path(
    get,
    path = "/modules/{id}/videos",
    params(("id" = Uuid, Path, description = "Module ID")),
    responses((status = 200, description = "Videos", body = [Video]))
)]
pub async fn get_module_videos(
    State(state): State<AppState>,
    Path(module_id): Path<Uuid>,
) -> Result<Json<Vec<Video>>, StatusCode> {
    let videos = state
        .upstream
        .list_videos(module_id)
        .await
        .map_err(|e| e.status())?;
    Ok(Json(videos))
}

// --- Instructor Handlers ---

/// create_course
///
/// [Instructor Route] Submits a new course. The route guard has already
/// established that the caller holds the INSTRUCTOR role; the upstream
/// resolves the owning instructor from its own session handling.
#[utoipa::path(
    post,
    path = "/instructor-dashboard/courses",
    request_body = CreateCourseRequest,
    responses((status = 200, description = "Created", body = Course))
)]
pub async fn create_course(
    State(state): State<AppState>,
    Json(payload): Json<CreateCourseRequest>,
) -> Result<Json<Course>, StatusCode> {
    let course = state
        .upstream
        .create_course(payload)
        .await
        .map_err(|e| e.status())?;
    Ok(Json(course))
}

/// update_course
///
/// [Instructor Route] Partial update of a course's own fields.
#[utoipa::path(
    put,
    path = "/instructor-dashboard/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    request_body = UpdateCourseRequest,
    responses((status = 200, description = "Updated", body = Course))
)]
pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCourseRequest>,
) -> Result<Json<Course>, StatusCode> {
    let course = state
        .upstream
        .update_course(id, payload)
        .await
        .map_err(|e| e.status())?;
    Ok(Json(course))
}

/// delete_course
///
/// [Instructor Route] Removes a course. Ownership is enforced upstream.
#[utoipa::path(
    delete,
    path = "/instructor-dashboard/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    state
        .upstream
        .delete_course(id)
        .await
        .map_err(|e| e.status())?;
    Ok(StatusCode::NO_CONTENT)
}

/// create_module
///
/// [Instructor Route] Appends a content module to a course.
#[utoipa::path(
    post,
    path = "/instructor-dashboard/courses/{id}/modules",
    params(("id" = Uuid, Path, description = "Course ID")),
    request_body = CreateModuleRequest,
    responses((status = 200, description = "Created", body = CourseModule))
)]
pub async fn create_module(
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
    Json(payload): Json<CreateModuleRequest>,
) -> Result<Json<CourseModule>, StatusCode> {
    let module = state
        .upstream
        .create_module(course_id, payload)
        .await
        .map_err(|e| e.status())?;
    Ok(Json(module))
}

/// create_video
///
/// [Instructor Route] Attaches a video lesson to a module. The client uploads
/// media to the backend's storage separately and submits the resulting URL.
#[utoipa::path(
    post,
    path = "/instructor-dashboard/modules/{id}/videos",
    params(("id" = Uuid, Path, description = "Module ID")),
    request_body = CreateVideoRequest,
    responses((status = 200, description = "Created", body = Video))
)]
pub async fn create_video(
    State(state): State<AppState>,
    Path(module_id): Path<Uuid>,
    Json(payload): Json<CreateVideoRequest>,
) -> Result<Json<Video>, StatusCode> {
    let video = state
        .upstream
        .create_video(module_id, payload)
        .await
        .map_err(|e| e.status())?;
    Ok(Json(video))
}

// --- Dashboard Stats Handlers ---

/// get_admin_stats
///
/// [Admin Route] Aggregate counters for the admin dashboard landing page.
/// Served from the tag cache between upstream mutations.
#[utoipa::path(
    get,
    path = "/admin-dashboard/stats",
    responses((status = 200, description = "Stats", body = DashboardStats))
)]
pub async fn get_admin_stats(
    State(state): State<AppState>,
) -> Result<Json<DashboardStats>, StatusCode> {
    let stats = state
        .upstream
        .dashboard_stats()
        .await
        .map_err(|e| e.status())?;
    Ok(Json(stats))
}

/// get_instructor_stats
///
/// [Instructor Route] The same aggregate counters, surfaced on the instructor
/// dashboard. A separate handler so each mount carries its own path in the
/// served OpenAPI doc.
#[utoipa::path(
    get,
    path = "/instructor-dashboard/stats",
    responses((status = 200, description = "Stats", body = DashboardStats))
)]
pub async fn get_instructor_stats(
    State(state): State<AppState>,
) -> Result<Json<DashboardStats>, StatusCode> {
    let stats = state
        .upstream
        .dashboard_stats()
        .await
        .map_err(|e| e.status())?;
    Ok(Json(stats))
}

// --- Moderator Handlers ---

/// review_course
///
/// [Moderator Route] Records the review decision for a submitted course by
/// flipping its published flag upstream.
#[utoipa::path(
    put,
    path = "/moderator-dashboard/courses/{id}/status",
    params(("id" = Uuid, Path, description = "Course ID")),
    request_body = ReviewDecisionRequest,
    responses((status = 200, description = "Decision recorded", body = Course))
)]
pub async fn review_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(decision): Json<ReviewDecisionRequest>,
) -> Result<Json<Course>, StatusCode> {
    let patch = UpdateCourseRequest {
        published: Some(decision.published),
        ..Default::default()
    };
    let course = state
        .upstream
        .update_course(id, patch)
        .await
        .map_err(|e| e.status())?;
    Ok(Json(course))
}

// --- Admin Handlers ---

/// list_user_accounts
///
/// [Admin Route] Lists every account known to the upstream accounts API.
#[utoipa::path(
    get,
    path = "/admin-dashboard/users",
    responses((status = 200, description = "All accounts", body = [UserAccount]))
)]
pub async fn list_user_accounts(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserAccount>>, StatusCode> {
    let users = state.upstream.list_users().await.map_err(|e| e.status())?;
    Ok(Json(users))
}

/// update_user_role
///
/// [Admin Route] Reassigns an account's role. The payload deserializes
/// through the closed `Role` enum, so an unknown role string is rejected
/// with 422 before anything reaches the upstream.
#[utoipa::path(
    put,
    path = "/admin-dashboard/users/{id}/role",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UpdateUserRoleRequest,
    responses((status = 200, description = "Updated", body = UserAccount))
)]
pub async fn update_user_role(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserRoleRequest>,
) -> Result<Json<UserAccount>, StatusCode> {
    let account = state
        .upstream
        .update_user_role(id, payload.role)
        .await
        .map_err(|e| e.status())?;
    Ok(Json(account))
}

/// delete_user_account
///
/// [Admin Route] Removes an account upstream.
#[utoipa::path(
    delete,
    path = "/admin-dashboard/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn delete_user_account(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    state
        .upstream
        .delete_user(id)
        .await
        .map_err(|e| e.status())?;
    Ok(StatusCode::NO_CONTENT)
}

/// admin_delete_course
///
/// [Admin Route] Force-removes any course, regardless of owner. Same upstream
/// call as the instructor delete; the route guard is what scopes it to admins.
#[utoipa::path(
    delete,
    path = "/admin-dashboard/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn admin_delete_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    state
        .upstream
        .delete_course(id)
        .await
        .map_err(|e| e.status())?;
    Ok(StatusCode::NO_CONTENT)
}
