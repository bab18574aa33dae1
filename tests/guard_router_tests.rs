use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use course_portal::{
    AppState, TagCache, create_router,
    auth::{Role, SessionClaims},
    config::AppConfig,
    models::{
        Course, CourseModule, CreateCourseRequest, CreateModuleRequest, CreateVideoRequest,
        DashboardStats, UpdateCourseRequest, UserAccount, Video,
    },
    upstream::{Upstream, UpstreamError},
};
use jsonwebtoken::{EncodingKey, Header, encode};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

// --- Stub Upstream for Routing Tests ---

// Returns empty/default payloads for everything; these tests only care about
// which requests reach a handler at all.
#[derive(Default)]
struct StubUpstream;

#[async_trait]
impl Upstream for StubUpstream {
    async fn list_courses(
        &self,
        _category: Option<String>,
        _search: Option<String>,
    ) -> Result<Vec<Course>, UpstreamError> {
        Ok(vec![])
    }
    async fn featured_courses(&self) -> Result<Vec<Course>, UpstreamError> {
        Ok(vec![])
    }
    async fn get_course(&self, _id: Uuid) -> Result<Course, UpstreamError> {
        Ok(Course::default())
    }
    async fn create_course(&self, _req: CreateCourseRequest) -> Result<Course, UpstreamError> {
        Ok(Course::default())
    }
    async fn update_course(
        &self,
        _id: Uuid,
        _req: UpdateCourseRequest,
    ) -> Result<Course, UpstreamError> {
        Ok(Course::default())
    }
    async fn delete_course(&self, _id: Uuid) -> Result<(), UpstreamError> {
        Ok(())
    }
    async fn list_modules(&self, _course_id: Uuid) -> Result<Vec<CourseModule>, UpstreamError> {
        Ok(vec![])
    }
    async fn create_module(
        &self,
        _course_id: Uuid,
        _req: CreateModuleRequest,
    ) -> Result<CourseModule, UpstreamError> {
        Ok(CourseModule::default())
    }
    async fn list_videos(&self, _module_id: Uuid) -> Result<Vec<Video>, UpstreamError> {
        Ok(vec![])
    }
    async fn create_video(
        &self,
        _module_id: Uuid,
        _req: CreateVideoRequest,
    ) -> Result<Video, UpstreamError> {
        Ok(Video::default())
    }
    async fn dashboard_stats(&self) -> Result<DashboardStats, UpstreamError> {
        Ok(DashboardStats::default())
    }
    async fn list_users(&self) -> Result<Vec<UserAccount>, UpstreamError> {
        Ok(vec![])
    }
    async fn update_user_role(
        &self,
        _id: Uuid,
        _role: Role,
    ) -> Result<UserAccount, UpstreamError> {
        Ok(UserAccount::default())
    }
    async fn delete_user(&self, _id: Uuid) -> Result<(), UpstreamError> {
        Ok(())
    }
}

// --- Helper Functions ---

fn test_router() -> axum::Router {
    let state = AppState {
        upstream: Arc::new(StubUpstream),
        cache: Arc::new(TagCache::new()),
        config: AppConfig::default(),
    };
    create_router(state)
}

fn mint_token(role: Role) -> String {
    let claims = SessionClaims {
        role,
        sub: Some(Uuid::from_u128(42)),
        iat: Some(1_700_000_000),
        exp: Some(1_700_003_600),
    };
    let key = EncodingKey::from_secret(b"external-auth-service-secret");
    encode(&Header::default(), &claims, &key).unwrap()
}

fn request(path: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(path);
    if let Some(token) = token {
        builder = builder.header(header::COOKIE, format!("access_token={token}"));
    }
    builder.body(Body::empty()).unwrap()
}

fn location(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

// --- Tests ---

#[tokio::test]
async fn unauthenticated_dashboard_request_redirects_to_signin() {
    let response = test_router()
        .oneshot(request("/instructor-dashboard/courses", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/auth/signin");
}

#[tokio::test]
async fn wrong_role_redirects_to_unauthorized() {
    let token = mint_token(Role::Student);
    let response = test_router()
        .oneshot(request("/admin-dashboard/stats", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/unauthorized");
}

#[tokio::test]
async fn admin_reaches_admin_stats() {
    let token = mint_token(Role::Admin);
    let response = test_router()
        .oneshot(request("/admin-dashboard/stats", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn super_admin_reaches_admin_users() {
    let token = mint_token(Role::SuperAdmin);
    let response = test_router()
        .oneshot(request("/admin-dashboard/users", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn instructor_reaches_instructor_stats() {
    let token = mint_token(Role::Instructor);
    let response = test_router()
        .oneshot(request("/instructor-dashboard/stats", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn openapi_doc_lists_both_stats_mounts() {
    let response = test_router()
        .oneshot(request("/api-docs/openapi.json", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let doc: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert!(doc["paths"].get("/admin-dashboard/stats").is_some());
    assert!(doc["paths"].get("/instructor-dashboard/stats").is_some());
}

#[tokio::test]
async fn student_reaches_student_courses() {
    let token = mint_token(Role::Student);
    let response = test_router()
        .oneshot(request("/student-dashboard/courses", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn public_browsing_needs_no_cookie() {
    let router = test_router();

    let response = router
        .clone()
        .oneshot(request("/courses", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .clone()
        .oneshot(request("/courses/featured", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = router.oneshot(request("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn signin_page_is_reachable_without_a_session() {
    let response = test_router()
        .oneshot(request("/auth/signin", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unauthorized_page_is_reachable_with_any_role() {
    // The redirect target itself must never redirect, or wrong-role requests
    // would loop.
    let token = mint_token(Role::Student);
    let response = test_router()
        .oneshot(request("/unauthorized", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn malformed_cookie_redirects_to_signin() {
    let response = test_router()
        .oneshot(request("/moderator-dashboard/courses", Some("not-a-jwt")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/auth/signin");
}

#[tokio::test]
async fn cookie_name_is_config_driven() {
    // A token under the wrong cookie name is a missing session.
    let token = mint_token(Role::Admin);
    let req = Request::builder()
        .uri("/admin-dashboard/stats")
        .header(header::COOKIE, format!("wrong_cookie={token}"))
        .body(Body::empty())
        .unwrap();

    let response = test_router().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/auth/signin");
}

#[tokio::test]
async fn guard_reads_cookie_among_several() {
    let token = mint_token(Role::Moderator);
    let req = Request::builder()
        .uri("/moderator-dashboard/courses")
        .header(
            header::COOKIE,
            format!("theme=dark; access_token={token}; locale=en"),
        )
        .body(Body::empty())
        .unwrap();

    let response = test_router().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
