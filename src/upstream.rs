use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    auth::Role,
    cache::{CacheTag, TagCache},
    models::{
        Course, CourseModule, CreateCourseRequest, CreateModuleRequest, CreateVideoRequest,
        DashboardStats, UpdateCourseRequest, UserAccount, Video,
    },
};

/// UpstreamError
///
/// Failure taxonomy for proxied operations. Everything except NotFound is an
/// infrastructure failure as far as a client of this gateway is concerned.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("upstream returned status {0}")]
    Status(u16),
    #[error("resource not found upstream")]
    NotFound,
    #[error("failed to decode upstream payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl UpstreamError {
    /// Maps the error onto the HTTP status this gateway serves for it.
    pub fn status(&self) -> StatusCode {
        match self {
            UpstreamError::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_GATEWAY,
        }
    }
}

/// Upstream Trait
///
/// The abstract contract for every CRUD operation this gateway proxies to the
/// external course backend. Handlers talk to `Arc<dyn Upstream>` and never see
/// the concrete transport, which keeps them testable against an in-memory
/// mock.
///
/// **Send + Sync + async_trait** are required to make the trait object safely
/// shareable across axum's asynchronous task boundaries.
#[async_trait]
pub trait Upstream: Send + Sync {
    // --- Courses ---
    async fn list_courses(
        &self,
        category: Option<String>,
        search: Option<String>,
    ) -> Result<Vec<Course>, UpstreamError>;
    async fn featured_courses(&self) -> Result<Vec<Course>, UpstreamError>;
    async fn get_course(&self, id: Uuid) -> Result<Course, UpstreamError>;
    async fn create_course(&self, req: CreateCourseRequest) -> Result<Course, UpstreamError>;
    async fn update_course(
        &self,
        id: Uuid,
        req: UpdateCourseRequest,
    ) -> Result<Course, UpstreamError>;
    async fn delete_course(&self, id: Uuid) -> Result<(), UpstreamError>;

    // --- Modules & Videos ---
    async fn list_modules(&self, course_id: Uuid) -> Result<Vec<CourseModule>, UpstreamError>;
    async fn create_module(
        &self,
        course_id: Uuid,
        req: CreateModuleRequest,
    ) -> Result<CourseModule, UpstreamError>;
    async fn list_videos(&self, module_id: Uuid) -> Result<Vec<Video>, UpstreamError>;
    async fn create_video(
        &self,
        module_id: Uuid,
        req: CreateVideoRequest,
    ) -> Result<Video, UpstreamError>;

    // --- Stats & Accounts ---
    async fn dashboard_stats(&self) -> Result<DashboardStats, UpstreamError>;
    async fn list_users(&self) -> Result<Vec<UserAccount>, UpstreamError>;
    async fn update_user_role(&self, id: Uuid, role: Role) -> Result<UserAccount, UpstreamError>;
    async fn delete_user(&self, id: Uuid) -> Result<(), UpstreamError>;
}

/// UpstreamState
///
/// The concrete type used to share the proxy layer across the application state.
pub type UpstreamState = Arc<dyn Upstream>;

/// HttpUpstream
///
/// The real transport: a thin reqwest client against the backend REST API.
/// Paths here mirror the upstream contract one-to-one; no reshaping happens
/// on the way through.
pub struct HttpUpstream {
    client: reqwest::Client,
    base_url: String,
}

impl HttpUpstream {
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self {
            client,
            // A trailing slash would produce double-slash paths downstream.
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Converts a non-success upstream status into the error taxonomy.
    fn check(resp: reqwest::Response) -> Result<reqwest::Response, UpstreamError> {
        let status = resp.status();
        if status.is_success() {
            Ok(resp)
        } else if status.as_u16() == 404 {
            Err(UpstreamError::NotFound)
        } else {
            Err(UpstreamError::Status(status.as_u16()))
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, UpstreamError> {
        let resp = self.client.get(self.url(path)).send().await?;
        Ok(Self::check(resp)?.json().await?)
    }

    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, UpstreamError> {
        let resp = self.client.post(self.url(path)).json(body).send().await?;
        Ok(Self::check(resp)?.json().await?)
    }

    async fn put_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, UpstreamError> {
        let resp = self.client.put(self.url(path)).json(body).send().await?;
        Ok(Self::check(resp)?.json().await?)
    }

    async fn delete(&self, path: &str) -> Result<(), UpstreamError> {
        let resp = self.client.delete(self.url(path)).send().await?;
        Self::check(resp)?;
        Ok(())
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn list_courses(
        &self,
        category: Option<String>,
        search: Option<String>,
    ) -> Result<Vec<Course>, UpstreamError> {
        let resp = self
            .client
            .get(self.url("/courses"))
            .query(&[("category", category), ("search", search)])
            .send()
            .await?;
        Ok(Self::check(resp)?.json().await?)
    }

    async fn featured_courses(&self) -> Result<Vec<Course>, UpstreamError> {
        self.get_json("/courses/featured").await
    }

    async fn get_course(&self, id: Uuid) -> Result<Course, UpstreamError> {
        self.get_json(&format!("/courses/{id}")).await
    }

    async fn create_course(&self, req: CreateCourseRequest) -> Result<Course, UpstreamError> {
        self.post_json("/courses", &req).await
    }

    async fn update_course(
        &self,
        id: Uuid,
        req: UpdateCourseRequest,
    ) -> Result<Course, UpstreamError> {
        self.put_json(&format!("/courses/{id}"), &req).await
    }

    async fn delete_course(&self, id: Uuid) -> Result<(), UpstreamError> {
        self.delete(&format!("/courses/{id}")).await
    }

    async fn list_modules(&self, course_id: Uuid) -> Result<Vec<CourseModule>, UpstreamError> {
        self.get_json(&format!("/courses/{course_id}/modules")).await
    }

    async fn create_module(
        &self,
        course_id: Uuid,
        req: CreateModuleRequest,
    ) -> Result<CourseModule, UpstreamError> {
        self.post_json(&format!("/courses/{course_id}/modules"), &req)
            .await
    }

    async fn list_videos(&self, module_id: Uuid) -> Result<Vec<Video>, UpstreamError> {
        self.get_json(&format!("/modules/{module_id}/videos")).await
    }

    async fn create_video(
        &self,
        module_id: Uuid,
        req: CreateVideoRequest,
    ) -> Result<Video, UpstreamError> {
        self.post_json(&format!("/modules/{module_id}/videos"), &req)
            .await
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, UpstreamError> {
        self.get_json("/stats").await
    }

    async fn list_users(&self) -> Result<Vec<UserAccount>, UpstreamError> {
        self.get_json("/users").await
    }

    async fn update_user_role(&self, id: Uuid, role: Role) -> Result<UserAccount, UpstreamError> {
        self.put_json(
            &format!("/users/{id}/role"),
            &crate::models::UpdateUserRoleRequest { role },
        )
        .await
    }

    async fn delete_user(&self, id: Uuid) -> Result<(), UpstreamError> {
        self.delete(&format!("/users/{id}")).await
    }
}

/// CachedUpstream
///
/// The caching decorator that gives the endpoint layer its declarative
/// URL + method + cache-tag bindings: every read is a read-through against
/// the injected `TagCache` keyed by the upstream path, and every mutation
/// invalidates the tags of the resource families it touches.
///
/// Wrapping the transport (rather than baking the cache into handlers) keeps
/// the tag bindings in one place and lets tests drive them against a mock
/// inner upstream.
pub struct CachedUpstream {
    inner: UpstreamState,
    cache: Arc<TagCache>,
}

impl CachedUpstream {
    pub fn new(inner: UpstreamState, cache: Arc<TagCache>) -> Self {
        Self { inner, cache }
    }

    async fn read_through<T, F, Fut>(
        &self,
        key: String,
        tags: &[CacheTag],
        fetch: F,
    ) -> Result<T, UpstreamError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, UpstreamError>> + Send,
    {
        if let Some(hit) = self.cache.get(&key) {
            tracing::debug!(key = %key, "tag cache hit");
            return Ok(serde_json::from_value(hit)?);
        }

        let fresh = fetch().await?;
        self.cache.insert(key, serde_json::to_value(&fresh)?, tags);
        Ok(fresh)
    }
}

#[async_trait]
impl Upstream for CachedUpstream {
    async fn list_courses(
        &self,
        category: Option<String>,
        search: Option<String>,
    ) -> Result<Vec<Course>, UpstreamError> {
        // The filter values are user input: JSON-encode them into the key so
        // a crafted filter (e.g. one embedding "&search=") cannot collide
        // with a different query's key. HttpUpstream URL-encodes the real
        // request separately.
        let key = format!(
            "/courses?filters={}",
            serde_json::json!([&category, &search])
        );
        self.read_through(key, &[CacheTag::Courses], || {
            self.inner.list_courses(category.clone(), search.clone())
        })
        .await
    }

    async fn featured_courses(&self) -> Result<Vec<Course>, UpstreamError> {
        self.read_through("/courses/featured".to_string(), &[CacheTag::Courses], || {
            self.inner.featured_courses()
        })
        .await
    }

    async fn get_course(&self, id: Uuid) -> Result<Course, UpstreamError> {
        self.read_through(format!("/courses/{id}"), &[CacheTag::Courses], || {
            self.inner.get_course(id)
        })
        .await
    }

    async fn create_course(&self, req: CreateCourseRequest) -> Result<Course, UpstreamError> {
        let course = self.inner.create_course(req).await?;
        self.cache.invalidate(CacheTag::Courses);
        self.cache.invalidate(CacheTag::Stats);
        Ok(course)
    }

    async fn update_course(
        &self,
        id: Uuid,
        req: UpdateCourseRequest,
    ) -> Result<Course, UpstreamError> {
        let course = self.inner.update_course(id, req).await?;
        self.cache.invalidate(CacheTag::Courses);
        Ok(course)
    }

    async fn delete_course(&self, id: Uuid) -> Result<(), UpstreamError> {
        self.inner.delete_course(id).await?;
        // Deleting a course takes its modules and videos down with it upstream.
        self.cache.invalidate(CacheTag::Courses);
        self.cache.invalidate(CacheTag::Modules);
        self.cache.invalidate(CacheTag::Videos);
        self.cache.invalidate(CacheTag::Stats);
        Ok(())
    }

    async fn list_modules(&self, course_id: Uuid) -> Result<Vec<CourseModule>, UpstreamError> {
        self.read_through(
            format!("/courses/{course_id}/modules"),
            &[CacheTag::Modules],
            || self.inner.list_modules(course_id),
        )
        .await
    }

    async fn create_module(
        &self,
        course_id: Uuid,
        req: CreateModuleRequest,
    ) -> Result<CourseModule, UpstreamError> {
        let module = self.inner.create_module(course_id, req).await?;
        self.cache.invalidate(CacheTag::Modules);
        Ok(module)
    }

    async fn list_videos(&self, module_id: Uuid) -> Result<Vec<Video>, UpstreamError> {
        self.read_through(
            format!("/modules/{module_id}/videos"),
            &[CacheTag::Videos],
            || self.inner.list_videos(module_id),
        )
        .await
    }

    async fn create_video(
        &self,
        module_id: Uuid,
        req: CreateVideoRequest,
    ) -> Result<Video, UpstreamError> {
        let video = self.inner.create_video(module_id, req).await?;
        self.cache.invalidate(CacheTag::Videos);
        Ok(video)
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, UpstreamError> {
        self.read_through("/stats".to_string(), &[CacheTag::Stats], || {
            self.inner.dashboard_stats()
        })
        .await
    }

    async fn list_users(&self) -> Result<Vec<UserAccount>, UpstreamError> {
        self.read_through("/users".to_string(), &[CacheTag::Users], || {
            self.inner.list_users()
        })
        .await
    }

    async fn update_user_role(&self, id: Uuid, role: Role) -> Result<UserAccount, UpstreamError> {
        let account = self.inner.update_user_role(id, role).await?;
        self.cache.invalidate(CacheTag::Users);
        Ok(account)
    }

    async fn delete_user(&self, id: Uuid) -> Result<(), UpstreamError> {
        self.inner.delete_user(id).await?;
        self.cache.invalidate(CacheTag::Users);
        self.cache.invalidate(CacheTag::Stats);
        Ok(())
    }
}
