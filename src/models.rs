use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::Role;

// --- Upstream Resource Schemas ---

/// Course
///
/// A course record as served by the upstream catalogue API. This is the
/// primary resource of the marketplace; everything else hangs off it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct Course {
    pub id: Uuid,
    /// The instructor who owns the course.
    pub instructor_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    /// Price in the smallest currency unit, to avoid float arithmetic on money.
    pub price_cents: i64,
    /// Storage key of the cover image, if one was uploaded.
    pub thumbnail: Option<String>,
    /// Moderation gate: only published courses appear in public listings.
    pub published: bool,
    pub enrolled_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// CourseModule
///
/// An ordered content section within a course. Named "module" upstream;
/// the `Course` prefix keeps it from colliding with Rust's own term.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct CourseModule {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    /// Display order within the course, starting at 1.
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

/// Video
///
/// A playable lesson inside a module. The URL points at the upstream's media
/// delivery host; this gateway never touches the media bytes.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct Video {
    pub id: Uuid,
    pub module_id: Uuid,
    pub title: String,
    pub url: String,
    pub duration_seconds: i32,
    pub position: i32,
}

/// DashboardStats
///
/// Aggregate counters for the admin and instructor dashboards, computed
/// upstream and proxied through here.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct DashboardStats {
    pub total_users: i64,
    pub total_courses: i64,
    pub total_enrollments: i64,
    /// Courses awaiting moderator review (submitted but not yet published).
    pub pending_reviews: i64,
}

/// UserAccount
///
/// A user record from the upstream accounts API, surfaced on the admin
/// dashboard. The role field reuses the same closed enum the route guard
/// decodes out of session tokens.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct UserAccount {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
}

// --- Request Payloads (Input Schemas) ---

/// CreateCourseRequest
///
/// Input payload for submitting a new course. New courses always start
/// unpublished; a moderator flips the published flag after review.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct CreateCourseRequest {
    pub title: String,
    pub description: String,
    pub category: String,
    pub price_cents: i64,
    pub thumbnail: Option<String>,
}

/// UpdateCourseRequest
///
/// Partial update payload: only the provided fields change upstream.
/// `published` is also how the moderator review decision travels.
///
/// Untouched fields are omitted from the serialized body entirely. Sending an
/// explicit `null` would read as "clear this field" to the upstream, which is
/// not what a partial update means.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct UpdateCourseRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_cents: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
}

/// CreateModuleRequest
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct CreateModuleRequest {
    pub title: String,
    pub position: i32,
}

/// CreateVideoRequest
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct CreateVideoRequest {
    pub title: String,
    pub url: String,
    pub duration_seconds: i32,
    pub position: i32,
}

/// ReviewDecisionRequest
///
/// Moderator payload recording the outcome of a course review.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct ReviewDecisionRequest {
    pub published: bool,
}

/// UpdateUserRoleRequest
///
/// Admin payload for reassigning an account's role. Deserializing through the
/// `Role` enum rejects unknown role strings before they reach the upstream.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct UpdateUserRoleRequest {
    pub role: Role,
}
