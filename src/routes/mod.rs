/// Router Module Index
///
/// Organizes the gateway's routing into one module per guarded section plus
/// the public surface. The sections map one-to-one onto the route guard's
/// prefix rules, so the access boundary of every endpoint is visible from
/// where it is mounted.
///
/// Routes accessible to all users (anonymous browsing, health, auth pages).
pub mod public;

/// Routes under /student-dashboard. Guard requires STUDENT.
pub mod student;

/// Routes under /instructor-dashboard. Guard requires INSTRUCTOR.
pub mod instructor;

/// Routes under /moderator-dashboard. Guard requires MODERATOR.
pub mod moderator;

/// Routes under /admin-dashboard. Guard requires ADMIN or SUPER_ADMIN.
pub mod admin;
