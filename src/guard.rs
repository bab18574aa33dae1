use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::{
    auth::{self, Role},
    config::AppConfig,
};

/// Redirect target for requests carrying no session cookie (or an
/// undecodable one, see `evaluate`).
pub const SIGNIN_PATH: &str = "/auth/signin";

/// Redirect target for authenticated requests whose role fails the matched
/// rule's predicate.
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";

/// RouteRule
///
/// One entry of the static path→role table: a URL path prefix and the set of
/// roles allowed through it. The table is fixed at compile time; there is no
/// runtime registration.
#[derive(Debug)]
pub struct RouteRule {
    pub prefix: &'static str,
    pub allowed: &'static [Role],
}

/// The protected sections of the application, evaluated in order with
/// first-match-wins semantics. Every protected prefix maps to exactly one
/// required-role predicate; a request either satisfies it or is redirected.
/// No partial access states exist.
pub const ROUTE_RULES: &[RouteRule] = &[
    RouteRule {
        prefix: "/admin-dashboard",
        allowed: &[Role::Admin, Role::SuperAdmin],
    },
    RouteRule {
        prefix: "/instructor-dashboard",
        allowed: &[Role::Instructor],
    },
    RouteRule {
        prefix: "/moderator-dashboard",
        allowed: &[Role::Moderator],
    },
    RouteRule {
        prefix: "/student-dashboard",
        allowed: &[Role::Student],
    },
];

/// Paths the guard never intercepts, checked before the rule table: the
/// proxied API surface, static assets, the public auth pages (sign-in must
/// stay reachable without a session), and service plumbing.
pub const EXEMPT_PREFIXES: &[&str] = &[
    "/api",
    "/assets",
    "/auth",
    "/favicon.ico",
    "/health",
    "/swagger-ui",
    "/api-docs",
    UNAUTHORIZED_PATH,
];

/// GuardDecision
///
/// The complete outcome space of a guard evaluation. The guard has no other
/// side effects: no logging, no token refresh, no state mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Let the request through unmodified.
    Proceed,
    /// Send an HTTP redirect to the given path instead of serving the request.
    Redirect(&'static str),
}

/// True when `path` equals `prefix` or sits below it as a path segment.
/// A plain starts_with would let `/admin-dashboardX` through.
fn prefix_matches(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// evaluate
///
/// The route guard's decision core: a pure function of the request path and
/// the session cookie value. Calling it twice with the same inputs yields the
/// same decision.
///
/// Order of checks:
/// 1. Exempt paths, and paths matching no rule, bypass the guard entirely,
///    whatever the token state.
/// 2. On a protected path with no cookie, redirect to sign-in. Terminal.
/// 3. Decode the token payload (format parsing only, unverified). A token
///    that cannot be decoded is treated exactly like a missing one: the
///    bearer cannot be classified, so they are sent to sign-in rather than
///    to the unauthorized page.
/// 4. Role outside the matched rule's allowed set → redirect to unauthorized.
/// 5. Otherwise proceed.
pub fn evaluate(path: &str, token: Option<&str>) -> GuardDecision {
    if EXEMPT_PREFIXES.iter().any(|p| prefix_matches(path, p)) {
        return GuardDecision::Proceed;
    }

    let Some(rule) = ROUTE_RULES.iter().find(|r| prefix_matches(path, r.prefix)) else {
        return GuardDecision::Proceed;
    };

    let Some(token) = token else {
        return GuardDecision::Redirect(SIGNIN_PATH);
    };

    let claims = match auth::decode_session_claims(token) {
        Ok(claims) => claims,
        Err(_) => return GuardDecision::Redirect(SIGNIN_PATH),
    };

    if rule.allowed.contains(&claims.role) {
        GuardDecision::Proceed
    } else {
        GuardDecision::Redirect(UNAUTHORIZED_PATH)
    }
}

/// route_guard
///
/// The axum middleware adapter around `evaluate`. It is the sole
/// access-control checkpoint between a request and the role-scoped sections;
/// handlers behind it perform no role checks of their own.
///
/// Redirects use 307 so the client retries the original method against the
/// redirect target.
pub async fn route_guard(
    State(config): State<AppConfig>,
    request: Request,
    next: Next,
) -> Response {
    let token = auth::session_token(request.headers(), &config.session_cookie);

    match evaluate(request.uri().path(), token.as_deref()) {
        GuardDecision::Proceed => next.run(request).await,
        GuardDecision::Redirect(target) => Redirect::temporary(target).into_response(),
    }
}
