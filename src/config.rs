use std::env;

/// AppConfig
///
/// Holds the gateway's entire configuration state. Immutable once loaded, and
/// shared across all requests through the application state (pulled out via
/// FromRef where individual layers need it, e.g. the route guard).
#[derive(Clone)]
pub struct AppConfig {
    /// Base URL of the external REST backend every data operation proxies to.
    pub upstream_url: String,
    /// Name of the cookie carrying the session token minted by the auth service.
    pub session_cookie: String,
    // Runtime environment marker. Controls log formatting.
    pub env: Env,
}

/// Env
///
/// Runtime context switch between development conveniences (pretty logs,
/// default endpoints) and production settings (JSON logs, mandatory
/// configuration).
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// Provides a safe, non-panicking AppConfig instance primarily used for
    /// test setup, without requiring any environment variables.
    fn default() -> Self {
        Self {
            upstream_url: "http://localhost:8000/api/v1".to_string(),
            session_cookie: "access_token".to_string(),
            env: Env::Local,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// The canonical function for initializing configuration at startup.
    /// Reads all parameters from environment variables and fails fast on a
    /// missing production requirement.
    ///
    /// # Panics
    /// Panics if `UPSTREAM_API_URL` is unset while `APP_ENV=production`.
    /// Starting the gateway without knowing where its backend lives would
    /// only defer the failure to the first proxied request.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let upstream_url = match env {
            Env::Production => env::var("UPSTREAM_API_URL")
                .expect("FATAL: UPSTREAM_API_URL must be set in production."),
            // Local falls back to the dockerized backend's default address.
            Env::Local => env::var("UPSTREAM_API_URL")
                .unwrap_or_else(|_| "http://localhost:8000/api/v1".to_string()),
        };

        let session_cookie =
            env::var("SESSION_COOKIE_NAME").unwrap_or_else(|_| "access_token".to_string());

        Self {
            upstream_url,
            session_cookie,
            env,
        }
    }
}
