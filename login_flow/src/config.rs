use chrono::Duration;

/// Route where a browser client initializes a login flow.
pub const ROUTE_INIT_BROWSER: &str = "/self-service/login/browser";
/// Route where an API client initializes a login flow.
pub const ROUTE_INIT_API: &str = "/self-service/login/api";
/// Route where a previously created flow can be fetched as JSON.
pub const ROUTE_GET_FLOW: &str = "/self-service/login/flows";
/// Route where credentials for the password method are submitted.
pub const ROUTE_SUBMIT: &str = "/self-service/login/methods/password";

/// Configuration for the login flow engine.
///
/// This is an explicit value object handed to [`crate::LoginHandler`] at
/// construction. There is no ambient global configuration; everything the
/// flow manager and the response dispatcher need to know lives here.
#[derive(Debug, Clone)]
pub struct LoginConfig {
    /// How long a login flow stays submittable after creation.
    pub flow_lifespan: Duration,
    /// Base URL under which the self-service routes are mounted,
    /// e.g. `http://127.0.0.1:3000`.
    pub public_base_url: String,
    /// URL of the page that renders the login form for browser clients.
    pub login_ui_url: String,
    /// URL of the page browser clients are sent to for fatal errors.
    pub error_ui_url: String,
    /// Where to send a browser after a successful login when the flow
    /// does not carry its own `return_to`.
    pub default_return_to: String,
    /// Name of the session cookie set for browser clients.
    pub session_cookie_name: String,
}

impl LoginConfig {
    /// Build a configuration from environment variables, falling back to
    /// development defaults. `.env` is loaded first if present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let base = std::env::var("LOGIN_PUBLIC_BASE_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:3000".to_string());
        let lifespan_secs: i64 = std::env::var("LOGIN_FLOW_LIFESPAN")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(600);

        Self {
            flow_lifespan: Duration::seconds(lifespan_secs),
            login_ui_url: std::env::var("LOGIN_UI_URL")
                .unwrap_or_else(|_| format!("{base}/login")),
            error_ui_url: std::env::var("LOGIN_ERROR_UI_URL")
                .unwrap_or_else(|_| format!("{base}/error")),
            default_return_to: std::env::var("LOGIN_DEFAULT_RETURN_TO")
                .unwrap_or_else(|_| format!("{base}/")),
            session_cookie_name: std::env::var("LOGIN_SESSION_COOKIE_NAME")
                .unwrap_or_else(|_| "login_session".to_string()),
            public_base_url: base,
        }
    }

    /// Submission target for the password method of the given flow.
    pub(crate) fn submit_url(&self, flow_id: &str) -> String {
        format!("{}{}?flow={}", self.public_base_url, ROUTE_SUBMIT, flow_id)
    }

    /// Login UI page pre-bound to the given flow.
    pub(crate) fn login_ui_redirect(&self, flow_id: &str) -> String {
        format!("{}?flow={}", self.login_ui_url, flow_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    fn with_env_var<F, R>(key: &str, value: Option<&str>, test: F) -> R
    where
        F: FnOnce() -> R,
    {
        let original = env::var(key).ok();
        match value {
            Some(val) => unsafe { env::set_var(key, val) },
            None => unsafe { env::remove_var(key) },
        }
        let result = test();
        match original {
            Some(val) => unsafe { env::set_var(key, val) },
            None => unsafe { env::remove_var(key) },
        }
        result
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        with_env_var("LOGIN_FLOW_LIFESPAN", None, || {
            with_env_var("LOGIN_PUBLIC_BASE_URL", None, || {
                let config = LoginConfig::from_env();
                assert_eq!(config.flow_lifespan, Duration::seconds(600));
                assert_eq!(config.public_base_url, "http://127.0.0.1:3000");
                assert_eq!(config.login_ui_url, "http://127.0.0.1:3000/login");
                assert_eq!(config.session_cookie_name, "login_session");
            })
        });
    }

    #[test]
    #[serial]
    fn test_from_env_custom_lifespan() {
        with_env_var("LOGIN_FLOW_LIFESPAN", Some("1800"), || {
            let config = LoginConfig::from_env();
            assert_eq!(config.flow_lifespan, Duration::seconds(1800));
        });
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_lifespan_falls_back() {
        with_env_var("LOGIN_FLOW_LIFESPAN", Some("not-a-number"), || {
            let config = LoginConfig::from_env();
            assert_eq!(config.flow_lifespan, Duration::seconds(600));
        });
    }

    #[test]
    fn test_url_builders() {
        let config = LoginConfig {
            flow_lifespan: Duration::minutes(10),
            public_base_url: "http://x.test".to_string(),
            login_ui_url: "http://x.test/login".to_string(),
            error_ui_url: "http://x.test/error".to_string(),
            default_return_to: "http://x.test/".to_string(),
            session_cookie_name: "login_session".to_string(),
        };

        assert_eq!(
            config.submit_url("abc"),
            "http://x.test/self-service/login/methods/password?flow=abc"
        );
        assert_eq!(config.login_ui_redirect("abc"), "http://x.test/login?flow=abc");
    }
}
