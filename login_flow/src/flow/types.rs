use chrono::{DateTime, Utc};
use http::HeaderMap;
use http::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};

use crate::ui::{UiContainer, UiText};

/// Client protocol of a flow, fixed at creation.
///
/// API clients speak JSON and carry bearer tokens; browser clients speak
/// form posts, cookies and redirects. The mode decides the response
/// protocol for the flow's entire lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowMode {
    Api,
    Browser,
}

impl FlowMode {
    /// Best-effort mode detection for requests that reference no valid
    /// flow. Once a flow is loaded, its stored mode is authoritative.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let is_json = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("application/json"));
        if is_json { Self::Api } else { Self::Browser }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowState {
    /// Freshly created, never rendered to the client.
    ChooseMethod,
    /// The form has been rendered at least once; failed submissions stay here.
    FormSent,
    /// Terminal. A session was issued; further submissions are rejected.
    Completed,
}

/// A server-side record tracking one login attempt's state, UI and expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginFlow {
    pub id: String,
    #[serde(rename = "type")]
    pub mode: FlowMode,
    pub state: FlowState,
    /// Fresh credentials are required even if a valid session exists.
    pub forced: bool,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub request_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_to: Option<String>,
    /// Anti-forgery token bound to the flow at creation. Exposed to the
    /// client only as the hidden field's value; enforced for browser
    /// submissions only. The stored record keeps it at top level, but
    /// client-facing JSON strips it (see the response module), so a
    /// re-parsed wire flow defaults to empty here.
    #[serde(default)]
    pub csrf_token: String,
    /// Flow-level notices, e.g. the expiry notice on a replacement flow.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<UiText>,
    pub methods: FlowMethods,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowMethods {
    pub password: PasswordMethod,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordMethod {
    pub method: String,
    pub config: UiContainer,
}

impl LoginFlow {
    /// The password method's form state.
    pub fn ui(&self) -> &UiContainer {
        &self.methods.password.config
    }

    pub(crate) fn set_ui(&mut self, ui: UiContainer) {
        self.methods.password.config = ui;
    }

    pub(crate) fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    #[cfg(test)]
    pub(crate) fn build_for_test(id: &str, mode: FlowMode) -> Self {
        let now = Utc::now();
        Self {
            id: id.to_string(),
            mode,
            state: FlowState::ChooseMethod,
            forced: false,
            issued_at: now,
            expires_at: now + chrono::Duration::minutes(10),
            request_url: "http://x.test/self-service/login/browser".to_string(),
            return_to: None,
            csrf_token: "test_csrf_token".to_string(),
            messages: Vec::new(),
            methods: FlowMethods {
                password: PasswordMethod {
                    method: "password".to_string(),
                    config: UiContainer::for_password_method(
                        format!(
                            "http://x.test/self-service/login/methods/password?flow={id}"
                        ),
                        "test_csrf_token",
                        None,
                    ),
                },
            },
        }
    }
}
