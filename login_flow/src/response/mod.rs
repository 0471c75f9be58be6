//! Mode-aware response dispatch.
//!
//! The branching between JSON and redirect behavior lives here and only
//! here: a [`Responder`] is selected once from the flow's mode and
//! threaded through, so API clients can never receive a redirect and
//! browser clients can never receive a bare JSON error.

use http::StatusCode;
use serde_json::{Value, json};

use crate::config::LoginConfig;
use crate::flow::{FlowMode, LoginFlow};
use crate::session::Session;

/// What the transport layer should send. Framework-free; the integration
/// crate turns this into a real HTTP response.
#[derive(Debug, Clone)]
pub enum ResponseKind {
    /// Serialize the value as the JSON body.
    Json(Value),
    /// Issue a `303 See Other` style redirect to the URL.
    Redirect(String),
    /// Render the flow's form UI (HTML page for browsers; the flow JSON
    /// doubles as the render source).
    Render(Box<LoginFlow>),
}

#[derive(Debug, Clone)]
pub struct FlowResponse {
    pub status: StatusCode,
    pub kind: ResponseKind,
    /// Present only on a successful submission. API clients already have
    /// the token in the body; the integration layer turns this into a
    /// session cookie for browser clients.
    pub session: Option<Session>,
}

impl FlowResponse {
    fn json(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            kind: ResponseKind::Json(body),
            session: None,
        }
    }

    fn redirect(url: String) -> Self {
        Self {
            status: StatusCode::SEE_OTHER,
            kind: ResponseKind::Redirect(url),
            session: None,
        }
    }

    fn render(flow: LoginFlow) -> Self {
        Self {
            status: StatusCode::OK,
            kind: ResponseKind::Render(Box::new(flow)),
            session: None,
        }
    }
}

/// Client-facing flow JSON. The stored record carries the CSRF token at
/// top level; on the wire it travels only as the hidden field's value.
fn flow_wire_json(flow: &LoginFlow) -> Result<Value, serde_json::Error> {
    let mut body = serde_json::to_value(flow)?;
    if let Some(object) = body.as_object_mut() {
        object.remove("csrf_token");
    }
    Ok(body)
}

/// `{error: {code, status, message}}` with the numeric HTTP status and
/// its canonical reason phrase.
pub(crate) fn error_body(status: StatusCode, message: &str) -> Value {
    json!({
        "error": {
            "code": status.as_u16(),
            "status": status.canonical_reason().unwrap_or(""),
            "message": message,
        }
    })
}

/// Response strategy, fixed per flow at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Responder {
    Json,
    Redirect,
}

impl Responder {
    pub(crate) fn for_mode(mode: FlowMode) -> Self {
        match mode {
            FlowMode::Api => Responder::Json,
            FlowMode::Browser => Responder::Redirect,
        }
    }

    /// A freshly created flow: API clients get it as JSON, browsers are
    /// sent to the login UI to render it.
    pub(crate) fn flow_created(
        self,
        flow: &LoginFlow,
        config: &LoginConfig,
    ) -> Result<FlowResponse, serde_json::Error> {
        match self {
            Responder::Json => Ok(FlowResponse::json(StatusCode::OK, flow_wire_json(flow)?)),
            Responder::Redirect => Ok(FlowResponse::redirect(
                config.login_ui_redirect(&flow.id),
            )),
        }
    }

    /// The get-flow endpoint serves the stored flow as JSON to both
    /// modes; UIs fetch it to render the form.
    pub(crate) fn flow_json(flow: &LoginFlow) -> Result<FlowResponse, serde_json::Error> {
        Ok(FlowResponse::json(StatusCode::OK, flow_wire_json(flow)?))
    }

    pub(crate) fn not_found(self, message: &str, config: &LoginConfig) -> FlowResponse {
        match self {
            Responder::Json => FlowResponse::json(
                StatusCode::NOT_FOUND,
                error_body(StatusCode::NOT_FOUND, message),
            ),
            Responder::Redirect => FlowResponse::redirect(config.error_ui_url.clone()),
        }
    }

    /// A completed flow accepts no further submissions.
    pub(crate) fn flow_unusable(self, message: &str, config: &LoginConfig) -> FlowResponse {
        match self {
            Responder::Json => {
                FlowResponse::json(StatusCode::GONE, error_body(StatusCode::GONE, message))
            }
            Responder::Redirect => FlowResponse::redirect(config.error_ui_url.clone()),
        }
    }

    /// The expired flow was already replaced; point the client at the
    /// replacement. Its top-level messages carry the expiry notice.
    pub(crate) fn flow_expired(
        self,
        replacement: &LoginFlow,
        config: &LoginConfig,
    ) -> Result<FlowResponse, serde_json::Error> {
        match self {
            Responder::Json => Ok(FlowResponse::json(
                StatusCode::GONE,
                flow_wire_json(replacement)?,
            )),
            Responder::Redirect => Ok(FlowResponse::redirect(
                config.login_ui_redirect(&replacement.id),
            )),
        }
    }

    /// Decode-level failure: the payload never became a submission, so
    /// there are no field messages to render. API clients get the error
    /// body with the flow id attached; browsers are sent back to the
    /// login UI where the inline message (merged by the caller) shows.
    pub(crate) fn malformed(
        self,
        flow: &LoginFlow,
        message: &str,
        config: &LoginConfig,
    ) -> FlowResponse {
        match self {
            Responder::Json => {
                let mut body = error_body(StatusCode::BAD_REQUEST, message);
                body["flow_id"] = Value::String(flow.id.clone());
                FlowResponse::json(StatusCode::BAD_REQUEST, body)
            }
            Responder::Redirect => FlowResponse::redirect(config.login_ui_redirect(&flow.id)),
        }
    }

    /// API-mode CSRF hygiene violation (forbidden `Cookie`/`Origin`
    /// header). Browser-mode CSRF failures go through [`Self::failure`]
    /// instead, rendered into the UI.
    pub(crate) fn api_csrf_violation(message: &str) -> FlowResponse {
        FlowResponse::json(
            StatusCode::BAD_REQUEST,
            error_body(StatusCode::BAD_REQUEST, message),
        )
    }

    /// Recoverable submission failure: the flow's UI has been merged
    /// with the outcome's messages. API clients get the flow JSON at
    /// 400, browsers a 200 in-place render.
    pub(crate) fn failure(self, flow: LoginFlow) -> Result<FlowResponse, serde_json::Error> {
        match self {
            Responder::Json => Ok(FlowResponse::json(
                StatusCode::BAD_REQUEST,
                flow_wire_json(&flow)?,
            )),
            Responder::Redirect => Ok(FlowResponse::render(flow)),
        }
    }

    pub(crate) fn success(
        self,
        flow: &LoginFlow,
        session: Session,
        config: &LoginConfig,
    ) -> Result<FlowResponse, serde_json::Error> {
        let mut response = match self {
            Responder::Json => FlowResponse::json(
                StatusCode::OK,
                json!({
                    "session_token": session.token,
                    "session": serde_json::to_value(&session)?,
                }),
            ),
            Responder::Redirect => {
                let target = flow
                    .return_to
                    .clone()
                    .unwrap_or_else(|| config.default_return_to.clone());
                FlowResponse::redirect(target)
            }
        };
        response.session = Some(session);
        Ok(response)
    }

    pub(crate) fn already_authenticated(
        self,
        message: &str,
        return_to: Option<&str>,
        config: &LoginConfig,
    ) -> FlowResponse {
        match self {
            Responder::Json => FlowResponse::json(
                StatusCode::BAD_REQUEST,
                error_body(StatusCode::BAD_REQUEST, message),
            ),
            Responder::Redirect => FlowResponse::redirect(
                return_to
                    .map(str::to_string)
                    .unwrap_or_else(|| config.default_return_to.clone()),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::{FlowMode, LoginFlow};
    use crate::session::SessionIssuer;
    use chrono::Duration;

    fn config() -> LoginConfig {
        LoginConfig {
            flow_lifespan: Duration::minutes(10),
            public_base_url: "http://x.test".to_string(),
            login_ui_url: "http://x.test/login".to_string(),
            error_ui_url: "http://x.test/error".to_string(),
            default_return_to: "http://x.test/".to_string(),
            session_cookie_name: "login_session".to_string(),
        }
    }

    #[test]
    fn test_error_body_shape() {
        let body = error_body(StatusCode::NOT_FOUND, "Unable to locate the resource");
        assert_eq!(body["error"]["code"], 404);
        assert_eq!(body["error"]["status"], "Not Found");
        assert_eq!(body["error"]["message"], "Unable to locate the resource");
    }

    #[test]
    fn test_flow_json_carries_csrf_token_only_as_hidden_field() {
        let config = config();
        let flow = LoginFlow::build_for_test("f1", FlowMode::Api);
        let responder = Responder::for_mode(FlowMode::Api);

        let responses = [
            responder.flow_created(&flow, &config).unwrap(),
            Responder::flow_json(&flow).unwrap(),
            responder.flow_expired(&flow, &config).unwrap(),
            responder.failure(flow.clone()).unwrap(),
        ];
        for response in responses {
            let ResponseKind::Json(body) = response.kind else {
                panic!("expected JSON");
            };
            assert!(body.get("csrf_token").is_none(), "token leaked: {body}");
            let fields = body["methods"]["password"]["config"]["fields"]
                .as_array()
                .unwrap();
            let hidden = fields.iter().find(|f| f["name"] == "csrf_token").unwrap();
            assert_eq!(hidden["value"], flow.csrf_token.as_str());
        }
    }

    #[test]
    fn test_api_clients_never_get_redirects() {
        let config = config();
        let flow = LoginFlow::build_for_test("f1", FlowMode::Api);
        let responder = Responder::for_mode(FlowMode::Api);

        let responses = [
            responder.flow_created(&flow, &config).unwrap(),
            responder.not_found("Unable to locate the resource", &config),
            responder.flow_expired(&flow, &config).unwrap(),
            responder.malformed(&flow, "json: oops", &config),
            responder.failure(flow.clone()).unwrap(),
        ];
        for response in responses {
            assert!(
                matches!(response.kind, ResponseKind::Json(_)),
                "API response was not JSON"
            );
        }
    }

    #[test]
    fn test_browser_clients_never_get_bare_json_errors() {
        let config = config();
        let flow = LoginFlow::build_for_test("f1", FlowMode::Browser);
        let responder = Responder::for_mode(FlowMode::Browser);

        let created = responder.flow_created(&flow, &config).unwrap();
        assert!(matches!(created.kind, ResponseKind::Redirect(ref url)
            if url.contains("flow=f1")));

        let not_found = responder.not_found("Unable to locate the resource", &config);
        assert!(matches!(not_found.kind, ResponseKind::Redirect(ref url)
            if url == "http://x.test/error"));

        let failure = responder.failure(flow).unwrap();
        assert_eq!(failure.status, StatusCode::OK);
        assert!(matches!(failure.kind, ResponseKind::Render(_)));
    }

    #[test]
    fn test_browser_success_redirects_to_return_to() {
        let config = config();
        let mut flow = LoginFlow::build_for_test("f1", FlowMode::Browser);
        flow.return_to = Some("http://x.test/app".to_string());
        let session = crate::session::TokenSessionIssuer
            .issue(crate::credential::Identity::new(
                serde_json::json!({}),
                crate::credential::PasswordCredential::default(),
            ))
            .unwrap();

        let response = Responder::Redirect
            .success(&flow, session, &config)
            .unwrap();
        assert_eq!(response.status, StatusCode::SEE_OTHER);
        assert!(matches!(response.kind, ResponseKind::Redirect(ref url)
            if url == "http://x.test/app"));
        assert!(response.session.is_some());
    }

    #[test]
    fn test_api_success_carries_session_token() {
        let config = config();
        let flow = LoginFlow::build_for_test("f1", FlowMode::Api);
        let session = crate::session::TokenSessionIssuer
            .issue(crate::credential::Identity::new(
                serde_json::json!({"subject": "alice"}),
                crate::credential::PasswordCredential::default(),
            ))
            .unwrap();
        let token = session.token.clone();

        let response = Responder::Json.success(&flow, session, &config).unwrap();
        let ResponseKind::Json(body) = response.kind else {
            panic!("expected JSON");
        };
        assert_eq!(body["session_token"], token.as_str());
        assert_eq!(body["session"]["identity"]["traits"]["subject"], "alice");
        // The raw token never appears inside the session record itself.
        assert!(body["session"].get("token").is_none());
    }
}
