use std::sync::Arc;

use chrono::Duration;
use http::HeaderMap;
use http::header::CONTENT_TYPE;
use serde_json::{Value, json};

use login_flow::{
    CredentialStore, FlowMode, FlowResponse, Identity, InMemoryCredentialStore, InMemoryFlowStore,
    LoginConfig, LoginHandler, PasswordCredential, PasswordHasher, Pbkdf2Hasher, ResponseKind,
    TokenSessionIssuer,
};

pub const IDENTIFIER: &str = "alice@example.org";
pub const PASSWORD: &str = "correct-horse-battery";

pub fn config(flow_lifespan: Duration) -> LoginConfig {
    LoginConfig {
        flow_lifespan,
        public_base_url: "http://x.test".to_string(),
        login_ui_url: "http://x.test/login".to_string(),
        error_ui_url: "http://x.test/error".to_string(),
        default_return_to: "http://x.test/".to_string(),
        session_cookie_name: "login_session".to_string(),
    }
}

/// Fully in-memory handler with one registered identity.
pub async fn handler(flow_lifespan: Duration) -> LoginHandler {
    let hasher = Pbkdf2Hasher::new();
    let credentials = InMemoryCredentialStore::new();
    let identity = Identity::new(
        json!({"subject": IDENTIFIER}),
        PasswordCredential {
            identifiers: vec![IDENTIFIER.to_string()],
            hashed_password: hasher.hash(PASSWORD).expect("hashing test password"),
        },
    );
    credentials
        .upsert_identity(identity)
        .await
        .expect("seeding test identity");

    LoginHandler::new(
        config(flow_lifespan),
        Arc::new(InMemoryFlowStore::new()),
        Arc::new(credentials),
        Arc::new(hasher),
        Arc::new(TokenSessionIssuer),
    )
}

pub fn api_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, "application/json".parse().unwrap());
    headers
}

pub fn form_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        CONTENT_TYPE,
        "application/x-www-form-urlencoded".parse().unwrap(),
    );
    headers
}

pub fn as_json(response: &FlowResponse) -> &Value {
    match &response.kind {
        ResponseKind::Json(value) => value,
        other => panic!("expected JSON response, got {other:?}"),
    }
}

pub fn redirect_url(response: &FlowResponse) -> &str {
    match &response.kind {
        ResponseKind::Redirect(url) => url,
        other => panic!("expected redirect, got {other:?}"),
    }
}

/// Create an API flow and return `(flow_id, csrf_token)`.
pub async fn new_api_flow(handler: &LoginHandler) -> (String, String) {
    let response = handler
        .create_login_flow(
            FlowMode::Api,
            false,
            None,
            "http://x.test/self-service/login/api".to_string(),
            None,
        )
        .await
        .expect("creating API flow");
    let flow = as_json(&response);
    (
        flow["id"].as_str().unwrap().to_string(),
        csrf_token_of(flow),
    )
}

/// The CSRF token travels only as the hidden field's value.
pub fn csrf_token_of(flow: &Value) -> String {
    field(method_config(flow), "csrf_token")["value"]
        .as_str()
        .expect("csrf_token field value")
        .to_string()
}

/// Create a browser flow and return `(flow_id, csrf_token)`. The init
/// response is a redirect; the token comes from fetching the flow the
/// way a login UI would.
pub async fn new_browser_flow(handler: &LoginHandler) -> (String, String) {
    let response = handler
        .create_login_flow(
            FlowMode::Browser,
            false,
            None,
            "http://x.test/self-service/login/browser".to_string(),
            None,
        )
        .await
        .expect("creating browser flow");
    let url = redirect_url(&response);
    let id = url
        .rsplit("flow=")
        .next()
        .expect("flow id in redirect")
        .to_string();

    let fetched = handler.get_login_flow(&id).await.expect("fetching flow");
    let csrf_token = csrf_token_of(as_json(&fetched));
    (id, csrf_token)
}

pub fn json_body(identifier: Option<&str>, password: Option<&str>) -> Vec<u8> {
    let mut body = serde_json::Map::new();
    if let Some(identifier) = identifier {
        body.insert("identifier".to_string(), Value::String(identifier.into()));
    }
    if let Some(password) = password {
        body.insert("password".to_string(), Value::String(password.into()));
    }
    serde_json::to_vec(&Value::Object(body)).unwrap()
}

pub fn form_body(fields: &[(&str, &str)]) -> Vec<u8> {
    fields
        .iter()
        .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
        .into_bytes()
}

/// The password method's form config inside a flow JSON.
pub fn method_config(flow: &Value) -> &Value {
    &flow["methods"]["password"]["config"]
}

pub fn field<'a>(config: &'a Value, name: &str) -> &'a Value {
    config["fields"]
        .as_array()
        .expect("fields array")
        .iter()
        .find(|f| f["name"] == name)
        .unwrap_or_else(|| panic!("field {name} missing"))
}
