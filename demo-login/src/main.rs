use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{Router, get};
use serde::Deserialize;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use login_flow::{
    CredentialStore, Identity, InMemoryCredentialStore, InMemoryFlowStore, LoginConfig,
    LoginFlow, LoginHandler, PasswordCredential, PasswordHasher, Pbkdf2Hasher, ResponseKind,
    ROUTE_INIT_BROWSER, TokenSessionIssuer,
};
use login_flow_axum::{login_flow_router, login_form};

const DEMO_IDENTIFIER: &str = "alice@example.org";
const DEMO_PASSWORD: &str = "correct-horse-battery";

async fn index() -> Html<String> {
    Html(format!(
        "<h1>demo-login</h1>\
         <p>Try <a href=\"{ROUTE_INIT_BROWSER}\">signing in</a> as \
         <code>{DEMO_IDENTIFIER}</code> / <code>{DEMO_PASSWORD}</code>.</p>"
    ))
}

#[derive(Deserialize)]
struct LoginPageQuery {
    flow: Option<String>,
}

/// Minimal login UI: fetches the flow and renders its form server-side.
async fn login_page(
    State(handler): State<Arc<LoginHandler>>,
    Query(query): Query<LoginPageQuery>,
) -> Response {
    let Some(id) = query.flow else {
        return Redirect::to(ROUTE_INIT_BROWSER).into_response();
    };

    match handler.get_login_flow(&id).await {
        Ok(response) => match response.kind {
            ResponseKind::Json(value) => match serde_json::from_value::<LoginFlow>(value) {
                Ok(flow) => Html(login_form(&flow)).into_response(),
                Err(_) => (response.status, "flow is not renderable").into_response(),
            },
            ResponseKind::Redirect(url) => Redirect::to(&url).into_response(),
            ResponseKind::Render(flow) => Html(login_form(&flow)).into_response(),
        },
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

async fn error_page() -> Html<&'static str> {
    Html("<h1>Something went wrong</h1><p>Start over from the <a href=\"/\">home page</a>.</p>")
}

async fn build_handler() -> Result<Arc<LoginHandler>, Box<dyn std::error::Error>> {
    let hasher = Pbkdf2Hasher::new();
    let credentials = InMemoryCredentialStore::new();
    credentials
        .upsert_identity(Identity::new(
            json!({"subject": DEMO_IDENTIFIER}),
            PasswordCredential {
                identifiers: vec![DEMO_IDENTIFIER.to_string()],
                hashed_password: hasher.hash(DEMO_PASSWORD)?,
            },
        ))
        .await?;

    Ok(Arc::new(LoginHandler::new(
        LoginConfig::from_env(),
        Arc::new(InMemoryFlowStore::new()),
        Arc::new(credentials),
        Arc::new(hasher),
        Arc::new(TokenSessionIssuer),
    )))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let handler = build_handler().await?;

    let app = Router::new()
        .route("/", get(index))
        .route("/login", get(login_page))
        .route("/error", get(error_page))
        .with_state(handler.clone())
        .merge(login_flow_router(handler));

    println!("Starting server on http://localhost:3000");
    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
    axum::serve(listener, app).await?;
    Ok(())
}
