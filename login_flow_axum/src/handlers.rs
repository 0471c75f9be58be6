use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use http::header::SET_COOKIE;
use http::{HeaderMap, StatusCode};
use serde::Deserialize;

use login_flow::{
    FlowMode, FlowResponse, LoginHandler, ROUTE_INIT_API, ROUTE_INIT_BROWSER, ResponseKind,
};

use crate::error::IntoResponseError;
use crate::render;

/// Browser session cookie lifetime in seconds.
const SESSION_COOKIE_MAX_AGE: i64 = 3600;

#[derive(Deserialize)]
pub(crate) struct InitQuery {
    /// `?refresh=true` forces fresh credential entry.
    #[serde(default)]
    refresh: bool,
    return_to: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct GetFlowQuery {
    id: String,
}

#[derive(Deserialize)]
pub(crate) struct SubmitQuery {
    flow: String,
}

pub(crate) async fn init_browser_flow(
    State(handler): State<Arc<LoginHandler>>,
    Query(query): Query<InitQuery>,
) -> Result<Response, (StatusCode, String)> {
    let request_url = request_url(&handler, ROUTE_INIT_BROWSER, query.refresh);
    let response = handler
        .create_login_flow(
            FlowMode::Browser,
            query.refresh,
            query.return_to,
            request_url,
            None,
        )
        .await
        .into_response_error()?;
    Ok(into_axum_response(response, &handler))
}

pub(crate) async fn init_api_flow(
    State(handler): State<Arc<LoginHandler>>,
    Query(query): Query<InitQuery>,
) -> Result<Response, (StatusCode, String)> {
    let request_url = request_url(&handler, ROUTE_INIT_API, query.refresh);
    let response = handler
        .create_login_flow(
            FlowMode::Api,
            query.refresh,
            query.return_to,
            request_url,
            None,
        )
        .await
        .into_response_error()?;
    Ok(into_axum_response(response, &handler))
}

pub(crate) async fn get_login_flow(
    State(handler): State<Arc<LoginHandler>>,
    Query(query): Query<GetFlowQuery>,
) -> Result<Response, (StatusCode, String)> {
    let response = handler
        .get_login_flow(&query.id)
        .await
        .into_response_error()?;
    Ok(into_axum_response(response, &handler))
}

pub(crate) async fn submit_login(
    State(handler): State<Arc<LoginHandler>>,
    Query(query): Query<SubmitQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, (StatusCode, String)> {
    tracing::debug!(flow_id = %query.flow, "credential submission received");
    let response = handler
        .submit_login(&query.flow, &headers, &body)
        .await
        .into_response_error()?;
    Ok(into_axum_response(response, &handler))
}

fn request_url(handler: &LoginHandler, route: &str, refresh: bool) -> String {
    let base = &handler.config().public_base_url;
    if refresh {
        format!("{base}{route}?refresh=true")
    } else {
        format!("{base}{route}")
    }
}

/// Turn a core [`FlowResponse`] into an axum response. A session riding
/// on a browser response becomes a session cookie; API clients already
/// have the token in the JSON body.
fn into_axum_response(response: FlowResponse, handler: &LoginHandler) -> Response {
    let browser_session = match response.kind {
        ResponseKind::Json(_) => None,
        _ => response.session.as_ref(),
    };
    let cookie = browser_session.map(|session| {
        format!(
            "{}={}; SameSite=Lax; Secure; HttpOnly; Path=/; Max-Age={SESSION_COOKIE_MAX_AGE}",
            handler.config().session_cookie_name,
            session.token
        )
    });

    let mut axum_response = match response.kind {
        ResponseKind::Json(body) => (response.status, Json(body)).into_response(),
        ResponseKind::Redirect(url) => Redirect::to(&url).into_response(),
        ResponseKind::Render(flow) => {
            (response.status, Html(render::login_form(&flow))).into_response()
        }
    };

    if let Some(cookie) = cookie
        && let Ok(value) = cookie.parse()
    {
        axum_response.headers_mut().append(SET_COOKIE, value);
    }
    axum_response
}
