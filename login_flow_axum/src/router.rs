//! Router for the self-service login endpoints.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use login_flow::{
    LoginHandler, ROUTE_GET_FLOW, ROUTE_INIT_API, ROUTE_INIT_BROWSER, ROUTE_SUBMIT,
};

use crate::handlers::{get_login_flow, init_api_flow, init_browser_flow, submit_login};

/// Build a router exposing the login flow endpoints, carrying the
/// handler as shared state. Mount it at the application root; the
/// routes already live under `/self-service/login/`.
pub fn login_flow_router(handler: Arc<LoginHandler>) -> Router {
    Router::new()
        .route(ROUTE_INIT_BROWSER, get(init_browser_flow))
        .route(ROUTE_INIT_API, get(init_api_flow))
        .route(ROUTE_GET_FLOW, get(get_login_flow))
        .route(ROUTE_SUBMIT, post(submit_login))
        .with_state(handler)
}
