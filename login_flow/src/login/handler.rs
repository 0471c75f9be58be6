use std::sync::Arc;

use http::HeaderMap;

use crate::config::LoginConfig;
use crate::credential::{
    CredentialStore, Identity, PasswordHasher, resolve_credentials, validate_required_fields,
};
use crate::csrf::{check_api_headers, verify_browser_token};
use crate::flow::{FlowError, FlowManager, FlowMode, FlowState, LoginFlow};
use crate::login::errors::LoginError;
use crate::response::{FlowResponse, Responder};
use crate::session::SessionIssuer;
use crate::storage::FlowStore;
use crate::submission::{LoginSubmission, decode_body, form_csrf_token};
use crate::ui::{UiText, messages, next_container};

/// Entry point for the password login flow engine.
///
/// Owns the flow manager and the external collaborators (credential
/// store, hasher, session issuer) and runs the whole pipeline per
/// operation. Recoverable failures come back as [`FlowResponse`]s with
/// the flow's UI merged; only backend failures surface as `Err`.
pub struct LoginHandler {
    flows: FlowManager,
    credentials: Arc<dyn CredentialStore>,
    hasher: Arc<dyn PasswordHasher>,
    sessions: Arc<dyn SessionIssuer>,
    config: LoginConfig,
}

impl LoginHandler {
    pub fn new(
        config: LoginConfig,
        flow_store: Arc<dyn FlowStore>,
        credentials: Arc<dyn CredentialStore>,
        hasher: Arc<dyn PasswordHasher>,
        sessions: Arc<dyn SessionIssuer>,
    ) -> Self {
        Self {
            flows: FlowManager::new(flow_store, config.clone()),
            credentials,
            hasher,
            sessions,
            config,
        }
    }

    pub fn config(&self) -> &LoginConfig {
        &self.config
    }

    /// Initialize a login flow.
    ///
    /// With a live session and no `forced` intent this short-circuits to
    /// already-authenticated; a forced flow always presents the form,
    /// pre-filling the identifier from the current identity.
    pub async fn create_login_flow(
        &self,
        mode: FlowMode,
        forced: bool,
        return_to: Option<String>,
        request_url: String,
        authenticated: Option<&Identity>,
    ) -> Result<FlowResponse, LoginError> {
        let responder = Responder::for_mode(mode);

        if authenticated.is_some() && !forced {
            tracing::debug!(mode = ?mode, "login flow init while already authenticated");
            return Ok(responder.already_authenticated(
                &LoginError::AlreadyAuthenticated.to_string(),
                return_to.as_deref(),
                &self.config,
            ));
        }

        let identifier_hint = authenticated.and_then(Identity::default_identifier);
        let flow = self
            .flows
            .create_flow(mode, forced, return_to, request_url, identifier_hint)
            .await?;

        Ok(responder.flow_created(&flow, &self.config)?)
    }

    /// Serve a stored flow as JSON; UIs call this to render the form.
    /// Expired flows come back as their replacement, marked 410.
    pub async fn get_login_flow(&self, id: &str) -> Result<FlowResponse, LoginError> {
        match self.flows.get_flow(id).await {
            Ok(flow) => Ok(Responder::flow_json(&flow)?),
            Err(FlowError::NotFound) => Ok(Responder::Json.not_found(
                &LoginError::FlowNotFound.to_string(),
                &self.config,
            )),
            Err(FlowError::Expired { replacement }) => {
                Ok(Responder::Json.flow_expired(&replacement, &self.config)?)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Submit credentials against a flow. The pipeline, in order:
    /// fetch + expiry, API header hygiene, body decode, browser CSRF
    /// token, required fields, credential resolution, session issuance.
    pub async fn submit_login(
        &self,
        id: &str,
        headers: &HeaderMap,
        body: &[u8],
    ) -> Result<FlowResponse, LoginError> {
        // Until a flow is loaded, its mode is unknown; sniff the headers
        // so even the not-found path stays mode-consistent.
        let header_mode = FlowMode::from_headers(headers);

        let mut flow = match self.flows.get_flow(id).await {
            Ok(flow) => flow,
            Err(FlowError::NotFound) => {
                return Ok(Responder::for_mode(header_mode)
                    .not_found(&LoginError::FlowNotFound.to_string(), &self.config));
            }
            Err(FlowError::Expired { replacement }) => {
                return Ok(Responder::for_mode(header_mode)
                    .flow_expired(&replacement, &self.config)?);
            }
            Err(err) => return Err(err.into()),
        };
        let responder = Responder::for_mode(flow.mode);

        if flow.state == FlowState::Completed {
            tracing::debug!(flow_id = %flow.id, "submission against completed flow");
            return Ok(responder.flow_unusable(&LoginError::FlowUnusable.to_string(), &self.config));
        }

        // API requests must not carry ambient browser headers.
        if flow.mode == FlowMode::Api
            && let Err(err) = check_api_headers(headers)
        {
            return Ok(Responder::api_csrf_violation(&err.to_string()));
        }

        let submission = match decode_body(flow.mode, body) {
            Ok(submission) => submission,
            Err(err) => {
                tracing::debug!(flow_id = %flow.id, error = %err, "submission decode failed");
                if flow.mode == FlowMode::Browser {
                    // Even an undecodable body has to present the flow's
                    // CSRF token before its error is written to the
                    // stored flow; a cross-site post must not touch it.
                    let token = form_csrf_token(body);
                    if verify_browser_token(&flow.csrf_token, token.as_deref()).is_err() {
                        flow.set_ui(next_container(
                            self.config.submit_url(&flow.id),
                            &flow.csrf_token,
                            None,
                            &[],
                            vec![messages::csrf_violation()],
                        ));
                        return Ok(responder.failure(flow)?);
                    }
                    // Rendered inline: the client is sent back to the
                    // login UI where the message shows up.
                    self.merge_failure(&mut flow, None, &[], vec![UiText::error(err.to_string())])
                        .await?;
                }
                return Ok(responder.malformed(&flow, &err.to_string(), &self.config));
            }
        };

        if flow.mode == FlowMode::Browser
            && verify_browser_token(&flow.csrf_token, submission.csrf_token.as_deref()).is_err()
        {
            self.merge_failure(
                &mut flow,
                submission.identifier.as_deref(),
                &[],
                vec![messages::csrf_violation()],
            )
            .await?;
            return Ok(responder.failure(flow)?);
        }

        let field_errors = validate_required_fields(&submission);
        if !field_errors.is_empty() {
            self.merge_failure(
                &mut flow,
                submission.identifier.as_deref(),
                &field_errors,
                Vec::new(),
            )
            .await?;
            return Ok(responder.failure(flow)?);
        }

        // Both present and non-empty after validation.
        let LoginSubmission {
            identifier: Some(identifier),
            password: Some(password),
            ..
        } = submission
        else {
            return Err(LoginError::Storage(
                "validated submission lost its fields".to_string(),
            ));
        };

        // The hasher runs on owned data; no store lock is held here.
        let (identity, ok) =
            resolve_credentials(&self.credentials, &self.hasher, &identifier, &password).await?;

        match (identity, ok) {
            (Some(identity), true) => {
                let session = self.sessions.issue(identity)?;
                flow.state = FlowState::Completed;
                flow.set_ui(next_container(
                    self.config.submit_url(&flow.id),
                    &flow.csrf_token,
                    Some(&identifier),
                    &[],
                    Vec::new(),
                ));
                self.flows.save(&flow).await?;
                tracing::debug!(flow_id = %flow.id, "login flow completed");
                Ok(responder.success(&flow, session, &self.config)?)
            }
            _ => {
                tracing::debug!(flow_id = %flow.id, "credential verification failed");
                self.merge_failure(
                    &mut flow,
                    Some(&identifier),
                    &[],
                    vec![messages::invalid_credentials()],
                )
                .await?;
                Ok(responder.failure(flow)?)
            }
        }
    }

    /// Merge a failed submission into the flow's UI and persist it. The
    /// identifier is echoed back, the password value is cleared by
    /// construction and all previous messages are replaced.
    async fn merge_failure(
        &self,
        flow: &mut LoginFlow,
        identifier: Option<&str>,
        field_errors: &[(&str, UiText)],
        flow_messages: Vec<UiText>,
    ) -> Result<(), LoginError> {
        flow.set_ui(next_container(
            self.config.submit_url(&flow.id),
            &flow.csrf_token,
            identifier,
            field_errors,
            flow_messages,
        ));
        flow.state = FlowState::FormSent;
        self.flows.save(flow).await?;
        Ok(())
    }
}
