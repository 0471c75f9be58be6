use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::LoginConfig;
use crate::flow::errors::FlowError;
use crate::flow::types::{FlowMethods, FlowMode, FlowState, LoginFlow, PasswordMethod};
use crate::storage::FlowStore;
use crate::ui::{UiContainer, messages};
use crate::utils::gen_random_string;

/// Creates, fetches and expires login flows.
///
/// Expiry is evaluated lazily on every access; there is no background
/// sweep. An expired flow is never mutated again: a fresh flow is created
/// in its place and every further access to the old id keeps failing.
pub(crate) struct FlowManager {
    store: Arc<dyn FlowStore>,
    config: LoginConfig,
}

impl FlowManager {
    pub(crate) fn new(store: Arc<dyn FlowStore>, config: LoginConfig) -> Self {
        Self { store, config }
    }

    /// Allocate and persist a new flow with the password method's UI.
    pub(crate) async fn create_flow(
        &self,
        mode: FlowMode,
        forced: bool,
        return_to: Option<String>,
        request_url: String,
        identifier_hint: Option<&str>,
    ) -> Result<LoginFlow, FlowError> {
        let id = Uuid::new_v4().to_string();
        let csrf_token = gen_random_string(32).map_err(|e| FlowError::Crypto(e.to_string()))?;
        let now = Utc::now();

        let ui = UiContainer::for_password_method(
            self.config.submit_url(&id),
            &csrf_token,
            identifier_hint,
        );

        let flow = LoginFlow {
            id,
            mode,
            state: FlowState::ChooseMethod,
            forced,
            issued_at: now,
            expires_at: now + self.config.flow_lifespan,
            request_url,
            return_to,
            csrf_token,
            messages: Vec::new(),
            methods: FlowMethods {
                password: PasswordMethod {
                    method: "password".to_string(),
                    config: ui,
                },
            },
        };

        self.store
            .upsert(flow.clone())
            .await
            .map_err(|e| FlowError::Storage(e.to_string()))?;

        tracing::debug!(flow_id = %flow.id, mode = ?mode, forced, "created login flow");
        Ok(flow)
    }

    /// Fetch a flow, enforcing expiry. A successful fetch counts as a
    /// render and advances a freshly created flow to `FormSent`.
    pub(crate) async fn get_flow(&self, id: &str) -> Result<LoginFlow, FlowError> {
        let mut flow = self
            .store
            .get(id)
            .await
            .map_err(|e| FlowError::Storage(e.to_string()))?
            .ok_or(FlowError::NotFound)?;

        let now = Utc::now();
        if flow.is_expired(now) {
            tracing::warn!(flow_id = %flow.id, expired_at = %flow.expires_at, "login flow expired");
            let replacement = self.replace_expired(&flow).await?;
            return Err(FlowError::Expired {
                replacement: Box::new(replacement),
            });
        }

        if flow.state == FlowState::ChooseMethod {
            flow.state = FlowState::FormSent;
            self.save(&flow).await?;
        }

        Ok(flow)
    }

    pub(crate) async fn save(&self, flow: &LoginFlow) -> Result<(), FlowError> {
        self.store
            .upsert(flow.clone())
            .await
            .map_err(|e| FlowError::Storage(e.to_string()))
    }

    /// Create the successor of an expired flow: same mode, intent and
    /// destination, new id and CSRF token, carrying the expiry notice.
    async fn replace_expired(&self, expired: &LoginFlow) -> Result<LoginFlow, FlowError> {
        let identifier_hint = expired
            .ui()
            .field("identifier")
            .and_then(|f| f.value.clone());

        let mut replacement = self
            .create_flow(
                expired.mode,
                expired.forced,
                expired.return_to.clone(),
                expired.request_url.clone(),
                identifier_hint.as_deref(),
            )
            .await?;

        replacement.messages = vec![messages::flow_expired(Utc::now() - expired.expires_at)];
        self.save(&replacement).await?;
        Ok(replacement)
    }
}
