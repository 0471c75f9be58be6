use super::schema::{FIELD_CSRF_TOKEN, FIELD_IDENTIFIER, PASSWORD_METHOD_FIELDS};
use super::types::{Field, FieldType, UiContainer, UiText};

impl UiContainer {
    /// Render the password method's form from the declared schema.
    ///
    /// The password field never carries a value here or anywhere else;
    /// `identifier_hint` pre-fills the identifier (used on forced
    /// re-authentication and when echoing a failed submission back).
    pub(crate) fn for_password_method(
        action: String,
        csrf_token: &str,
        identifier_hint: Option<&str>,
    ) -> Self {
        let fields = PASSWORD_METHOD_FIELDS
            .iter()
            .map(|schema| Field {
                name: schema.name.to_string(),
                field_type: schema.field_type,
                value: match schema.name {
                    FIELD_IDENTIFIER => identifier_hint.map(str::to_string),
                    FIELD_CSRF_TOKEN => Some(csrf_token.to_string()),
                    _ => None,
                },
                required: schema.required,
                messages: Vec::new(),
            })
            .collect();

        Self {
            action,
            method: "POST".to_string(),
            fields,
            messages: Vec::new(),
        }
    }
}

/// Build the UI state following a submission.
///
/// The container is rebuilt from the schema rather than patched in place:
/// every known field is re-emitted, messages from previous submissions are
/// gone unless re-raised now, the identifier is echoed back and the
/// password value is cleared by construction.
pub(crate) fn next_container(
    action: String,
    csrf_token: &str,
    identifier: Option<&str>,
    field_errors: &[(&str, UiText)],
    messages: Vec<UiText>,
) -> UiContainer {
    let mut ui = UiContainer::for_password_method(action, csrf_token, identifier);
    for (name, message) in field_errors {
        ui.push_field_message(name, message.clone());
    }
    ui.messages = messages;
    ui
}
