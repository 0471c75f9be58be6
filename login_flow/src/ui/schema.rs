use super::types::FieldType;

pub(crate) const FIELD_IDENTIFIER: &str = "identifier";
pub(crate) const FIELD_PASSWORD: &str = "password";
pub(crate) const FIELD_CSRF_TOKEN: &str = "csrf_token";

pub(crate) struct FieldSchema {
    pub name: &'static str,
    pub field_type: FieldType,
    pub required: bool,
}

/// The declared field set of the password method. Exactly these three
/// fields appear in every rendered form, in this order; the submission
/// decoder accepts no others. `csrf_token` is declared for API flows too
/// but only enforced for browser submissions.
pub(crate) const PASSWORD_METHOD_FIELDS: [FieldSchema; 3] = [
    FieldSchema {
        name: FIELD_IDENTIFIER,
        field_type: FieldType::Text,
        required: true,
    },
    FieldSchema {
        name: FIELD_PASSWORD,
        field_type: FieldType::Password,
        required: true,
    },
    FieldSchema {
        name: FIELD_CSRF_TOKEN,
        field_type: FieldType::Hidden,
        required: true,
    },
];
