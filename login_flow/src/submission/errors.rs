use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A JSON value of the wrong type where a string was expected, or a
    /// non-object at the top level.
    #[error("json: cannot unmarshal {found} into {target}")]
    Unmarshal { found: &'static str, target: String },

    #[error("json: {0}")]
    Syntax(String),

    /// A `%` sequence in a form body that is not a valid percent escape.
    #[error("invalid URL escape {0:?}")]
    InvalidUrlEscape(String),

    #[error("invalid form encoding: {0}")]
    Encoding(String),
}
