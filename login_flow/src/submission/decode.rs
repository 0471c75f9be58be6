use serde_json::Value;

use crate::flow::FlowMode;
use crate::submission::LoginSubmission;
use crate::submission::errors::DecodeError;
use crate::ui::schema::{FIELD_CSRF_TOKEN, FIELD_IDENTIFIER, FIELD_PASSWORD};

/// Decode a raw request body according to the flow's mode.
pub(crate) fn decode_body(mode: FlowMode, body: &[u8]) -> Result<LoginSubmission, DecodeError> {
    match mode {
        FlowMode::Api => decode_json(body),
        FlowMode::Browser => decode_form(body),
    }
}

fn decode_json(body: &[u8]) -> Result<LoginSubmission, DecodeError> {
    // Read the first JSON value only; a numeric or otherwise non-object
    // prefix is reported by its JSON type, trailing garbage is ignored.
    let mut stream = serde_json::Deserializer::from_slice(body).into_iter::<Value>();
    let value = match stream.next() {
        Some(Ok(value)) => value,
        Some(Err(e)) => {
            // A number or other primitive prefix trips the stream parser
            // before it can yield the value; sniff the leading type so the
            // error still names what was found.
            if let Some(found) = sniff_json_type(body) {
                return Err(DecodeError::Unmarshal {
                    found,
                    target: "login submission of type object".to_string(),
                });
            }
            return Err(DecodeError::Syntax(e.to_string()));
        }
        None => Value::Object(serde_json::Map::new()),
    };

    let Some(object) = value.as_object() else {
        return Err(DecodeError::Unmarshal {
            found: json_type_name(&value),
            target: "login submission of type object".to_string(),
        });
    };

    Ok(LoginSubmission {
        identifier: string_field(object, FIELD_IDENTIFIER)?,
        password: string_field(object, FIELD_PASSWORD)?,
        csrf_token: string_field(object, FIELD_CSRF_TOKEN)?,
    })
}

fn string_field(
    object: &serde_json::Map<String, Value>,
    name: &str,
) -> Result<Option<String>, DecodeError> {
    match object.get(name) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(DecodeError::Unmarshal {
            found: json_type_name(other),
            target: format!("field {name} of type string"),
        }),
    }
}

/// JSON type of the first value in a body the parser rejected. Returns
/// `None` for objects (a genuine syntax error) and unrecognizable bodies.
fn sniff_json_type(body: &[u8]) -> Option<&'static str> {
    let first = body.iter().find(|b| !b.is_ascii_whitespace())?;
    match first {
        b'[' => Some("array"),
        b'"' => Some("string"),
        b'-' | b'0'..=b'9' => Some("number"),
        b't' | b'f' => Some("bool"),
        b'n' => Some("null"),
        _ => None,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn decode_form(body: &[u8]) -> Result<LoginSubmission, DecodeError> {
    let raw = std::str::from_utf8(body)
        .map_err(|_| DecodeError::Encoding("form body is not valid UTF-8".to_string()))?;

    let mut submission = LoginSubmission::default();
    for pair in raw.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = unescape(key)?;
        let value = unescape(value)?;
        match key.as_str() {
            FIELD_IDENTIFIER => submission.identifier = Some(value),
            FIELD_PASSWORD => submission.password = Some(value),
            FIELD_CSRF_TOKEN => submission.csrf_token = Some(value),
            // Unknown keys are not part of the declared schema; drop them.
            _ => {}
        }
    }
    Ok(submission)
}

/// Best-effort extraction of the CSRF token from a form body that failed
/// to decode. The token must be checked before a decode error is written
/// to a browser flow, and its own pair usually survives whatever broke
/// the rest of the body.
pub(crate) fn form_csrf_token(body: &[u8]) -> Option<String> {
    let raw = std::str::from_utf8(body).ok()?;
    raw.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        if key == FIELD_CSRF_TOKEN {
            unescape(value).ok()
        } else {
            None
        }
    })
}

fn unescape(component: &str) -> Result<String, DecodeError> {
    check_percent_escapes(component)?;
    let spaced = component.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|cow| cow.into_owned())
        .map_err(|e| DecodeError::Encoding(e.to_string()))
}

/// The decoding itself is lossy about broken escapes, so scan for them
/// first and report the offending sequence verbatim.
fn check_percent_escapes(component: &str) -> Result<(), DecodeError> {
    let bytes = component.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = i + 2 < bytes.len()
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                let mut end = (i + 3).min(component.len());
                while !component.is_char_boundary(end) {
                    end -= 1;
                }
                return Err(DecodeError::InvalidUrlEscape(component[i..end].to_string()));
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    Ok(())
}
