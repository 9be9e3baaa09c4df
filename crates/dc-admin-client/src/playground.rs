//! Dynamic endpoint invocation for the API playground.
//!
//! Unlike the typed service methods, this path accepts operator-typed JSON
//! against any catalog entry. All validation happens before dispatch:
//! malformed JSON, missing path parameters and a missing upload file abort
//! without any network activity.

use serde_json::{Map, Value};

use dc_admin_api::{EndpointDescriptor, HttpMethod, UPLOAD_KEY};

use crate::error::ApiError;
use crate::transport::Transport;

/// The three freeform JSON texts the operator fills in. Empty text is
/// treated as `{}`.
#[derive(Debug, Clone, Default)]
pub struct PlaygroundInput {
    pub path_params: String,
    pub query: String,
    pub body: String,
}

/// File selected for the upload endpoint.
#[derive(Debug, Clone)]
pub struct UploadSource {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Parse one parameter text as a JSON object, failing fast on anything else.
pub fn parse_json_object(
    field: &'static str,
    text: &str,
) -> Result<Map<String, Value>, ApiError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Map::new());
    }
    let value: Value = serde_json::from_str(trimmed)
        .map_err(|e| ApiError::InvalidJson { field, message: e.to_string() })?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ApiError::InvalidJson {
            field,
            message: "expected a JSON object".to_string(),
        }),
    }
}

/// Substitute every `{name}` token in the template with the URL-escaped
/// value from `params`. A missing, null or empty value fails with
/// `missing path parameter: name` before dispatch.
pub fn substitute_path(
    template: &str,
    params: &Map<String, Value>,
) -> Result<String, ApiError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            // Unbalanced brace; emit the remainder verbatim.
            out.push_str(&rest[open..]);
            return Ok(out);
        };
        let name = &after[..close];
        let value = match params.get(name) {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => return Err(ApiError::MissingPathParam(name.to_string())),
        };
        out.push_str(&encode_path_component(&value));
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

/// Percent-encode a path segment, keeping RFC 3986 unreserved characters.
fn encode_path_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// Invoke one catalog entry with operator-supplied parameters.
///
/// GET sends the query object only; other methods send both the query
/// object and the JSON body. The upload endpoint ignores the JSON texts and
/// requires a selected file. The returned value is the whole envelope, so
/// the operator can read `code`/`msg` themselves.
pub async fn invoke_endpoint(
    transport: &Transport,
    endpoint: &EndpointDescriptor,
    input: &PlaygroundInput,
    upload: Option<&UploadSource>,
) -> Result<Value, ApiError> {
    if endpoint.key == UPLOAD_KEY {
        let Some(file) = upload else {
            return Err(ApiError::FileRequired);
        };
        let envelope = transport
            .upload(endpoint.path, file.file_name.clone(), file.bytes.clone())
            .await?;
        return serde_json::to_value(envelope).map_err(|e| ApiError::Decode(e.to_string()));
    }

    // Parse everything up front: no partial request on bad input.
    let path_params = parse_json_object("path parameters", &input.path_params)?;
    let query = parse_json_object("query parameters", &input.query)?;
    let body = parse_json_object("request body", &input.body)?;

    let path = substitute_path(endpoint.path, &path_params)?;
    let query = Value::Object(query);
    let body = if endpoint.method == HttpMethod::Get {
        None
    } else {
        Some(Value::Object(body))
    };

    let envelope = transport
        .request(endpoint.method, &path, Some(&query), body.as_ref())
        .await?;
    serde_json::to_value(envelope).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_substitute_single_param() {
        let path = substitute_path("/resource/{id}", &params(json!({"id": "42"}))).unwrap();
        assert_eq!(path, "/resource/42");
    }

    #[test]
    fn test_substitute_missing_param_names_the_key() {
        let err = substitute_path("/resource/{id}", &Map::new()).unwrap_err();
        assert_eq!(err.user_message(), "missing path parameter: id");
    }

    #[test]
    fn test_substitute_multiple_params_and_numbers() {
        let path = substitute_path(
            "/prod-api/api/question/questionList/{id}/{level}",
            &params(json!({"id": 1, "level": "2"})),
        )
        .unwrap();
        assert_eq!(path, "/prod-api/api/question/questionList/1/2");
    }

    #[test]
    fn test_substitute_escapes_reserved_characters() {
        let path =
            substitute_path("/files/{url}", &params(json!({"url": "/uploads/a b.png"}))).unwrap();
        assert_eq!(path, "/files/%2Fuploads%2Fa%20b.png");
    }

    #[test]
    fn test_empty_string_param_counts_as_missing() {
        let err = substitute_path("/resource/{id}", &params(json!({"id": ""}))).unwrap_err();
        assert!(matches!(err, ApiError::MissingPathParam(name) if name == "id"));
    }

    #[test]
    fn test_parse_json_object_accepts_blank_text() {
        assert!(parse_json_object("query parameters", "   ").unwrap().is_empty());
        assert!(parse_json_object("query parameters", "").unwrap().is_empty());
    }

    #[test]
    fn test_parse_json_object_rejects_malformed_text() {
        let err = parse_json_object("query parameters", "{bad json").unwrap_err();
        assert!(matches!(err, ApiError::InvalidJson { field: "query parameters", .. }));
    }

    #[test]
    fn test_parse_json_object_rejects_arrays() {
        assert!(parse_json_object("request body", "[1,2]").is_err());
    }
}
