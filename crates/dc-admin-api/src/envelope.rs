use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

/// Envelope `code` value the backend uses for a logical success.
pub const CODE_OK: i64 = 200;

/// Uniform JSON wrapper returned by every backend endpoint.
///
/// `data` carries the payload (absent on bare acknowledgements), `total` the
/// record count for paginated list endpoints, `token` appears only on
/// login/registration success. An HTTP 2xx response with `code != 200` is a
/// soft failure: the transport does not raise it, callers inspect `code`
/// themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T = Value> {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl<T> Envelope<T> {
    /// True when the envelope reports a logical success.
    pub fn is_ok(&self) -> bool {
        self.code == CODE_OK
    }

    /// Number of records reported by a paginated list endpoint, 0 if absent.
    pub fn total_count(&self) -> i64 {
        self.total.unwrap_or(0)
    }
}

impl Envelope<Value> {
    /// Re-read the untyped `data` payload as a concrete type.
    pub fn decode_data<T: DeserializeOwned>(&self) -> Option<Result<T, serde_json::Error>> {
        self.data.as_ref().map(|v| serde_json::from_value(v.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_decodes_login_response() {
        let env: Envelope = serde_json::from_value(json!({
            "code": 200,
            "msg": "ok",
            "token": "abc"
        }))
        .unwrap();
        assert!(env.is_ok());
        assert_eq!(env.token.as_deref(), Some("abc"));
        assert!(env.data.is_none());
    }

    #[test]
    fn test_envelope_soft_failure_is_not_ok() {
        let env: Envelope = serde_json::from_value(json!({
            "code": 500,
            "msg": "internal error"
        }))
        .unwrap();
        assert!(!env.is_ok());
        assert_eq!(env.msg, "internal error");
    }

    #[test]
    fn test_decode_data_rereads_the_payload() {
        let env: Envelope = serde_json::from_value(json!({
            "code": 200,
            "msg": "ok",
            "data": { "url": "/uploads/a.png" }
        }))
        .unwrap();
        #[derive(Deserialize)]
        struct Uploaded {
            url: String,
        }
        let uploaded: Uploaded = env.decode_data().unwrap().unwrap();
        assert_eq!(uploaded.url, "/uploads/a.png");
    }

    #[test]
    fn test_envelope_total_defaults_to_zero() {
        let env: Envelope = serde_json::from_value(json!({ "code": 200, "msg": "" })).unwrap();
        assert_eq!(env.total_count(), 0);
    }
}
