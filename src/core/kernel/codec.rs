use crate::core::errors::{RemoteServiceError, Result, TopError};
use regex::Regex;
use serde_json::Value;
use std::borrow::Cow;
use std::sync::OnceLock;
use tracing::{trace, warn};

/// Top-level field carrying a gateway failure
pub const ERROR_FIELD: &str = "error_response";

fn long_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#""id"\s*:\s*(\d{16,})(\s*[,}\]])"#).expect("valid id pattern")
    })
}

/// Quote every `"id": <16+ digits>` so 64-bit ids survive consumers that parse
/// numbers as doubles. Shorter ids and non-integer numbers are left alone.
pub fn repair_long_ids(body: &str) -> Cow<'_, str> {
    long_id_pattern().replace_all(body, r#""id":"${1}"${2}"#)
}

/// Wrapper field name for a method's success envelope,
/// e.g. `taobao.user.get` -> `user_get_response`.
pub fn response_key(method: &str) -> String {
    let name = method.strip_prefix("taobao.").unwrap_or(method);
    format!("{}_response", name.replace('.', "_"))
}

/// Repair, parse and classify a raw response body.
///
/// An `error_response` object becomes [`TopError::RemoteService`] unless it carries a
/// `sub_msg` and its `sub_code` is in `ignored_sub_codes`; such soft errors are
/// returned as the payload for the caller to inspect.
pub fn decode_envelope(body: &str, ignored_sub_codes: &[String]) -> Result<Value> {
    let repaired = repair_long_ids(body);
    trace!(body = %repaired, "decoding envelope");

    let envelope: Value = serde_json::from_str(&repaired).map_err(|source| TopError::Parse {
        source,
        body: repaired.to_string(),
    })?;

    if !matches!(envelope.get(ERROR_FIELD), Some(Value::Object(_))) {
        return Ok(envelope);
    }
    let error = &envelope[ERROR_FIELD];

    let sub_code = error.get("sub_code").and_then(Value::as_str);
    let sub_msg = error
        .get("sub_msg")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty());

    if let (Some(code), Some(_)) = (sub_code, sub_msg) {
        if ignored_sub_codes.iter().any(|c| c == code) {
            warn!(sub_code = code, "ignoring soft gateway error");
            return Ok(envelope);
        }
    }

    Err(RemoteServiceError {
        code: error.get("code").and_then(code_as_i64).unwrap_or_default(),
        msg: error
            .get("msg")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        sub_code: sub_code.map(str::to_string),
        sub_msg: sub_msg.map(str::to_string),
        body: repaired.into_owned(),
    }
    .into())
}

// some gateways send the code as a string
fn code_as_i64(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
}
