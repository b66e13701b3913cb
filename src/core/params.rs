use serde_json::{Map, Value};

/// Parameter bag for a single router call.
pub type Params = Map<String, Value>;

/// Build a [`Params`] from `key => value` pairs.
///
/// ```
/// use topclient::params;
///
/// let p = params! { "fields" => "nick,sex", "nick" => "sandbox_c_1" };
/// assert_eq!(p["nick"], "sandbox_c_1");
/// ```
#[macro_export]
macro_rules! params {
    () => { $crate::core::params::Params::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::core::params::Params::new();
        $( map.insert(($key).to_string(), ::serde_json::json!($value)); )+
        map
    }};
}

/// Text form of a parameter value, shared by the signer and the wire encoding.
pub fn param_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Flatten parameters into string pairs ready for a query string or form body.
pub fn to_pairs(params: &Params) -> Vec<(String, String)> {
    params
        .iter()
        .map(|(k, v)| (k.clone(), param_to_string(v)))
        .collect()
}
