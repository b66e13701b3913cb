use crate::core::errors::{Result, TopError};
use crate::core::params::Params;
use serde_json::Value;

/// A declarative requirement on a parameter bag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// The key must be present.
    Key(&'static str),
    /// `key` must be present unless `unless` carries a non-empty value.
    KeyUnless {
        key: &'static str,
        unless: &'static str,
    },
}

/// Check that every key exists in `params`, reporting the first one missing.
///
/// Presence means the key exists; a `null` or empty value still counts.
pub fn check_required<K: AsRef<str>>(params: &Params, keys: &[K]) -> Result<()> {
    match keys.iter().find(|k| !params.contains_key(k.as_ref())) {
        Some(missing) => Err(TopError::missing(missing.as_ref())),
        None => Ok(()),
    }
}

/// Expand requirement rules into the ordered list of keys that must be present.
pub fn resolve_required(params: &Params, rules: &[Requirement]) -> Vec<&'static str> {
    rules
        .iter()
        .filter_map(|rule| match *rule {
            Requirement::Key(key) => Some(key),
            Requirement::KeyUnless { key, unless } => {
                (!is_set(params.get(unless))).then_some(key)
            }
        })
        .collect()
}

fn is_set(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().map_or(true, |f| f.abs() > f64::EPSILON),
        Some(_) => true,
    }
}
