use serde_json::{Map, Value};

/// What a call returns when its unwrap path is absent from the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    Null,
    EmptyObject,
    EmptyList,
}

impl Fallback {
    pub fn value(self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::EmptyObject => Value::Object(Map::new()),
            Self::EmptyList => Value::Array(Vec::new()),
        }
    }
}

/// Descend into `envelope` along `path`.
///
/// A missing segment, or an intermediate that is not an object, yields the
/// fallback. An explicit `null` at the end of the path is returned as-is.
pub fn unwrap_path<S: AsRef<str>>(envelope: Value, path: &[S], fallback: Fallback) -> Value {
    let mut current = envelope;
    for segment in path {
        current = match current {
            Value::Object(mut map) => match map.remove(segment.as_ref()) {
                Some(next) => next,
                None => return fallback.value(),
            },
            _ => return fallback.value(),
        };
    }
    current
}
