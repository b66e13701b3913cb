use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TopError>;

#[derive(Error, Debug)]
pub enum TopError {
    #[error("{0}")]
    Configuration(String),

    #[error("`{key}` required")]
    ParameterMissing { key: String },

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON parsing error: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    #[error(transparent)]
    RemoteService(#[from] RemoteServiceError),
}

impl TopError {
    pub fn missing(key: impl Into<String>) -> Self {
        Self::ParameterMissing { key: key.into() }
    }

    /// Stable name of the error kind, for callers that branch on it.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "ConfigurationError",
            Self::ParameterMissing { .. } => "ParameterMissingError",
            Self::Transport(_) => "TransportError",
            Self::Parse { .. } => "ParseError",
            Self::RemoteService(_) => "RemoteServiceError",
        }
    }

    pub fn is_parameter_missing(&self) -> bool {
        matches!(self, Self::ParameterMissing { .. })
    }

    /// Root error code reported by the gateway, if this is a remote error.
    pub fn remote_code(&self) -> Option<i64> {
        match self {
            Self::RemoteService(e) => Some(e.code),
            _ => None,
        }
    }

    /// Raw response body attached to parse and remote errors.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Parse { body, .. } => Some(body),
            Self::RemoteService(e) => Some(&e.body),
            _ => None,
        }
    }
}

/// An `error_response` returned by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteServiceError {
    pub code: i64,
    pub msg: String,
    pub sub_code: Option<String>,
    pub sub_msg: Option<String>,
    /// Raw response body, kept for diagnostics.
    pub body: String,
}

impl fmt::Display for RemoteServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, code {}", self.msg, self.code)?;
        if let Some(sub_msg) = self.sub_msg.as_deref().filter(|s| !s.is_empty()) {
            write!(
                f,
                "; {}: {}",
                self.sub_code.as_deref().unwrap_or_default(),
                sub_msg
            )?;
        }
        Ok(())
    }
}

impl std::error::Error for RemoteServiceError {}
