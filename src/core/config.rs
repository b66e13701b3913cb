use crate::core::errors::TopError;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::env;
use std::time::Duration;

/// Production router endpoint.
pub const DEFAULT_REST_URL: &str = "http://gw.api.taobao.com/router/rest";
/// Sandbox router endpoint.
pub const SANDBOX_REST_URL: &str = "http://gw.api.tbsandbox.com/router/rest";
/// Upper bound on concurrent sockets per client.
pub const DEFAULT_MAX_SOCKETS: usize = 100;
/// The gateway verifies timestamps against Beijing time.
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 8;
/// Sub-codes reported with a `sub_msg` that are handed back as payload instead of failing.
pub const DEFAULT_IGNORED_SUB_CODES: &[&str] = &["isv.user-not-exist:invalid-nick"];

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub appkey: Secret<String>,
    pub appsecret: Secret<String>,
    pub sandbox: bool,
    pub rest_url: Option<String>,
    pub timeout: Duration,
    pub pool_idle_timeout: Duration,
    pub max_sockets: usize,
    pub utc_offset_hours: i32,
    pub ignored_sub_codes: Vec<String>,
}

// Never expose secrets in serialization
impl Serialize for ClientConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("ClientConfig", 9)?;
        state.serialize_field("appkey", "[REDACTED]")?;
        state.serialize_field("appsecret", "[REDACTED]")?;
        state.serialize_field("sandbox", &self.sandbox)?;
        state.serialize_field("rest_url", &self.rest_url)?;
        state.serialize_field("timeout_secs", &self.timeout.as_secs())?;
        state.serialize_field("pool_idle_timeout_secs", &self.pool_idle_timeout.as_secs())?;
        state.serialize_field("max_sockets", &self.max_sockets)?;
        state.serialize_field("utc_offset_hours", &self.utc_offset_hours)?;
        state.serialize_field("ignored_sub_codes", &self.ignored_sub_codes)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for ClientConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct ClientConfigHelper {
            appkey: String,
            appsecret: String,
            #[serde(default)]
            sandbox: bool,
            rest_url: Option<String>,
            timeout_secs: Option<u64>,
            pool_idle_timeout_secs: Option<u64>,
            max_sockets: Option<usize>,
            utc_offset_hours: Option<i32>,
            ignored_sub_codes: Option<Vec<String>>,
        }

        let helper = ClientConfigHelper::deserialize(deserializer)?;
        let mut config = Self::new(helper.appkey, helper.appsecret);
        config.sandbox = helper.sandbox;
        config.rest_url = helper.rest_url;
        if let Some(secs) = helper.timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = helper.pool_idle_timeout_secs {
            config.pool_idle_timeout = Duration::from_secs(secs);
        }
        if let Some(max) = helper.max_sockets {
            config.max_sockets = max;
        }
        if let Some(offset) = helper.utc_offset_hours {
            config.utc_offset_hours = offset;
        }
        if let Some(codes) = helper.ignored_sub_codes {
            config.ignored_sub_codes = codes;
        }
        Ok(config)
    }
}

impl ClientConfig {
    /// Create a new configuration with app credentials
    #[must_use]
    pub fn new(appkey: impl Into<String>, appsecret: impl Into<String>) -> Self {
        Self {
            appkey: Secret::new(appkey.into()),
            appsecret: Secret::new(appsecret.into()),
            sandbox: false,
            rest_url: None,
            timeout: Duration::from_secs(30),
            pool_idle_timeout: Duration::from_secs(60),
            max_sockets: DEFAULT_MAX_SOCKETS,
            utc_offset_hours: DEFAULT_UTC_OFFSET_HOURS,
            ignored_sub_codes: DEFAULT_IGNORED_SUB_CODES
                .iter()
                .map(|c| (*c).to_string())
                .collect(),
        }
    }

    /// Create configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `{PREFIX}_APPKEY` (e.g., `TOP_APPKEY`)
    /// - `{PREFIX}_APPSECRET`
    /// - `{PREFIX}_SANDBOX` (optional, defaults to false)
    /// - `{PREFIX}_REST_URL` (optional)
    pub fn from_env(prefix: &str) -> Result<Self, ConfigError> {
        let prefix = prefix.to_uppercase();
        let appkey_var = format!("{}_APPKEY", prefix);
        let appsecret_var = format!("{}_APPSECRET", prefix);

        let appkey =
            env::var(&appkey_var).map_err(|_| ConfigError::MissingEnvironmentVariable(appkey_var))?;
        let appsecret = env::var(&appsecret_var)
            .map_err(|_| ConfigError::MissingEnvironmentVariable(appsecret_var))?;

        let sandbox = env::var(format!("{}_SANDBOX", prefix))
            .unwrap_or_else(|_| "false".to_string())
            .parse::<bool>()
            .unwrap_or(false);

        let mut config = Self::new(appkey, appsecret).sandbox(sandbox);
        config.rest_url = env::var(format!("{}_REST_URL", prefix)).ok();
        Ok(config)
    }

    /// Create configuration from a .env file and environment variables
    ///
    /// **Security Warning**: Never commit .env files to version control!
    #[cfg(feature = "env-file")]
    pub fn from_env_file(prefix: &str) -> Result<Self, ConfigError> {
        Self::from_env_file_with_path(prefix, ".env")
    }

    /// Create configuration from a specific .env file path
    #[cfg(feature = "env-file")]
    pub fn from_env_file_with_path(prefix: &str, env_file_path: &str) -> Result<Self, ConfigError> {
        match dotenv::from_path(env_file_path) {
            Ok(()) => {}
            Err(dotenv::Error::Io(io_err)) if io_err.kind() == std::io::ErrorKind::NotFound => {
                // fall through to the process environment
            }
            Err(e) => {
                return Err(ConfigError::InvalidConfiguration(format!(
                    "Failed to load .env file '{}': {}",
                    env_file_path, e
                )));
            }
        }

        Self::from_env(prefix)
    }

    /// Check that both credential halves are set
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.appkey.expose_secret().is_empty() && !self.appsecret.expose_secret().is_empty()
    }

    pub fn validate(&self) -> Result<(), TopError> {
        if !self.has_credentials() {
            return Err(TopError::Configuration(
                "appkey or appsecret need!".to_string(),
            ));
        }
        if self.max_sockets == 0 {
            return Err(TopError::Configuration(
                "max_sockets must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Switch between the sandbox and production gateways
    #[must_use]
    pub const fn sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    /// Set a custom endpoint, overriding the sandbox flag
    #[must_use]
    pub fn with_rest_url(mut self, rest_url: impl Into<String>) -> Self {
        self.rest_url = Some(rest_url.into());
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub const fn with_pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = timeout;
        self
    }

    #[must_use]
    pub const fn with_max_sockets(mut self, max_sockets: usize) -> Self {
        self.max_sockets = max_sockets;
        self
    }

    #[must_use]
    pub const fn with_utc_offset_hours(mut self, hours: i32) -> Self {
        self.utc_offset_hours = hours;
        self
    }

    /// Replace the sub-code allow-list; an empty list surfaces every `error_response`
    #[must_use]
    pub fn with_ignored_sub_codes<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_sub_codes = codes.into_iter().map(Into::into).collect();
        self
    }

    /// Resolved router endpoint
    pub fn endpoint(&self) -> &str {
        match &self.rest_url {
            Some(url) => url,
            None if self.sandbox => SANDBOX_REST_URL,
            None => DEFAULT_REST_URL,
        }
    }

    /// Get app key (use carefully - exposes secret)
    pub fn appkey(&self) -> &str {
        self.appkey.expose_secret()
    }

    /// Get app secret (use carefully - exposes secret)
    pub fn appsecret(&self) -> &str {
        self.appsecret.expose_secret()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvironmentVariable(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl From<ConfigError> for TopError {
    fn from(err: ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}
