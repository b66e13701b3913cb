use crate::core::config::ClientConfig;
use crate::core::errors::{Result, TopError};
use crate::core::kernel::{
    decode_envelope, HttpMethod, Md5Signer, ReqwestTransport, Signer, Transport, SIGN_FIELD,
};
use crate::core::params::{to_pairs, Params};
use crate::core::unwrap::{unwrap_path, Fallback};
use crate::core::validation::{check_required, resolve_required};
use crate::top::methods::MethodSpec;
use chrono::{FixedOffset, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument, Span};

/// Protocol version sent as `v`
pub const API_VERSION: &str = "2.0";
/// Response format sent as `format`
pub const RESPONSE_FORMAT: &str = "json";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Client for the TOP router
///
/// Cheap to clone; clones share the connection pool. Calls are independent of
/// each other and may run concurrently.
#[derive(Clone)]
pub struct TopClient {
    config: Arc<ClientConfig>,
    signer: Arc<dyn Signer>,
    transport: Arc<dyn Transport>,
    offset: FixedOffset,
}

impl std::fmt::Debug for TopClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TopClient")
            .field("endpoint", &self.config.endpoint())
            .field("offset", &self.offset)
            .finish_non_exhaustive()
    }
}

impl TopClient {
    /// Create a client with the default keep-alive transport
    ///
    /// Fails immediately if either credential half is missing.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = Arc::new(ReqwestTransport::new(&config)?);
        Self::with_transport(config, transport)
    }

    /// Create a client that sends requests through `transport`
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        config.validate()?;
        let offset = config
            .utc_offset_hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                TopError::Configuration(format!(
                    "Invalid UTC offset: {} hours",
                    config.utc_offset_hours
                ))
            })?;
        let signer = Arc::new(Md5Signer::new(config.appsecret()));

        Ok(Self {
            config: Arc::new(config),
            signer,
            transport,
            offset,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Current time as `YYYY-MM-DD HH:mm:ss` in the configured offset
    pub fn timestamp(&self) -> String {
        Utc::now()
            .with_timezone(&self.offset)
            .format(TIMESTAMP_FORMAT)
            .to_string()
    }

    /// Signature over `params` with this client's secret
    pub fn sign(&self, params: &Params) -> String {
        self.signer.sign(params)
    }

    /// Add the protocol fields and the signature to caller parameters.
    ///
    /// Caller values win over the protocol defaults.
    fn build_args(&self, params: Params) -> Params {
        let mut args = Params::new();
        args.insert("timestamp".to_string(), self.timestamp().into());
        args.insert("format".to_string(), RESPONSE_FORMAT.into());
        args.insert("app_key".to_string(), self.config.appkey().into());
        args.insert("v".to_string(), API_VERSION.into());
        args.insert("sign_method".to_string(), self.signer.sign_method().into());
        args.extend(params);

        let sign = self.sign(&args);
        args.insert(SIGN_FIELD.to_string(), sign.into());
        args
    }

    /// Send a raw router request and return the decoded envelope
    ///
    /// `params` must contain `method`.
    #[instrument(skip(self, params), fields(api = tracing::field::Empty, http_method = %http_method))]
    pub async fn request(&self, params: Params, http_method: HttpMethod) -> Result<Value> {
        check_required(&params, &["method"])?;
        if let Some(method) = params.get("method").and_then(Value::as_str) {
            Span::current().record("api", method);
        }

        let args = self.build_args(params);
        debug!(param_count = args.len(), "sending request");

        let body = self
            .transport
            .send(http_method, self.config.endpoint(), &to_pairs(&args))
            .await?;

        decode_envelope(&body, &self.config.ignored_sub_codes)
    }

    /// Call `method` and unwrap the payload at `path`
    ///
    /// # Arguments
    /// * `method` - Dotted method name, e.g. `taobao.user.get`
    /// * `params` - Method parameters
    /// * `path` - Field names leading from the envelope to the payload
    /// * `fallback` - Returned when the path is absent
    /// * `http_method` - Verb to use
    #[instrument(skip(self, params, path), fields(api = %method))]
    pub async fn invoke(
        &self,
        method: &str,
        mut params: Params,
        path: &[&str],
        fallback: Fallback,
        http_method: HttpMethod,
    ) -> Result<Value> {
        params.insert("method".to_string(), method.into());
        let envelope = self.request(params, http_method).await?;
        Ok(unwrap_path(envelope, path, fallback))
    }

    /// Validate `params` against `spec` and invoke it
    pub async fn call(&self, spec: &MethodSpec, params: Params) -> Result<Value> {
        check_required(&params, &resolve_required(&params, spec.requires))?;
        self.invoke(spec.name, params, spec.path, spec.fallback, spec.http_method)
            .await
    }

    /// Like [`TopClient::call`], decoding the payload into `T`
    pub async fn call_as<T: DeserializeOwned>(
        &self,
        spec: &MethodSpec,
        params: Params,
    ) -> Result<T> {
        let value = self.call(spec, params).await?;
        let text = value.to_string();
        serde_json::from_value(value).map_err(|source| TopError::Parse { source, body: text })
    }
}
