use crate::core::config::ClientConfig;
use crate::core::errors::{Result, TopError};
use async_trait::async_trait;
use reqwest::{Client, Method};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{instrument, trace};

/// HTTP verb used for a router call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = TopError;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("GET") {
            Ok(Self::Get)
        } else if s.eq_ignore_ascii_case("POST") {
            Ok(Self::Post)
        } else {
            Err(TopError::Configuration(format!(
                "Unsupported HTTP method: {}",
                s
            )))
        }
    }
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
        }
    }
}

/// Transport trait for issuing a single router request
///
/// Implementations send the already-signed parameters and hand back the raw
/// response body; decoding and error classification happen above this layer.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `params` to `url` and return the response body
    ///
    /// # Arguments
    /// * `method` - GET sends a query string, POST a form body
    /// * `url` - Router endpoint
    /// * `params` - Fully signed request parameters
    async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        params: &[(String, String)],
    ) -> Result<String>;
}

/// Builder for creating [`ReqwestTransport`] instances
pub struct TransportBuilder {
    timeout: Duration,
    pool_idle_timeout: Duration,
    max_sockets: usize,
    user_agent: String,
}

impl TransportBuilder {
    /// Create a builder from the client configuration
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            timeout: config.timeout,
            pool_idle_timeout: config.pool_idle_timeout,
            max_sockets: config.max_sockets,
            user_agent: format!("topclient/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set the user agent string
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build the transport
    pub fn build(self) -> Result<ReqwestTransport> {
        let client = Client::builder()
            .timeout(self.timeout)
            .pool_idle_timeout(self.pool_idle_timeout)
            .pool_max_idle_per_host(self.max_sockets)
            .tcp_keepalive(Duration::from_secs(60))
            .user_agent(&self.user_agent)
            .build()
            .map_err(|e| TopError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(ReqwestTransport {
            client,
            permits: Arc::new(Semaphore::new(self.max_sockets)),
            max_sockets: self.max_sockets,
        })
    }
}

/// Keep-alive transport backed by reqwest
///
/// At most `max_sockets` requests are in flight at once; further requests wait
/// for a permit.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
    permits: Arc<Semaphore>,
    max_sockets: usize,
}

impl fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("max_sockets", &self.max_sockets)
            .field("available", &self.permits.available_permits())
            .finish_non_exhaustive()
    }
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        TransportBuilder::new(config).build()
    }

    pub fn max_sockets(&self) -> usize {
        self.max_sockets
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[instrument(skip(self, params), fields(method = %method, url = %url, param_count = params.len()))]
    async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        params: &[(String, String)],
    ) -> Result<String> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| TopError::Configuration(format!("Connection pool closed: {}", e)))?;

        let request = self.client.request(method.into(), url);
        let request = match method {
            HttpMethod::Get => request.query(params),
            HttpMethod::Post => request.form(params),
        };

        // the gateway reports failures inside the envelope, so the status is not checked
        let response = request.send().await?;
        trace!(status = %response.status(), "response received");
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_method_parsing() {
        assert_eq!("get".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!("POST".parse::<HttpMethod>().unwrap(), HttpMethod::Post);
        assert!("PUT".parse::<HttpMethod>().is_err());
        assert_eq!(HttpMethod::default(), HttpMethod::Get);
        assert_eq!(Method::from(HttpMethod::Post), Method::POST);
    }

    #[test]
    fn test_transport_creation() {
        let config = ClientConfig::new("key", "secret").with_max_sockets(7);
        let transport = ReqwestTransport::new(&config).unwrap();
        assert_eq!(transport.max_sockets(), 7);
        assert!(format!("{:?}", transport).contains("max_sockets: 7"));
    }

    #[test]
    fn test_default_pool_size() {
        let config = ClientConfig::new("key", "secret");
        let transport = TransportBuilder::new(&config)
            .with_user_agent("test-agent")
            .build()
            .unwrap();
        assert_eq!(transport.max_sockets(), 100);
    }
}
