/// Transport kernel for the TOP router
///
/// Everything here is method-agnostic: it signs a parameter bag, moves it over
/// HTTP and turns the raw body into either an envelope or a typed error.
///
/// # Components
///
/// - `Signer` / `Md5Signer`: canonical parameter signing
/// - `Transport` / `ReqwestTransport`: keep-alive HTTP with a bounded number of
///   in-flight requests
/// - `codec`: long-id repair, JSON parsing and `error_response` classification
///
/// # Example
///
/// ```rust,no_run
/// use topclient::core::config::ClientConfig;
/// use topclient::core::kernel::*;
/// use topclient::params;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ClientConfig::new("appkey", "appsecret").sandbox(true);
/// let signer = Md5Signer::new(config.appsecret());
/// let transport = TransportBuilder::new(&config).build()?;
///
/// let mut p = params! { "method" => "taobao.time.get", "app_key" => config.appkey() };
/// let sign = signer.sign(&p);
/// p.insert("sign".to_string(), sign.into());
///
/// let pairs = topclient::core::params::to_pairs(&p);
/// let body = transport.send(HttpMethod::Get, config.endpoint(), &pairs).await?;
/// let envelope = codec::decode_envelope(&body, &config.ignored_sub_codes)?;
/// println!("{}", envelope);
/// # Ok(())
/// # }
/// ```
pub mod codec;
pub mod rest;
pub mod signer;

pub use codec::{decode_envelope, repair_long_ids, response_key};
pub use rest::{HttpMethod, ReqwestTransport, Transport, TransportBuilder};
pub use signer::{Md5Signer, Signer, SIGN_FIELD};
