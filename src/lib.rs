//! Async client for the Taobao Open Platform (TOP) router API.
//!
//! Every remote method goes through one path: validate the parameters, add the
//! protocol fields, sign, send, then unwrap the JSON envelope.
//!
//! ```no_run
//! use topclient::{params, ClientConfig, TopClient};
//!
//! # async fn example() -> topclient::Result<()> {
//! let client = TopClient::new(ClientConfig::new("appkey", "appsecret").sandbox(true))?;
//! let user = client
//!     .user_get(params! { "fields" => "nick,seller_credit", "nick" => "sandbox_c_1" })
//!     .await?;
//! println!("{}", user);
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod top;

pub use self::core::{
    config::ClientConfig,
    errors::{RemoteServiceError, Result, TopError},
    kernel::{HttpMethod, Transport},
    params::Params,
    unwrap::Fallback,
};
pub use top::{MethodSpec, TopClient};
