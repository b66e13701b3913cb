use crate::core::params::{param_to_string, Params};
use md5::{Digest, Md5};
use secrecy::{ExposeSecret, Secret};

/// Name of the signature field added to every request.
pub const SIGN_FIELD: &str = "sign";

/// Signer trait for request authentication
///
/// The signature must be a pure function of the parameters (minus the
/// signature field itself) and the shared secret.
pub trait Signer: Send + Sync {
    /// Value sent as `sign_method`
    fn sign_method(&self) -> &'static str;

    /// Compute the signature over `params`
    fn sign(&self, params: &Params) -> String;
}

/// MD5 signer: `md5(secret + k1 + v1 + k2 + v2 + ... + secret)` over keys in
/// byte-wise order, rendered as upper-case hex.
pub struct Md5Signer {
    secret: Secret<String>,
}

impl Md5Signer {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Secret::new(secret.into()),
        }
    }

    fn base_string(&self, params: &Params) -> String {
        let keys = signing_order(params.keys().map(String::as_str));

        let secret = self.secret.expose_secret();
        let mut base = String::with_capacity(secret.len() * 2 + params.len() * 16);
        base.push_str(secret);
        for key in keys {
            base.push_str(key);
            base.push_str(&param_to_string(&params[key]));
        }
        base.push_str(secret);
        base
    }
}

/// Keys that take part in the signature, in byte-wise order.
///
/// `Params` iteration order depends on serde_json's `preserve_order` feature,
/// so the order is always imposed here.
fn signing_order<'a>(keys: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    let mut keys: Vec<&str> = keys.into_iter().filter(|k| *k != SIGN_FIELD).collect();
    keys.sort_unstable_by(|a, b| a.as_bytes().cmp(b.as_bytes()));
    keys
}

impl std::fmt::Debug for Md5Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Md5Signer").finish_non_exhaustive()
    }
}

impl Signer for Md5Signer {
    fn sign_method(&self) -> &'static str {
        "md5"
    }

    fn sign(&self, params: &Params) -> String {
        let digest = Md5::digest(self.base_string(params).as_bytes());
        hex::encode_upper(digest)
    }
}
