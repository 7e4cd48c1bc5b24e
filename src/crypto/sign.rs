use std::collections::BTreeMap;

use hmac::{Hmac, Mac};
use md5::{Digest, Md5};
use sha2::Sha256;

use crate::error::WxPayError;

/// Key name of the signature field; never part of the signed content.
pub const SIGN_FIELD: &str = "sign";

const REDACTED_KEY: &str = "***";

/// Signature algorithm announced in `sign_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignType {
    #[default]
    Md5,
    HmacSha256,
}

impl SignType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignType::Md5 => "MD5",
            SignType::HmacSha256 => "HMAC-SHA256",
        }
    }

    /// Parse the `sign_type` value sent by the gateway. An absent value means MD5.
    pub fn parse(value: &str) -> Result<Self, WxPayError> {
        match value {
            "" | "MD5" => Ok(SignType::Md5),
            "HMAC-SHA256" => Ok(SignType::HmacSha256),
            other => Err(WxPayError::VerifyError(format!(
                "unsupported sign_type: {other}"
            ))),
        }
    }
}

/// Ordered parameter set used to build the canonical string.
///
/// Keys are kept in byte-wise lexicographic order. Empty values and the
/// `sign` key are never stored.
#[derive(Debug, Clone, Default)]
pub struct SignParams {
    params: BTreeMap<String, String>,
}

/// Result of signing a parameter set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signed {
    pub canonical: String,
    pub sign: String,
}

impl Signed {
    /// Canonical string with the merchant key masked, safe to log or embed in errors.
    pub fn redacted_canonical(&self) -> String {
        match self.canonical.rfind("&key=") {
            Some(i) => format!("{}&key={REDACTED_KEY}", &self.canonical[..i]),
            None => self.canonical.clone(),
        }
    }
}

impl SignParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parameter, skipping empty values and the signature key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        if value.is_empty() || key == SIGN_FIELD {
            return self;
        }
        self.params.insert(key, value);
        self
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Build `k1=v1&k2=v2...&key={api_key}`.
    pub fn canonical(&self, api_key: &str) -> String {
        let mut out = self
            .params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        out.push_str("&key=");
        out.push_str(api_key);
        out
    }

    /// Canonicalize and sign with the given algorithm.
    pub fn sign(&self, sign_type: SignType, api_key: &str) -> Result<Signed, WxPayError> {
        let canonical = self.canonical(api_key);
        let sign = match sign_type {
            SignType::Md5 => sign_md5(&canonical),
            SignType::HmacSha256 => sign_hmac_sha256(api_key, &canonical)?,
        };
        Ok(Signed { canonical, sign })
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SignParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = SignParams::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

/// Upper-case hex MD5 digest of the canonical string.
pub fn sign_md5(canonical: &str) -> String {
    hex::encode_upper(Md5::digest(canonical.as_bytes()))
}

/// Upper-case hex HMAC-SHA256 of the canonical string, keyed with the merchant key.
pub fn sign_hmac_sha256(api_key: &str, canonical: &str) -> Result<String, WxPayError> {
    let mut mac = Hmac::<Sha256>::new_from_slice(api_key.as_bytes())
        .map_err(|e| WxPayError::Config(format!("invalid HMAC key: {e}")))?;
    mac.update(canonical.as_bytes());
    Ok(hex::encode_upper(mac.finalize().into_bytes()))
}
