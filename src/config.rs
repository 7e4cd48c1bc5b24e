use crate::crypto::sign::SignType;
use crate::error::WxPayError;

const DEFAULT_BASE_URL: &str = "https://api.mch.weixin.qq.com";
const API_KEY_LEN: usize = 32;

pub struct ClientConfig {
    pub app_id: String,
    pub mch_id: String,
    /// Merchant API key (v2), used to sign requests.
    pub api_key: String,
    pub sign_type: SignType,
    pub base_url: String,
    /// Check the `sign` field of successful responses before returning them.
    pub verify_response_sign: bool,
}

pub struct ClientConfigBuilder {
    app_id: Option<String>,
    mch_id: Option<String>,
    api_key: Option<String>,
    sign_type: SignType,
    base_url: Option<String>,
    verify_response_sign: bool,
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder {
            app_id: None,
            mch_id: None,
            api_key: None,
            sign_type: SignType::Md5,
            base_url: None,
            verify_response_sign: false,
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("app_id", &self.app_id)
            .field("mch_id", &self.mch_id)
            .field("api_key", &"***")
            .field("sign_type", &self.sign_type)
            .field("base_url", &self.base_url)
            .field("verify_response_sign", &self.verify_response_sign)
            .finish()
    }
}

impl ClientConfigBuilder {
    pub fn app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = Some(app_id.into());
        self
    }

    pub fn mch_id(mut self, mch_id: impl Into<String>) -> Self {
        self.mch_id = Some(mch_id.into());
        self
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn sign_type(mut self, sign_type: SignType) -> Self {
        self.sign_type = sign_type;
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn verify_response_sign(mut self, verify: bool) -> Self {
        self.verify_response_sign = verify;
        self
    }

    pub fn build(self) -> Result<ClientConfig, WxPayError> {
        let app_id = required(self.app_id, "app_id")?;
        let mch_id = required(self.mch_id, "mch_id")?;
        let api_key = required(self.api_key, "api_key")?;

        if api_key.len() != API_KEY_LEN {
            return Err(WxPayError::Config(format!(
                "api_key must be {API_KEY_LEN} bytes, got {}",
                api_key.len()
            )));
        }

        let base_url = self
            .base_url
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(ClientConfig {
            app_id,
            mch_id,
            api_key,
            sign_type: self.sign_type,
            base_url,
            verify_response_sign: self.verify_response_sign,
        })
    }
}

fn required(value: Option<String>, name: &str) -> Result<String, WxPayError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(WxPayError::Config(format!("{name} is required"))),
    }
}
