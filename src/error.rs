use thiserror::Error;

#[derive(Error, Debug)]
pub enum WxPayError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status error: status={status}, body={body}")]
    HttpStatus { status: u16, body: String },

    #[error("XML decode error: {message} [rawReturn : {raw}] [params : {canonical}] [sign : {sign}]")]
    Decode {
        message: String,
        raw: String,
        canonical: String,
        sign: String,
    },

    #[error("WeChat Pay gateway error: {message} [rawReturn : {raw}] [params : {canonical}] [sign : {sign}]")]
    Gateway {
        message: String,
        raw: String,
        canonical: String,
        sign: String,
    },

    #[error("refund error, errcode={code}, errmsg={message}")]
    Business { code: String, message: String },

    #[error("Signature verification failed: {0}")]
    VerifyError(String),

    #[error("Certificate error: {0}")]
    CertError(String),

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl WxPayError {
    /// Business-level error code returned by the gateway, if any.
    pub fn err_code(&self) -> Option<&str> {
        match self {
            WxPayError::Business { code, .. } => Some(code.as_str()),
            _ => None,
        }
    }

    /// Raw response body attached to decode and gateway errors.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            WxPayError::Decode { raw, .. } | WxPayError::Gateway { raw, .. } => {
                Some(raw.as_str())
            }
            WxPayError::HttpStatus { body, .. } => Some(body.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_error_display_contains_code() {
        let err = WxPayError::Business {
            code: "REFUNDNOTEXIST".into(),
            message: "refund does not exist".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("REFUNDNOTEXIST"));
        assert!(msg.contains("refund does not exist"));
        assert_eq!(err.err_code(), Some("REFUNDNOTEXIST"));
    }

    #[test]
    fn test_gateway_error_display_contains_raw() {
        let err = WxPayError::Gateway {
            message: "sign error".into(),
            raw: "<xml><return_code>FAIL</return_code></xml>".into(),
            canonical: "appid=wx1&key=***".into(),
            sign: "ABC".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("<xml><return_code>FAIL</return_code></xml>"));
        assert!(msg.contains("appid=wx1&key=***"));
        assert!(msg.contains("[sign : ABC]"));
        assert_eq!(
            err.raw_response(),
            Some("<xml><return_code>FAIL</return_code></xml>")
        );
        assert!(err.err_code().is_none());
    }

    #[test]
    fn test_config_error_has_no_raw_response() {
        let err = WxPayError::Config("mch_id is required".into());
        assert!(err.raw_response().is_none());
        assert_eq!(err.to_string(), "Configuration error: mch_id is required");
    }
}
