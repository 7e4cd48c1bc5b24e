use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::WxPayError;
use crate::transport::{TlsTransport, XmlTransport};

pub struct WxPayClient<T = TlsTransport> {
    pub(crate) config: ClientConfig,
    pub(crate) transport: T,
}

impl WxPayClient<TlsTransport> {
    /// Create a client that talks to the gateway through [`TlsTransport`].
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, TlsTransport::new())
    }
}

impl<T: XmlTransport> WxPayClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn app_id(&self) -> &str {
        &self.config.app_id
    }

    /// Returns the merchant ID.
    pub fn mch_id(&self) -> &str {
        &self.config.mch_id
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Serialize `body` under an `<xml>` root and POST it with the merchant certificate.
    ///
    /// Returns the raw response body as UTF-8 text.
    pub(crate) async fn post_xml<Req>(
        &self,
        path: &str,
        body: &Req,
        cert_path: &Path,
    ) -> Result<String, WxPayError>
    where
        Req: Serialize,
    {
        let xml = to_xml(body)?;
        let url = format!("{}{path}", self.config.base_url);
        debug!(path, "sending signed XML request");

        let raw = self
            .transport
            .post_xml(&url, xml, cert_path, &self.config.mch_id)
            .await?;

        Ok(String::from_utf8_lossy(&raw).into_owned())
    }
}

pub(crate) fn to_xml<Req: Serialize>(body: &Req) -> Result<String, WxPayError> {
    quick_xml::se::to_string_with_root("xml", body)
        .map_err(|e| WxPayError::Serialize(format!("encode XML body: {e}")))
}
