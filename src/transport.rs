use std::future::Future;
use std::path::Path;
use std::time::Duration;

use bytes::Bytes;
use tracing::debug;

use crate::cert::manager::ClientIdentityManager;
use crate::error::WxPayError;

const XML_CONTENT_TYPE: &str = "application/xml; charset=utf-8";

/// Sends an XML body over TLS authenticated with a merchant client certificate.
pub trait XmlTransport: Send + Sync {
    fn post_xml(
        &self,
        url: &str,
        body: String,
        cert_path: &Path,
        mch_id: &str,
    ) -> impl Future<Output = Result<Bytes, WxPayError>> + Send;
}

/// Default transport: reqwest with a PKCS#12 client identity per certificate file.
pub struct TlsTransport {
    identities: ClientIdentityManager,
}

impl TlsTransport {
    pub fn new() -> Self {
        Self {
            identities: ClientIdentityManager::default(),
        }
    }

    /// Apply a per-request timeout to every client this transport builds.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            identities: ClientIdentityManager::new(Some(timeout)),
        }
    }

    pub fn identities(&self) -> &ClientIdentityManager {
        &self.identities
    }
}

impl Default for TlsTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl XmlTransport for TlsTransport {
    async fn post_xml(
        &self,
        url: &str,
        body: String,
        cert_path: &Path,
        mch_id: &str,
    ) -> Result<Bytes, WxPayError> {
        let http = self.identities.client_for(cert_path, mch_id).await?;
        let resp = http
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, XML_CONTENT_TYPE)
            .body(body)
            .send()
            .await?;
        read_response(resp).await
    }
}

async fn read_response(resp: reqwest::Response) -> Result<Bytes, WxPayError> {
    let status = resp.status();
    debug!(status = status.as_u16(), "gateway responded");
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(WxPayError::HttpStatus {
            status: status.as_u16(),
            body,
        });
    }
    resp.bytes().await.map_err(WxPayError::Http)
}
