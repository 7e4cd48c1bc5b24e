use std::path::Path;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::cert::store::{IdentityClient, InMemoryClientStore};
use crate::error::WxPayError;

/// Loads merchant client certificates and keeps one mutual-TLS client per file.
pub struct ClientIdentityManager {
    store: RwLock<InMemoryClientStore>,
    timeout: Option<Duration>,
}

impl ClientIdentityManager {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self {
            store: RwLock::new(InMemoryClientStore::new()),
            timeout,
        }
    }

    /// Return the cached client for `cert_path`, loading it on first use.
    pub async fn client_for(
        &self,
        cert_path: &Path,
        mch_id: &str,
    ) -> Result<reqwest::Client, WxPayError> {
        if let Some(c) = self.store.read().await.get(cert_path, mch_id) {
            return Ok(c.http.clone());
        }

        // Build outside the lock; a concurrent loader may win the insert, which is harmless.
        let identity = load_identity(cert_path, mch_id).await?;
        let mut builder = reqwest::Client::builder()
            .identity(identity)
            .user_agent(concat!("wxpay-refund/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| WxPayError::CertError(format!("build TLS client: {e}")))?;

        let mut store = self.store.write().await;
        store.insert(IdentityClient {
            cert_path: cert_path.to_path_buf(),
            mch_id: mch_id.to_string(),
            http: http.clone(),
            loaded_at: Instant::now(),
        });
        drop(store);

        Ok(http)
    }

    /// Drop the cached client so the certificate file is read again on next use.
    pub async fn evict(&self, cert_path: &Path) {
        self.store.write().await.remove(cert_path);
    }

    pub async fn cached(&self) -> usize {
        self.store.read().await.len()
    }
}

impl Default for ClientIdentityManager {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Read a PKCS#12 bundle; the gateway issues it with the merchant ID as password.
pub async fn load_identity(cert_path: &Path, mch_id: &str) -> Result<reqwest::Identity, WxPayError> {
    debug!(path = %cert_path.display(), "loading client certificate");
    let der = tokio::fs::read(cert_path).await.map_err(|e| {
        WxPayError::CertError(format!("read {}: {e}", cert_path.display()))
    })?;

    let identity = reqwest::Identity::from_pkcs12_der(&der, mch_id).map_err(|e| {
        WxPayError::CertError(format!("parse PKCS#12 {}: {e}", cert_path.display()))
    })?;

    info!(path = %cert_path.display(), "client certificate loaded");
    Ok(identity)
}
