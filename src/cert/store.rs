use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// An HTTP client bound to one merchant client certificate.
#[derive(Clone)]
pub struct IdentityClient {
    pub cert_path: PathBuf,
    pub mch_id: String,
    pub http: reqwest::Client,
    pub loaded_at: Instant,
}

/// Mutual-TLS clients keyed by certificate path.
pub struct InMemoryClientStore {
    clients: HashMap<PathBuf, IdentityClient>,
}

impl InMemoryClientStore {
    pub fn new() -> Self {
        Self {
            clients: HashMap::new(),
        }
    }

    /// Look up the client for `cert_path`. A client loaded for another
    /// merchant (different PKCS#12 password) does not match.
    pub fn get(&self, cert_path: &Path, mch_id: &str) -> Option<&IdentityClient> {
        self.clients
            .get(cert_path)
            .filter(|c| c.mch_id == mch_id)
    }

    pub fn insert(&mut self, client: IdentityClient) {
        self.clients.insert(client.cert_path.clone(), client);
    }

    pub fn remove(&mut self, cert_path: &Path) -> Option<IdentityClient> {
        self.clients.remove(cert_path)
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

impl Default for InMemoryClientStore {
    fn default() -> Self {
        Self::new()
    }
}
