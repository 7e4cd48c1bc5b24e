/// Length of generated nonces; the gateway accepts at most 32 characters.
pub const NONCE_LEN: usize = 32;

/// Random 32-character lowercase hex nonce.
pub fn random_nonce() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
