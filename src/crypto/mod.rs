pub mod nonce;
pub mod sign;
pub mod verify;
