pub mod api;
pub mod cert;
pub mod client;
pub mod config;
pub mod crypto;
pub mod error;
pub mod model;
pub mod transport;

pub use client::WxPayClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use crypto::sign::{SignParams, SignType, Signed};
pub use error::WxPayError;
pub use model::refund::{RefundRequest, RefundResponse};
pub use transport::{TlsTransport, XmlTransport};
