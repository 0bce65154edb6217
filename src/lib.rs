pub mod config;
pub mod error;
pub mod transport;
pub mod types;
pub mod verification;

// Re-exports
pub use crate::config::{Config, Environment, TransportConfig};
pub use crate::error::{KycError, Result};
pub use crate::transport::{Headers, HttpMethod, HttpTransport, QueryParams, RequestSpec, Transport, TransportResponse};
pub use crate::types::{AuthToken, PayloadSource, VerificationKind, VerificationRequest};
pub use crate::verification::VerificationClient;
