pub mod payload;
pub mod request_id;
pub mod token;
pub mod verification;

// Re-export commonly used types
pub use payload::{BvnMetadata, BvnPayload, NinPayload, PayloadSource, VerificationRequest, VninPayload};
pub use request_id::generate_request_id;
pub use token::AuthToken;
pub use verification::VerificationKind;
