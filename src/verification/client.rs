use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::error::Result;
use crate::transport::{Headers, HttpTransport, Transport};
use crate::types::{AuthToken, VerificationKind, VerificationRequest};

/// Youverify identity verification client.
///
/// Holds one transport and the API token. Every call is independent: it
/// builds headers and a payload, performs a single POST and hands back the
/// decoded response untouched. The outcome (e.g. a `status` field) is left for
/// the caller to interpret.
pub struct VerificationClient<T: Transport = HttpTransport> {
    transport: T,
    token: AuthToken,
}

impl VerificationClient<HttpTransport> {
    /// Client for `base_url` with default transport settings.
    pub fn new(base_url: &str, token: impl Into<AuthToken>) -> Result<Self> {
        Ok(Self::with_transport(HttpTransport::new(base_url)?, token))
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::from_config(&config.transport)?;
        Ok(Self::with_transport(transport, config.token.clone()))
    }
}

impl<T: Transport> VerificationClient<T> {
    pub fn with_transport(transport: T, token: impl Into<AuthToken>) -> Self {
        Self {
            transport,
            token: token.into(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Headers sent with every verification call
    pub fn headers(&self) -> Headers {
        Headers::new()
            .with("Accept", "application/json")
            .with("token", self.token.expose())
            .with("Content-Type", "application/json")
    }

    /// Run one verification of the given kind.
    ///
    /// Fails with a validation error, before touching the network, when the
    /// request carries neither an identifier nor an explicit payload.
    pub async fn verify(&self, kind: VerificationKind, request: VerificationRequest) -> Result<Value> {
        let payload = kind.resolve_payload(request.source)?;
        let path = request
            .path
            .unwrap_or_else(|| kind.default_path().to_string());

        debug!("Verifying {} via {}", kind.label(), path);

        self.transport.post(&path, &self.headers(), payload).await
    }

    /// Verify a National Identification Number
    pub async fn verify_nin(&self, request: impl Into<VerificationRequest>) -> Result<Value> {
        self.verify(VerificationKind::Nin, request.into()).await
    }

    /// Verify a virtual NIN
    pub async fn verify_vnin(&self, request: impl Into<VerificationRequest>) -> Result<Value> {
        self.verify(VerificationKind::Vnin, request.into()).await
    }

    /// Verify a Bank Verification Number. Default payloads carry a fresh `metadata.requestId`.
    pub async fn verify_bvn(&self, request: impl Into<VerificationRequest>) -> Result<Value> {
        self.verify(VerificationKind::Bvn, request.into()).await
    }
}
