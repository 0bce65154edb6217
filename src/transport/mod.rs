mod guard;
mod http;
mod request;

pub use guard::{ConnectionGuard, ConnectionTracker};
pub use http::HttpTransport;
pub use request::{Headers, HttpMethod, QueryParams, RequestSpec, TransportResponse};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Uniform HTTP dispatch against a fixed base URL.
///
/// Implementors only provide [`Transport::send`]. The verb helpers build the
/// request and decide how the response is read: `get`/`post`/`put`/`patch`
/// decode the body as JSON, `delete` only reports the status code.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one exchange and return the raw response.
    async fn send(&self, request: RequestSpec) -> Result<TransportResponse>;

    async fn get(&self, path: &str, headers: &Headers, query: &QueryParams) -> Result<Value> {
        let request = RequestSpec::new(HttpMethod::Get, path)
            .with_headers(headers.clone())
            .with_query(query.clone());
        self.send(request).await?.json()
    }

    async fn post(&self, path: &str, headers: &Headers, data: Value) -> Result<Value> {
        self.send_json(HttpMethod::Post, path, headers, data).await
    }

    async fn put(&self, path: &str, headers: &Headers, data: Value) -> Result<Value> {
        self.send_json(HttpMethod::Put, path, headers, data).await
    }

    async fn patch(&self, path: &str, headers: &Headers, data: Value) -> Result<Value> {
        self.send_json(HttpMethod::Patch, path, headers, data).await
    }

    /// Returns the status code; the body is never decoded.
    async fn delete(&self, path: &str, headers: &Headers) -> Result<u16> {
        let request = RequestSpec::new(HttpMethod::Delete, path).with_headers(headers.clone());
        Ok(self.send(request).await?.status)
    }

    async fn send_json(
        &self,
        method: HttpMethod,
        path: &str,
        headers: &Headers,
        data: Value,
    ) -> Result<Value> {
        let request = RequestSpec::new(method, path)
            .with_headers(headers.clone())
            .with_body(data);
        self.send(request).await?.json()
    }
}
