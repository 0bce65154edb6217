use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::TransportConfig;
use crate::error::{KycError, Result};

use super::guard::ConnectionTracker;
use super::request::{Headers, HttpMethod, QueryParams, RequestSpec, TransportResponse};
use super::Transport;

/// reqwest-backed transport bound to one base URL
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
    error_for_status: bool,
    connections: ConnectionTracker,
}

impl HttpTransport {
    /// Transport with default timeouts. No network activity happens here.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::from_config(&TransportConfig::new(base_url))
    }

    pub fn from_config(config: &TransportConfig) -> Result<Self> {
        config.validate()?;

        let base_url = Url::parse(&config.base_url)
            .map_err(|e| KycError::config(format!("Invalid base URL '{}': {}", config.base_url, e)))?;

        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout() {
            builder = builder.connect_timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| KycError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            error_for_status: config.error_for_status,
            connections: ConnectionTracker::new(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn connections(&self) -> &ConnectionTracker {
        &self.connections
    }

    /// Resolve `path` against the base URL (RFC 3986 reference resolution).
    pub fn resolve(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| KycError::validation(format!("Invalid request path '{}': {}", path, e)))
    }

    /// Low-level request against a full URL, bypassing the base URL.
    ///
    /// A body is JSON-encoded for POST/PUT/PATCH and ignored otherwise. The
    /// response text is returned without JSON decoding; invalid UTF-8 is
    /// replaced with U+FFFD. Use [`HttpTransport::request_raw`] for the bytes.
    pub async fn request(
        &self,
        method: HttpMethod,
        url: &str,
        headers: &Headers,
        body: Option<&Value>,
    ) -> Result<String> {
        Ok(self.request_raw(method, url, headers, body).await?.text())
    }

    /// Same as [`HttpTransport::request`], keeping the status and exact body bytes.
    pub async fn request_raw(
        &self,
        method: HttpMethod,
        url: &str,
        headers: &Headers,
        body: Option<&Value>,
    ) -> Result<TransportResponse> {
        let url = Url::parse(url)
            .map_err(|e| KycError::validation(format!("Invalid URL '{}': {}", url, e)))?;

        self.dispatch(method, url, headers, body, &QueryParams::new())
            .await
    }

    async fn dispatch(
        &self,
        method: HttpMethod,
        url: Url,
        headers: &Headers,
        body: Option<&Value>,
        query: &QueryParams,
    ) -> Result<TransportResponse> {
        let header_map = to_header_map(headers)?;

        // Held until the body is fully read or an error unwinds this scope
        let _connection = self.connections.acquire();

        debug!("{} {}", method, url.path());

        let mut builder = self.client.request(method.into(), url).headers(header_map);
        if !query.is_empty() {
            builder = builder.query(query);
        }

        match body {
            Some(body) if method.carries_body() => builder = builder.json(body),
            Some(_) => warn!("Dropping request body for {} request", method),
            None => {}
        }

        let response = builder.send().await?;
        let status = response.status();
        debug!("{} responded with {}", method, status.as_u16());

        let response = if self.error_for_status {
            response.error_for_status()?
        } else {
            response
        };

        let body = response.bytes().await?;
        Ok(TransportResponse::new(status.as_u16(), body.to_vec()))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: RequestSpec) -> Result<TransportResponse> {
        let url = self.resolve(&request.path)?;
        self.dispatch(
            request.method,
            url,
            &request.headers,
            request.body.as_ref(),
            &request.query,
        )
        .await
    }
}

fn to_header_map(headers: &Headers) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());

    for (name, value) in headers.iter() {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| KycError::validation(format!("Invalid header name '{}'", name)))?;
        // Value left out of the message: it may be the auth token
        let mut header_value = HeaderValue::from_str(value)
            .map_err(|_| KycError::validation(format!("Invalid value for header '{}'", name)))?;
        if name.eq_ignore_ascii_case("token") {
            header_value.set_sensitive(true);
        }
        map.insert(header_name, header_value);
    }

    Ok(map)
}
