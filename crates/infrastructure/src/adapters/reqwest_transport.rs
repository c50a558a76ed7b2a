//! HTTP transport implementation using reqwest.
//!
//! This adapter implements the `HttpTransport` port from the
//! application layer. It handles all HTTP communication for the
//! client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};

use greentek_application::{
    HttpMethod, HttpRequest, HttpTransport, RawResponse, RequestBody, TransportError,
};

/// HTTP transport backed by `reqwest::Client`.
///
/// Default configuration:
/// - Follow redirects: up to 10
/// - TLS verification: enabled (rustls)
/// - Per-request timeout taken from each request
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport with the given User-Agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be built.
    pub fn new(user_agent: &str) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;
        Ok(Self { client })
    }

    /// Creates a transport around an existing reqwest client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Converts the port's method to a reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    /// Maps reqwest errors to the port's `TransportError`.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> TransportError {
        if error.is_timeout() {
            return TransportError::Timeout { timeout_ms };
        }
        if error.is_connect() {
            return TransportError::Connect(error.to_string());
        }
        TransportError::Other(error.to_string())
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<RawResponse, TransportError> {
        let timeout_ms = request.timeout_ms;
        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), request.url)
            .timeout(Duration::from_millis(timeout_ms));

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart {
                field,
                file_name,
                bytes,
                extra,
            } => {
                let mut form = reqwest::multipart::Form::new()
                    .part(field, reqwest::multipart::Part::bytes(bytes).file_name(file_name));
                for (name, value) in extra {
                    form = form.text(name, value);
                }
                builder.multipart(form)
            }
        };

        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_error(&e, timeout_ms))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Other(format!("failed to read body: {e}")))?
            .to_vec();

        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }
}
