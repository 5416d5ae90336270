//! Request descriptors and the transport that sends them.
//!
//! [`HttpTransport`] wraps a [`reqwest::Client`] with the base URL and the
//! acting user's `current_user` header. Tests substitute their own
//! [`Transport`] to script responses without a network.

use async_trait::async_trait;
use groupings_core::endpoints::CURRENT_USER_HEADER;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::ClientError;

const APPLICATION_JSON: &str = "application/json";
const TEXT_PLAIN: &str = "text/plain";

/// Body of an outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    /// Raw text sent with an explicit content type.
    Text {
        content: String,
        content_type: &'static str,
    },
}

/// A request against the groupings API, relative to the base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    /// Raw text declared as JSON, as the description endpoint expects.
    pub fn raw_json(mut self, content: impl Into<String>) -> Self {
        self.body = RequestBody::Text {
            content: content.into(),
            content_type: APPLICATION_JSON,
        };
        self
    }

    pub fn plain_text(mut self, content: impl Into<String>) -> Self {
        self.body = RequestBody::Text {
            content: content.into(),
            content_type: TEXT_PLAIN,
        };
        self
    }

    pub fn query(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query = pairs;
        self
    }

    /// Content type the request is sent with, if any.
    ///
    /// Plain GETs carry only `current_user`; every other method declares
    /// JSON unless its body says otherwise.
    pub fn content_type(&self) -> Option<&'static str> {
        match &self.body {
            RequestBody::Empty if self.method == Method::GET => None,
            RequestBody::Empty | RequestBody::Json(_) => Some(APPLICATION_JSON),
            RequestBody::Text { content_type, .. } => Some(*content_type),
        }
    }
}

/// Sends [`ApiRequest`]s and returns the decoded JSON body.
///
/// An empty response body decodes as [`Value::Null`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<Value, ClientError>;
}

/// `reqwest`-backed transport for one API base URL and acting user.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    current_user: HeaderValue,
}

impl HttpTransport {
    /// Build a transport with its own connection pool and request timeout.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Self::with_client(client, &config.base_url, &config.current_user)
    }

    /// Build a transport reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        base_url: &str,
        current_user: &str,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            current_user: HeaderValue::from_str(current_user)?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`ClientError::Api`]
    /// containing the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response(response: reqwest::Response) -> Result<Value, ClientError> {
        let response = Self::ensure_success(response).await?;
        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, ClientError> {
        let content_type = request.content_type();
        let ApiRequest {
            method,
            path,
            query,
            body,
        } = request;

        tracing::debug!(method = %method, path = %path, "Sending groupings API request");

        let mut builder = self
            .client
            .request(method.clone(), format!("{}{}", self.base_url, path))
            .header(CURRENT_USER_HEADER, self.current_user.clone());
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        if let Some(content_type) = content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.body(serde_json::to_vec(&value)?),
            RequestBody::Text { content, .. } => builder.body(content),
        };

        let response = builder.send().await.inspect_err(|e| {
            tracing::warn!(method = %method, path = %path, error = %e, "Groupings API request failed");
        })?;
        Self::parse_response(response).await
    }
}
