use reqwest::{header::CONTENT_TYPE, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::options::RequestOptions;

/// Failure of a single remote call.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request never produced a response (DNS, refused connection, ...).
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered, but not with a 2xx status.
    #[error("{method} {url} returned {status}: {body}")]
    Status {
        method: Method,
        url: String,
        status: StatusCode,
        body: String,
    },

    /// The response body could not be read or did not match the expected shape.
    #[error("could not decode response from {url}: {message}")]
    Decode { url: String, message: String },

    /// The target URL could not be built; nothing was sent.
    #[error("invalid request URL based on {url}: {message}")]
    InvalidUrl { url: String, message: String },

    /// The request body could not be serialized; nothing was sent.
    #[error("could not encode request body: {0}")]
    Encode(#[from] serde_json::Error),
}

impl TransportError {
    /// The HTTP status, when the server got far enough to send one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Thin wrapper around `reqwest::Client` exposing one helper per HTTP verb.
///
/// Every helper makes exactly one attempt; retries and error reporting are
/// left to the caller.
#[derive(Clone, Debug, Default)]
pub struct RequestClient {
    http: reqwest::Client,
}

impl RequestClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        options: RequestOptions,
    ) -> Result<T, TransportError> {
        self.send(Method::GET, url, options).await
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        url: &str,
        options: RequestOptions,
    ) -> Result<T, TransportError> {
        self.send(Method::POST, url, options).await
    }

    pub async fn put<T: DeserializeOwned>(
        &self,
        url: &str,
        options: RequestOptions,
    ) -> Result<T, TransportError> {
        self.send(Method::PUT, url, options).await
    }

    pub async fn patch<T: DeserializeOwned>(
        &self,
        url: &str,
        options: RequestOptions,
    ) -> Result<T, TransportError> {
        self.send(Method::PATCH, url, options).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        url: &str,
        options: RequestOptions,
    ) -> Result<T, TransportError> {
        self.send(Method::DELETE, url, options).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        options: RequestOptions,
    ) -> Result<T, TransportError> {
        debug!("Sending {} request to {}", method, url);

        let mut request = self.http.request(method.clone(), url);
        for (name, value) in &options.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &options.body {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(body.to_string());
        }

        let response = request
            .send()
            .await
            .map_err(|source| TransportError::Network {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Decode {
                url: url.to_string(),
                message: format!("Error reading response body: {}", e),
            })?;

        if !status.is_success() {
            return Err(TransportError::Status {
                method,
                url: url.to_string(),
                status,
                body,
            });
        }

        debug!("{} {} answered {}", method, url, status);
        parse_body(url, &body)
    }
}

/// Parses a success body; an empty body is read as JSON `null`.
fn parse_body<T: DeserializeOwned>(url: &str, body: &str) -> Result<T, TransportError> {
    let value = if body.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(body).map_err(|e| TransportError::Decode {
            url: url.to_string(),
            message: format!("Error parsing JSON: {}", e),
        })?
    };

    serde_json::from_value(value).map_err(|e| TransportError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })
}
