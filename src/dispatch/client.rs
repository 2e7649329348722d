use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderName;
use reqwest::header::HeaderValue;
use tracing::debug;

use crate::model::Method;
use crate::DispatchError;
use crate::HttpConfig;

/// A fully concrete HTTP call, ready for the transport.
#[derive(Debug, Clone)]
pub struct HttpCall {
    pub method: Method,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
}

/// Everything the engine keeps from a response: status, headers, body.
///
/// Header names are lowercased so subset matching is case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct CapturedResponse {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

/// External HTTP client collaborator.
///
/// The single seam between the engine and the network; tests substitute
/// a scripted implementation.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait HttpSender: Send + Sync {
    async fn send(
        &self,
        call: &HttpCall,
        timeout: Duration,
    ) -> std::result::Result<CapturedResponse, DispatchError>;
}

/// Production sender backed by a shared `reqwest` client.
pub struct ReqwestSender {
    client: reqwest::Client,
}

impl ReqwestSender {
    /// # Errors
    /// [`DispatchError::ClientBuild`] when the underlying `reqwest`
    /// client cannot be constructed.
    pub fn new(config: &HttpConfig) -> std::result::Result<Self, DispatchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|source| DispatchError::ClientBuild {
                source: Box::new(source),
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpSender for ReqwestSender {
    async fn send(
        &self,
        call: &HttpCall,
        timeout: Duration,
    ) -> std::result::Result<CapturedResponse, DispatchError> {
        let url = reqwest::Url::parse(&call.url)
            .map_err(|e| DispatchError::InvalidUrl(format!("{}: {}", call.url, e)))?;

        let mut headers = HeaderMap::new();
        for (name, value) in &call.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                DispatchError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                }
            })?;
            let header_value =
                HeaderValue::from_str(value).map_err(|e| DispatchError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            headers.insert(header_name, header_value);
        }

        let mut builder = self
            .client
            .request(call.method.into(), url)
            .headers(headers)
            .timeout(timeout);
        if let Some(body) = &call.body {
            builder = builder.body(body.clone());
        }

        debug!("{} {}", call.method, call.url);
        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                DispatchError::Timeout {
                    url: call.url.clone(),
                    duration: timeout,
                }
            } else {
                DispatchError::Transport {
                    url: call.url.clone(),
                    source: Box::new(e),
                }
            }
        })?;

        let status = response.status().as_u16();
        let mut response_headers = BTreeMap::new();
        for (name, value) in response.headers() {
            response_headers.insert(
                name.as_str().to_ascii_lowercase(),
                value.to_str().unwrap_or("<binary>").to_string(),
            );
        }

        let bytes = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                DispatchError::Timeout {
                    url: call.url.clone(),
                    duration: timeout,
                }
            } else {
                DispatchError::BodyRead {
                    url: call.url.clone(),
                    source: Box::new(e),
                }
            }
        })?;

        Ok(CapturedResponse {
            status,
            headers: response_headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }
}
