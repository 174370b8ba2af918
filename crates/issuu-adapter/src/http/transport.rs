/*
[INPUT]:  HTTP method, absolute URL and optional form body
[OUTPUT]: Raw response body text
[POS]:    HTTP layer - transport seam between dispatcher and network
[UPDATE]: When changing connection options or swapping the HTTP stack
*/

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Client, Method};
use tracing::debug;

use super::client::ClientConfig;
use super::error::Result;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Sends one request and hands back the response body
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, method: Method, url: &str, body: Option<String>) -> Result<String>;
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http_client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        Self::with_config(&ClientConfig::default())
    }

    pub fn with_config(config: &ClientConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self { http_client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, method: Method, url: &str, body: Option<String>) -> Result<String> {
        let mut builder = self.http_client.request(method.clone(), url);
        if let Some(body) = body {
            builder = builder
                .header(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE))
                .body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        debug!(%method, %status, "issuu response received");

        let response = response.error_for_status()?;
        Ok(response.text().await?)
    }
}
