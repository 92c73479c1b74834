use std::time::Duration;

use tracing::debug;

use super::request::{base_url, GatewayRequest};
use crate::error::AppError;

const USER_AGENT: &str = concat!("dalion/", env!("CARGO_PKG_VERSION"));

/// HTTP transport to one gateway. Sends a request, returns the body bytes.
pub struct GatewayClient {
    client: reqwest::Client,
    base_url: String,
}

fn build_http_client(timeout: Duration) -> Result<reqwest::Client, AppError> {
    Ok(reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()?)
}

impl GatewayClient {
    pub fn new(gateway: &str, timeout: Duration) -> Result<Self, AppError> {
        Ok(Self {
            client: build_http_client(timeout)?,
            base_url: base_url(gateway)?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn send(&self, request: &GatewayRequest) -> Result<Vec<u8>, AppError> {
        let url = request.url(&self.base_url)?;
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.bytes().await?;
        debug!(
            "{} {} ({} bytes)",
            request.action().as_str(),
            status,
            body.len()
        );
        Ok(body.to_vec())
    }
}
