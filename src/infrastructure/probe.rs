//! Connectivity probe for the configured API endpoints
//!
//! A probe is a single HEAD request. Any failure (bad URL, network error,
//! timeout, non-2xx status) is logged and reported as `false`, never raised.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local};
use futures::future::join_all;
use reqwest::{StatusCode, Url};

use crate::config::{ApiConfig, EndpointKind};

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("invalid URL '{0}'")]
    InvalidUrl(String),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(StatusCode),
}

/// Something that can check whether a URL answers
#[async_trait]
pub trait Probe: Send + Sync {
    async fn check(&self, url: &str, timeout: Duration) -> Result<(), ProbeError>;
}

pub struct HttpProbe {
    http: reqwest::Client,
}

impl HttpProbe {
    pub fn new() -> Result<Self, ProbeError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("capa/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl Probe for HttpProbe {
    async fn check(&self, url: &str, timeout: Duration) -> Result<(), ProbeError> {
        let parsed = Url::parse(url).map_err(|_| ProbeError::InvalidUrl(url.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ProbeError::InvalidUrl(url.to_string()));
        }

        let mut request = self.http.head(parsed);
        // Zero means no limit
        if !timeout.is_zero() {
            request = request.timeout(timeout);
        }
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ProbeError::Status(status))
        }
    }
}

/// Outcome of probing one URL
#[derive(Debug, Clone)]
pub struct ProbeReport {
    /// What was probed ("base", "centres", ...)
    pub target: String,
    pub url: String,
    pub reachable: bool,
    pub checked_at: DateTime<Local>,
}

/// `true` only when the URL answered with a success status
pub async fn probe_url(probe: &dyn Probe, url: &str, timeout: Duration) -> bool {
    match probe.check(url, timeout).await {
        Ok(()) => {
            log::info!("probe ok: {url}");
            true
        }
        Err(err) => {
            log::warn!("probe failed for {url}: {err}");
            false
        }
    }
}

pub async fn probe_target(
    probe: &dyn Probe,
    target: impl Into<String>,
    url: String,
    timeout: Duration,
) -> ProbeReport {
    let reachable = probe_url(probe, &url, timeout).await;
    ProbeReport {
        target: target.into(),
        url,
        reachable,
        checked_at: Local::now(),
    }
}

/// Probe the base URL and every endpoint concurrently, in a stable order
pub async fn probe_config(probe: &dyn Probe, config: &ApiConfig) -> Vec<ProbeReport> {
    let timeout = Duration::from_millis(config.timeout);
    let mut targets = vec![("base".to_string(), config.base_url.clone())];
    targets.extend(
        EndpointKind::ALL
            .iter()
            .map(|kind| (kind.name().to_string(), config.endpoint_url(*kind))),
    );

    join_all(
        targets
            .into_iter()
            .map(|(target, url)| probe_target(probe, target, url, timeout)),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_url_is_false() {
        let probe = HttpProbe::new().unwrap();
        assert!(!probe_url(&probe, "not a url", Duration::from_millis(200)).await);
        assert!(!probe_url(&probe, "ftp://example.com", Duration::from_millis(200)).await);
    }
}
