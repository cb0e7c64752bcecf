//! Live health check for candidate proxies
//!
//! Sends one request through the candidate address and classifies the result.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use crate::config::HarvestConfig;

/// Outcome of a single probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Pass,
    Fail(String),
}

impl ProbeOutcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, ProbeOutcome::Pass)
    }
}

/// Anything that can decide whether an address works as a proxy
#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// Probe `address` exactly once
    async fn check(&self, address: &str) -> ProbeOutcome;
}

/// Health checker configuration
#[derive(Debug, Clone)]
pub struct HealthCheckerConfig {
    /// URL fetched through the proxy
    pub check_url: String,
    /// Port the proxy listens on
    pub proxy_port: u16,
    /// Timeout for the whole request
    pub check_timeout: Duration,
}

impl From<&HarvestConfig> for HealthCheckerConfig {
    fn from(config: &HarvestConfig) -> Self {
        Self {
            check_url: config.probe_url.clone(),
            proxy_port: config.probe_port,
            check_timeout: config.probe_timeout,
        }
    }
}

/// Probes a fixed URL through `http://<address>:<port>`
pub struct HealthChecker {
    config: HealthCheckerConfig,
}

impl HealthChecker {
    pub fn new(config: HealthCheckerConfig) -> Self {
        Self { config }
    }

    fn proxy_url(&self, address: &str) -> String {
        format!("http://{}:{}", address, self.config.proxy_port)
    }
}

#[async_trait]
impl HealthCheck for HealthChecker {
    #[instrument(skip(self))]
    async fn check(&self, address: &str) -> ProbeOutcome {
        let proxy_url = self.proxy_url(address);
        debug!("Probing {} through {}", self.config.check_url, proxy_url);

        // Same proxy for HTTP and HTTPS targets.
        let client = match reqwest::Proxy::all(&proxy_url).and_then(|proxy| {
            reqwest::Client::builder()
                .proxy(proxy)
                .timeout(self.config.check_timeout)
                .build()
        }) {
            Ok(client) => client,
            Err(e) => {
                let msg = format!("invalid proxy {}: {}", proxy_url, e);
                warn!("Proxy {} is unhealthy: {}", address, msg);
                return ProbeOutcome::Fail(msg);
            }
        };

        match client.get(&self.config.check_url).send().await {
            Ok(response) if response.status() == reqwest::StatusCode::OK => {
                info!(
                    "Proxy is working. Reached {} through {}",
                    self.config.check_url, address
                );
                ProbeOutcome::Pass
            }
            Ok(response) => {
                let msg = format!("status code {}", response.status().as_u16());
                warn!(
                    "Failed to reach {} through {}: {}",
                    self.config.check_url, address, msg
                );
                ProbeOutcome::Fail(msg)
            }
            Err(e) if e.is_timeout() => {
                let msg = "request timed out".to_string();
                warn!(
                    "Failed to reach {} through {}: {}",
                    self.config.check_url, address, msg
                );
                ProbeOutcome::Fail(msg)
            }
            Err(e) => {
                let msg = format!("request failed: {}", e);
                warn!(
                    "Failed to reach {} through {}: {}",
                    self.config.check_url, address, msg
                );
                ProbeOutcome::Fail(msg)
            }
        }
    }
}
