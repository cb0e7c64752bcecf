use crate::error::{KeeperError, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Default endpoint probed through each candidate proxy
pub const DEFAULT_PROBE_URL: &str = "https://www.irctc.co.in/nget/train-search";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Round controller configuration
    pub harvest: HarvestConfig,
    /// Blocklist and run-state file locations
    pub storage: StorageConfig,
    /// Blocklist publication
    pub publish: PublishConfig,
    /// EC2 access
    pub aws: AwsConfig,
    /// Logging configuration
    pub log: LogConfig,
}

/// Everything the round controller needs to know about one run
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    /// Instance every candidate address is associated with before probing
    pub target_instance_id: String,
    /// URL fetched through the candidate proxy
    pub probe_url: String,
    /// Port the proxy listens on behind each address
    pub probe_port: u16,
    /// Wait between association and probe
    pub settle_delay: Duration,
    /// Wait between rounds that did not reach the target
    pub round_delay: Duration,
    /// Bound on a single probe
    pub probe_timeout: Duration,
    /// Stop after this many rounds (None = run until the target is reached)
    pub max_rounds: Option<u32>,
    /// Release addresses whose association failed instead of abandoning them
    pub release_on_associate_failure: bool,
}

impl HarvestConfig {
    /// Configuration with the stock delays and probe for the given instance
    pub fn for_instance(target_instance_id: impl Into<String>) -> Self {
        Self {
            target_instance_id: target_instance_id.into(),
            probe_url: DEFAULT_PROBE_URL.to_string(),
            probe_port: 3128,
            settle_delay: Duration::from_secs(10),
            round_delay: Duration::from_secs(60),
            probe_timeout: Duration::from_secs(10),
            max_rounds: None,
            release_on_associate_failure: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Newline-delimited failed prefixes (default: failed_ips.txt)
    pub blocklist_path: PathBuf,
    /// JSON run state (default: allocation_state.json)
    pub state_path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishMode {
    Git,
    Disabled,
}

#[derive(Debug, Clone)]
pub struct PublishConfig {
    pub mode: PublishMode,
    /// Working tree that holds the blocklist file
    pub repo_dir: PathBuf,
    pub remote: String,
    pub branch: String,
    pub commit_message: String,
}

#[derive(Debug, Clone)]
pub struct AwsConfig {
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
    /// Endpoint override, mostly for testing against a local stub
    pub endpoint: Option<Url>,
}

impl AwsConfig {
    /// Regional EC2 endpoint unless overridden
    pub fn endpoint_url(&self) -> Result<Url> {
        match &self.endpoint {
            Some(url) => Ok(url.clone()),
            None => Ok(Url::parse(&format!(
                "https://ec2.{}.amazonaws.com/",
                self.region
            ))?),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level (debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty)
    pub format: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            harvest: HarvestConfig {
                target_instance_id: require_env("KEEPER_TARGET_INSTANCE_ID")?,
                probe_url: parse_probe_url(&get_env_or("KEEPER_PROBE_URL", DEFAULT_PROBE_URL))?,
                probe_port: get_env_or("KEEPER_PROBE_PORT", "3128").parse().map_err(|_| {
                    KeeperError::InvalidConfig("KEEPER_PROBE_PORT must be a valid port number".into())
                })?,
                settle_delay: parse_secs("KEEPER_SETTLE_DELAY_SECS", "10")?,
                round_delay: parse_secs("KEEPER_ROUND_DELAY_SECS", "60")?,
                probe_timeout: parse_secs("KEEPER_PROBE_TIMEOUT_SECS", "10")?,
                max_rounds: match get_env_or("KEEPER_MAX_ROUNDS", "0").trim().parse::<u32>() {
                    Ok(0) => None,
                    Ok(n) => Some(n),
                    Err(_) => {
                        return Err(KeeperError::InvalidConfig(
                            "KEEPER_MAX_ROUNDS must be a non-negative number".into(),
                        ))
                    }
                },
                release_on_associate_failure: get_env_or(
                    "KEEPER_RELEASE_ON_ASSOCIATE_FAILURE",
                    "false",
                )
                .parse()
                .unwrap_or(false),
            },
            storage: StorageConfig {
                blocklist_path: get_env_or("KEEPER_BLOCKLIST_FILE", "failed_ips.txt").into(),
                state_path: get_env_or("KEEPER_STATE_FILE", "allocation_state.json").into(),
            },
            publish: PublishConfig {
                mode: match get_env_or("KEEPER_PUBLISH", "git").to_lowercase().as_str() {
                    "git" => PublishMode::Git,
                    "none" | "off" | "disabled" => PublishMode::Disabled,
                    other => {
                        return Err(KeeperError::InvalidConfig(format!(
                            "KEEPER_PUBLISH has unsupported value: {}",
                            other
                        )))
                    }
                },
                repo_dir: get_env_or("KEEPER_GIT_DIR", ".").into(),
                remote: get_env_or("KEEPER_GIT_REMOTE", "origin"),
                branch: get_env_or("KEEPER_GIT_BRANCH", "main"),
                commit_message: get_env_or("KEEPER_GIT_MESSAGE", "Updated failed IPs"),
            },
            aws: AwsConfig {
                region: env::var("AWS_REGION")
                    .or_else(|_| env::var("AWS_DEFAULT_REGION"))
                    .unwrap_or_else(|_| "us-east-1".to_string()),
                access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
                secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
                session_token: env::var("AWS_SESSION_TOKEN").ok().filter(|s| !s.is_empty()),
                endpoint: parse_endpoint()?,
            },
            log: LogConfig {
                level: get_env_or("LOG_LEVEL", "info"),
                format: get_env_or("LOG_FORMAT", "pretty"),
            },
        })
    }
}

fn parse_probe_url(raw: &str) -> Result<String> {
    let url = Url::parse(raw.trim()).map_err(|e| {
        KeeperError::InvalidConfig(format!("KEEPER_PROBE_URL must be a valid URL: {}", e))
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url.to_string()),
        other => Err(KeeperError::InvalidConfig(format!(
            "KEEPER_PROBE_URL has unsupported scheme: {}",
            other
        ))),
    }
}

fn parse_endpoint() -> Result<Option<Url>> {
    let raw = env::var("KEEPER_EC2_ENDPOINT").unwrap_or_default();
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    let url = Url::parse(raw).map_err(|e| {
        KeeperError::InvalidConfig(format!("KEEPER_EC2_ENDPOINT must be a valid URL: {}", e))
    })?;
    if url.host_str().is_none() {
        return Err(KeeperError::InvalidConfig(
            "KEEPER_EC2_ENDPOINT must include a host".into(),
        ));
    }

    Ok(Some(url))
}

fn parse_secs(key: &str, default: &str) -> Result<Duration> {
    get_env_or(key, default)
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| KeeperError::InvalidConfig(format!("{} must be a number of seconds", key)))
}

fn require_env(key: &str) -> Result<String> {
    match env::var(key) {
        Ok(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(KeeperError::MissingEnvVar(key.to_string())),
    }
}

/// Get environment variable with a default value
fn get_env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
