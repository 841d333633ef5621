use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct AgentConfig {
    /// Collector address, `host:port` or a full `http(s)://` URL
    #[serde(default = "default_server_address")]
    pub server_address: String,
    /// How often collectors are sampled
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    /// How often the latest snapshot is pushed to the server
    #[serde(default = "default_report_interval")]
    pub report_interval_secs: u64,
    /// Per-request timeout for metric pushes
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            server_address: default_server_address(),
            poll_interval_secs: default_poll_interval(),
            report_interval_secs: default_report_interval(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_server_address() -> String {
    "localhost:8080".to_string()
}

fn default_poll_interval() -> u64 {
    2
}

fn default_report_interval() -> u64 {
    10
}

fn default_request_timeout() -> u64 {
    5
}

impl AgentConfig {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` when given; otherwise falls back to `default_path` if it
    /// exists and to built-in defaults if it does not.
    pub fn load_or_default(path: Option<&str>, default_path: &str) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(default_path).exists() => Self::load(default_path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server_address.trim().is_empty() {
            anyhow::bail!("server_address cannot be empty");
        }
        if self.poll_interval_secs == 0 {
            anyhow::bail!("poll_interval_secs must be positive");
        }
        if self.report_interval_secs == 0 {
            anyhow::bail!("report_interval_secs must be positive");
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be positive");
        }
        Ok(())
    }

    /// Base URL of the collector; `http://` is assumed when no scheme is given.
    pub fn server_url(&self) -> String {
        let addr = self.server_address.trim();
        if addr.contains("://") {
            return addr.to_string();
        }
        format!("http://{addr}")
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn report_interval(&self) -> Duration {
        Duration::from_secs(self.report_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
