use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Listen address, `host:port`
    #[serde(default = "default_address")]
    pub address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
        }
    }
}

fn default_address() -> String {
    "localhost:8080".to_string()
}

impl ServerConfig {
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
        if self.address.trim().is_empty() {
            anyhow::bail!("address cannot be empty");
        }
        Ok(())
    }
}
