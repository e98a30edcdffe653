use crate::interface_repo::QueryLimits;
use serde::Deserialize;
use std::path::Path;

/// Read from the working directory when present; otherwise defaults apply.
pub const CONFIG_FILE: &str = "netspeed.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub query: QueryConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, e.g. "warn" or "netspeed=debug".
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "warn".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Buffer size offered to the OS on the first attempt of each query.
    pub initial_buffer_bytes: usize,
    /// Largest buffer the single retry may ask for.
    pub max_buffer_bytes: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        let limits = QueryLimits::default();
        Self {
            initial_buffer_bytes: limits.initial_buffer_bytes,
            max_buffer_bytes: limits.max_buffer_bytes,
        }
    }
}

impl QueryConfig {
    pub fn limits(&self) -> QueryLimits {
        QueryLimits {
            initial_buffer_bytes: self.initial_buffer_bytes,
            max_buffer_bytes: self.max_buffer_bytes,
        }
    }
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from_path(CONFIG_FILE)
    }

    /// Missing file means defaults; an unreadable or invalid one is an error.
    pub fn load_from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(s) => Self::load_from_str(&s),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(anyhow::anyhow!("reading {}: {}", path.display(), e)),
        }
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.logging.filter.trim().is_empty(),
            "logging.filter must be non-empty"
        );
        anyhow::ensure!(
            self.query.initial_buffer_bytes > 0,
            "query.initial_buffer_bytes must be > 0, got {}",
            self.query.initial_buffer_bytes
        );
        anyhow::ensure!(
            self.query.max_buffer_bytes > 0,
            "query.max_buffer_bytes must be > 0, got {}",
            self.query.max_buffer_bytes
        );
        anyhow::ensure!(
            self.query.initial_buffer_bytes <= self.query.max_buffer_bytes,
            "query.initial_buffer_bytes ({}) must not exceed query.max_buffer_bytes ({})",
            self.query.initial_buffer_bytes,
            self.query.max_buffer_bytes
        );
        Ok(())
    }
}
