use serde::Deserialize;

/// Runtime environment; selects the log format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Pretty, human-readable logs
    #[default]
    Development,
    /// JSON logs for aggregation
    Production,
}

impl Environment {
    /// Whether this is a development environment.
    pub fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Application configuration, deserialized from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Postgres connection string. When absent, the server runs on the
    /// seeded in-memory store instead.
    #[serde(default)]
    pub database_url: Option<String>,
    /// Socket address the server binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// `development` (default) or `production`.
    #[serde(default)]
    pub env: Environment,
    /// Comma-separated list of allowed CORS origins; permissive when unset.
    #[serde(default)]
    pub allowed_origins: Option<String>,
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

impl ApiConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }
}
