//! API server configuration.

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8787;

/// Configuration for the API server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    /// Interface to bind the HTTP listener on.
    pub host: String,
    /// Port to listen on (0 = ephemeral).
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
        }
    }
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable | Default     |
    /// |----------|-------------|
    /// | `HOST`   | `127.0.0.1` |
    /// | `PORT`   | `8787`      |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(defaults.port),
        }
    }

    /// Apply explicit values (e.g. CLI flags) over this configuration.
    pub fn with_overrides(self, host: Option<String>, port: Option<u16>) -> Self {
        Self {
            host: host.unwrap_or(self.host),
            port: port.unwrap_or(self.port),
        }
    }

    /// Address for the TCP listener, e.g. "127.0.0.1:8787".
    pub fn bind_addr(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}
