//! Server configuration from environment variables

use std::env;
use std::str::FromStr;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

/// Route serving analysis requests
pub const ANALYZE_ROUTE: &str = "/api/analyze";

/// Route serving health checks
pub const HEALTH_ROUTE: &str = "/api/v1/health";

/// Listen address of the API server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn new<S: Into<String>>(host: S, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Read `HOST` and `PORT`, falling back to `0.0.0.0:3000`
    pub fn from_env() -> Self {
        let host = env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|s| u16::from_str(&s).ok())
            .unwrap_or(DEFAULT_PORT);
        Self { host, port }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}
