//! Service configuration.
//!
//! The Redis endpoint comes from the environment with documented defaults;
//! the HTTP listen port is a fixed constant.

use std::env;

/// Port the HTTP server listens on.
pub const HTTP_PORT: u16 = 8888;

/// Runtime configuration for the record service.
#[derive(Debug, Clone)]
pub struct Config {
    /// Redis host (`REDIS_HOST`, default `localhost`).
    pub redis_host: String,

    /// Redis port (`REDIS_PORT`, default `6379`).
    pub redis_port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        let redis_host = env::var("REDIS_HOST").unwrap_or_else(|_| "localhost".to_string());
        let redis_port = env::var("REDIS_PORT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(6379);

        Self {
            redis_host,
            redis_port,
        }
    }

    pub fn redis_url(&self) -> String {
        format!("redis://{}:{}/", self.redis_host, self.redis_port)
    }
}
