//! Service configuration from environment variables.

use std::net::{IpAddr, SocketAddr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("config: {key}: {reason}")]
  Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct Config {
  pub host: IpAddr,
  pub port: u16,
}

impl Config {
  /// HOST defaults to loopback (internal service), PORT to 5005.
  pub fn from_env() -> Result<Self, ConfigError> {
    let host = std::env::var("HOST")
      .unwrap_or_else(|_| "127.0.0.1".into())
      .parse()
      .map_err(|e| ConfigError::Invalid {
        key: "HOST",
        reason: format!("{}", e),
      })?;

    let port = std::env::var("PORT")
      .unwrap_or_else(|_| "5005".into())
      .parse()
      .map_err(|e| ConfigError::Invalid {
        key: "PORT",
        reason: format!("{}", e),
      })?;

    Ok(Self { host, port })
  }

  pub fn addr(&self) -> SocketAddr {
    SocketAddr::new(self.host, self.port)
  }
}
