//! Command-line and environment configuration for the server binary.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::Parser;
use thiserror::Error;

/// Path every route is nested under unless configured otherwise.
pub const DEFAULT_PREFIX: &str = "/api/v1";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("route prefix must start with '/', got {0:?}")]
    RelativePrefix(String),
}

#[derive(Debug, Clone, Parser)]
#[command(name = "todo-server", about = "HTTP service for managing todo items")]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "TODO_HOST", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub host: IpAddr,

    /// Port to bind; 0 picks a free port
    #[arg(long, env = "TODO_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Path prefix for every route; empty or "/" serves from the root
    #[arg(long, env = "TODO_PREFIX", default_value = DEFAULT_PREFIX)]
    pub prefix: String,
}

impl ServerConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.prefix.is_empty() && !self.prefix.starts_with('/') {
            return Err(ConfigError::RelativePrefix(self.prefix.clone()));
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}
