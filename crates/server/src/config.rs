//! HTTP server configuration

use crate::error::{Result, ServerError};
use std::net::{IpAddr, SocketAddr};

/// Port the service listens on when nothing else is configured
pub const DEFAULT_HTTP_PORT: u16 = 8080;

/// Bind settings for the HTTP server
///
/// # Example
///
/// ```
/// use server::config::ServerConfig;
///
/// let config = ServerConfig::new("127.0.0.1", 8080);
/// assert_eq!(config.socket_addr().unwrap().port(), 8080);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host to bind to (e.g., "0.0.0.0" or "127.0.0.1")
    pub host: String,
    /// HTTP port; 0 asks the OS for an ephemeral port
    pub port: u16,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Loopback on an ephemeral port, for tests
    pub fn ephemeral() -> Self {
        Self::new("127.0.0.1", 0)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.host
            .trim()
            .parse::<IpAddr>()
            .map(|ip| SocketAddr::new(ip, self.port))
            .map_err(|_| ServerError::InvalidAddress(format!("{}:{}", self.host, self.port)))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new("0.0.0.0", DEFAULT_HTTP_PORT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_binds_all_interfaces() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_socket_addr() {
        let addr = ServerConfig::new("127.0.0.1", 9000).socket_addr().unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:9000");
    }

    #[test]
    fn test_ipv6_host() {
        let addr = ServerConfig::new("::1", 9000).socket_addr().unwrap();
        assert_eq!(addr.to_string(), "[::1]:9000");
    }

    #[test]
    fn test_invalid_host_rejected() {
        let err = ServerConfig::new("not a host", 80).socket_addr().unwrap_err();
        assert!(matches!(err, ServerError::InvalidAddress(a) if a == "not a host:80"));
    }
}
