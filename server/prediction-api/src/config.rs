//! Service configuration from environment variables.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use tracing::warn;

#[derive(Debug, Clone)]
pub struct ServiceConfig {
  pub addr: IpAddr,
  pub port: u16,
  /// Distinct batches remembered by the memo cache.
  pub cache_capacity: usize,
}

impl Default for ServiceConfig {
  fn default() -> Self {
    Self {
      addr: IpAddr::V4(Ipv4Addr::LOCALHOST),
      port: 5000,
      cache_capacity: 32,
    }
  }
}

impl ServiceConfig {
  /// Read `PREDICTION_API_ADDR`, `PORT` and `CACHE_CAPACITY`; unparsable values
  /// keep the default.
  pub fn from_env() -> Self {
    let defaults = Self::default();
    Self {
      addr: parse_env("PREDICTION_API_ADDR", defaults.addr),
      port: parse_env("PORT", defaults.port),
      cache_capacity: parse_env("CACHE_CAPACITY", defaults.cache_capacity),
    }
  }

  pub fn socket_addr(&self) -> SocketAddr {
    SocketAddr::new(self.addr, self.port)
  }
}

fn parse_env<T: std::str::FromStr + std::fmt::Display>(key: &str, default: T) -> T {
  match std::env::var(key) {
    Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
      warn!(key, value = %raw, fallback = %default, "ignoring invalid env value");
      default
    }),
    Err(_) => default,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_match_dashboard_api_url() {
    let c = ServiceConfig::default();
    assert_eq!(c.socket_addr().to_string(), "127.0.0.1:5000");
  }

  #[test]
  fn invalid_value_falls_back() {
    std::env::set_var("PREDICTION_API_TEST_PORT", "not-a-port");
    assert_eq!(parse_env("PREDICTION_API_TEST_PORT", 5000u16), 5000);
    std::env::set_var("PREDICTION_API_TEST_PORT", " 8080 ");
    assert_eq!(parse_env("PREDICTION_API_TEST_PORT", 5000u16), 8080);
  }
}
