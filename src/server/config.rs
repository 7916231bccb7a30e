use crate::convert::MAX_MARKDOWN_CHARS;
use std::str::FromStr;
use std::time::Duration;

/// HTTP service configuration.
///
/// Defaults come from the environment ([`ServerConfig::from_env`]); the
/// `with_*` methods override individual values, which is how the CLI applies
/// its flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// HTTP server bind address
    pub bind_address: String,
    /// HTTP server port
    pub port: u16,
    /// Largest accepted Markdown input, in characters
    pub max_chars: usize,
    /// Requests allowed per client per window
    pub rate_limit: u32,
    /// Length of a rate limit window
    pub rate_window: Duration,
    /// How often expired rate limit windows are discarded
    pub sweep_interval: Duration,
    /// Log level used when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
            max_chars: MAX_MARKDOWN_CHARS,
            rate_limit: 10,
            rate_window: Duration::from_secs(60),
            sweep_interval: Duration::from_secs(60),
            log_level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            bind_address: lookup("MDOCX_BIND").unwrap_or(defaults.bind_address),
            port: parsed(&lookup, "MDOCX_PORT").unwrap_or(defaults.port),
            max_chars: parsed(&lookup, "MDOCX_MAX_CHARS").unwrap_or(defaults.max_chars),
            rate_limit: parsed(&lookup, "MDOCX_RATE_LIMIT").unwrap_or(defaults.rate_limit),
            rate_window: parsed(&lookup, "MDOCX_RATE_WINDOW_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.rate_window),
            sweep_interval: parsed(&lookup, "MDOCX_SWEEP_SECS")
                .filter(|&secs: &u64| secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.sweep_interval),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
        }
    }

    pub fn with_bind_address(mut self, bind_address: impl Into<String>) -> Self {
        self.bind_address = bind_address.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    /// Set the per-client request budget and its window.
    pub fn with_rate_limit(mut self, requests: u32, window: Duration) -> Self {
        self.rate_limit = requests;
        self.rate_window = window;
        self
    }

    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }

    /// `host:port` to bind.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    /// Request body ceiling in bytes. The worst case for one character is an
    /// ASCII-escaped surrogate pair (`\ud83d\ude00`), twelve bytes.
    pub fn body_limit(&self) -> usize {
        self.max_chars.saturating_mul(12).saturating_add(1024)
    }
}

/// Parse a variable, treating unparseable values as unset.
fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|value| value.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.max_chars, 10_000);
        assert_eq!(config.rate_limit, 10);
        assert_eq!(config.rate_window, Duration::from_secs(60));
        assert_eq!(config.addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_from_lookup_overrides_and_ignores_garbage() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("MDOCX_PORT", "9000"),
            ("MDOCX_RATE_LIMIT", " 3 "),
            ("MDOCX_RATE_WINDOW_SECS", "5"),
            ("MDOCX_MAX_CHARS", "lots"),
            ("MDOCX_SWEEP_SECS", "0"),
        ]);
        let config = ServerConfig::from_lookup(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.port, 9000);
        assert_eq!(config.rate_limit, 3);
        assert_eq!(config.rate_window, Duration::from_secs(5));
        assert_eq!(config.max_chars, MAX_MARKDOWN_CHARS);
        assert_eq!(config.sweep_interval, Duration::from_secs(60));
    }

    #[test]
    fn test_builder_methods() {
        let config = ServerConfig::default()
            .with_bind_address("127.0.0.1")
            .with_port(3000)
            .with_max_chars(50)
            .with_rate_limit(2, Duration::from_secs(1));
        assert_eq!(config.addr(), "127.0.0.1:3000");
        assert_eq!(config.max_chars, 50);
        assert_eq!(config.rate_limit, 2);
        assert_eq!(config.body_limit(), 50 * 12 + 1024);
    }
}
