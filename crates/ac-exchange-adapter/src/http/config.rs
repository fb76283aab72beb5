/*
[INPUT]:  Optional config file and AC_-prefixed environment variables
[OUTPUT]: Transport settings and credentials for building a client
[POS]:    HTTP layer - configuration loading
[UPDATE]: When adding connection options or new config keys
*/

use std::path::Path;
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::auth::{Credentials, SecretEncoding};
use crate::http::Result;

/// Environment prefix for configuration keys (`AC_API_URI`, `AC_KEY`, ...)
pub const ENV_PREFIX: &str = "AC";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: concat!("ac-exchange-adapter/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Everything needed to construct an authenticated client
#[derive(Clone, Deserialize)]
pub struct ExchangeConfig {
    pub api_uri: String,
    pub key: String,
    pub secret: String,
    pub passphrase: String,
    #[serde(default)]
    pub secret_encoding: SecretEncoding,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl ExchangeConfig {
    /// Load from an optional file, overridden by `AC_*` environment variables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::from_sources(path, Environment::with_prefix(ENV_PREFIX).try_parsing(true))
    }

    pub(crate) fn from_sources(path: Option<&Path>, env: Environment) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        let settings = builder.add_source(env).build()?;
        Ok(settings.try_deserialize()?)
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.key, &self.secret, &self.passphrase)
            .with_encoding(self.secret_encoding)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            ..ClientConfig::default()
        }
    }
}

impl std::fmt::Debug for ExchangeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExchangeConfig")
            .field("api_uri", &self.api_uri)
            .field("key", &self.key)
            .field("secret", &"[REDACTED]")
            .field("passphrase", &"[REDACTED]")
            .field("secret_encoding", &self.secret_encoding)
            .field("timeout_secs", &self.timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX)
            .try_parsing(true)
            .source(Some(map))
    }

    #[test]
    fn test_load_from_environment() {
        let cfg = ExchangeConfig::from_sources(
            None,
            env(&[
                ("AC_API_URI", "https://api.example.test"),
                ("AC_KEY", "k"),
                ("AC_SECRET", "c2VjcmV0"),
                ("AC_PASSPHRASE", "p"),
                ("AC_TIMEOUT_SECS", "5"),
            ]),
        )
        .expect("config");

        assert_eq!(cfg.api_uri, "https://api.example.test");
        assert_eq!(cfg.secret_encoding, SecretEncoding::Base64);
        assert_eq!(cfg.client_config().timeout, Duration::from_secs(5));
        assert_eq!(cfg.client_config().connect_timeout, Duration::from_secs(10));
        assert_eq!(cfg.credentials().key(), "k");
    }

    #[test]
    fn test_missing_key_is_config_error() {
        let err = ExchangeConfig::from_sources(None, env(&[("AC_API_URI", "https://x")]))
            .unwrap_err();
        assert!(matches!(err, crate::http::ExchangeError::Config(_)));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let cfg = ExchangeConfig::from_sources(
            None,
            env(&[
                ("AC_API_URI", "https://x"),
                ("AC_KEY", "k"),
                ("AC_SECRET", "very-secret"),
                ("AC_PASSPHRASE", "phrase-value"),
                ("AC_SECRET_ENCODING", "raw"),
            ]),
        )
        .expect("config");
        let out = format!("{cfg:?}");
        assert!(!out.contains("very-secret"));
        assert!(!out.contains("phrase-value"));
        assert_eq!(cfg.secret_encoding, SecretEncoding::Raw);
    }
}
