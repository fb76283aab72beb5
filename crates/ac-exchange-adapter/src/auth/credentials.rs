/*
[INPUT]:  Access key, shared secret and passphrase
[OUTPUT]: Immutable credential store with redacted Debug output
[POS]:    Auth layer - identity material for request signing
[UPDATE]: When credential fields or secret formats change
*/

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// How the shared secret is turned into HMAC key bytes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecretEncoding {
    /// Secret is standard base64 and decoded before use
    #[default]
    Base64,
    /// Secret bytes are used as-is
    Raw,
}

/// Credentials for authenticated requests.
///
/// Secret and passphrase are wrapped in `SecretString` so they never show up
/// in `Debug` output and are zeroed on drop.
#[derive(Clone)]
pub struct Credentials {
    key: String,
    secret: SecretString,
    passphrase: SecretString,
    encoding: SecretEncoding,
}

impl Credentials {
    /// Create credentials with a base64-encoded secret
    pub fn new(
        key: impl Into<String>,
        secret: impl Into<String>,
        passphrase: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            secret: SecretString::from(secret.into()),
            passphrase: SecretString::from(passphrase.into()),
            encoding: SecretEncoding::Base64,
        }
    }

    /// Override how the secret is decoded
    pub fn with_encoding(mut self, encoding: SecretEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Access key (safe to log)
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn encoding(&self) -> SecretEncoding {
        self.encoding
    }

    /// Expose the secret for key derivation only. Never log the return value.
    pub(crate) fn expose_secret(&self) -> &str {
        self.secret.expose_secret()
    }

    /// Expose the passphrase for the passphrase header only.
    pub(crate) fn expose_passphrase(&self) -> &str {
        self.passphrase.expose_secret()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &self.key)
            .field("secret", &"[REDACTED]")
            .field("passphrase", &"[REDACTED]")
            .field("encoding", &self.encoding)
            .finish()
    }
}
