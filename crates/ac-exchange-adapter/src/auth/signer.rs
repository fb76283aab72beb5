/*
[INPUT]:  Credentials, HTTP method, relative path and serialized body
[OUTPUT]: Signature bundle (key, base64 HMAC-SHA256 signature, timestamp, passphrase)
[POS]:    Auth layer - cryptographic signing for request authentication
[UPDATE]: When changing signing algorithm or payload format
*/

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use chrono::Utc;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretSlice};
use sha2::Sha256;

use super::credentials::{Credentials, SecretEncoding};
use crate::http::{ExchangeError, Result};

type HmacSha256 = Hmac<Sha256>;

/// Per-request proof of identity. Computed fresh for every call.
#[derive(Clone, PartialEq, Eq)]
pub struct SignatureBundle {
    pub key: String,
    pub signature: String,
    pub timestamp: i64,
    pub passphrase: String,
}

impl std::fmt::Debug for SignatureBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureBundle")
            .field("key", &self.key)
            .field("signature", &self.signature)
            .field("timestamp", &self.timestamp)
            .field("passphrase", &"[REDACTED]")
            .finish()
    }
}

/// Signs requests with HMAC-SHA256 over `timestamp + METHOD + path + body`.
///
/// The secret is decoded once at construction so a malformed secret fails
/// before the first request instead of on every call.
pub struct RequestSigner {
    credentials: Credentials,
    mac_key: SecretSlice<u8>,
}

impl RequestSigner {
    /// Create a signer, decoding the secret according to its encoding
    pub fn new(credentials: Credentials) -> Result<Self> {
        let bytes = match credentials.encoding() {
            SecretEncoding::Base64 => BASE64
                .decode(credentials.expose_secret().trim())
                .map_err(|e| {
                    ExchangeError::InvalidCredentials(format!("secret is not valid base64: {e}"))
                })?,
            SecretEncoding::Raw => credentials.expose_secret().as_bytes().to_vec(),
        };

        Ok(Self {
            credentials,
            mac_key: SecretSlice::from(bytes),
        })
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Sign a request at the current time
    pub fn sign(&self, method: &str, relative_path: &str, body: Option<&str>) -> SignatureBundle {
        self.sign_at(Utc::now().timestamp(), method, relative_path, body)
    }

    /// Sign a request at an explicit timestamp (epoch seconds)
    pub fn sign_at(
        &self,
        timestamp: i64,
        method: &str,
        relative_path: &str,
        body: Option<&str>,
    ) -> SignatureBundle {
        let payload = signing_payload(timestamp, method, relative_path, body);

        // HMAC accepts keys of any length, including empty.
        let mut mac = HmacSha256::new_from_slice(self.mac_key.expose_secret())
            .unwrap_or_else(|_| unreachable!("HMAC can take key of any size"));
        mac.update(payload.as_bytes());
        let signature = BASE64.encode(mac.finalize().into_bytes());

        SignatureBundle {
            key: self.credentials.key().to_string(),
            signature,
            timestamp,
            passphrase: self.credentials.expose_passphrase().to_string(),
        }
    }
}

impl std::fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSigner")
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

/// Message covered by the signature
pub fn signing_payload(
    timestamp: i64,
    method: &str,
    relative_path: &str,
    body: Option<&str>,
) -> String {
    format!(
        "{timestamp}{}{relative_path}{}",
        method.to_uppercase(),
        body.unwrap_or_default()
    )
}
