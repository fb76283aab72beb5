/*
[INPUT]:  Access key, secret and passphrase
[OUTPUT]: Credential store and per-request signature bundles
[POS]:    Auth layer - request authentication for the exchange API
[UPDATE]: When the signing scheme or credential format changes
*/

pub mod credentials;
pub mod signer;

pub use credentials::{Credentials, SecretEncoding};
pub use signer::{RequestSigner, SignatureBundle, signing_payload};
