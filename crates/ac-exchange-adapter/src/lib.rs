/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public exchange adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod http;
pub mod types;
pub mod validation;

// Re-export commonly used types from auth
pub use auth::{Credentials, RequestSigner, SecretEncoding, SignatureBundle};

// Re-export commonly used types from http
pub use http::{
    AuthenticatedClient,
    ClientConfig,
    ExchangeConfig,
    ExchangeError,
    HttpRequest,
    HttpResponse,
    HttpTransport,
    RequestOptions,
    Result,
    Transport,
    spawn_with_callback,
};

// Re-export all types
pub use types::*;
