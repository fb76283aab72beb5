/*
[INPUT]:  HTTP client configuration, credentials and API endpoints
[OUTPUT]: Signed HTTP requests and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod account;
pub mod callback;
pub mod client;
pub mod config;
pub mod error;
pub mod funds;
pub mod orders;
pub mod query;
pub mod reports;
pub mod transport;

pub use error::{ExchangeError, Result};

pub use callback::spawn_with_callback;
pub use client::{
    AuthenticatedClient, HEADER_ACCESS_KEY, HEADER_ACCESS_PASSPHRASE, HEADER_ACCESS_SIGN,
    HEADER_ACCESS_TIMESTAMP, RequestOptions, make_relative_uri,
};
pub use config::{ClientConfig, ExchangeConfig};
pub use query::encode_query;
pub use transport::{HttpRequest, HttpResponse, HttpTransport, Transport};
