/*
[INPUT]:  Credentials, transport, method, path segments, query and body
[OUTPUT]: Signed requests delegated to the transport, responses passed through
[POS]:    HTTP layer - authenticated request decorator (core client)
[UPDATE]: When changing header contract, URI rules or body handling
*/

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::auth::{Credentials, RequestSigner};
use crate::http::query::encode_query;
use crate::http::transport::{HttpRequest, HttpResponse, HttpTransport, Transport};
use crate::http::{ClientConfig, ExchangeConfig, ExchangeError, Result};

pub const HEADER_ACCESS_KEY: &str = "AC-ACCESS-KEY";
pub const HEADER_ACCESS_SIGN: &str = "AC-ACCESS-SIGN";
pub const HEADER_ACCESS_TIMESTAMP: &str = "AC-ACCESS-TIMESTAMP";
pub const HEADER_ACCESS_PASSPHRASE: &str = "AC-ACCESS-PASSPHRASE";

/// Per-call query and body
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub query: Option<String>,
    pub body: Option<Value>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach query parameters from any flat serializable filter
    pub fn with_query<Q: Serialize + ?Sized>(mut self, filter: &Q) -> Result<Self> {
        self.query = encode_query(filter)?;
        Ok(self)
    }

    /// Attach a JSON body
    pub fn with_body<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

/// Authenticated client: signs every request and delegates to a transport
#[derive(Debug)]
pub struct AuthenticatedClient<T = HttpTransport> {
    signer: RequestSigner,
    transport: T,
}

impl AuthenticatedClient<HttpTransport> {
    /// Create a client talking HTTP to `api_uri`
    pub fn new(
        key: impl Into<String>,
        secret: impl Into<String>,
        passphrase: impl Into<String>,
        api_uri: &str,
        config: ClientConfig,
    ) -> Result<Self> {
        let credentials = Credentials::new(key, secret, passphrase);
        Self::with_transport(credentials, HttpTransport::new(api_uri, config)?)
    }

    /// Create a client from loaded configuration
    pub fn from_config(config: &ExchangeConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config.api_uri, config.client_config())?;
        Self::with_transport(config.credentials(), transport)
    }
}

impl<T: Transport> AuthenticatedClient<T> {
    /// Create a client over any transport. Fails if the secret cannot be decoded.
    pub fn with_transport(credentials: Credentials, transport: T) -> Result<Self> {
        Ok(Self {
            signer: RequestSigner::new(credentials)?,
            transport,
        })
    }

    pub fn signer(&self) -> &RequestSigner {
        &self.signer
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sign and send a request, returning the transport result unchanged
    pub async fn request(
        &self,
        method: Method,
        path_parts: &[&str],
        options: RequestOptions,
    ) -> Result<HttpResponse> {
        let request = self.prepare(method, path_parts, options)?;
        self.transport.execute(request).await
    }

    /// Build the signed request without sending it.
    ///
    /// The body is serialized exactly once; that text is both signed and
    /// carried in the returned request.
    pub fn prepare(
        &self,
        method: Method,
        path_parts: &[&str],
        options: RequestOptions,
    ) -> Result<HttpRequest> {
        let path = make_relative_uri(path_parts)?;
        let body = options
            .body
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let request = HttpRequest {
            method,
            path,
            query: options.query,
            headers: Vec::new(),
            body,
        };

        let bundle = self
            .signer
            .sign(request.method.as_str(), &request.target(), request.body.as_deref());
        debug!(
            method = %request.method,
            path = %request.path,
            timestamp = bundle.timestamp,
            "signed request"
        );

        Ok(HttpRequest {
            headers: vec![
                (HEADER_ACCESS_KEY, bundle.key),
                (HEADER_ACCESS_SIGN, bundle.signature),
                (HEADER_ACCESS_TIMESTAMP, bundle.timestamp.to_string()),
                (HEADER_ACCESS_PASSPHRASE, bundle.passphrase),
            ],
            ..request
        })
    }

    pub(crate) async fn get(&self, path_parts: &[&str], options: RequestOptions) -> Result<HttpResponse> {
        self.request(Method::GET, path_parts, options).await
    }

    pub(crate) async fn post(&self, path_parts: &[&str], options: RequestOptions) -> Result<HttpResponse> {
        self.request(Method::POST, path_parts, options).await
    }

    pub(crate) async fn delete(&self, path_parts: &[&str], options: RequestOptions) -> Result<HttpResponse> {
        self.request(Method::DELETE, path_parts, options).await
    }
}

/// `["orders", id]` -> `/orders/{id}`
///
/// Each part is percent-encoded as one segment, so the signed path is the
/// path the transport sends. `.` and `..` cannot be addressed.
pub fn make_relative_uri(path_parts: &[&str]) -> Result<String> {
    let mut uri = String::new();
    for part in path_parts {
        if matches!(*part, "." | "..") {
            return Err(ExchangeError::validation(format!(
                "path segment `{part}` is not addressable"
            )));
        }
        uri.push('/');
        uri.push_str(&urlencoding::encode(part));
    }
    if uri.is_empty() {
        uri.push('/');
    }
    Ok(uri)
}
