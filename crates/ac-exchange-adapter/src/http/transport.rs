/*
[INPUT]:  Fully decorated requests (method, path, query, headers, body text)
[OUTPUT]: Response status and decoded JSON data, or transport failure
[POS]:    HTTP layer - transport seam beneath the authenticated client
[UPDATE]: When changing how requests are sent or responses decoded
*/

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::http::{ClientConfig, ExchangeError, Result};

/// A request after signing. `body` is the exact text that was signed.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Path plus `?query`, as it appears on the wire
    pub fn target(&self) -> String {
        match &self.query {
            Some(query) => format!("{}?{}", self.path, query),
            None => self.path.clone(),
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Successful response: status plus decoded body
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub data: Value,
}

impl HttpResponse {
    pub fn new(status: u16, data: Value) -> Self {
        Self { status, data }
    }

    /// Deserialize the body into a typed model
    pub fn json<T: DeserializeOwned>(self) -> Result<T> {
        Ok(serde_json::from_value(self.data)?)
    }
}

/// Sends already-signed requests. Non-2xx responses are errors.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// reqwest-backed transport against a fixed base URI
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http_client: Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(api_uri: &str, config: ClientConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent)
            .build()?;

        Ok(Self {
            http_client,
            base_url: Url::parse(api_uri)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append the request target to the base URI, keeping any base path prefix
    fn url_for(&self, request: &HttpRequest) -> Result<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}{}", request.target()))?)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let url = self.url_for(&request)?;

        let mut builder = self.http_client.request(request.method.clone(), url);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }
        if let Some(body) = request.body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!(method = %request.method, path = %request.path, status = status.as_u16(), "response received");

        if !status.is_success() {
            return Err(ExchangeError::api_error(status, error_message(status, &text)));
        }

        let data = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).map_err(|e| {
                ExchangeError::InvalidResponse(format!("body is not JSON ({e}): {text}"))
            })?
        };

        Ok(HttpResponse::new(status.as_u16(), data))
    }
}

/// Prefer the exchange's `message` field, fall back to the raw body
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| {
            if body.is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                body.to_string()
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_includes_query() {
        let request = HttpRequest {
            method: Method::DELETE,
            path: "/orders".to_string(),
            query: Some("product_id=BTC-USD".to_string()),
            headers: Vec::new(),
            body: None,
        };
        assert_eq!(request.target(), "/orders?product_id=BTC-USD");
    }

    #[test]
    fn test_url_keeps_base_path() {
        let transport =
            HttpTransport::new("https://api.example.test/v2/", ClientConfig::default()).unwrap();
        let request = HttpRequest {
            method: Method::GET,
            path: "/accounts".to_string(),
            query: None,
            headers: Vec::new(),
            body: None,
        };
        assert_eq!(
            transport.url_for(&request).unwrap().as_str(),
            "https://api.example.test/v2/accounts"
        );
    }

    #[test]
    fn test_error_message_prefers_message_field() {
        let msg = error_message(StatusCode::BAD_REQUEST, r#"{"message":"Insufficient funds"}"#);
        assert_eq!(msg, "Insufficient funds");
        assert_eq!(error_message(StatusCode::NOT_FOUND, ""), "Not Found");
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, "oops"), "oops");
    }
}
