/*
[INPUT]:  Scripted transport outcomes and test credentials
[OUTPUT]: Shared test utilities, fixtures, and fake transports
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for ac-exchange-adapter tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use ac_exchange_adapter::{
    AuthenticatedClient, ClientConfig, Credentials, ExchangeError, HttpRequest, HttpResponse,
    HttpTransport, Result, Transport,
};
use async_trait::async_trait;
use serde_json::{Value, json};
use wiremock::MockServer;

pub const TEST_KEY: &str = "test-key";
/// "test-secret" in base64
pub const TEST_SECRET: &str = "dGVzdC1zZWNyZXQ=";
pub const TEST_PASSPHRASE: &str = "test-passphrase";

pub fn test_credentials() -> Credentials {
    Credentials::new(TEST_KEY, TEST_SECRET, TEST_PASSPHRASE)
}

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client talking HTTP to a wiremock server
pub fn http_client(server: &MockServer) -> AuthenticatedClient<HttpTransport> {
    AuthenticatedClient::new(
        TEST_KEY,
        TEST_SECRET,
        TEST_PASSPHRASE,
        &server.uri(),
        ClientConfig::default(),
    )
    .expect("client init")
}

/// Transport that replays canned outcomes in order and records every request
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    outcomes: Mutex<VecDeque<Result<HttpResponse>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new(outcomes: impl IntoIterator<Item = Result<HttpResponse>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(request);
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ExchangeError::InvalidResponse("script exhausted".into())))
    }
}

pub fn scripted_client(
    outcomes: impl IntoIterator<Item = Result<HttpResponse>>,
) -> AuthenticatedClient<ScriptedTransport> {
    AuthenticatedClient::with_transport(test_credentials(), ScriptedTransport::new(outcomes))
        .expect("client init")
}

pub fn ok(data: Value) -> Result<HttpResponse> {
    Ok(HttpResponse::new(200, data))
}

/// One page of a bulk cancel response
pub fn page(ids: &[&str]) -> Result<HttpResponse> {
    ok(json!(ids))
}

pub fn server_error(message: &str) -> Result<HttpResponse> {
    Err(ExchangeError::Api {
        status: 500,
        message: message.to_string(),
    })
}

/// Client whose transport fails every call; for checks that must not reach it
pub fn empty_client() -> AuthenticatedClient<ScriptedTransport> {
    scripted_client(Vec::<Result<HttpResponse>>::new())
}
