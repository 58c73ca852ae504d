//! Test support for the Xurrent GraphQL workspace.
//!
//! [`FakeTransport`](./struct.FakeTransport.html) stands in for the HTTP
//! transport: it records every rendered document and replays canned response
//! envelopes, so command and client behavior can be asserted without a
//! server.

#[macro_use]
extern crate async_trait;

use parking_lot::Mutex;
use std::{collections::VecDeque, sync::Arc};
use xurrent_graphql::{
    transport::{HttpRequest, Transport},
    ClientBuilder, ClientError, ClientHandle, ClientRegistry, ErrorEntry, GraphQLResponse
};

/// One request as the fake transport saw it.
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub document: String
}

/// A transport that records requests and replays queued responses.
///
/// Clones share their state, so tests can keep one clone for assertions and
/// hand the other to a client.
#[derive(Clone)]
pub struct FakeTransport {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    responses: Arc<Mutex<VecDeque<GraphQLResponse>>>
}

impl FakeTransport {
    pub fn new() -> Self {
        FakeTransport {
            requests: Arc::new(Mutex::new(Vec::new())),
            responses: Arc::new(Mutex::new(VecDeque::new()))
        }
    }

    /// A transport with a single queued data response.
    pub fn replying(data: serde_json::Value) -> Self {
        let transport = FakeTransport::new();
        transport.push_response(data_response(data));
        transport
    }

    /// Queue another response envelope. Responses are replayed in order.
    pub fn push_response(&self, response: GraphQLResponse) {
        self.responses.lock().push_back(response);
    }

    /// Every request dispatched so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    /// The rendered documents dispatched so far, oldest first.
    pub fn documents(&self) -> Vec<String> {
        self.requests
            .lock()
            .iter()
            .map(|request| request.document.clone())
            .collect()
    }
}

impl Default for FakeTransport {
    fn default() -> Self {
        FakeTransport::new()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: HttpRequest) -> Result<GraphQLResponse, ClientError> {
        self.requests.lock().push(RecordedRequest {
            url: request.url,
            headers: request
                .headers
                .into_iter()
                .map(|pair| (pair.0, pair.1))
                .collect(),
            document: request.body.query
        });

        let queued = self.responses.lock().pop_front();
        Ok(queued.unwrap_or_else(|| data_response(serde_json::json!({}))))
    }
}

/// A response envelope carrying data.
pub fn data_response(data: serde_json::Value) -> GraphQLResponse {
    GraphQLResponse {
        data: Some(data),
        errors: None
    }
}

/// A response envelope carrying only errors.
pub fn error_response(messages: &[&str]) -> GraphQLResponse {
    GraphQLResponse {
        data: None,
        errors: Some(
            messages
                .iter()
                .map(|message| ErrorEntry {
                    message: message.to_string(),
                    locations: None,
                    path: None
                })
                .collect()
        )
    }
}

/// A registry with one client on the given transport, plus its handle.
pub fn registry_with(
    transport: FakeTransport
) -> (ClientRegistry<FakeTransport>, ClientHandle) {
    let client = ClientBuilder::new("https://graphql.example.xurrent.com")
        .with_account("test-account")
        .with_token("test-token")
        .with_transport(transport);
    let registry = ClientRegistry::new();
    let handle = registry.register("test", client);
    (registry, handle)
}

/// Shared response payloads used across the workspace's tests.
pub mod fixtures {
    use serde_json::{json, Value};

    pub fn team_node() -> Value {
        json!({
            "id": "NG1lLVRlYW0tMQ",
            "name": "Service Desk",
            "disabled": false
        })
    }

    pub fn calendar_node() -> Value {
        json!({
            "id": "NG1lLUNhbGVuZGFyLTE",
            "name": "Business Hours",
            "timeZone": "Europe/Amsterdam"
        })
    }

    pub fn person_node() -> Value {
        json!({
            "id": "NG1lLVBlcnNvbi0x",
            "name": "Ellen Brown",
            "primaryEmail": "ellen.brown@example.com"
        })
    }
}
