//! The seam between request construction and I/O.

use crate::{ClientError, GraphQLResponse, RequestBody};

/// A single header to attach to a dispatched request.
pub struct HeaderPair(pub String, pub String);

/// A fully prepared request: where to send it, with which headers, and the
/// rendered document body.
#[derive(Debug)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<HeaderPair>,
    pub body: RequestBody
}

impl std::fmt::Debug for HeaderPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Header values routinely carry credentials.
        write!(f, "HeaderPair({}, ...)", self.0)
    }
}

/// Dispatches prepared requests and decodes the response envelope.
///
/// The default implementation is [`HttpTransport`](./struct.HttpTransport.html);
/// tests substitute a fake that replays canned envelopes.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn send(&self, request: HttpRequest) -> Result<GraphQLResponse, ClientError>;
}

/// The default transport. Posts the document as JSON using `reqwest`.
#[cfg(feature = "http")]
pub struct HttpTransport {
    client: reqwest::Client
}

#[cfg(feature = "http")]
impl HttpTransport {
    pub fn new() -> Self {
        HttpTransport {
            client: reqwest::Client::new()
        }
    }
}

#[cfg(feature = "http")]
impl Default for HttpTransport {
    fn default() -> Self {
        HttpTransport::new()
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<GraphQLResponse, ClientError> {
        let HttpRequest { url, headers, body } = request;
        let mut builder = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .json(&body);

        for HeaderPair(key, value) in headers {
            builder = builder.header(&key, &value);
        }

        builder
            .send()
            .await
            .map_err(|e| ClientError::Network(Box::new(e)))?
            .json()
            .await
            .map_err(|e| ClientError::Decode(Box::new(e)))
    }
}
