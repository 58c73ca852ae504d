use crate::{client::ClientImpl, transport::Transport, Client, HeaderPair};
use std::sync::Arc;

#[cfg(feature = "http")]
use crate::transport::HttpTransport;

/// Configures and builds a [`Client`](./struct.Client.html).
pub struct ClientBuilder {
    endpoint: String,
    account: Option<String>,
    token: Option<String>,
    extra_headers: Option<Arc<dyn Fn() -> Vec<HeaderPair> + Send + Sync>>
}

impl ClientBuilder {
    pub fn new<U: Into<String>>(endpoint: U) -> Self {
        ClientBuilder {
            endpoint: endpoint.into(),
            account: None,
            token: None,
            extra_headers: None
        }
    }

    /// The account to address requests to. Sent as the `X-Xurrent-Account`
    /// header.
    pub fn with_account<A: Into<String>>(mut self, account: A) -> Self {
        self.account = Some(account.into());
        self
    }

    /// A bearer token attached to every request.
    pub fn with_token<K: Into<String>>(mut self, token: K) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Additional headers computed per request.
    pub fn with_extra_headers<F: Fn() -> Vec<HeaderPair> + Send + Sync + 'static>(
        mut self,
        header_fn: F
    ) -> Self {
        self.extra_headers = Some(Arc::new(header_fn));
        self
    }

    /// Build the client on top of an explicit transport.
    pub fn with_transport<T: Transport>(self, transport: T) -> Client<T> {
        let client = ClientImpl {
            endpoint: self.endpoint,
            transport,
            account: self.account,
            token: self.token,
            extra_headers: self.extra_headers
        };

        Client(Arc::new(client))
    }

    /// Build the client with the default HTTP transport.
    #[cfg(feature = "http")]
    pub fn build(self) -> Client<HttpTransport> {
        self.with_transport(HttpTransport::new())
    }
}
