use std::sync::Arc;

mod builder;
mod r#impl;

use crate::{input::MutationInput, transport::Transport, ClientError, Query};
pub use builder::ClientBuilder;
pub use r#impl::ClientImpl;
use serde::de::DeserializeOwned;

#[cfg(feature = "http")]
use crate::transport::HttpTransport;

/// A configured connection to one Xurrent account.
///
/// Cheap to clone; all clones share the same transport and configuration.
#[repr(transparent)]
pub struct Client<T: Transport>(pub Arc<ClientImpl<T>>);

impl<T: Transport> Clone for Client<T> {
    fn clone(&self) -> Self {
        Client(self.0.clone())
    }
}

impl<T: Transport> std::fmt::Debug for Client<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client").finish_non_exhaustive()
    }
}

#[cfg(feature = "http")]
impl Client<HttpTransport> {
    pub fn builder<U: Into<String>>(endpoint: U) -> ClientBuilder {
        ClientBuilder::new(endpoint)
    }
}

impl<T: Transport> Client<T> {
    /// Execute a read/list query and return the matching records.
    pub async fn get<P: DeserializeOwned>(&self, query: &Query) -> Result<Vec<P>, ClientError> {
        self.0.get(query).await
    }

    /// Execute a mutation, optionally shaping the returned payload with a
    /// response query.
    pub async fn mutation<I: MutationInput, P: DeserializeOwned>(
        &self,
        input: &I,
        response: Option<&Query>
    ) -> Result<P, ClientError> {
        self.0.mutation(input, response).await
    }

    /// Submit an event to the event creation endpoint.
    pub async fn create_event<I: MutationInput, P: DeserializeOwned>(
        &self,
        input: &I
    ) -> Result<P, ClientError> {
        self.0.create_event(input).await
    }
}
