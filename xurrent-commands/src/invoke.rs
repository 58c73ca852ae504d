//! Execution of previously built queries.

use crate::error::CommandError;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use tracing::debug;
use xurrent_graphql::{ClientHandle, ClientRegistry, Query, QueryField, Transport};

/// An entity that can be listed with a query.
///
/// Implemented by every entity payload type in this crate.
pub trait Queryable: DeserializeOwned + Send {
    /// The collection the entity lives in, e.g. `teams`.
    const COLLECTION: &'static str;
    /// The field enum used for selection, ordering and filtering.
    type Field: QueryField;
}

/// Executes a built query and yields the matching records one by one.
///
/// The query itself is produced by the per-entity query commands; this type
/// only resolves a client and dispatches.
pub struct InvokeQuery<P> {
    query: Query,
    client: Option<ClientHandle>,
    marker: PhantomData<P>
}

impl<P: Queryable> InvokeQuery<P> {
    pub fn new(query: Query) -> Self {
        InvokeQuery {
            query,
            client: None,
            marker: PhantomData
        }
    }

    /// Execute against a specific registered client instead of the default.
    pub fn client(mut self, handle: ClientHandle) -> Self {
        self.client = Some(handle);
        self
    }

    pub async fn execute<T: Transport>(
        self,
        registry: &ClientRegistry<T>
    ) -> Result<Vec<P>, CommandError> {
        let command = format!("invoke-{}-query", P::COLLECTION);
        debug!(command = %command, "executing");
        let client = registry
            .resolve(self.client.as_ref())
            .map_err(|e| CommandError::new(command.clone(), e))?;
        client
            .get(&self.query)
            .await
            .map_err(|e| CommandError::new(command, e))
    }
}
