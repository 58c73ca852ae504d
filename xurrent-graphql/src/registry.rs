//! An explicit registry of configured clients.
//!
//! Commands take the registry as an argument instead of reaching for
//! process-wide state, which keeps them testable without global setup.

use crate::{client::Client, transport::Transport, ClientError};
use parking_lot::Mutex;

/// Names one registered client. Obtained from
/// [`ClientRegistry::register`](./struct.ClientRegistry.html#method.register)
/// and passed to commands that should not use the default client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientHandle(String);

impl ClientHandle {
    pub fn name(&self) -> &str {
        &self.0
    }
}

/// Holds every configured client for the process.
///
/// Resolution order: an explicitly passed handle wins; without one, the
/// first registered client is used.
pub struct ClientRegistry<T: Transport> {
    clients: Mutex<Vec<(String, Client<T>)>>
}

impl<T: Transport> ClientRegistry<T> {
    pub fn new() -> Self {
        ClientRegistry {
            clients: Mutex::new(Vec::new())
        }
    }

    /// Register a client under a name. Registering the same name again
    /// replaces the previous client but keeps its position.
    pub fn register<N: Into<String>>(&self, name: N, client: Client<T>) -> ClientHandle {
        let name = name.into();
        let mut clients = self.clients.lock();
        match clients.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = client,
            None => clients.push((name.clone(), client))
        }
        ClientHandle(name)
    }

    /// Resolve the client to use for one invocation.
    pub fn resolve(&self, handle: Option<&ClientHandle>) -> Result<Client<T>, ClientError> {
        let clients = self.clients.lock();
        match handle {
            Some(handle) => clients
                .iter()
                .find(|(name, _)| *name == handle.0)
                .map(|(_, client)| client.clone())
                .ok_or_else(|| {
                    ClientError::NoClient(format!("no client registered as {}", handle.0))
                }),
            None => clients
                .first()
                .map(|(_, client)| client.clone())
                .ok_or_else(|| ClientError::NoClient("no clients registered".to_string()))
        }
    }

    pub fn is_empty(&self) -> bool {
        self.clients.lock().is_empty()
    }
}

impl<T: Transport> Default for ClientRegistry<T> {
    fn default() -> Self {
        ClientRegistry::new()
    }
}

#[cfg(test)]
mod test {
    use super::ClientRegistry;
    use crate::{
        transport::{HttpRequest, Transport},
        Client, ClientBuilder, ClientError, GraphQLResponse
    };

    struct NullTransport;

    #[async_trait]
    impl Transport for NullTransport {
        async fn send(&self, _request: HttpRequest) -> Result<GraphQLResponse, ClientError> {
            Ok(GraphQLResponse {
                data: None,
                errors: None
            })
        }
    }

    fn client() -> Client<NullTransport> {
        ClientBuilder::new("https://graphql.example.xurrent.com").with_transport(NullTransport)
    }

    #[test]
    fn resolves_the_first_registered_client_by_default() {
        let registry = ClientRegistry::new();
        let first = client();
        registry.register("first", first.clone());
        registry.register("second", client());

        let resolved = registry.resolve(None).unwrap();
        assert!(std::sync::Arc::ptr_eq(&resolved.0, &first.0));
    }

    #[test]
    fn resolves_by_handle() {
        let registry = ClientRegistry::new();
        registry.register("first", client());
        let handle = registry.register("second", client());

        assert!(registry.resolve(Some(&handle)).is_ok());
    }

    #[test]
    fn missing_client_is_an_error() {
        let registry: ClientRegistry<NullTransport> = ClientRegistry::new();
        let error = registry.resolve(None).unwrap_err();
        assert_eq!(error.to_string(), "no client: no clients registered");
    }
}
