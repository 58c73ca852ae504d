use crate::{
    input::MutationInput,
    render,
    transport::{HttpRequest, Transport},
    ClientError, HeaderPair, Query, RequestBody
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

pub struct ClientImpl<T: Transport> {
    pub(crate) endpoint: String,
    pub(crate) transport: T,
    pub(crate) account: Option<String>,
    pub(crate) token: Option<String>,
    pub(crate) extra_headers: Option<Arc<dyn Fn() -> Vec<HeaderPair> + Send + Sync>>
}

impl<T: Transport> ClientImpl<T> {
    fn headers(&self) -> Vec<HeaderPair> {
        let mut headers = Vec::new();
        if let Some(ref token) = self.token {
            headers.push(HeaderPair(
                "Authorization".to_string(),
                format!("Bearer {}", token)
            ));
        }
        if let Some(ref account) = self.account {
            headers.push(HeaderPair(
                "X-Xurrent-Account".to_string(),
                account.clone()
            ));
        }
        if let Some(ref extra_headers) = self.extra_headers {
            headers.extend(extra_headers());
        }
        headers
    }

    async fn run(&self, document: String) -> Result<serde_json::Value, ClientError> {
        debug!(endpoint = %self.endpoint, document = %document, "dispatching request");

        let request = HttpRequest {
            url: self.endpoint.clone(),
            headers: self.headers(),
            body: RequestBody { query: document }
        };
        let response = self.transport.send(request).await?;

        if let Some(errors) = response.errors {
            if !errors.is_empty() {
                debug!(count = errors.len(), "response carried errors");
                return Err(ClientError::Api(errors));
            }
        }

        response.data.ok_or_else(|| {
            ClientError::Decode(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "response carried neither data nor errors"
            )))
        })
    }

    pub async fn get<P: DeserializeOwned>(&self, query: &Query) -> Result<Vec<P>, ClientError> {
        if query.selects_nothing() {
            return Err(ClientError::InvalidRequest(
                "query selects no fields".to_string()
            ));
        }

        let data = self.run(render::query_document(query)).await?;
        let nodes = data
            .get(query.collection())
            .and_then(|collection| collection.get("nodes"))
            .and_then(|nodes| nodes.as_array())
            .cloned()
            .ok_or_else(|| {
                ClientError::Decode(Box::new(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("response carried no nodes for {}", query.collection())
                )))
            })?;

        nodes
            .into_iter()
            .map(|node| serde_json::from_value(node).map_err(|e| ClientError::Decode(Box::new(e))))
            .collect()
    }

    pub async fn mutation<I: MutationInput, P: DeserializeOwned>(
        &self,
        input: &I,
        response: Option<&Query>
    ) -> Result<P, ClientError> {
        let data = self.run(render::mutation_document(input, response)?).await?;
        let payload = data.get(I::FIELD).cloned().ok_or_else(|| {
            ClientError::Decode(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("response carried no payload for {}", I::FIELD)
            )))
        })?;

        serde_json::from_value(payload).map_err(|e| ClientError::Decode(Box::new(e)))
    }

    pub async fn create_event<I: MutationInput, P: DeserializeOwned>(
        &self,
        input: &I
    ) -> Result<P, ClientError> {
        self.mutation(input, None).await
    }
}
