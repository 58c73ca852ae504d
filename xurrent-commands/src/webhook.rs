//! Commands for the Webhook entity.

use crate::{
    entity_query::{build_entity_query, EntityQueryOptions},
    error::CommandError,
    filter::FilterBuilder,
    invoke::{InvokeQuery, Queryable},
    Deleted
};
use xurrent_graphql::{
    ClientHandle, ClientRegistry, CustomFilter, InputField, MutationInput, Query, QueryField,
    QueryFilter, SortOrder, Transport, ID
};

/// A webhook as returned by the API.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Webhook {
    pub id: ID,
    pub name: Option<String>,
    pub uri: Option<String>,
    pub event: Option<String>,
    pub disabled: Option<bool>,
    pub description: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>
}

impl Queryable for Webhook {
    const COLLECTION: &'static str = "webhooks";
    type Field = WebhookField;
}

/// The selectable, orderable and filterable fields of a webhook.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WebhookField {
    Id,
    Name,
    Uri,
    Event,
    Disabled,
    Description,
    CreatedAt,
    UpdatedAt
}

impl QueryField for WebhookField {
    fn as_str(&self) -> &'static str {
        match self {
            WebhookField::Id => "id",
            WebhookField::Name => "name",
            WebhookField::Uri => "uri",
            WebhookField::Event => "event",
            WebhookField::Disabled => "disabled",
            WebhookField::Description => "description",
            WebhookField::CreatedAt => "createdAt",
            WebhookField::UpdatedAt => "updatedAt"
        }
    }
}

/// Builds filter conditions for webhook queries.
pub type WebhookFilter = FilterBuilder<WebhookField>;
/// Executes a built webhook query.
pub type InvokeWebhookQuery = InvokeQuery<Webhook>;

#[derive(Serialize, Default)]
pub struct WebhookCreateInput {
    #[serde(skip_serializing_if = "InputField::is_absent")]
    name: InputField<String>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    uri: InputField<String>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    event: InputField<String>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    disabled: InputField<bool>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    description: InputField<String>
}

impl MutationInput for WebhookCreateInput {
    const FIELD: &'static str = "webhookCreate";
}

/// Creates a webhook. Only explicitly set attributes are transmitted.
pub struct CreateWebhook {
    input: WebhookCreateInput,
    response: Option<Query>,
    client: Option<ClientHandle>
}

impl CreateWebhook {
    const NAME: &'static str = "create-webhook";

    pub fn new<N: Into<String>, U: Into<String>>(name: N, uri: U) -> Self {
        let mut input = WebhookCreateInput::default();
        input.name = InputField::Present(name.into());
        input.uri = InputField::Present(uri.into());
        CreateWebhook {
            input,
            response: None,
            client: None
        }
    }

    /// The record event that triggers this webhook, e.g. `request.update`.
    pub fn event<V: Into<String>>(mut self, event: V) -> Self {
        self.input.event = InputField::Present(event.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.input.disabled = InputField::Present(disabled);
        self
    }

    pub fn description<V: Into<String>>(mut self, description: V) -> Self {
        self.input.description = InputField::Present(description.into());
        self
    }

    pub fn response(mut self, query: Query) -> Self {
        self.response = Some(query);
        self
    }

    pub fn client(mut self, handle: ClientHandle) -> Self {
        self.client = Some(handle);
        self
    }

    pub fn input(&self) -> &WebhookCreateInput {
        &self.input
    }

    pub async fn execute<T: Transport>(
        self,
        registry: &ClientRegistry<T>
    ) -> Result<Webhook, CommandError> {
        let client = registry
            .resolve(self.client.as_ref())
            .map_err(|e| CommandError::new(Self::NAME, e))?;
        client
            .mutation(&self.input, self.response.as_ref())
            .await
            .map_err(|e| CommandError::new(Self::NAME, e))
    }
}

#[derive(Serialize)]
pub struct WebhookUpdateInput {
    id: ID,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    name: InputField<String>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    uri: InputField<String>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    event: InputField<String>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    disabled: InputField<bool>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    description: InputField<String>
}

impl MutationInput for WebhookUpdateInput {
    const FIELD: &'static str = "webhookUpdate";
}

/// Updates a webhook. Attributes that were never set are left untouched
/// server-side.
pub struct UpdateWebhook {
    input: WebhookUpdateInput,
    response: Option<Query>,
    client: Option<ClientHandle>
}

impl UpdateWebhook {
    const NAME: &'static str = "update-webhook";

    pub fn new<I: Into<ID>>(id: I) -> Self {
        UpdateWebhook {
            input: WebhookUpdateInput {
                id: id.into(),
                name: InputField::Absent,
                uri: InputField::Absent,
                event: InputField::Absent,
                disabled: InputField::Absent,
                description: InputField::Absent
            },
            response: None,
            client: None
        }
    }

    pub fn name<V: Into<String>>(mut self, name: V) -> Self {
        self.input.name = InputField::Present(name.into());
        self
    }

    pub fn uri<V: Into<String>>(mut self, uri: V) -> Self {
        self.input.uri = InputField::Present(uri.into());
        self
    }

    pub fn event<V: Into<String>>(mut self, event: V) -> Self {
        self.input.event = InputField::Present(event.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.input.disabled = InputField::Present(disabled);
        self
    }

    pub fn description<V: Into<String>>(mut self, description: V) -> Self {
        self.input.description = InputField::Present(description.into());
        self
    }

    pub fn response(mut self, query: Query) -> Self {
        self.response = Some(query);
        self
    }

    pub fn client(mut self, handle: ClientHandle) -> Self {
        self.client = Some(handle);
        self
    }

    pub fn input(&self) -> &WebhookUpdateInput {
        &self.input
    }

    pub async fn execute<T: Transport>(
        self,
        registry: &ClientRegistry<T>
    ) -> Result<Webhook, CommandError> {
        let client = registry
            .resolve(self.client.as_ref())
            .map_err(|e| CommandError::new(Self::NAME, e))?;
        client
            .mutation(&self.input, self.response.as_ref())
            .await
            .map_err(|e| CommandError::new(Self::NAME, e))
    }
}

#[derive(Serialize)]
pub struct WebhookDeleteInput {
    id: ID
}

impl MutationInput for WebhookDeleteInput {
    const FIELD: &'static str = "webhookDelete";
}

/// Deletes a webhook.
pub struct DeleteWebhook {
    input: WebhookDeleteInput,
    client: Option<ClientHandle>
}

impl DeleteWebhook {
    const NAME: &'static str = "delete-webhook";

    pub fn new<I: Into<ID>>(id: I) -> Self {
        DeleteWebhook {
            input: WebhookDeleteInput { id: id.into() },
            client: None
        }
    }

    pub fn client(mut self, handle: ClientHandle) -> Self {
        self.client = Some(handle);
        self
    }

    pub async fn execute<T: Transport>(
        self,
        registry: &ClientRegistry<T>
    ) -> Result<Deleted, CommandError> {
        let client = registry
            .resolve(self.client.as_ref())
            .map_err(|e| CommandError::new(Self::NAME, e))?;
        let response = Query::new(Webhook::COLLECTION).select("success");
        client
            .mutation(&self.input, Some(&response))
            .await
            .map_err(|e| CommandError::new(Self::NAME, e))
    }
}

/// Builds a webhook query from bound parameters.
pub struct WebhookQuery {
    properties: Vec<WebhookField>,
    id: Option<ID>,
    view: Option<String>,
    order_by: Option<WebhookField>,
    sort_order: Option<SortOrder>,
    items_per_request: Option<u16>,
    filters: Vec<QueryFilter<WebhookField>>,
    search: Option<String>,
    custom_filters: Vec<CustomFilter>
}

impl WebhookQuery {
    const NAME: &'static str = "webhook-query";

    pub fn new(properties: Vec<WebhookField>) -> Self {
        WebhookQuery {
            properties,
            id: None,
            view: None,
            order_by: None,
            sort_order: None,
            items_per_request: None,
            filters: Vec::new(),
            search: None,
            custom_filters: Vec::new()
        }
    }

    /// Restrict the query to a single webhook. Every other filter is ignored
    /// when an id is set.
    pub fn id<I: Into<ID>>(mut self, id: I) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn view<V: Into<String>>(mut self, view: V) -> Self {
        self.view = Some(view.into());
        self
    }

    pub fn order_by(mut self, field: WebhookField) -> Self {
        self.order_by = Some(field);
        self
    }

    pub fn sort_order(mut self, order: SortOrder) -> Self {
        self.sort_order = Some(order);
        self
    }

    pub fn items_per_request(mut self, items: u16) -> Self {
        self.items_per_request = Some(items);
        self
    }

    pub fn filters(mut self, filters: Vec<QueryFilter<WebhookField>>) -> Self {
        self.filters = filters;
        self
    }

    pub fn search<S: Into<String>>(mut self, text: S) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn custom_filters(mut self, filters: Vec<CustomFilter>) -> Self {
        self.custom_filters = filters;
        self
    }

    pub fn build(self) -> Result<Query, CommandError> {
        build_entity_query(
            Self::NAME,
            Webhook::COLLECTION,
            self.properties,
            EntityQueryOptions {
                id: self.id,
                view: self.view,
                order_by: self.order_by.map(|f| f.as_str()),
                sort_order: self.sort_order,
                items_per_request: self.items_per_request,
                filters: self.filters,
                search: self.search,
                custom_filters: self.custom_filters,
                ..EntityQueryOptions::default()
            }
        )
    }
}

#[cfg(test)]
mod test {
    use super::CreateWebhook;

    #[test]
    fn create_transmits_name_and_uri() {
        let command = CreateWebhook::new("on-request-update", "https://hooks.example.com/x")
            .event("request.update");
        let json = serde_json::to_value(command.input()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "on-request-update",
                "uri": "https://hooks.example.com/x",
                "event": "request.update"
            })
        );
    }
}
