//! Commands for the Service entity.

use crate::{
    entity_query::{build_entity_query, EntityQueryOptions},
    error::CommandError,
    filter::FilterBuilder,
    invoke::{InvokeQuery, Queryable}
};
use xurrent_graphql::{
    ClientHandle, ClientRegistry, CustomFilter, InputField, MutationInput, Query, QueryField,
    QueryFilter, SortOrder, Transport, ID
};

/// A service as returned by the API.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Service {
    pub id: ID,
    pub name: Option<String>,
    pub description: Option<String>,
    pub disabled: Option<bool>,
    pub keywords: Option<String>,
    pub source: Option<String>,
    #[serde(rename = "sourceID")]
    pub source_id: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>
}

impl Queryable for Service {
    const COLLECTION: &'static str = "services";
    type Field = ServiceField;
}

/// The selectable, orderable and filterable fields of a service.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServiceField {
    Id,
    Name,
    Description,
    Disabled,
    Keywords,
    Source,
    SourceID,
    CreatedAt,
    UpdatedAt
}

impl QueryField for ServiceField {
    fn as_str(&self) -> &'static str {
        match self {
            ServiceField::Id => "id",
            ServiceField::Name => "name",
            ServiceField::Description => "description",
            ServiceField::Disabled => "disabled",
            ServiceField::Keywords => "keywords",
            ServiceField::Source => "source",
            ServiceField::SourceID => "sourceID",
            ServiceField::CreatedAt => "createdAt",
            ServiceField::UpdatedAt => "updatedAt"
        }
    }
}

/// Builds filter conditions for service queries.
pub type ServiceFilter = FilterBuilder<ServiceField>;
/// Executes a built service query.
pub type InvokeServiceQuery = InvokeQuery<Service>;

#[derive(Serialize, Default)]
pub struct ServiceCreateInput {
    #[serde(skip_serializing_if = "InputField::is_absent")]
    name: InputField<String>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    description: InputField<String>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    disabled: InputField<bool>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    keywords: InputField<String>,
    #[serde(
        rename = "availabilityManagerId",
        skip_serializing_if = "InputField::is_absent"
    )]
    availability_manager_id: InputField<ID>,
    #[serde(
        rename = "capacityManagerId",
        skip_serializing_if = "InputField::is_absent"
    )]
    capacity_manager_id: InputField<ID>,
    #[serde(
        rename = "changeManagerId",
        skip_serializing_if = "InputField::is_absent"
    )]
    change_manager_id: InputField<ID>,
    #[serde(
        rename = "continuityManagerId",
        skip_serializing_if = "InputField::is_absent"
    )]
    continuity_manager_id: InputField<ID>,
    #[serde(
        rename = "firstLineTeamId",
        skip_serializing_if = "InputField::is_absent"
    )]
    first_line_team_id: InputField<ID>,
    #[serde(rename = "supportTeamId", skip_serializing_if = "InputField::is_absent")]
    support_team_id: InputField<ID>,
    #[serde(rename = "providerId", skip_serializing_if = "InputField::is_absent")]
    provider_id: InputField<ID>,
    #[serde(
        rename = "serviceOwnerId",
        skip_serializing_if = "InputField::is_absent"
    )]
    service_owner_id: InputField<ID>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    source: InputField<String>,
    #[serde(rename = "sourceID", skip_serializing_if = "InputField::is_absent")]
    source_id: InputField<String>
}

impl MutationInput for ServiceCreateInput {
    const FIELD: &'static str = "serviceCreate";
}

/// Creates a service. Only explicitly set attributes are transmitted.
pub struct CreateService {
    input: ServiceCreateInput,
    response: Option<Query>,
    client: Option<ClientHandle>
}

impl CreateService {
    const NAME: &'static str = "create-service";

    pub fn new<N: Into<String>>(name: N) -> Self {
        let mut input = ServiceCreateInput::default();
        input.name = InputField::Present(name.into());
        CreateService {
            input,
            response: None,
            client: None
        }
    }

    pub fn description<V: Into<String>>(mut self, description: V) -> Self {
        self.input.description = InputField::Present(description.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.input.disabled = InputField::Present(disabled);
        self
    }

    pub fn keywords<V: Into<String>>(mut self, keywords: V) -> Self {
        self.input.keywords = InputField::Present(keywords.into());
        self
    }

    pub fn availability_manager_id<I: Into<ID>>(mut self, id: I) -> Self {
        self.input.availability_manager_id = InputField::Present(id.into());
        self
    }

    pub fn capacity_manager_id<I: Into<ID>>(mut self, id: I) -> Self {
        self.input.capacity_manager_id = InputField::Present(id.into());
        self
    }

    pub fn change_manager_id<I: Into<ID>>(mut self, id: I) -> Self {
        self.input.change_manager_id = InputField::Present(id.into());
        self
    }

    pub fn continuity_manager_id<I: Into<ID>>(mut self, id: I) -> Self {
        self.input.continuity_manager_id = InputField::Present(id.into());
        self
    }

    pub fn first_line_team_id<I: Into<ID>>(mut self, id: I) -> Self {
        self.input.first_line_team_id = InputField::Present(id.into());
        self
    }

    pub fn support_team_id<I: Into<ID>>(mut self, id: I) -> Self {
        self.input.support_team_id = InputField::Present(id.into());
        self
    }

    pub fn provider_id<I: Into<ID>>(mut self, id: I) -> Self {
        self.input.provider_id = InputField::Present(id.into());
        self
    }

    pub fn service_owner_id<I: Into<ID>>(mut self, id: I) -> Self {
        self.input.service_owner_id = InputField::Present(id.into());
        self
    }

    pub fn source<V: Into<String>>(mut self, source: V) -> Self {
        self.input.source = InputField::Present(source.into());
        self
    }

    pub fn source_id<V: Into<String>>(mut self, source_id: V) -> Self {
        self.input.source_id = InputField::Present(source_id.into());
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

    pub fn input(&self) -> &ServiceCreateInput {
        &self.input
    }

    pub async fn execute<T: Transport>(
        self,
        registry: &ClientRegistry<T>
    ) -> Result<Service, CommandError> {
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
pub struct ServiceUpdateInput {
    id: ID,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    name: InputField<String>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    description: InputField<String>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    disabled: InputField<bool>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    keywords: InputField<String>,
    #[serde(
        rename = "firstLineTeamId",
        skip_serializing_if = "InputField::is_absent"
    )]
    first_line_team_id: InputField<ID>,
    #[serde(rename = "supportTeamId", skip_serializing_if = "InputField::is_absent")]
    support_team_id: InputField<ID>,
    #[serde(
        rename = "serviceOwnerId",
        skip_serializing_if = "InputField::is_absent"
    )]
    service_owner_id: InputField<ID>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    source: InputField<String>,
    #[serde(rename = "sourceID", skip_serializing_if = "InputField::is_absent")]
    source_id: InputField<String>
}

impl MutationInput for ServiceUpdateInput {
    const FIELD: &'static str = "serviceUpdate";
}

/// Updates a service. Attributes that were never set are left untouched
/// server-side.
pub struct UpdateService {
    input: ServiceUpdateInput,
    response: Option<Query>,
    client: Option<ClientHandle>
}

impl UpdateService {
    const NAME: &'static str = "update-service";

    pub fn new<I: Into<ID>>(id: I) -> Self {
        UpdateService {
            input: ServiceUpdateInput {
                id: id.into(),
                name: InputField::Absent,
                description: InputField::Absent,
                disabled: InputField::Absent,
                keywords: InputField::Absent,
                first_line_team_id: InputField::Absent,
                support_team_id: InputField::Absent,
                service_owner_id: InputField::Absent,
                source: InputField::Absent,
                source_id: InputField::Absent
            },
            response: None,
            client: None
        }
    }

    pub fn name<V: Into<String>>(mut self, name: V) -> Self {
        self.input.name = InputField::Present(name.into());
        self
    }

    pub fn description<V: Into<String>>(mut self, description: V) -> Self {
        self.input.description = InputField::Present(description.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.input.disabled = InputField::Present(disabled);
        self
    }

    pub fn keywords<V: Into<String>>(mut self, keywords: V) -> Self {
        self.input.keywords = InputField::Present(keywords.into());
        self
    }

    pub fn first_line_team_id<I: Into<ID>>(mut self, id: I) -> Self {
        self.input.first_line_team_id = InputField::Present(id.into());
        self
    }

    pub fn support_team_id<I: Into<ID>>(mut self, id: I) -> Self {
        self.input.support_team_id = InputField::Present(id.into());
        self
    }

    pub fn service_owner_id<I: Into<ID>>(mut self, id: I) -> Self {
        self.input.service_owner_id = InputField::Present(id.into());
        self
    }

    pub fn source<V: Into<String>>(mut self, source: V) -> Self {
        self.input.source = InputField::Present(source.into());
        self
    }

    pub fn source_id<V: Into<String>>(mut self, source_id: V) -> Self {
        self.input.source_id = InputField::Present(source_id.into());
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

    pub fn input(&self) -> &ServiceUpdateInput {
        &self.input
    }

    pub async fn execute<T: Transport>(
        self,
        registry: &ClientRegistry<T>
    ) -> Result<Service, CommandError> {
        let client = registry
            .resolve(self.client.as_ref())
            .map_err(|e| CommandError::new(Self::NAME, e))?;
        client
            .mutation(&self.input, self.response.as_ref())
            .await
            .map_err(|e| CommandError::new(Self::NAME, e))
    }
}

/// Builds a service query from bound parameters.
pub struct ServiceQuery {
    properties: Vec<ServiceField>,
    id: Option<ID>,
    view: Option<String>,
    order_by: Option<ServiceField>,
    sort_order: Option<SortOrder>,
    items_per_request: Option<u16>,
    support_team: Option<Query>,
    filters: Vec<QueryFilter<ServiceField>>,
    search: Option<String>,
    custom_filters: Vec<CustomFilter>
}

impl ServiceQuery {
    const NAME: &'static str = "service-query";

    pub fn new(properties: Vec<ServiceField>) -> Self {
        ServiceQuery {
            properties,
            id: None,
            view: None,
            order_by: None,
            sort_order: None,
            items_per_request: None,
            support_team: None,
            filters: Vec::new(),
            search: None,
            custom_filters: Vec::new()
        }
    }

    /// Restrict the query to a single service. Every other filter is ignored
    /// when an id is set.
    pub fn id<I: Into<ID>>(mut self, id: I) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn view<V: Into<String>>(mut self, view: V) -> Self {
        self.view = Some(view.into());
        self
    }

    pub fn order_by(mut self, field: ServiceField) -> Self {
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

    /// Nest a sub-selection for the service's support team.
    pub fn support_team(mut self, query: Query) -> Self {
        self.support_team = Some(query);
        self
    }

    pub fn filters(mut self, filters: Vec<QueryFilter<ServiceField>>) -> Self {
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
            Service::COLLECTION,
            self.properties,
            EntityQueryOptions {
                id: self.id,
                view: self.view,
                order_by: self.order_by.map(|f| f.as_str()),
                sort_order: self.sort_order,
                items_per_request: self.items_per_request,
                nested: self
                    .support_team
                    .map(|q| vec![("supportTeam", q)])
                    .unwrap_or_default(),
                filters: self.filters,
                search: self.search,
                custom_filters: self.custom_filters,
                ..EntityQueryOptions::default()
            }
        )
    }
}
