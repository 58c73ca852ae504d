//! Commands for the Request entity.

use crate::{
    entity_query::{build_entity_query, EntityQueryOptions},
    error::CommandError,
    filter::FilterBuilder,
    invoke::{InvokeQuery, Queryable}
};
use chrono::{DateTime, Utc};
use xurrent_graphql::{
    ClientHandle, ClientRegistry, CustomFilter, InputField, MutationInput, Query, QueryField,
    QueryFilter, SortOrder, Transport, ID
};

/// A request as returned by the API.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Request {
    pub id: ID,
    pub subject: Option<String>,
    pub category: Option<String>,
    pub impact: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "requestId")]
    pub request_id: Option<String>,
    #[serde(rename = "desiredCompletionAt")]
    pub desired_completion_at: Option<DateTime<Utc>>,
    pub source: Option<String>,
    #[serde(rename = "sourceID")]
    pub source_id: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<DateTime<Utc>>
}

impl Queryable for Request {
    const COLLECTION: &'static str = "requests";
    type Field = RequestField;
}

/// The selectable, orderable and filterable fields of a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestField {
    Id,
    Subject,
    Category,
    Impact,
    Status,
    RequestId,
    DesiredCompletionAt,
    Source,
    SourceID,
    CreatedAt,
    UpdatedAt
}

impl QueryField for RequestField {
    fn as_str(&self) -> &'static str {
        match self {
            RequestField::Id => "id",
            RequestField::Subject => "subject",
            RequestField::Category => "category",
            RequestField::Impact => "impact",
            RequestField::Status => "status",
            RequestField::RequestId => "requestId",
            RequestField::DesiredCompletionAt => "desiredCompletionAt",
            RequestField::Source => "source",
            RequestField::SourceID => "sourceID",
            RequestField::CreatedAt => "createdAt",
            RequestField::UpdatedAt => "updatedAt"
        }
    }
}

/// Builds filter conditions for request queries.
pub type RequestFilter = FilterBuilder<RequestField>;
/// Executes a built request query.
pub type InvokeRequestQuery = InvokeQuery<Request>;

#[derive(Serialize, Default)]
pub struct RequestCreateInput {
    #[serde(skip_serializing_if = "InputField::is_absent")]
    subject: InputField<String>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    note: InputField<String>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    category: InputField<String>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    impact: InputField<String>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    status: InputField<String>,
    #[serde(rename = "requestedById", skip_serializing_if = "InputField::is_absent")]
    requested_by_id: InputField<ID>,
    #[serde(
        rename = "requestedForId",
        skip_serializing_if = "InputField::is_absent"
    )]
    requested_for_id: InputField<ID>,
    #[serde(
        rename = "serviceInstanceId",
        skip_serializing_if = "InputField::is_absent"
    )]
    service_instance_id: InputField<ID>,
    #[serde(rename = "teamId", skip_serializing_if = "InputField::is_absent")]
    team_id: InputField<ID>,
    #[serde(rename = "memberId", skip_serializing_if = "InputField::is_absent")]
    member_id: InputField<ID>,
    #[serde(rename = "templateId", skip_serializing_if = "InputField::is_absent")]
    template_id: InputField<ID>,
    #[serde(
        rename = "desiredCompletionAt",
        skip_serializing_if = "InputField::is_absent"
    )]
    desired_completion_at: InputField<DateTime<Utc>>,
    #[serde(
        rename = "configurationItemIds",
        skip_serializing_if = "InputField::is_absent"
    )]
    configuration_item_ids: InputField<Vec<ID>>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    source: InputField<String>,
    #[serde(rename = "sourceID", skip_serializing_if = "InputField::is_absent")]
    source_id: InputField<String>
}

impl MutationInput for RequestCreateInput {
    const FIELD: &'static str = "requestCreate";
}

/// Creates a request. Only explicitly set attributes are transmitted.
pub struct CreateRequest {
    input: RequestCreateInput,
    response: Option<Query>,
    client: Option<ClientHandle>
}

impl CreateRequest {
    const NAME: &'static str = "create-request";

    pub fn new<S: Into<String>>(subject: S) -> Self {
        let mut input = RequestCreateInput::default();
        input.subject = InputField::Present(subject.into());
        CreateRequest {
            input,
            response: None,
            client: None
        }
    }

    pub fn note<V: Into<String>>(mut self, note: V) -> Self {
        self.input.note = InputField::Present(note.into());
        self
    }

    /// The request category token, e.g. `incident`.
    pub fn category<V: Into<String>>(mut self, category: V) -> Self {
        self.input.category = InputField::Present(category.into());
        self
    }

    pub fn impact<V: Into<String>>(mut self, impact: V) -> Self {
        self.input.impact = InputField::Present(impact.into());
        self
    }

    pub fn status<V: Into<String>>(mut self, status: V) -> Self {
        self.input.status = InputField::Present(status.into());
        self
    }

    pub fn requested_by_id<I: Into<ID>>(mut self, requested_by_id: I) -> Self {
        self.input.requested_by_id = InputField::Present(requested_by_id.into());
        self
    }

    pub fn requested_for_id<I: Into<ID>>(mut self, requested_for_id: I) -> Self {
        self.input.requested_for_id = InputField::Present(requested_for_id.into());
        self
    }

    pub fn service_instance_id<I: Into<ID>>(mut self, service_instance_id: I) -> Self {
        self.input.service_instance_id = InputField::Present(service_instance_id.into());
        self
    }

    pub fn team_id<I: Into<ID>>(mut self, team_id: I) -> Self {
        self.input.team_id = InputField::Present(team_id.into());
        self
    }

    pub fn member_id<I: Into<ID>>(mut self, member_id: I) -> Self {
        self.input.member_id = InputField::Present(member_id.into());
        self
    }

    pub fn template_id<I: Into<ID>>(mut self, template_id: I) -> Self {
        self.input.template_id = InputField::Present(template_id.into());
        self
    }

    pub fn desired_completion_at(mut self, at: DateTime<Utc>) -> Self {
        self.input.desired_completion_at = InputField::Present(at);
        self
    }

    /// Passing `None` clears the linked configuration items: the field is
    /// transmitted as an empty collection, not omitted.
    pub fn configuration_item_ids<V: Into<Option<Vec<ID>>>>(mut self, ids: V) -> Self {
        self.input.configuration_item_ids = InputField::Present(ids.into().unwrap_or_default());
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

    pub fn input(&self) -> &RequestCreateInput {
        &self.input
    }

    pub async fn execute<T: Transport>(
        self,
        registry: &ClientRegistry<T>
    ) -> Result<Request, CommandError> {
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
pub struct RequestUpdateInput {
    id: ID,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    subject: InputField<String>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    note: InputField<String>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    category: InputField<String>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    impact: InputField<String>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    status: InputField<String>,
    #[serde(
        rename = "requestedForId",
        skip_serializing_if = "InputField::is_absent"
    )]
    requested_for_id: InputField<ID>,
    #[serde(rename = "teamId", skip_serializing_if = "InputField::is_absent")]
    team_id: InputField<ID>,
    #[serde(rename = "memberId", skip_serializing_if = "InputField::is_absent")]
    member_id: InputField<ID>,
    #[serde(
        rename = "desiredCompletionAt",
        skip_serializing_if = "InputField::is_absent"
    )]
    desired_completion_at: InputField<DateTime<Utc>>,
    #[serde(
        rename = "configurationItemIds",
        skip_serializing_if = "InputField::is_absent"
    )]
    configuration_item_ids: InputField<Vec<ID>>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    source: InputField<String>,
    #[serde(rename = "sourceID", skip_serializing_if = "InputField::is_absent")]
    source_id: InputField<String>
}

impl MutationInput for RequestUpdateInput {
    const FIELD: &'static str = "requestUpdate";
}

/// Updates a request. Attributes that were never set are left untouched
/// server-side.
pub struct UpdateRequest {
    input: RequestUpdateInput,
    response: Option<Query>,
    client: Option<ClientHandle>
}

impl UpdateRequest {
    const NAME: &'static str = "update-request";

    pub fn new<I: Into<ID>>(id: I) -> Self {
        UpdateRequest {
            input: RequestUpdateInput {
                id: id.into(),
                subject: InputField::Absent,
                note: InputField::Absent,
                category: InputField::Absent,
                impact: InputField::Absent,
                status: InputField::Absent,
                requested_for_id: InputField::Absent,
                team_id: InputField::Absent,
                member_id: InputField::Absent,
                desired_completion_at: InputField::Absent,
                configuration_item_ids: InputField::Absent,
                source: InputField::Absent,
                source_id: InputField::Absent
            },
            response: None,
            client: None
        }
    }

    pub fn subject<V: Into<String>>(mut self, subject: V) -> Self {
        self.input.subject = InputField::Present(subject.into());
        self
    }

    pub fn note<V: Into<String>>(mut self, note: V) -> Self {
        self.input.note = InputField::Present(note.into());
        self
    }

    pub fn category<V: Into<String>>(mut self, category: V) -> Self {
        self.input.category = InputField::Present(category.into());
        self
    }

    pub fn impact<V: Into<String>>(mut self, impact: V) -> Self {
        self.input.impact = InputField::Present(impact.into());
        self
    }

    pub fn status<V: Into<String>>(mut self, status: V) -> Self {
        self.input.status = InputField::Present(status.into());
        self
    }

    pub fn requested_for_id<I: Into<ID>>(mut self, requested_for_id: I) -> Self {
        self.input.requested_for_id = InputField::Present(requested_for_id.into());
        self
    }

    pub fn team_id<I: Into<ID>>(mut self, team_id: I) -> Self {
        self.input.team_id = InputField::Present(team_id.into());
        self
    }

    pub fn member_id<I: Into<ID>>(mut self, member_id: I) -> Self {
        self.input.member_id = InputField::Present(member_id.into());
        self
    }

    pub fn desired_completion_at(mut self, at: DateTime<Utc>) -> Self {
        self.input.desired_completion_at = InputField::Present(at);
        self
    }

    pub fn configuration_item_ids<V: Into<Option<Vec<ID>>>>(mut self, ids: V) -> Self {
        self.input.configuration_item_ids = InputField::Present(ids.into().unwrap_or_default());
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

    pub fn input(&self) -> &RequestUpdateInput {
        &self.input
    }

    pub async fn execute<T: Transport>(
        self,
        registry: &ClientRegistry<T>
    ) -> Result<Request, CommandError> {
        let client = registry
            .resolve(self.client.as_ref())
            .map_err(|e| CommandError::new(Self::NAME, e))?;
        client
            .mutation(&self.input, self.response.as_ref())
            .await
            .map_err(|e| CommandError::new(Self::NAME, e))
    }
}

/// Builds a request query from bound parameters.
pub struct RequestQuery {
    properties: Vec<RequestField>,
    id: Option<ID>,
    view: Option<String>,
    order_by: Option<RequestField>,
    sort_order: Option<SortOrder>,
    items_per_request: Option<u16>,
    requested_for: Option<Query>,
    service_instance: Option<Query>,
    team: Option<Query>,
    filters: Vec<QueryFilter<RequestField>>,
    search: Option<String>,
    custom_filters: Vec<CustomFilter>
}

impl RequestQuery {
    const NAME: &'static str = "request-query";

    pub fn new(properties: Vec<RequestField>) -> Self {
        RequestQuery {
            properties,
            id: None,
            view: None,
            order_by: None,
            sort_order: None,
            items_per_request: None,
            requested_for: None,
            service_instance: None,
            team: None,
            filters: Vec::new(),
            search: None,
            custom_filters: Vec::new()
        }
    }

    /// Restrict the query to a single request. Every other filter is ignored
    /// when an id is set.
    pub fn id<I: Into<ID>>(mut self, id: I) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn view<V: Into<String>>(mut self, view: V) -> Self {
        self.view = Some(view.into());
        self
    }

    pub fn order_by(mut self, field: RequestField) -> Self {
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

    /// Nest a sub-selection for the person the request was made for.
    pub fn requested_for(mut self, query: Query) -> Self {
        self.requested_for = Some(query);
        self
    }

    /// Nest a sub-selection for the request's service instance.
    pub fn service_instance(mut self, query: Query) -> Self {
        self.service_instance = Some(query);
        self
    }

    /// Nest a sub-selection for the request's team.
    pub fn team(mut self, query: Query) -> Self {
        self.team = Some(query);
        self
    }

    pub fn filters(mut self, filters: Vec<QueryFilter<RequestField>>) -> Self {
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
        let mut nested = Vec::new();
        if let Some(query) = self.requested_for {
            nested.push(("requestedFor", query));
        }
        if let Some(query) = self.service_instance {
            nested.push(("serviceInstance", query));
        }
        if let Some(query) = self.team {
            nested.push(("team", query));
        }

        build_entity_query(
            Self::NAME,
            Request::COLLECTION,
            self.properties,
            EntityQueryOptions {
                id: self.id,
                view: self.view,
                order_by: self.order_by.map(|f| f.as_str()),
                sort_order: self.sort_order,
                items_per_request: self.items_per_request,
                nested,
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
    use super::{RequestField, RequestQuery};
    use xurrent_graphql::Query;

    #[test]
    fn relations_nest_in_declaration_order() {
        let query = RequestQuery::new(vec![RequestField::Id])
            .team(Query::new("teams").select("name"))
            .requested_for(Query::new("people").select("name"))
            .build()
            .unwrap();
        let nested: Vec<&str> = query.nested().iter().map(|n| n.field).collect();
        assert_eq!(nested, vec!["requestedFor", "team"]);
    }
}
