//! Commands for the Risk entity.

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

/// A risk as returned by the API.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Risk {
    pub id: ID,
    pub subject: Option<String>,
    pub severity: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "closureReason")]
    pub closure_reason: Option<String>,
    #[serde(rename = "mitigationTargetAt")]
    pub mitigation_target_at: Option<DateTime<Utc>>,
    pub source: Option<String>,
    #[serde(rename = "sourceID")]
    pub source_id: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<DateTime<Utc>>
}

impl Queryable for Risk {
    const COLLECTION: &'static str = "risks";
    type Field = RiskField;
}

/// The selectable, orderable and filterable fields of a risk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RiskField {
    Id,
    Subject,
    Severity,
    Status,
    ClosureReason,
    MitigationTargetAt,
    Source,
    SourceID,
    CreatedAt,
    UpdatedAt
}

impl QueryField for RiskField {
    fn as_str(&self) -> &'static str {
        match self {
            RiskField::Id => "id",
            RiskField::Subject => "subject",
            RiskField::Severity => "severity",
            RiskField::Status => "status",
            RiskField::ClosureReason => "closureReason",
            RiskField::MitigationTargetAt => "mitigationTargetAt",
            RiskField::Source => "source",
            RiskField::SourceID => "sourceID",
            RiskField::CreatedAt => "createdAt",
            RiskField::UpdatedAt => "updatedAt"
        }
    }
}

/// Builds filter conditions for risk queries.
pub type RiskFilter = FilterBuilder<RiskField>;
/// Executes a built risk query.
pub type InvokeRiskQuery = InvokeQuery<Risk>;

#[derive(Serialize, Default)]
pub struct RiskCreateInput {
    #[serde(skip_serializing_if = "InputField::is_absent")]
    subject: InputField<String>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    note: InputField<String>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    severity: InputField<String>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    status: InputField<String>,
    #[serde(rename = "managerId", skip_serializing_if = "InputField::is_absent")]
    manager_id: InputField<ID>,
    #[serde(
        rename = "closureReason",
        skip_serializing_if = "InputField::is_absent"
    )]
    closure_reason: InputField<String>,
    #[serde(
        rename = "mitigationTargetAt",
        skip_serializing_if = "InputField::is_absent"
    )]
    mitigation_target_at: InputField<DateTime<Utc>>,
    #[serde(
        rename = "organizationIds",
        skip_serializing_if = "InputField::is_absent"
    )]
    organization_ids: InputField<Vec<ID>>,
    #[serde(rename = "serviceIds", skip_serializing_if = "InputField::is_absent")]
    service_ids: InputField<Vec<ID>>,
    #[serde(rename = "projectIds", skip_serializing_if = "InputField::is_absent")]
    project_ids: InputField<Vec<ID>>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    source: InputField<String>,
    #[serde(rename = "sourceID", skip_serializing_if = "InputField::is_absent")]
    source_id: InputField<String>
}

impl MutationInput for RiskCreateInput {
    const FIELD: &'static str = "riskCreate";
}

/// Creates a risk. Only explicitly set attributes are transmitted.
pub struct CreateRisk {
    input: RiskCreateInput,
    response: Option<Query>,
    client: Option<ClientHandle>
}

impl CreateRisk {
    const NAME: &'static str = "create-risk";

    pub fn new<S: Into<String>>(subject: S) -> Self {
        let mut input = RiskCreateInput::default();
        input.subject = InputField::Present(subject.into());
        CreateRisk {
            input,
            response: None,
            client: None
        }
    }

    pub fn note<V: Into<String>>(mut self, note: V) -> Self {
        self.input.note = InputField::Present(note.into());
        self
    }

    /// The severity token, e.g. `high`.
    pub fn severity<V: Into<String>>(mut self, severity: V) -> Self {
        self.input.severity = InputField::Present(severity.into());
        self
    }

    pub fn status<V: Into<String>>(mut self, status: V) -> Self {
        self.input.status = InputField::Present(status.into());
        self
    }

    pub fn manager_id<I: Into<ID>>(mut self, manager_id: I) -> Self {
        self.input.manager_id = InputField::Present(manager_id.into());
        self
    }

    pub fn closure_reason<V: Into<String>>(mut self, closure_reason: V) -> Self {
        self.input.closure_reason = InputField::Present(closure_reason.into());
        self
    }

    pub fn mitigation_target_at(mut self, at: DateTime<Utc>) -> Self {
        self.input.mitigation_target_at = InputField::Present(at);
        self
    }

    /// Passing `None` clears the organizations: the field is transmitted as
    /// an empty collection, not omitted.
    pub fn organization_ids<V: Into<Option<Vec<ID>>>>(mut self, ids: V) -> Self {
        self.input.organization_ids = InputField::Present(ids.into().unwrap_or_default());
        self
    }

    /// Passing `None` clears the services: the field is transmitted as an
    /// empty collection, not omitted.
    pub fn service_ids<V: Into<Option<Vec<ID>>>>(mut self, ids: V) -> Self {
        self.input.service_ids = InputField::Present(ids.into().unwrap_or_default());
        self
    }

    /// Passing `None` clears the projects: the field is transmitted as an
    /// empty collection, not omitted.
    pub fn project_ids<V: Into<Option<Vec<ID>>>>(mut self, ids: V) -> Self {
        self.input.project_ids = InputField::Present(ids.into().unwrap_or_default());
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

    pub fn input(&self) -> &RiskCreateInput {
        &self.input
    }

    pub async fn execute<T: Transport>(
        self,
        registry: &ClientRegistry<T>
    ) -> Result<Risk, CommandError> {
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
pub struct RiskUpdateInput {
    id: ID,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    subject: InputField<String>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    note: InputField<String>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    severity: InputField<String>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    status: InputField<String>,
    #[serde(rename = "managerId", skip_serializing_if = "InputField::is_absent")]
    manager_id: InputField<ID>,
    #[serde(
        rename = "closureReason",
        skip_serializing_if = "InputField::is_absent"
    )]
    closure_reason: InputField<String>,
    #[serde(
        rename = "mitigationTargetAt",
        skip_serializing_if = "InputField::is_absent"
    )]
    mitigation_target_at: InputField<DateTime<Utc>>,
    #[serde(
        rename = "organizationIds",
        skip_serializing_if = "InputField::is_absent"
    )]
    organization_ids: InputField<Vec<ID>>,
    #[serde(rename = "serviceIds", skip_serializing_if = "InputField::is_absent")]
    service_ids: InputField<Vec<ID>>,
    #[serde(rename = "projectIds", skip_serializing_if = "InputField::is_absent")]
    project_ids: InputField<Vec<ID>>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    source: InputField<String>,
    #[serde(rename = "sourceID", skip_serializing_if = "InputField::is_absent")]
    source_id: InputField<String>
}

impl MutationInput for RiskUpdateInput {
    const FIELD: &'static str = "riskUpdate";
}

/// Updates a risk. Attributes that were never set are left untouched
/// server-side.
pub struct UpdateRisk {
    input: RiskUpdateInput,
    response: Option<Query>,
    client: Option<ClientHandle>
}

impl UpdateRisk {
    const NAME: &'static str = "update-risk";

    pub fn new<I: Into<ID>>(id: I) -> Self {
        UpdateRisk {
            input: RiskUpdateInput {
                id: id.into(),
                subject: InputField::Absent,
                note: InputField::Absent,
                severity: InputField::Absent,
                status: InputField::Absent,
                manager_id: InputField::Absent,
                closure_reason: InputField::Absent,
                mitigation_target_at: InputField::Absent,
                organization_ids: InputField::Absent,
                service_ids: InputField::Absent,
                project_ids: InputField::Absent,
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

    pub fn severity<V: Into<String>>(mut self, severity: V) -> Self {
        self.input.severity = InputField::Present(severity.into());
        self
    }

    pub fn status<V: Into<String>>(mut self, status: V) -> Self {
        self.input.status = InputField::Present(status.into());
        self
    }

    pub fn manager_id<I: Into<ID>>(mut self, manager_id: I) -> Self {
        self.input.manager_id = InputField::Present(manager_id.into());
        self
    }

    pub fn closure_reason<V: Into<String>>(mut self, closure_reason: V) -> Self {
        self.input.closure_reason = InputField::Present(closure_reason.into());
        self
    }

    pub fn mitigation_target_at(mut self, at: DateTime<Utc>) -> Self {
        self.input.mitigation_target_at = InputField::Present(at);
        self
    }

    pub fn organization_ids<V: Into<Option<Vec<ID>>>>(mut self, ids: V) -> Self {
        self.input.organization_ids = InputField::Present(ids.into().unwrap_or_default());
        self
    }

    pub fn service_ids<V: Into<Option<Vec<ID>>>>(mut self, ids: V) -> Self {
        self.input.service_ids = InputField::Present(ids.into().unwrap_or_default());
        self
    }

    pub fn project_ids<V: Into<Option<Vec<ID>>>>(mut self, ids: V) -> Self {
        self.input.project_ids = InputField::Present(ids.into().unwrap_or_default());
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

    pub fn input(&self) -> &RiskUpdateInput {
        &self.input
    }

    pub async fn execute<T: Transport>(
        self,
        registry: &ClientRegistry<T>
    ) -> Result<Risk, CommandError> {
        let client = registry
            .resolve(self.client.as_ref())
            .map_err(|e| CommandError::new(Self::NAME, e))?;
        client
            .mutation(&self.input, self.response.as_ref())
            .await
            .map_err(|e| CommandError::new(Self::NAME, e))
    }
}

/// Builds a risk query from bound parameters.
pub struct RiskQuery {
    properties: Vec<RiskField>,
    id: Option<ID>,
    view: Option<String>,
    order_by: Option<RiskField>,
    sort_order: Option<SortOrder>,
    items_per_request: Option<u16>,
    manager: Option<Query>,
    services: Option<Query>,
    filters: Vec<QueryFilter<RiskField>>,
    search: Option<String>,
    custom_filters: Vec<CustomFilter>
}

impl RiskQuery {
    const NAME: &'static str = "risk-query";

    pub fn new(properties: Vec<RiskField>) -> Self {
        RiskQuery {
            properties,
            id: None,
            view: None,
            order_by: None,
            sort_order: None,
            items_per_request: None,
            manager: None,
            services: None,
            filters: Vec::new(),
            search: None,
            custom_filters: Vec::new()
        }
    }

    /// Restrict the query to a single risk. Every other filter is ignored
    /// when an id is set.
    pub fn id<I: Into<ID>>(mut self, id: I) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn view<V: Into<String>>(mut self, view: V) -> Self {
        self.view = Some(view.into());
        self
    }

    pub fn order_by(mut self, field: RiskField) -> Self {
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

    /// Nest a sub-selection for the risk's manager.
    pub fn manager(mut self, query: Query) -> Self {
        self.manager = Some(query);
        self
    }

    /// Nest a sub-selection for the risk's services.
    pub fn services(mut self, query: Query) -> Self {
        self.services = Some(query);
        self
    }

    pub fn filters(mut self, filters: Vec<QueryFilter<RiskField>>) -> Self {
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
        if let Some(query) = self.manager {
            nested.push(("manager", query));
        }
        if let Some(query) = self.services {
            nested.push(("services", query));
        }

        build_entity_query(
            Self::NAME,
            Risk::COLLECTION,
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
    use super::{CreateRisk, RiskField, RiskFilter, RiskQuery};
    use xurrent_graphql::{FilterOperator, FilterValues};

    #[test]
    fn multiple_collections_can_be_bound_at_once() {
        let command = CreateRisk::new("Datacenter power supply")
            .service_ids(vec!["svc-1".to_string()])
            .project_ids(None);
        let json = serde_json::to_value(command.input()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "subject": "Datacenter power supply",
                "serviceIds": ["svc-1"],
                "projectIds": []
            })
        );
    }

    #[test]
    fn integer_filters_reach_the_query() {
        let condition = RiskFilter::new(RiskField::Severity, FilterOperator::In)
            .integers(vec![3, 4])
            .build();
        let query = RiskQuery::new(vec![RiskField::Id])
            .filters(vec![condition])
            .build()
            .unwrap();
        assert_eq!(query.filters()[0].values, FilterValues::Integers(vec![3, 4]));
    }
}
