//! Commands for the Problem entity.

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

/// A problem as returned by the API.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Problem {
    pub id: ID,
    pub subject: Option<String>,
    pub impact: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "knownError")]
    pub known_error: Option<bool>,
    pub workaround: Option<String>,
    #[serde(rename = "analysisTargetAt")]
    pub analysis_target_at: Option<DateTime<Utc>>,
    pub source: Option<String>,
    #[serde(rename = "sourceID")]
    pub source_id: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<DateTime<Utc>>
}

impl Queryable for Problem {
    const COLLECTION: &'static str = "problems";
    type Field = ProblemField;
}

/// The selectable, orderable and filterable fields of a problem.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProblemField {
    Id,
    Subject,
    Impact,
    Status,
    KnownError,
    Workaround,
    AnalysisTargetAt,
    Source,
    SourceID,
    CreatedAt,
    UpdatedAt
}

impl QueryField for ProblemField {
    fn as_str(&self) -> &'static str {
        match self {
            ProblemField::Id => "id",
            ProblemField::Subject => "subject",
            ProblemField::Impact => "impact",
            ProblemField::Status => "status",
            ProblemField::KnownError => "knownError",
            ProblemField::Workaround => "workaround",
            ProblemField::AnalysisTargetAt => "analysisTargetAt",
            ProblemField::Source => "source",
            ProblemField::SourceID => "sourceID",
            ProblemField::CreatedAt => "createdAt",
            ProblemField::UpdatedAt => "updatedAt"
        }
    }
}

/// Builds filter conditions for problem queries.
pub type ProblemFilter = FilterBuilder<ProblemField>;
/// Executes a built problem query.
pub type InvokeProblemQuery = InvokeQuery<Problem>;

#[derive(Serialize, Default)]
pub struct ProblemCreateInput {
    #[serde(skip_serializing_if = "InputField::is_absent")]
    subject: InputField<String>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    note: InputField<String>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    impact: InputField<String>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    status: InputField<String>,
    #[serde(rename = "knownError", skip_serializing_if = "InputField::is_absent")]
    known_error: InputField<bool>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    workaround: InputField<String>,
    #[serde(rename = "managerId", skip_serializing_if = "InputField::is_absent")]
    manager_id: InputField<ID>,
    #[serde(rename = "serviceId", skip_serializing_if = "InputField::is_absent")]
    service_id: InputField<ID>,
    #[serde(rename = "teamId", skip_serializing_if = "InputField::is_absent")]
    team_id: InputField<ID>,
    #[serde(rename = "memberId", skip_serializing_if = "InputField::is_absent")]
    member_id: InputField<ID>,
    #[serde(
        rename = "analysisTargetAt",
        skip_serializing_if = "InputField::is_absent"
    )]
    analysis_target_at: InputField<DateTime<Utc>>,
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

impl MutationInput for ProblemCreateInput {
    const FIELD: &'static str = "problemCreate";
}

/// Creates a problem. Only explicitly set attributes are transmitted.
pub struct CreateProblem {
    input: ProblemCreateInput,
    response: Option<Query>,
    client: Option<ClientHandle>
}

impl CreateProblem {
    const NAME: &'static str = "create-problem";

    pub fn new<S: Into<String>>(subject: S) -> Self {
        let mut input = ProblemCreateInput::default();
        input.subject = InputField::Present(subject.into());
        CreateProblem {
            input,
            response: None,
            client: None
        }
    }

    pub fn note<V: Into<String>>(mut self, note: V) -> Self {
        self.input.note = InputField::Present(note.into());
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

    pub fn known_error(mut self, known_error: bool) -> Self {
        self.input.known_error = InputField::Present(known_error);
        self
    }

    pub fn workaround<V: Into<String>>(mut self, workaround: V) -> Self {
        self.input.workaround = InputField::Present(workaround.into());
        self
    }

    pub fn manager_id<I: Into<ID>>(mut self, manager_id: I) -> Self {
        self.input.manager_id = InputField::Present(manager_id.into());
        self
    }

    pub fn service_id<I: Into<ID>>(mut self, service_id: I) -> Self {
        self.input.service_id = InputField::Present(service_id.into());
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

    pub fn analysis_target_at(mut self, at: DateTime<Utc>) -> Self {
        self.input.analysis_target_at = InputField::Present(at);
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

    pub fn input(&self) -> &ProblemCreateInput {
        &self.input
    }

    pub async fn execute<T: Transport>(
        self,
        registry: &ClientRegistry<T>
    ) -> Result<Problem, CommandError> {
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
pub struct ProblemUpdateInput {
    id: ID,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    subject: InputField<String>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    note: InputField<String>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    impact: InputField<String>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    status: InputField<String>,
    #[serde(rename = "knownError", skip_serializing_if = "InputField::is_absent")]
    known_error: InputField<bool>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    workaround: InputField<String>,
    #[serde(rename = "managerId", skip_serializing_if = "InputField::is_absent")]
    manager_id: InputField<ID>,
    #[serde(rename = "teamId", skip_serializing_if = "InputField::is_absent")]
    team_id: InputField<ID>,
    #[serde(rename = "memberId", skip_serializing_if = "InputField::is_absent")]
    member_id: InputField<ID>,
    #[serde(
        rename = "analysisTargetAt",
        skip_serializing_if = "InputField::is_absent"
    )]
    analysis_target_at: InputField<DateTime<Utc>>,
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

impl MutationInput for ProblemUpdateInput {
    const FIELD: &'static str = "problemUpdate";
}

/// Updates a problem. Attributes that were never set are left untouched
/// server-side.
pub struct UpdateProblem {
    input: ProblemUpdateInput,
    response: Option<Query>,
    client: Option<ClientHandle>
}

impl UpdateProblem {
    const NAME: &'static str = "update-problem";

    pub fn new<I: Into<ID>>(id: I) -> Self {
        UpdateProblem {
            input: ProblemUpdateInput {
                id: id.into(),
                subject: InputField::Absent,
                note: InputField::Absent,
                impact: InputField::Absent,
                status: InputField::Absent,
                known_error: InputField::Absent,
                workaround: InputField::Absent,
                manager_id: InputField::Absent,
                team_id: InputField::Absent,
                member_id: InputField::Absent,
                analysis_target_at: InputField::Absent,
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

    pub fn impact<V: Into<String>>(mut self, impact: V) -> Self {
        self.input.impact = InputField::Present(impact.into());
        self
    }

    pub fn status<V: Into<String>>(mut self, status: V) -> Self {
        self.input.status = InputField::Present(status.into());
        self
    }

    pub fn known_error(mut self, known_error: bool) -> Self {
        self.input.known_error = InputField::Present(known_error);
        self
    }

    pub fn workaround<V: Into<String>>(mut self, workaround: V) -> Self {
        self.input.workaround = InputField::Present(workaround.into());
        self
    }

    pub fn manager_id<I: Into<ID>>(mut self, manager_id: I) -> Self {
        self.input.manager_id = InputField::Present(manager_id.into());
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

    pub fn analysis_target_at(mut self, at: DateTime<Utc>) -> Self {
        self.input.analysis_target_at = InputField::Present(at);
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

    pub fn input(&self) -> &ProblemUpdateInput {
        &self.input
    }

    pub async fn execute<T: Transport>(
        self,
        registry: &ClientRegistry<T>
    ) -> Result<Problem, CommandError> {
        let client = registry
            .resolve(self.client.as_ref())
            .map_err(|e| CommandError::new(Self::NAME, e))?;
        client
            .mutation(&self.input, self.response.as_ref())
            .await
            .map_err(|e| CommandError::new(Self::NAME, e))
    }
}

/// Builds a problem query from bound parameters.
pub struct ProblemQuery {
    properties: Vec<ProblemField>,
    id: Option<ID>,
    view: Option<String>,
    order_by: Option<ProblemField>,
    sort_order: Option<SortOrder>,
    items_per_request: Option<u16>,
    service: Option<Query>,
    team: Option<Query>,
    filters: Vec<QueryFilter<ProblemField>>,
    search: Option<String>,
    custom_filters: Vec<CustomFilter>
}

impl ProblemQuery {
    const NAME: &'static str = "problem-query";

    pub fn new(properties: Vec<ProblemField>) -> Self {
        ProblemQuery {
            properties,
            id: None,
            view: None,
            order_by: None,
            sort_order: None,
            items_per_request: None,
            service: None,
            team: None,
            filters: Vec::new(),
            search: None,
            custom_filters: Vec::new()
        }
    }

    /// Restrict the query to a single problem. Every other filter is ignored
    /// when an id is set.
    pub fn id<I: Into<ID>>(mut self, id: I) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn view<V: Into<String>>(mut self, view: V) -> Self {
        self.view = Some(view.into());
        self
    }

    pub fn order_by(mut self, field: ProblemField) -> Self {
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

    /// Nest a sub-selection for the problem's service.
    pub fn service(mut self, query: Query) -> Self {
        self.service = Some(query);
        self
    }

    /// Nest a sub-selection for the problem's team.
    pub fn team(mut self, query: Query) -> Self {
        self.team = Some(query);
        self
    }

    pub fn filters(mut self, filters: Vec<QueryFilter<ProblemField>>) -> Self {
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
        if let Some(query) = self.service {
            nested.push(("service", query));
        }
        if let Some(query) = self.team {
            nested.push(("team", query));
        }

        build_entity_query(
            Self::NAME,
            Problem::COLLECTION,
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
    use super::{CreateProblem, ProblemField, ProblemFilter, ProblemQuery};
    use chrono::{TimeZone, Utc};
    use xurrent_graphql::{FilterOperator, FilterValues};

    #[test]
    fn timestamps_serialize_in_rfc3339() {
        let at = Utc.ymd(2021, 2, 3).and_hms(9, 30, 0);
        let command = CreateProblem::new("Mail store nearly full").analysis_target_at(at);
        let json = serde_json::to_value(command.input()).unwrap();
        assert_eq!(json["analysisTargetAt"], "2021-02-03T09:30:00Z");
    }

    #[test]
    fn date_time_filters_reach_the_query() {
        let since = Utc.ymd(2021, 1, 1).and_hms(0, 0, 0);
        let condition =
            ProblemFilter::new(ProblemField::CreatedAt, FilterOperator::GreaterThanOrEquals)
                .date_times(vec![since])
                .build();
        let query = ProblemQuery::new(vec![ProblemField::Id])
            .filters(vec![condition])
            .build()
            .unwrap();
        assert_eq!(
            query.filters()[0].values,
            FilterValues::DateTimes(vec![since])
        );
    }
}
