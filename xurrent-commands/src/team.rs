//! Commands for the Team entity.

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

/// A team as returned by the API.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Team {
    pub id: ID,
    pub name: Option<String>,
    pub description: Option<String>,
    pub disabled: Option<bool>,
    pub remarks: Option<String>,
    #[serde(rename = "timeZone")]
    pub time_zone: Option<String>,
    pub source: Option<String>,
    #[serde(rename = "sourceID")]
    pub source_id: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>
}

impl Queryable for Team {
    const COLLECTION: &'static str = "teams";
    type Field = TeamField;
}

/// The selectable, orderable and filterable fields of a team.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TeamField {
    Id,
    Name,
    Description,
    Disabled,
    Remarks,
    TimeZone,
    Source,
    SourceID,
    CreatedAt,
    UpdatedAt
}

impl QueryField for TeamField {
    fn as_str(&self) -> &'static str {
        match self {
            TeamField::Id => "id",
            TeamField::Name => "name",
            TeamField::Description => "description",
            TeamField::Disabled => "disabled",
            TeamField::Remarks => "remarks",
            TeamField::TimeZone => "timeZone",
            TeamField::Source => "source",
            TeamField::SourceID => "sourceID",
            TeamField::CreatedAt => "createdAt",
            TeamField::UpdatedAt => "updatedAt"
        }
    }
}

/// Builds filter conditions for team queries.
pub type TeamFilter = FilterBuilder<TeamField>;
/// Executes a built team query.
pub type InvokeTeamQuery = InvokeQuery<Team>;

#[derive(Serialize, Default)]
pub struct TeamCreateInput {
    #[serde(skip_serializing_if = "InputField::is_absent")]
    name: InputField<String>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    description: InputField<String>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    disabled: InputField<bool>,
    #[serde(rename = "managerId", skip_serializing_if = "InputField::is_absent")]
    manager_id: InputField<ID>,
    #[serde(rename = "coordinatorId", skip_serializing_if = "InputField::is_absent")]
    coordinator_id: InputField<ID>,
    #[serde(rename = "memberIds", skip_serializing_if = "InputField::is_absent")]
    member_ids: InputField<Vec<ID>>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    remarks: InputField<String>,
    #[serde(rename = "timeZone", skip_serializing_if = "InputField::is_absent")]
    time_zone: InputField<String>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    source: InputField<String>,
    #[serde(rename = "sourceID", skip_serializing_if = "InputField::is_absent")]
    source_id: InputField<String>
}

impl MutationInput for TeamCreateInput {
    const FIELD: &'static str = "teamCreate";
}

/// Creates a team. Only explicitly set attributes are transmitted.
pub struct CreateTeam {
    input: TeamCreateInput,
    response: Option<Query>,
    client: Option<ClientHandle>
}

impl CreateTeam {
    const NAME: &'static str = "create-team";

    pub fn new<N: Into<String>>(name: N) -> Self {
        let mut input = TeamCreateInput::default();
        input.name = InputField::Present(name.into());
        CreateTeam {
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

    pub fn manager_id<I: Into<ID>>(mut self, manager_id: I) -> Self {
        self.input.manager_id = InputField::Present(manager_id.into());
        self
    }

    pub fn coordinator_id<I: Into<ID>>(mut self, coordinator_id: I) -> Self {
        self.input.coordinator_id = InputField::Present(coordinator_id.into());
        self
    }

    /// Passing `None` clears the membership: the field is transmitted as an
    /// empty collection, not omitted.
    pub fn member_ids<V: Into<Option<Vec<ID>>>>(mut self, member_ids: V) -> Self {
        self.input.member_ids = InputField::Present(member_ids.into().unwrap_or_default());
        self
    }

    pub fn remarks<V: Into<String>>(mut self, remarks: V) -> Self {
        self.input.remarks = InputField::Present(remarks.into());
        self
    }

    pub fn time_zone<V: Into<String>>(mut self, time_zone: V) -> Self {
        self.input.time_zone = InputField::Present(time_zone.into());
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

    pub fn input(&self) -> &TeamCreateInput {
        &self.input
    }

    pub async fn execute<T: Transport>(
        self,
        registry: &ClientRegistry<T>
    ) -> Result<Team, CommandError> {
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
pub struct TeamUpdateInput {
    id: ID,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    name: InputField<String>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    description: InputField<String>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    disabled: InputField<bool>,
    #[serde(rename = "managerId", skip_serializing_if = "InputField::is_absent")]
    manager_id: InputField<ID>,
    #[serde(rename = "coordinatorId", skip_serializing_if = "InputField::is_absent")]
    coordinator_id: InputField<ID>,
    #[serde(rename = "memberIds", skip_serializing_if = "InputField::is_absent")]
    member_ids: InputField<Vec<ID>>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    remarks: InputField<String>,
    #[serde(rename = "timeZone", skip_serializing_if = "InputField::is_absent")]
    time_zone: InputField<String>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    source: InputField<String>,
    #[serde(rename = "sourceID", skip_serializing_if = "InputField::is_absent")]
    source_id: InputField<String>
}

impl MutationInput for TeamUpdateInput {
    const FIELD: &'static str = "teamUpdate";
}

/// Updates a team. Attributes that were never set are left untouched
/// server-side.
pub struct UpdateTeam {
    input: TeamUpdateInput,
    response: Option<Query>,
    client: Option<ClientHandle>
}

impl UpdateTeam {
    const NAME: &'static str = "update-team";

    pub fn new<I: Into<ID>>(id: I) -> Self {
        UpdateTeam {
            input: TeamUpdateInput {
                id: id.into(),
                name: InputField::Absent,
                description: InputField::Absent,
                disabled: InputField::Absent,
                manager_id: InputField::Absent,
                coordinator_id: InputField::Absent,
                member_ids: InputField::Absent,
                remarks: InputField::Absent,
                time_zone: InputField::Absent,
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

    pub fn manager_id<I: Into<ID>>(mut self, manager_id: I) -> Self {
        self.input.manager_id = InputField::Present(manager_id.into());
        self
    }

    pub fn coordinator_id<I: Into<ID>>(mut self, coordinator_id: I) -> Self {
        self.input.coordinator_id = InputField::Present(coordinator_id.into());
        self
    }

    pub fn member_ids<V: Into<Option<Vec<ID>>>>(mut self, member_ids: V) -> Self {
        self.input.member_ids = InputField::Present(member_ids.into().unwrap_or_default());
        self
    }

    pub fn remarks<V: Into<String>>(mut self, remarks: V) -> Self {
        self.input.remarks = InputField::Present(remarks.into());
        self
    }

    pub fn time_zone<V: Into<String>>(mut self, time_zone: V) -> Self {
        self.input.time_zone = InputField::Present(time_zone.into());
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

    pub fn input(&self) -> &TeamUpdateInput {
        &self.input
    }

    pub async fn execute<T: Transport>(
        self,
        registry: &ClientRegistry<T>
    ) -> Result<Team, CommandError> {
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
pub struct TeamDeleteInput {
    id: ID
}

impl MutationInput for TeamDeleteInput {
    const FIELD: &'static str = "teamDelete";
}

/// Deletes a team.
pub struct DeleteTeam {
    input: TeamDeleteInput,
    client: Option<ClientHandle>
}

impl DeleteTeam {
    const NAME: &'static str = "delete-team";

    pub fn new<I: Into<ID>>(id: I) -> Self {
        DeleteTeam {
            input: TeamDeleteInput { id: id.into() },
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
        let response = Query::new(Team::COLLECTION).select("success");
        client
            .mutation(&self.input, Some(&response))
            .await
            .map_err(|e| CommandError::new(Self::NAME, e))
    }
}

/// Builds a team query from bound parameters.
pub struct TeamQuery {
    properties: Vec<TeamField>,
    id: Option<ID>,
    view: Option<String>,
    order_by: Option<TeamField>,
    sort_order: Option<SortOrder>,
    items_per_request: Option<u16>,
    manager: Option<Query>,
    members: Option<Query>,
    filters: Vec<QueryFilter<TeamField>>,
    search: Option<String>,
    custom_filters: Vec<CustomFilter>
}

impl TeamQuery {
    const NAME: &'static str = "team-query";

    pub fn new(properties: Vec<TeamField>) -> Self {
        TeamQuery {
            properties,
            id: None,
            view: None,
            order_by: None,
            sort_order: None,
            items_per_request: None,
            manager: None,
            members: None,
            filters: Vec::new(),
            search: None,
            custom_filters: Vec::new()
        }
    }

    /// Restrict the query to a single team. Every other filter is ignored
    /// when an id is set.
    pub fn id<I: Into<ID>>(mut self, id: I) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn view<V: Into<String>>(mut self, view: V) -> Self {
        self.view = Some(view.into());
        self
    }

    pub fn order_by(mut self, field: TeamField) -> Self {
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

    /// Nest a sub-selection for the team's manager.
    pub fn manager(mut self, query: Query) -> Self {
        self.manager = Some(query);
        self
    }

    /// Nest a sub-selection for the team's members.
    pub fn members(mut self, query: Query) -> Self {
        self.members = Some(query);
        self
    }

    pub fn filters(mut self, filters: Vec<QueryFilter<TeamField>>) -> Self {
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
        if let Some(query) = self.members {
            nested.push(("members", query));
        }

        build_entity_query(
            Self::NAME,
            Team::COLLECTION,
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
    use super::{CreateTeam, TeamField, TeamFilter, TeamQuery, UpdateTeam};
    use xurrent_graphql::{FilterOperator, FilterValues, Query, SortOrder};

    #[test]
    fn only_bound_attributes_are_transmitted() {
        let command = CreateTeam::new("Service Desk")
            .manager_id("per-7")
            .member_ids(vec!["per-7".to_string(), "per-9".to_string()]);
        let json = serde_json::to_value(command.input()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Service Desk",
                "managerId": "per-7",
                "memberIds": ["per-7", "per-9"]
            })
        );
    }

    #[test]
    fn clearing_members_transmits_an_empty_collection() {
        let command = UpdateTeam::new("team-1").member_ids(None);
        let json = serde_json::to_value(command.input()).unwrap();
        assert_eq!(json, serde_json::json!({ "id": "team-1", "memberIds": [] }));
    }

    #[test]
    fn query_applies_selection_last_and_in_order() {
        let query = TeamQuery::new(vec![TeamField::Id, TeamField::Name])
            .items_per_request(25)
            .build()
            .unwrap();
        assert_eq!(query.selected_fields(), &["id", "name"]);
        assert_eq!(query.items(), Some(25));
    }

    #[test]
    fn query_nests_relations_under_their_slots() {
        let members = Query::new("people").select("name");
        let query = TeamQuery::new(vec![TeamField::Id])
            .members(members)
            .build()
            .unwrap();
        assert_eq!(query.nested().len(), 1);
        assert_eq!(query.nested()[0].field, "members");
    }

    #[test]
    fn filter_conditions_dispatch_by_value_kind() {
        let disabled = TeamFilter::new(TeamField::Disabled, FilterOperator::Equals)
            .boolean(false)
            .build();
        let names = TeamFilter::new(TeamField::Name, FilterOperator::In)
            .texts(vec!["Ops".to_string()])
            .build();
        let empty = TeamFilter::new(TeamField::Remarks, FilterOperator::Empty).build();

        let query = TeamQuery::new(vec![TeamField::Id])
            .filters(vec![disabled, names, empty])
            .build()
            .unwrap();
        let applied = query.filters();
        assert_eq!(applied[0].values, FilterValues::Boolean(false));
        assert_eq!(
            applied[1].values,
            FilterValues::Texts(vec!["Ops".to_string()])
        );
        assert_eq!(applied[2].values, FilterValues::None);
    }

    #[test]
    fn descending_order_is_preserved() {
        let query = TeamQuery::new(vec![TeamField::Id])
            .order_by(TeamField::Name)
            .sort_order(SortOrder::Descending)
            .build()
            .unwrap();
        assert_eq!(query.ordering(), Some(("name", SortOrder::Descending)));
    }
}
