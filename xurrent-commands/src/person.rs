//! Commands for the Person entity.

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

/// A person as returned by the API.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Person {
    pub id: ID,
    pub name: Option<String>,
    #[serde(rename = "primaryEmail")]
    pub primary_email: Option<String>,
    pub disabled: Option<bool>,
    #[serde(rename = "jobTitle")]
    pub job_title: Option<String>,
    pub vip: Option<bool>,
    #[serde(rename = "timeZone")]
    pub time_zone: Option<String>,
    #[serde(rename = "employeeID")]
    pub employee_id: Option<String>,
    pub source: Option<String>,
    #[serde(rename = "sourceID")]
    pub source_id: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>
}

impl Queryable for Person {
    const COLLECTION: &'static str = "people";
    type Field = PersonField;
}

/// The selectable, orderable and filterable fields of a person.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PersonField {
    Id,
    Name,
    PrimaryEmail,
    Disabled,
    JobTitle,
    Vip,
    TimeZone,
    EmployeeID,
    Source,
    SourceID,
    CreatedAt,
    UpdatedAt
}

impl QueryField for PersonField {
    fn as_str(&self) -> &'static str {
        match self {
            PersonField::Id => "id",
            PersonField::Name => "name",
            PersonField::PrimaryEmail => "primaryEmail",
            PersonField::Disabled => "disabled",
            PersonField::JobTitle => "jobTitle",
            PersonField::Vip => "vip",
            PersonField::TimeZone => "timeZone",
            PersonField::EmployeeID => "employeeID",
            PersonField::Source => "source",
            PersonField::SourceID => "sourceID",
            PersonField::CreatedAt => "createdAt",
            PersonField::UpdatedAt => "updatedAt"
        }
    }
}

/// Builds filter conditions for person queries.
pub type PersonFilter = FilterBuilder<PersonField>;
/// Executes a built person query.
pub type InvokePersonQuery = InvokeQuery<Person>;

#[derive(Serialize, Default)]
pub struct PersonCreateInput {
    #[serde(skip_serializing_if = "InputField::is_absent")]
    name: InputField<String>,
    #[serde(rename = "primaryEmail", skip_serializing_if = "InputField::is_absent")]
    primary_email: InputField<String>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    disabled: InputField<bool>,
    #[serde(rename = "jobTitle", skip_serializing_if = "InputField::is_absent")]
    job_title: InputField<String>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    vip: InputField<bool>,
    #[serde(rename = "timeZone", skip_serializing_if = "InputField::is_absent")]
    time_zone: InputField<String>,
    #[serde(rename = "employeeID", skip_serializing_if = "InputField::is_absent")]
    employee_id: InputField<String>,
    #[serde(rename = "organizationId", skip_serializing_if = "InputField::is_absent")]
    organization_id: InputField<ID>,
    #[serde(rename = "siteId", skip_serializing_if = "InputField::is_absent")]
    site_id: InputField<ID>,
    #[serde(rename = "teamIds", skip_serializing_if = "InputField::is_absent")]
    team_ids: InputField<Vec<ID>>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    source: InputField<String>,
    #[serde(rename = "sourceID", skip_serializing_if = "InputField::is_absent")]
    source_id: InputField<String>
}

impl MutationInput for PersonCreateInput {
    const FIELD: &'static str = "personCreate";
}

/// Creates a person. Only explicitly set attributes are transmitted.
pub struct CreatePerson {
    input: PersonCreateInput,
    response: Option<Query>,
    client: Option<ClientHandle>
}

impl CreatePerson {
    const NAME: &'static str = "create-person";

    pub fn new<N: Into<String>, E: Into<String>>(name: N, primary_email: E) -> Self {
        let mut input = PersonCreateInput::default();
        input.name = InputField::Present(name.into());
        input.primary_email = InputField::Present(primary_email.into());
        CreatePerson {
            input,
            response: None,
            client: None
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.input.disabled = InputField::Present(disabled);
        self
    }

    pub fn job_title<V: Into<String>>(mut self, job_title: V) -> Self {
        self.input.job_title = InputField::Present(job_title.into());
        self
    }

    pub fn vip(mut self, vip: bool) -> Self {
        self.input.vip = InputField::Present(vip);
        self
    }

    pub fn time_zone<V: Into<String>>(mut self, time_zone: V) -> Self {
        self.input.time_zone = InputField::Present(time_zone.into());
        self
    }

    pub fn employee_id<V: Into<String>>(mut self, employee_id: V) -> Self {
        self.input.employee_id = InputField::Present(employee_id.into());
        self
    }

    pub fn organization_id<I: Into<ID>>(mut self, organization_id: I) -> Self {
        self.input.organization_id = InputField::Present(organization_id.into());
        self
    }

    pub fn site_id<I: Into<ID>>(mut self, site_id: I) -> Self {
        self.input.site_id = InputField::Present(site_id.into());
        self
    }

    /// Passing `None` clears the team memberships: the field is transmitted
    /// as an empty collection, not omitted.
    pub fn team_ids<V: Into<Option<Vec<ID>>>>(mut self, team_ids: V) -> Self {
        self.input.team_ids = InputField::Present(team_ids.into().unwrap_or_default());
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

    pub fn input(&self) -> &PersonCreateInput {
        &self.input
    }

    pub async fn execute<T: Transport>(
        self,
        registry: &ClientRegistry<T>
    ) -> Result<Person, CommandError> {
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
pub struct PersonUpdateInput {
    id: ID,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    name: InputField<String>,
    #[serde(rename = "primaryEmail", skip_serializing_if = "InputField::is_absent")]
    primary_email: InputField<String>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    disabled: InputField<bool>,
    #[serde(rename = "jobTitle", skip_serializing_if = "InputField::is_absent")]
    job_title: InputField<String>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    vip: InputField<bool>,
    #[serde(rename = "timeZone", skip_serializing_if = "InputField::is_absent")]
    time_zone: InputField<String>,
    #[serde(rename = "employeeID", skip_serializing_if = "InputField::is_absent")]
    employee_id: InputField<String>,
    #[serde(rename = "organizationId", skip_serializing_if = "InputField::is_absent")]
    organization_id: InputField<ID>,
    #[serde(rename = "siteId", skip_serializing_if = "InputField::is_absent")]
    site_id: InputField<ID>,
    #[serde(rename = "teamIds", skip_serializing_if = "InputField::is_absent")]
    team_ids: InputField<Vec<ID>>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    source: InputField<String>,
    #[serde(rename = "sourceID", skip_serializing_if = "InputField::is_absent")]
    source_id: InputField<String>
}

impl MutationInput for PersonUpdateInput {
    const FIELD: &'static str = "personUpdate";
}

/// Updates a person. Attributes that were never set are left untouched
/// server-side.
pub struct UpdatePerson {
    input: PersonUpdateInput,
    response: Option<Query>,
    client: Option<ClientHandle>
}

impl UpdatePerson {
    const NAME: &'static str = "update-person";

    pub fn new<I: Into<ID>>(id: I) -> Self {
        UpdatePerson {
            input: PersonUpdateInput {
                id: id.into(),
                name: InputField::Absent,
                primary_email: InputField::Absent,
                disabled: InputField::Absent,
                job_title: InputField::Absent,
                vip: InputField::Absent,
                time_zone: InputField::Absent,
                employee_id: InputField::Absent,
                organization_id: InputField::Absent,
                site_id: InputField::Absent,
                team_ids: InputField::Absent,
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

    pub fn primary_email<V: Into<String>>(mut self, primary_email: V) -> Self {
        self.input.primary_email = InputField::Present(primary_email.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.input.disabled = InputField::Present(disabled);
        self
    }

    pub fn job_title<V: Into<String>>(mut self, job_title: V) -> Self {
        self.input.job_title = InputField::Present(job_title.into());
        self
    }

    pub fn vip(mut self, vip: bool) -> Self {
        self.input.vip = InputField::Present(vip);
        self
    }

    pub fn time_zone<V: Into<String>>(mut self, time_zone: V) -> Self {
        self.input.time_zone = InputField::Present(time_zone.into());
        self
    }

    pub fn employee_id<V: Into<String>>(mut self, employee_id: V) -> Self {
        self.input.employee_id = InputField::Present(employee_id.into());
        self
    }

    pub fn organization_id<I: Into<ID>>(mut self, organization_id: I) -> Self {
        self.input.organization_id = InputField::Present(organization_id.into());
        self
    }

    pub fn site_id<I: Into<ID>>(mut self, site_id: I) -> Self {
        self.input.site_id = InputField::Present(site_id.into());
        self
    }

    pub fn team_ids<V: Into<Option<Vec<ID>>>>(mut self, team_ids: V) -> Self {
        self.input.team_ids = InputField::Present(team_ids.into().unwrap_or_default());
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

    pub fn input(&self) -> &PersonUpdateInput {
        &self.input
    }

    pub async fn execute<T: Transport>(
        self,
        registry: &ClientRegistry<T>
    ) -> Result<Person, CommandError> {
        let client = registry
            .resolve(self.client.as_ref())
            .map_err(|e| CommandError::new(Self::NAME, e))?;
        client
            .mutation(&self.input, self.response.as_ref())
            .await
            .map_err(|e| CommandError::new(Self::NAME, e))
    }
}

/// Builds a person query from bound parameters.
pub struct PersonQuery {
    properties: Vec<PersonField>,
    id: Option<ID>,
    view: Option<String>,
    order_by: Option<PersonField>,
    sort_order: Option<SortOrder>,
    items_per_request: Option<u16>,
    teams: Option<Query>,
    filters: Vec<QueryFilter<PersonField>>,
    search: Option<String>,
    custom_filters: Vec<CustomFilter>
}

impl PersonQuery {
    const NAME: &'static str = "person-query";

    pub fn new(properties: Vec<PersonField>) -> Self {
        PersonQuery {
            properties,
            id: None,
            view: None,
            order_by: None,
            sort_order: None,
            items_per_request: None,
            teams: None,
            filters: Vec::new(),
            search: None,
            custom_filters: Vec::new()
        }
    }

    /// Restrict the query to a single person. Every other filter is ignored
    /// when an id is set.
    pub fn id<I: Into<ID>>(mut self, id: I) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn view<V: Into<String>>(mut self, view: V) -> Self {
        self.view = Some(view.into());
        self
    }

    pub fn order_by(mut self, field: PersonField) -> Self {
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

    /// Nest a sub-selection for the person's teams.
    pub fn teams(mut self, query: Query) -> Self {
        self.teams = Some(query);
        self
    }

    pub fn filters(mut self, filters: Vec<QueryFilter<PersonField>>) -> Self {
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
            Person::COLLECTION,
            self.properties,
            EntityQueryOptions {
                id: self.id,
                view: self.view,
                order_by: self.order_by.map(|f| f.as_str()),
                sort_order: self.sort_order,
                items_per_request: self.items_per_request,
                nested: self.teams.map(|q| vec![("teams", q)]).unwrap_or_default(),
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
    use super::{CreatePerson, PersonField, PersonQuery};

    #[test]
    fn mandatory_attributes_come_from_the_constructor() {
        let command = CreatePerson::new("Ellen Brown", "ellen.brown@example.com");
        let json = serde_json::to_value(command.input()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Ellen Brown",
                "primaryEmail": "ellen.brown@example.com"
            })
        );
    }

    #[test]
    fn custom_filters_survive_the_build() {
        use xurrent_graphql::{CustomFilter, FilterOperator};

        let query = PersonQuery::new(vec![PersonField::Id])
            .custom_filters(vec![CustomFilter::new("region", FilterOperator::Equals)
                .with_values(vec!["emea".to_string()])])
            .build()
            .unwrap();
        assert_eq!(query.custom_filters().len(), 1);
        assert_eq!(query.custom_filters()[0].name, "region");
    }
}
