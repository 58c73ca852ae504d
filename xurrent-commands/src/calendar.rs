//! Commands for the Calendar entity.

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

/// A calendar as returned by the API. Fields beyond `id` are populated
/// according to the caller's selection.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Calendar {
    pub id: ID,
    pub name: Option<String>,
    #[serde(rename = "timeZone")]
    pub time_zone: Option<String>,
    pub disabled: Option<bool>,
    pub source: Option<String>,
    #[serde(rename = "sourceID")]
    pub source_id: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>
}

impl Queryable for Calendar {
    const COLLECTION: &'static str = "calendars";
    type Field = CalendarField;
}

/// The selectable, orderable and filterable fields of a calendar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalendarField {
    Id,
    Name,
    TimeZone,
    Disabled,
    Source,
    SourceID,
    CreatedAt,
    UpdatedAt
}

impl QueryField for CalendarField {
    fn as_str(&self) -> &'static str {
        match self {
            CalendarField::Id => "id",
            CalendarField::Name => "name",
            CalendarField::TimeZone => "timeZone",
            CalendarField::Disabled => "disabled",
            CalendarField::Source => "source",
            CalendarField::SourceID => "sourceID",
            CalendarField::CreatedAt => "createdAt",
            CalendarField::UpdatedAt => "updatedAt"
        }
    }
}

/// Builds filter conditions for calendar queries.
pub type CalendarFilter = FilterBuilder<CalendarField>;
/// Executes a built calendar query.
pub type InvokeCalendarQuery = InvokeQuery<Calendar>;

#[derive(Serialize, Default)]
pub struct CalendarCreateInput {
    #[serde(skip_serializing_if = "InputField::is_absent")]
    name: InputField<String>,
    #[serde(rename = "timeZone", skip_serializing_if = "InputField::is_absent")]
    time_zone: InputField<String>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    disabled: InputField<bool>,
    #[serde(rename = "holidayIds", skip_serializing_if = "InputField::is_absent")]
    holiday_ids: InputField<Vec<ID>>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    source: InputField<String>,
    #[serde(rename = "sourceID", skip_serializing_if = "InputField::is_absent")]
    source_id: InputField<String>
}

impl MutationInput for CalendarCreateInput {
    const FIELD: &'static str = "calendarCreate";
}

/// Creates a calendar. Only explicitly set attributes are transmitted.
pub struct CreateCalendar {
    input: CalendarCreateInput,
    response: Option<Query>,
    client: Option<ClientHandle>
}

impl CreateCalendar {
    const NAME: &'static str = "create-calendar";

    pub fn new<N: Into<String>>(name: N) -> Self {
        let mut input = CalendarCreateInput::default();
        input.name = InputField::Present(name.into());
        CreateCalendar {
            input,
            response: None,
            client: None
        }
    }

    pub fn time_zone<V: Into<String>>(mut self, time_zone: V) -> Self {
        self.input.time_zone = InputField::Present(time_zone.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.input.disabled = InputField::Present(disabled);
        self
    }

    /// Passing `None` clears the holidays server-side: the field is
    /// transmitted as an empty collection, not omitted.
    pub fn holiday_ids<V: Into<Option<Vec<ID>>>>(mut self, holiday_ids: V) -> Self {
        self.input.holiday_ids = InputField::Present(holiday_ids.into().unwrap_or_default());
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

    /// Shape the returned payload with a response query.
    pub fn response(mut self, query: Query) -> Self {
        self.response = Some(query);
        self
    }

    /// Execute against a specific registered client instead of the default.
    pub fn client(mut self, handle: ClientHandle) -> Self {
        self.client = Some(handle);
        self
    }

    pub fn input(&self) -> &CalendarCreateInput {
        &self.input
    }

    pub async fn execute<T: Transport>(
        self,
        registry: &ClientRegistry<T>
    ) -> Result<Calendar, CommandError> {
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
pub struct CalendarUpdateInput {
    id: ID,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    name: InputField<String>,
    #[serde(rename = "timeZone", skip_serializing_if = "InputField::is_absent")]
    time_zone: InputField<String>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    disabled: InputField<bool>,
    #[serde(rename = "holidayIds", skip_serializing_if = "InputField::is_absent")]
    holiday_ids: InputField<Vec<ID>>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    source: InputField<String>,
    #[serde(rename = "sourceID", skip_serializing_if = "InputField::is_absent")]
    source_id: InputField<String>
}

impl MutationInput for CalendarUpdateInput {
    const FIELD: &'static str = "calendarUpdate";
}

/// Updates a calendar. Attributes that were never set are left untouched
/// server-side.
pub struct UpdateCalendar {
    input: CalendarUpdateInput,
    response: Option<Query>,
    client: Option<ClientHandle>
}

impl UpdateCalendar {
    const NAME: &'static str = "update-calendar";

    pub fn new<I: Into<ID>>(id: I) -> Self {
        UpdateCalendar {
            input: CalendarUpdateInput {
                id: id.into(),
                name: InputField::Absent,
                time_zone: InputField::Absent,
                disabled: InputField::Absent,
                holiday_ids: InputField::Absent,
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

    pub fn time_zone<V: Into<String>>(mut self, time_zone: V) -> Self {
        self.input.time_zone = InputField::Present(time_zone.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.input.disabled = InputField::Present(disabled);
        self
    }

    pub fn holiday_ids<V: Into<Option<Vec<ID>>>>(mut self, holiday_ids: V) -> Self {
        self.input.holiday_ids = InputField::Present(holiday_ids.into().unwrap_or_default());
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

    pub fn input(&self) -> &CalendarUpdateInput {
        &self.input
    }

    pub async fn execute<T: Transport>(
        self,
        registry: &ClientRegistry<T>
    ) -> Result<Calendar, CommandError> {
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
pub struct CalendarDeleteInput {
    id: ID
}

impl MutationInput for CalendarDeleteInput {
    const FIELD: &'static str = "calendarDelete";
}

/// Deletes a calendar.
pub struct DeleteCalendar {
    input: CalendarDeleteInput,
    client: Option<ClientHandle>
}

impl DeleteCalendar {
    const NAME: &'static str = "delete-calendar";

    pub fn new<I: Into<ID>>(id: I) -> Self {
        DeleteCalendar {
            input: CalendarDeleteInput { id: id.into() },
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
        let response = Query::new(Calendar::COLLECTION).select("success");
        client
            .mutation(&self.input, Some(&response))
            .await
            .map_err(|e| CommandError::new(Self::NAME, e))
    }
}

/// Builds a calendar query from bound parameters.
pub struct CalendarQuery {
    properties: Vec<CalendarField>,
    id: Option<ID>,
    view: Option<String>,
    order_by: Option<CalendarField>,
    sort_order: Option<SortOrder>,
    items_per_request: Option<u16>,
    holidays: Option<Query>,
    filters: Vec<QueryFilter<CalendarField>>,
    search: Option<String>,
    custom_filters: Vec<CustomFilter>
}

impl CalendarQuery {
    const NAME: &'static str = "calendar-query";

    pub fn new(properties: Vec<CalendarField>) -> Self {
        CalendarQuery {
            properties,
            id: None,
            view: None,
            order_by: None,
            sort_order: None,
            items_per_request: None,
            holidays: None,
            filters: Vec::new(),
            search: None,
            custom_filters: Vec::new()
        }
    }

    /// Restrict the query to a single calendar. Every other filter is
    /// ignored when an id is set.
    pub fn id<I: Into<ID>>(mut self, id: I) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn view<V: Into<String>>(mut self, view: V) -> Self {
        self.view = Some(view.into());
        self
    }

    pub fn order_by(mut self, field: CalendarField) -> Self {
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

    /// Nest a sub-selection for the calendar's holidays.
    pub fn holidays(mut self, query: Query) -> Self {
        self.holidays = Some(query);
        self
    }

    pub fn filters(mut self, filters: Vec<QueryFilter<CalendarField>>) -> Self {
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
            Calendar::COLLECTION,
            self.properties,
            EntityQueryOptions {
                id: self.id,
                view: self.view,
                order_by: self.order_by.map(|f| f.as_str()),
                sort_order: self.sort_order,
                items_per_request: self.items_per_request,
                nested: self
                    .holidays
                    .map(|q| vec![("holidays", q)])
                    .unwrap_or_default(),
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
    use super::{CalendarField, CalendarFilter, CalendarQuery, CreateCalendar, UpdateCalendar};
    use xurrent_graphql::{FilterOperator, SortOrder};

    #[test]
    fn unbound_attributes_stay_out_of_the_input() {
        let command = CreateCalendar::new("Business Hours");
        let json = serde_json::to_value(command.input()).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "Business Hours" }));
    }

    #[test]
    fn bound_attributes_are_transmitted() {
        let command = CreateCalendar::new("Business Hours")
            .time_zone("Europe/Amsterdam")
            .disabled(false);
        let json = serde_json::to_value(command.input()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Business Hours",
                "timeZone": "Europe/Amsterdam",
                "disabled": false
            })
        );
    }

    #[test]
    fn a_cleared_collection_is_transmitted_empty() {
        let command = UpdateCalendar::new("cal-1").holiday_ids(None);
        let json = serde_json::to_value(command.input()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "id": "cal-1", "holidayIds": [] })
        );
    }

    #[test]
    fn update_always_carries_the_id() {
        let command = UpdateCalendar::new("cal-1");
        let json = serde_json::to_value(command.input()).unwrap();
        assert_eq!(json, serde_json::json!({ "id": "cal-1" }));
    }

    #[test]
    fn query_requires_a_selection() {
        let error = CalendarQuery::new(Vec::new()).build().unwrap_err();
        assert_eq!(error.command(), "calendar-query");
    }

    #[test]
    fn query_rejects_out_of_range_page_sizes() {
        let error = CalendarQuery::new(vec![CalendarField::Id])
            .items_per_request(150)
            .build()
            .unwrap_err();
        assert!(error.to_string().contains("itemsPerRequest"));
    }

    #[test]
    fn order_by_defaults_to_ascending() {
        let query = CalendarQuery::new(vec![CalendarField::Id])
            .order_by(CalendarField::Name)
            .build()
            .unwrap();
        assert_eq!(query.ordering(), Some(("name", SortOrder::Ascending)));
    }

    #[test]
    fn an_id_short_circuits_other_filters() {
        let condition =
            CalendarFilter::new(CalendarField::Disabled, FilterOperator::Equals)
                .boolean(true)
                .build();
        let query = CalendarQuery::new(vec![CalendarField::Id])
            .id("cal-1")
            .filters(vec![condition])
            .search("business")
            .build()
            .unwrap();
        assert!(query.filters().is_empty());
        assert_eq!(query.search_text(), None);
    }
}
