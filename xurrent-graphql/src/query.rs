//! The mutable builder behind every read/list request.

use crate::{
    filter::{CustomFilter, FilterOperator, FilterValues, QueryFilter},
    ClientError, ID
};

/// A typed entity field, usable in selections, ordering and filters.
///
/// Implemented by the per-entity field enums in the command layer.
pub trait QueryField: Copy + Send + Sync + 'static {
    /// The field's name as it appears in rendered documents.
    fn as_str(&self) -> &'static str;
}

/// Sort direction for an ordered query. Ascending unless set otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Ascending
    }
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc"
        }
    }
}

/// A filter condition as recorded on a query, with the property name already
/// resolved to its document token.
#[derive(Clone, Debug, PartialEq)]
pub struct AppliedFilter {
    pub property: &'static str,
    pub operator: FilterOperator,
    pub values: FilterValues
}

/// A sub-selection for a related entity. `on_type` is set for the cast
/// variants of a polymorphic relation and renders as an inline fragment.
#[derive(Clone, Debug, PartialEq)]
pub struct NestedSelection {
    pub field: &'static str,
    pub on_type: Option<&'static str>,
    pub query: Query
}

/// A read/list request under construction.
///
/// Holds the selected output fields, an optional identifier filter, view,
/// ordering, page size, nested sub-selections, filter conditions, free-text
/// search and custom-field conditions. Building one is cheap and purely
/// local; execution happens through a
/// [`Client`](./client/struct.Client.html).
#[derive(Clone, Debug, PartialEq)]
pub struct Query {
    collection: &'static str,
    fields: Vec<&'static str>,
    id: Option<ID>,
    view: Option<String>,
    order_by: Option<(&'static str, SortOrder)>,
    items_per_request: Option<u16>,
    nested: Vec<NestedSelection>,
    filters: Vec<AppliedFilter>,
    search: Option<String>,
    custom_filters: Vec<CustomFilter>
}

impl Query {
    /// Start a query against the named collection, e.g. `teams`.
    pub fn new(collection: &'static str) -> Self {
        Query {
            collection,
            fields: Vec::new(),
            id: None,
            view: None,
            order_by: None,
            items_per_request: None,
            nested: Vec::new(),
            filters: Vec::new(),
            search: None,
            custom_filters: Vec::new()
        }
    }

    pub fn collection(&self) -> &'static str {
        self.collection
    }

    /// Add a field to the output selection.
    pub fn select(mut self, field: &'static str) -> Self {
        if !self.fields.contains(&field) {
            self.fields.push(field);
        }
        self
    }

    /// Restrict the query to a single record.
    pub fn filter_by_id<I: Into<ID>>(mut self, id: I) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Use a named server-side view as the base selection of records.
    pub fn view<V: Into<String>>(mut self, view: V) -> Self {
        self.view = Some(view.into());
        self
    }

    /// Order the result by a field.
    pub fn order_by(mut self, field: &'static str, order: SortOrder) -> Self {
        self.order_by = Some((field, order));
        self
    }

    /// Bound the number of records returned per request. The API accepts
    /// 1 through 100.
    pub fn items_per_request(mut self, items: u16) -> Result<Self, ClientError> {
        if items < 1 || items > 100 {
            return Err(ClientError::InvalidRequest(format!(
                "itemsPerRequest must be between 1 and 100, got {}",
                items
            )));
        }
        self.items_per_request = Some(items);
        Ok(self)
    }

    /// Nest a sub-selection for a related entity.
    pub fn select_related(mut self, field: &'static str, query: Query) -> Self {
        self.nested.push(NestedSelection {
            field,
            on_type: None,
            query
        });
        self
    }

    /// Nest a cast sub-selection for one concrete type of a polymorphic
    /// relation. Several casts may share the same relation field; they render
    /// as inline fragments inside that one slot.
    pub fn select_related_on(
        mut self,
        field: &'static str,
        type_name: &'static str,
        query: Query
    ) -> Self {
        self.nested.push(NestedSelection {
            field,
            on_type: Some(type_name),
            query
        });
        self
    }

    /// Record an operator-only filter condition, e.g. "manager is empty".
    pub fn filter_operator(mut self, property: &'static str, operator: FilterOperator) -> Self {
        self.filters.push(AppliedFilter {
            property,
            operator,
            values: FilterValues::None
        });
        self
    }

    pub fn filter_boolean(
        mut self,
        property: &'static str,
        operator: FilterOperator,
        value: bool
    ) -> Self {
        self.filters.push(AppliedFilter {
            property,
            operator,
            values: FilterValues::Boolean(value)
        });
        self
    }

    pub fn filter_date_times(
        mut self,
        property: &'static str,
        operator: FilterOperator,
        values: Vec<chrono::DateTime<chrono::Utc>>
    ) -> Self {
        self.filters.push(AppliedFilter {
            property,
            operator,
            values: FilterValues::DateTimes(values)
        });
        self
    }

    pub fn filter_integers(
        mut self,
        property: &'static str,
        operator: FilterOperator,
        values: Vec<i64>
    ) -> Self {
        self.filters.push(AppliedFilter {
            property,
            operator,
            values: FilterValues::Integers(values)
        });
        self
    }

    pub fn filter_texts(
        mut self,
        property: &'static str,
        operator: FilterOperator,
        values: Vec<String>
    ) -> Self {
        self.filters.push(AppliedFilter {
            property,
            operator,
            values: FilterValues::Texts(values)
        });
        self
    }

    /// Apply a typed filter condition, dispatching on the populated value
    /// kind: boolean, then date-times, then integers, then texts, then
    /// operator-only.
    pub fn apply_filter<F: QueryField>(self, filter: &QueryFilter<F>) -> Self {
        let property = filter.property.as_str();
        match &filter.values {
            FilterValues::Boolean(value) => self.filter_boolean(property, filter.operator, *value),
            FilterValues::DateTimes(values) => {
                self.filter_date_times(property, filter.operator, values.clone())
            }
            FilterValues::Integers(values) => {
                self.filter_integers(property, filter.operator, values.clone())
            }
            FilterValues::Texts(values) => {
                self.filter_texts(property, filter.operator, values.clone())
            }
            FilterValues::None => self.filter_operator(property, filter.operator)
        }
    }

    /// Filter by a free-text search term.
    pub fn search<S: Into<String>>(mut self, text: S) -> Self {
        self.search = Some(text.into());
        self
    }

    /// Apply a custom-field filter condition: text values if the condition
    /// carries any, operator-only otherwise.
    pub fn apply_custom_filter(mut self, filter: &CustomFilter) -> Self {
        self.custom_filters.push(filter.clone());
        self
    }

    /// The fields selected so far, in selection order.
    pub fn selected_fields(&self) -> &[&'static str] {
        &self.fields
    }

    pub fn selects_nothing(&self) -> bool {
        self.fields.is_empty() && self.nested.is_empty()
    }

    pub fn id(&self) -> Option<&ID> {
        self.id.as_ref()
    }

    pub fn view_name(&self) -> Option<&str> {
        self.view.as_deref()
    }

    pub fn ordering(&self) -> Option<(&'static str, SortOrder)> {
        self.order_by
    }

    pub fn items(&self) -> Option<u16> {
        self.items_per_request
    }

    pub fn nested(&self) -> &[NestedSelection] {
        &self.nested
    }

    pub fn filters(&self) -> &[AppliedFilter] {
        &self.filters
    }

    pub fn search_text(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn custom_filters(&self) -> &[CustomFilter] {
        &self.custom_filters
    }
}

#[cfg(test)]
mod test {
    use super::{Query, QueryField, SortOrder};
    use crate::filter::{FilterOperator, FilterValues, QueryFilter};
    use chrono::{TimeZone, Utc};

    #[derive(Clone, Copy, Debug, PartialEq)]
    enum SampleField {
        Name,
        Disabled
    }

    impl QueryField for SampleField {
        fn as_str(&self) -> &'static str {
            match self {
                SampleField::Name => "name",
                SampleField::Disabled => "disabled"
            }
        }
    }

    #[test]
    fn items_per_request_is_bounded() {
        assert!(Query::new("teams").items_per_request(1).is_ok());
        assert!(Query::new("teams").items_per_request(100).is_ok());
        assert!(Query::new("teams").items_per_request(0).is_err());
        assert!(Query::new("teams").items_per_request(101).is_err());
    }

    #[test]
    fn sort_order_defaults_to_ascending() {
        assert_eq!(SortOrder::default(), SortOrder::Ascending);
    }

    #[test]
    fn selection_deduplicates() {
        let query = Query::new("teams").select("name").select("name");
        assert_eq!(query.selected_fields(), &["name"]);
    }

    #[test]
    fn apply_filter_dispatches_booleans() {
        let filter = QueryFilter {
            property: SampleField::Disabled,
            operator: FilterOperator::Equals,
            values: FilterValues::Boolean(true)
        };
        let query = Query::new("teams").apply_filter(&filter);
        let applied = &query.filters()[0];
        assert_eq!(applied.property, "disabled");
        assert_eq!(applied.values, FilterValues::Boolean(true));
    }

    #[test]
    fn apply_filter_dispatches_date_times() {
        let when = Utc.ymd(2020, 4, 1).and_hms(12, 0, 0);
        let filter = QueryFilter {
            property: SampleField::Name,
            operator: FilterOperator::GreaterThan,
            values: FilterValues::DateTimes(vec![when])
        };
        let query = Query::new("teams").apply_filter(&filter);
        assert_eq!(query.filters()[0].values, FilterValues::DateTimes(vec![when]));
    }

    #[test]
    fn apply_filter_dispatches_operator_only() {
        let filter = QueryFilter::new(SampleField::Name, FilterOperator::Empty);
        let query = Query::new("teams").apply_filter(&filter);
        assert_eq!(query.filters()[0].values, FilterValues::None);
        assert_eq!(query.filters()[0].operator, FilterOperator::Empty);
    }
}
