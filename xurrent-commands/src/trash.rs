//! Commands for the Trash collection.
//!
//! Trash holds recently deleted records of several types. The `trashed`
//! relation is polymorphic: the caller nests one sub-selection per concrete
//! type it cares about, and all of them share the single relation slot.

use crate::{
    entity_query::{build_entity_query, EntityQueryOptions},
    error::CommandError,
    filter::FilterBuilder,
    invoke::{InvokeQuery, Queryable}
};
use xurrent_graphql::{CustomFilter, Query, QueryField, QueryFilter, SortOrder, ID};

/// A trash entry as returned by the API. The trashed record itself is
/// polymorphic and kept as raw JSON shaped by the nested cast selections.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Trash {
    pub id: ID,
    #[serde(rename = "trashedAt")]
    pub trashed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub trashed: Option<serde_json::Value>
}

impl Queryable for Trash {
    const COLLECTION: &'static str = "trash";
    type Field = TrashField;
}

/// The selectable, orderable and filterable fields of a trash entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrashField {
    Id,
    TrashedAt
}

impl QueryField for TrashField {
    fn as_str(&self) -> &'static str {
        match self {
            TrashField::Id => "id",
            TrashField::TrashedAt => "trashedAt"
        }
    }
}

/// Builds filter conditions for trash queries.
pub type TrashFilter = FilterBuilder<TrashField>;
/// Executes a built trash query.
pub type InvokeTrashQuery = InvokeQuery<Trash>;

/// One cast of the polymorphic `trashed` relation: the concrete record type
/// and the sub-selection to apply to records of that type.
#[derive(Clone, Debug, PartialEq)]
pub enum TrashedQuery {
    Person(Query),
    Problem(Query),
    Request(Query),
    Risk(Query)
}

impl TrashedQuery {
    fn into_cast(self) -> (&'static str, Query) {
        match self {
            TrashedQuery::Person(query) => ("Person", query),
            TrashedQuery::Problem(query) => ("Problem", query),
            TrashedQuery::Request(query) => ("Request", query),
            TrashedQuery::Risk(query) => ("Risk", query)
        }
    }
}

/// Builds a trash query from bound parameters.
pub struct TrashQuery {
    properties: Vec<TrashField>,
    id: Option<ID>,
    view: Option<String>,
    order_by: Option<TrashField>,
    sort_order: Option<SortOrder>,
    items_per_request: Option<u16>,
    trashed: Vec<TrashedQuery>,
    filters: Vec<QueryFilter<TrashField>>,
    search: Option<String>,
    custom_filters: Vec<CustomFilter>
}

impl TrashQuery {
    const NAME: &'static str = "trash-query";

    pub fn new(properties: Vec<TrashField>) -> Self {
        TrashQuery {
            properties,
            id: None,
            view: None,
            order_by: None,
            sort_order: None,
            items_per_request: None,
            trashed: Vec::new(),
            filters: Vec::new(),
            search: None,
            custom_filters: Vec::new()
        }
    }

    /// Restrict the query to a single trash entry. Every other filter is
    /// ignored when an id is set.
    pub fn id<I: Into<ID>>(mut self, id: I) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn view<V: Into<String>>(mut self, view: V) -> Self {
        self.view = Some(view.into());
        self
    }

    pub fn order_by(mut self, field: TrashField) -> Self {
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

    /// Nest a cast sub-selection into the shared `trashed` relation slot.
    /// May be called once per concrete type.
    pub fn trashed(mut self, cast: TrashedQuery) -> Self {
        self.trashed.push(cast);
        self
    }

    pub fn filters(mut self, filters: Vec<QueryFilter<TrashField>>) -> Self {
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
        let casts = self
            .trashed
            .into_iter()
            .map(|cast| {
                let (type_name, query) = cast.into_cast();
                ("trashed", type_name, query)
            })
            .collect();

        build_entity_query(
            Self::NAME,
            Trash::COLLECTION,
            self.properties,
            EntityQueryOptions {
                id: self.id,
                view: self.view,
                order_by: self.order_by.map(|f| f.as_str()),
                sort_order: self.sort_order,
                items_per_request: self.items_per_request,
                casts,
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
    use super::{TrashField, TrashQuery, TrashedQuery};
    use xurrent_graphql::Query;

    #[test]
    fn casts_share_the_trashed_slot() {
        let query = TrashQuery::new(vec![TrashField::Id, TrashField::TrashedAt])
            .trashed(TrashedQuery::Request(
                Query::new("requests").select("subject")
            ))
            .trashed(TrashedQuery::Person(Query::new("people").select("name")))
            .build()
            .unwrap();

        let nested = query.nested();
        assert_eq!(nested.len(), 2);
        assert!(nested.iter().all(|n| n.field == "trashed"));
        assert_eq!(nested[0].on_type, Some("Request"));
        assert_eq!(nested[1].on_type, Some("Person"));
    }
}
