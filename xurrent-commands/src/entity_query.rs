//! The shared build pass behind every entity query command.

use crate::error::CommandError;
use xurrent_graphql::{ClientError, CustomFilter, Query, QueryField, QueryFilter, SortOrder, ID};

/// Everything an entity query command can bind besides its field selection.
pub(crate) struct EntityQueryOptions<F: QueryField> {
    pub(crate) id: Option<ID>,
    pub(crate) view: Option<String>,
    pub(crate) order_by: Option<&'static str>,
    pub(crate) sort_order: Option<SortOrder>,
    pub(crate) items_per_request: Option<u16>,
    pub(crate) nested: Vec<(&'static str, Query)>,
    pub(crate) casts: Vec<(&'static str, &'static str, Query)>,
    pub(crate) filters: Vec<QueryFilter<F>>,
    pub(crate) search: Option<String>,
    pub(crate) custom_filters: Vec<CustomFilter>
}

impl<F: QueryField> Default for EntityQueryOptions<F> {
    fn default() -> Self {
        EntityQueryOptions {
            id: None,
            view: None,
            order_by: None,
            sort_order: None,
            items_per_request: None,
            nested: Vec::new(),
            casts: Vec::new(),
            filters: Vec::new(),
            search: None,
            custom_filters: Vec::new()
        }
    }
}

/// Apply the configured options in a fixed order, then the mandatory field
/// selection last. Fails before any query exists when the selection is empty
/// or the page size is out of range.
pub(crate) fn build_entity_query<F: QueryField>(
    command: &'static str,
    collection: &'static str,
    properties: Vec<F>,
    options: EntityQueryOptions<F>
) -> Result<Query, CommandError> {
    if properties.is_empty() {
        return Err(CommandError::new(
            command,
            ClientError::InvalidRequest("properties must not be empty".to_string())
        ));
    }

    let mut query = Query::new(collection);
    if let Some(items) = options.items_per_request {
        query = query
            .items_per_request(items)
            .map_err(|e| CommandError::new(command, e))?;
    }
    if let Some(view) = options.view {
        query = query.view(view);
    }
    if let Some(field) = options.order_by {
        query = query.order_by(field, options.sort_order.unwrap_or_default());
    }
    for (field, nested) in options.nested {
        query = query.select_related(field, nested);
    }
    for (field, type_name, nested) in options.casts {
        query = query.select_related_on(field, type_name, nested);
    }
    match options.id {
        // An id filter short-circuits every other condition.
        Some(id) => query = query.filter_by_id(id),
        None => {
            for filter in &options.filters {
                query = query.apply_filter(filter);
            }
            if let Some(search) = options.search {
                query = query.search(search);
            }
            for filter in &options.custom_filters {
                query = query.apply_custom_filter(filter);
            }
        }
    }
    // Field selection comes last.
    for property in &properties {
        query = query.select(property.as_str());
    }
    Ok(query)
}
