//! Deterministic rendering of the request model into GraphQL documents.
//!
//! Arguments render in a fixed order (id, first, view, order, search,
//! filter, customFilter) so that documents are stable and assertable.

use crate::{
    filter::{CustomFilter, FilterValues},
    input::MutationInput,
    query::{NestedSelection, Query},
    ClientError
};
use chrono::SecondsFormat;
use serde_json::Value;

pub(crate) fn query_document(query: &Query) -> String {
    let mut out = String::from("query { ");
    collection_selection(query, &mut out);
    out.push_str(" }");
    out
}

pub(crate) fn mutation_document<I: MutationInput>(
    input: &I,
    response: Option<&Query>
) -> Result<String, ClientError> {
    let input = serde_json::to_value(input)
        .map_err(|e| ClientError::InvalidRequest(format!("could not serialize input: {}", e)))?;
    let mut out = String::from("mutation { ");
    out.push_str(I::FIELD);
    out.push_str("(input: ");
    literal(&input, &mut out);
    out.push_str(") { ");
    match response {
        Some(query) => fields_and_nested(query, &mut out),
        // A mutation without a response-shaping query only echoes the id.
        None => out.push_str("id")
    }
    out.push_str(" } }");
    Ok(out)
}

fn collection_selection(query: &Query, out: &mut String) {
    out.push_str(query.collection());
    arguments(query, out);
    out.push_str(" { nodes { ");
    fields_and_nested(query, out);
    out.push_str(" } }");
}

fn arguments(query: &Query, out: &mut String) {
    let mut args = Vec::new();

    if let Some(id) = query.id() {
        args.push(format!("id: {}", quoted(id)));
    }
    if let Some(items) = query.items() {
        args.push(format!("first: {}", items));
    }
    if let Some(view) = query.view_name() {
        args.push(format!("view: {}", view));
    }
    if let Some((field, order)) = query.ordering() {
        args.push(format!(
            "order: {{field: {}, direction: {}}}",
            field,
            order.as_str()
        ));
    }
    if let Some(search) = query.search_text() {
        args.push(format!("search: {}", quoted(search)));
    }
    if !query.filters().is_empty() {
        let conditions: Vec<String> = query.filters().iter().map(filter_condition).collect();
        args.push(format!("filter: [{}]", conditions.join(", ")));
    }
    if !query.custom_filters().is_empty() {
        let conditions: Vec<String> = query
            .custom_filters()
            .iter()
            .map(custom_filter_condition)
            .collect();
        args.push(format!("customFilter: [{}]", conditions.join(", ")));
    }

    if !args.is_empty() {
        out.push('(');
        out.push_str(&args.join(", "));
        out.push(')');
    }
}

fn filter_condition(filter: &crate::query::AppliedFilter) -> String {
    let mut condition = format!("{{name: {}, operator: {}", filter.property, filter.operator.as_str());
    match &filter.values {
        FilterValues::None => {}
        FilterValues::Boolean(value) => condition.push_str(&format!(", boolean: {}", value)),
        FilterValues::DateTimes(values) => {
            let values: Vec<String> = values
                .iter()
                .map(|v| quoted(&v.to_rfc3339_opts(SecondsFormat::Secs, true)))
                .collect();
            condition.push_str(&format!(", dateTimeValues: [{}]", values.join(", ")));
        }
        FilterValues::Integers(values) => {
            let values: Vec<String> = values.iter().map(|v| v.to_string()).collect();
            condition.push_str(&format!(", integerValues: [{}]", values.join(", ")));
        }
        FilterValues::Texts(values) => {
            let values: Vec<String> = values.iter().map(|v| quoted(v)).collect();
            condition.push_str(&format!(", textValues: [{}]", values.join(", ")));
        }
    }
    condition.push('}');
    condition
}

fn custom_filter_condition(filter: &CustomFilter) -> String {
    let mut condition = format!(
        "{{name: {}, operator: {}",
        quoted(&filter.name),
        filter.operator.as_str()
    );
    if let Some(values) = &filter.values {
        let values: Vec<String> = values.iter().map(|v| quoted(v)).collect();
        condition.push_str(&format!(", textValues: [{}]", values.join(", ")));
    }
    condition.push('}');
    condition
}

fn fields_and_nested(query: &Query, out: &mut String) {
    let mut parts: Vec<String> = query.selected_fields().iter().map(|f| f.to_string()).collect();

    // Casts of the same polymorphic relation share one field slot.
    let mut slots: Vec<(&'static str, Vec<&NestedSelection>)> = Vec::new();
    for nested in query.nested() {
        match slots.iter_mut().find(|(field, _)| *field == nested.field) {
            Some((_, group)) => group.push(nested),
            None => slots.push((nested.field, vec![nested]))
        }
    }

    for (field, group) in slots {
        let mut part = String::from(field);
        arguments_of_group(&group, &mut part);
        part.push_str(" { ");
        let mut inner = Vec::new();
        for nested in group {
            let mut rendered = String::new();
            fields_and_nested(&nested.query, &mut rendered);
            match nested.on_type {
                Some(type_name) => inner.push(format!("... on {} {{ {} }}", type_name, rendered)),
                None => inner.push(rendered)
            }
        }
        part.push_str(&inner.join(" "));
        part.push_str(" }");
        parts.push(part);
    }

    out.push_str(&parts.join(" "));
}

fn arguments_of_group(group: &[&NestedSelection], out: &mut String) {
    // Arguments only make sense once per slot; the first entry wins.
    if let Some(first) = group.first() {
        arguments(&first.query, out);
    }
}

fn quoted(text: &str) -> String {
    // serde_json's string encoder already handles escaping.
    Value::String(text.to_string()).to_string()
}

fn literal(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(_) => out.push_str(&value.to_string()),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                literal(item, out);
            }
            out.push(']');
        }
        Value::Object(entries) => {
            out.push('{');
            for (i, (key, item)) in entries.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(key);
                out.push_str(": ");
                literal(item, out);
            }
            out.push('}');
        }
    }
}

#[cfg(test)]
mod test {
    use super::{mutation_document, query_document};
    use crate::{
        filter::FilterOperator,
        input::{InputField, MutationInput},
        query::{Query, SortOrder}
    };

    #[derive(Serialize, Default)]
    struct TeamCreateInput {
        #[serde(skip_serializing_if = "InputField::is_absent")]
        name: InputField<String>,
        #[serde(rename = "memberIds", skip_serializing_if = "InputField::is_absent")]
        member_ids: InputField<Vec<String>>
    }

    impl MutationInput for TeamCreateInput {
        const FIELD: &'static str = "teamCreate";
    }

    #[test]
    fn renders_a_plain_query() {
        let query = Query::new("teams").select("id").select("name");
        assert_eq!(
            query_document(&query),
            "query { teams { nodes { id name } } }"
        );
    }

    #[test]
    fn renders_arguments_in_fixed_order() {
        let query = Query::new("teams")
            .items_per_request(50)
            .unwrap()
            .view("all")
            .order_by("name", SortOrder::Descending)
            .select("id");
        assert_eq!(
            query_document(&query),
            "query { teams(first: 50, view: all, order: {field: name, direction: desc}) \
             { nodes { id } } }"
        );
    }

    #[test]
    fn renders_filters_and_search() {
        let query = Query::new("teams")
            .filter_boolean("disabled", FilterOperator::Equals, false)
            .filter_texts(
                "name",
                FilterOperator::In,
                vec!["Ops".to_string(), "Dev".to_string()]
            )
            .search("network")
            .select("id");
        assert_eq!(
            query_document(&query),
            "query { teams(search: \"network\", filter: [{name: disabled, operator: EQUALS, \
             boolean: false}, {name: name, operator: IN, textValues: [\"Ops\", \"Dev\"]}]) \
             { nodes { id } } }"
        );
    }

    #[test]
    fn renders_nested_selections() {
        let members = Query::new("people").select("name");
        let query = Query::new("teams")
            .select("id")
            .select_related("members", members);
        assert_eq!(
            query_document(&query),
            "query { teams { nodes { id members { name } } } }"
        );
    }

    #[test]
    fn renders_polymorphic_casts_in_one_slot() {
        let requests = Query::new("requests").select("subject");
        let problems = Query::new("problems").select("subject");
        let query = Query::new("trash")
            .select("id")
            .select_related_on("trashed", "Request", requests)
            .select_related_on("trashed", "Problem", problems);
        assert_eq!(
            query_document(&query),
            "query { trash { nodes { id trashed { ... on Request { subject } \
             ... on Problem { subject } } } } }"
        );
    }

    #[test]
    fn renders_a_mutation_with_default_selection() {
        let input = TeamCreateInput {
            name: InputField::Present("Ops".to_string()),
            ..TeamCreateInput::default()
        };
        assert_eq!(
            mutation_document(&input, None).unwrap(),
            "mutation { teamCreate(input: {name: \"Ops\"}) { id } }"
        );
    }

    #[test]
    fn renders_a_mutation_with_response_query() {
        let input = TeamCreateInput {
            name: InputField::Present("Ops".to_string()),
            member_ids: InputField::Present(Vec::new())
        };
        let response = Query::new("teams").select("id").select("name");
        assert_eq!(
            mutation_document(&input, Some(&response)).unwrap(),
            "mutation { teamCreate(input: {name: \"Ops\", memberIds: []}) { id name } }"
        );
    }
}
