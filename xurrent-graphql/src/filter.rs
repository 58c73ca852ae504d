//! Filter conditions for list queries.

use crate::query::QueryField;
use chrono::{DateTime, Utc};

/// Comparison operators understood by the API's filter argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterOperator {
    Equals,
    NotEquals,
    In,
    NotIn,
    LessThan,
    LessThanOrEquals,
    GreaterThan,
    GreaterThanOrEquals,
    /// The attribute has no value.
    Empty,
    /// The attribute has a value.
    Present
}

impl FilterOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Equals => "EQUALS",
            FilterOperator::NotEquals => "NOT_EQUALS",
            FilterOperator::In => "IN",
            FilterOperator::NotIn => "NOT_IN",
            FilterOperator::LessThan => "LESS_THAN",
            FilterOperator::LessThanOrEquals => "LESS_THAN_OR_EQUALS",
            FilterOperator::GreaterThan => "GREATER_THAN",
            FilterOperator::GreaterThanOrEquals => "GREATER_THAN_OR_EQUALS",
            FilterOperator::Empty => "EMPTY",
            FilterOperator::Present => "PRESENT"
        }
    }
}

/// The value carried by one filter condition.
///
/// A condition holds exactly one of these by construction. Operators like
/// `Empty` and `Present` take no value at all, which is the `None` variant.
#[derive(Clone, Debug, PartialEq)]
pub enum FilterValues {
    /// Operator-only condition, e.g. "is empty".
    None,
    Boolean(bool),
    DateTimes(Vec<DateTime<Utc>>),
    Integers(Vec<i64>),
    Texts(Vec<String>)
}

/// One filter condition against a typed entity field.
///
/// Produced by the per-entity filter builders and consumed by the query
/// commands, which dispatch on the populated value kind.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryFilter<F: QueryField> {
    pub property: F,
    pub operator: FilterOperator,
    pub values: FilterValues
}

impl<F: QueryField> QueryFilter<F> {
    /// An operator-only condition. Use the builder in the command layer to
    /// attach values.
    pub fn new(property: F, operator: FilterOperator) -> Self {
        QueryFilter {
            property,
            operator,
            values: FilterValues::None
        }
    }
}

/// A filter condition against a custom field, addressed by name rather than
/// by a typed property. Carries either text values or nothing.
#[derive(Clone, Debug, PartialEq)]
pub struct CustomFilter {
    pub name: String,
    pub operator: FilterOperator,
    pub values: Option<Vec<String>>
}

impl CustomFilter {
    pub fn new<N: Into<String>>(name: N, operator: FilterOperator) -> Self {
        CustomFilter {
            name: name.into(),
            operator,
            values: None
        }
    }

    pub fn with_values(mut self, values: Vec<String>) -> Self {
        self.values = Some(values);
        self
    }
}
