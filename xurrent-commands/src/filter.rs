//! The generic base behind every per-entity filter builder.

use chrono::{DateTime, Utc};
use xurrent_graphql::{FilterOperator, FilterValues, QueryField, QueryFilter};

/// Builds one filter condition against a typed entity field.
///
/// The produced condition carries exactly one value kind; setting a second
/// kind replaces the first. Entities expose this as a type alias, e.g.
/// `TeamFilter`:
///
/// ```ignore
/// let condition = TeamFilter::new(TeamField::Disabled, FilterOperator::Equals)
///     .boolean(false)
///     .build();
/// ```
pub struct FilterBuilder<F: QueryField> {
    property: F,
    operator: FilterOperator,
    values: FilterValues
}

impl<F: QueryField> FilterBuilder<F> {
    /// Start a condition. Without a value setter this builds the
    /// operator-only form, e.g. "is empty".
    pub fn new(property: F, operator: FilterOperator) -> Self {
        FilterBuilder {
            property,
            operator,
            values: FilterValues::None
        }
    }

    pub fn boolean(mut self, value: bool) -> Self {
        self.values = FilterValues::Boolean(value);
        self
    }

    pub fn date_times(mut self, values: Vec<DateTime<Utc>>) -> Self {
        self.values = FilterValues::DateTimes(values);
        self
    }

    pub fn integers(mut self, values: Vec<i64>) -> Self {
        self.values = FilterValues::Integers(values);
        self
    }

    pub fn texts(mut self, values: Vec<String>) -> Self {
        self.values = FilterValues::Texts(values);
        self
    }

    pub fn build(self) -> QueryFilter<F> {
        QueryFilter {
            property: self.property,
            operator: self.operator,
            values: self.values
        }
    }
}

#[cfg(test)]
mod test {
    use super::FilterBuilder;
    use xurrent_graphql::{FilterOperator, FilterValues, QueryField};

    #[derive(Clone, Copy, Debug, PartialEq)]
    enum SampleField {
        Disabled
    }

    impl QueryField for SampleField {
        fn as_str(&self) -> &'static str {
            "disabled"
        }
    }

    #[test]
    fn builds_operator_only_conditions() {
        let condition = FilterBuilder::new(SampleField::Disabled, FilterOperator::Empty).build();
        assert_eq!(condition.values, FilterValues::None);
    }

    #[test]
    fn a_condition_carries_exactly_one_value_kind() {
        let condition = FilterBuilder::new(SampleField::Disabled, FilterOperator::Equals)
            .integers(vec![1, 2])
            .boolean(true)
            .build();
        // The last setter wins; there is no way to carry both.
        assert_eq!(condition.values, FilterValues::Boolean(true));
    }
}
