//! Presence-tracked mutation input fields.
//!
//! The API applies partial-update semantics: an attribute that is missing
//! from the input object is left untouched, which is not the same as sending
//! its default value. [`InputField`](./enum.InputField.html) keeps that
//! distinction in the type instead of leaving it to caller discipline.

use serde::{Serialize, Serializer};

/// A mutation input field that knows whether it was ever set.
///
/// `Absent` fields must be skipped during serialization so they never appear
/// in the transmitted payload:
///
/// ```ignore
/// #[derive(Serialize, Default)]
/// pub struct TeamCreateInput {
///     #[serde(skip_serializing_if = "InputField::is_absent")]
///     pub name: InputField<String>
/// }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum InputField<T> {
    /// The field was never set and stays out of the payload.
    Absent,
    /// The field was explicitly set to this value.
    Present(T)
}

impl<T> InputField<T> {
    /// `true` if the field was never set. Used as a
    /// `skip_serializing_if` predicate.
    pub fn is_absent(&self) -> bool {
        matches!(self, InputField::Absent)
    }

    /// `true` if the field was explicitly set.
    pub fn is_present(&self) -> bool {
        !self.is_absent()
    }

    /// The set value, if there is one.
    pub fn get(&self) -> Option<&T> {
        match self {
            InputField::Present(value) => Some(value),
            InputField::Absent => None
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            InputField::Present(value) => Some(value),
            InputField::Absent => None
        }
    }
}

impl<T> Default for InputField<T> {
    fn default() -> Self {
        InputField::Absent
    }
}

impl<T> From<T> for InputField<T> {
    fn from(value: T) -> Self {
        InputField::Present(value)
    }
}

impl<T: Serialize> Serialize for InputField<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            InputField::Present(value) => value.serialize(serializer),
            // Only reachable when a field forgets its skip attribute.
            InputField::Absent => serializer.serialize_none()
        }
    }
}

/// A typed input object for one mutation.
///
/// Implementors are plain serializable structs whose fields are wrapped in
/// [`InputField`](./enum.InputField.html). The associated constant names the
/// mutation field the input is sent to.
pub trait MutationInput: Serialize + Send + Sync {
    /// The mutation field this input belongs to, e.g. `teamCreate`.
    const FIELD: &'static str;
}

#[cfg(test)]
mod test {
    use super::InputField;

    #[derive(Serialize, Default)]
    struct SampleInput {
        #[serde(skip_serializing_if = "InputField::is_absent")]
        name: InputField<String>,
        #[serde(skip_serializing_if = "InputField::is_absent")]
        disabled: InputField<bool>,
        #[serde(rename = "memberIds", skip_serializing_if = "InputField::is_absent")]
        member_ids: InputField<Vec<String>>
    }

    #[test]
    fn absent_fields_stay_out_of_the_payload() {
        let input = SampleInput {
            name: InputField::Present("Service Desk".to_string()),
            ..SampleInput::default()
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "Service Desk" }));
    }

    #[test]
    fn present_false_is_not_absent() {
        let input = SampleInput {
            disabled: InputField::Present(false),
            ..SampleInput::default()
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json, serde_json::json!({ "disabled": false }));
    }

    #[test]
    fn present_empty_collection_serializes_as_empty() {
        let input = SampleInput {
            member_ids: InputField::Present(Vec::new()),
            ..SampleInput::default()
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json, serde_json::json!({ "memberIds": [] }));
    }

    #[test]
    fn default_is_absent() {
        assert!(InputField::<String>::default().is_absent());
        assert_eq!(InputField::from(3).get(), Some(&3));
    }
}
