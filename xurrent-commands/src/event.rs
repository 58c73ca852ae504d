//! The event-creation command.
//!
//! Event creation is a single polymorphic operation: the target records can
//! each be identified in several alternative ways (by id, by name, or by an
//! external source pair). Every alternative writes into the same input slot,
//! so when a caller binds more than one the last setter called wins - there
//! is deliberately no conflict detection, matching the behavior of the
//! surface this command mirrors.

use crate::error::CommandError;
use tracing::debug;
use xurrent_graphql::{
    ClientHandle, ClientRegistry, InputField, MutationInput, Transport, ID
};

/// An event as returned by the API.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Event {
    pub id: ID,
    pub subject: Option<String>,
    pub category: Option<String>,
    pub severity: Option<String>
}

/// A reference to a record by one of its alternative identifications.
///
/// Serializes as exactly one of `{id}`, `{name}` or `{source, sourceID}`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RecordReference {
    Id {
        id: ID
    },
    Name {
        name: String
    },
    Source {
        source: String,
        #[serde(rename = "sourceID")]
        source_id: String
    }
}

#[derive(Serialize, Default)]
pub struct EventCreateInput {
    #[serde(skip_serializing_if = "InputField::is_absent")]
    subject: InputField<String>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    note: InputField<String>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    category: InputField<String>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    severity: InputField<String>,
    #[serde(
        rename = "configurationItem",
        skip_serializing_if = "InputField::is_absent"
    )]
    configuration_item: InputField<RecordReference>,
    #[serde(
        rename = "serviceInstance",
        skip_serializing_if = "InputField::is_absent"
    )]
    service_instance: InputField<RecordReference>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    team: InputField<RecordReference>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    source: InputField<String>,
    #[serde(rename = "sourceID", skip_serializing_if = "InputField::is_absent")]
    source_id: InputField<String>
}

impl MutationInput for EventCreateInput {
    const FIELD: &'static str = "eventCreate";
}

/// Creates an event.
///
/// The configuration item, service instance and team slots each accept
/// several alternative identifications; setters for the same slot overwrite
/// each other in call order.
pub struct CreateEvent {
    input: EventCreateInput,
    client: Option<ClientHandle>
}

impl CreateEvent {
    const NAME: &'static str = "create-event";

    pub fn new<S: Into<String>>(subject: S) -> Self {
        let mut input = EventCreateInput::default();
        input.subject = InputField::Present(subject.into());
        CreateEvent {
            input,
            client: None
        }
    }

    pub fn note<V: Into<String>>(mut self, note: V) -> Self {
        self.input.note = InputField::Present(note.into());
        self
    }

    pub fn category<V: Into<String>>(mut self, category: V) -> Self {
        self.input.category = InputField::Present(category.into());
        self
    }

    pub fn severity<V: Into<String>>(mut self, severity: V) -> Self {
        self.input.severity = InputField::Present(severity.into());
        self
    }

    /// Identify the configuration item by name.
    pub fn configuration_item<V: Into<String>>(mut self, name: V) -> Self {
        self.input.configuration_item = InputField::Present(RecordReference::Name {
            name: name.into()
        });
        self
    }

    /// Identify the configuration item by its node id.
    pub fn configuration_item_id<I: Into<ID>>(mut self, id: I) -> Self {
        self.input.configuration_item = InputField::Present(RecordReference::Id { id: id.into() });
        self
    }

    /// Identify the configuration item by its external source pair.
    pub fn configuration_item_source<S: Into<String>, V: Into<String>>(
        mut self,
        source: S,
        source_id: V
    ) -> Self {
        self.input.configuration_item = InputField::Present(RecordReference::Source {
            source: source.into(),
            source_id: source_id.into()
        });
        self
    }

    /// Identify the service instance by name.
    pub fn service_instance<V: Into<String>>(mut self, name: V) -> Self {
        self.input.service_instance = InputField::Present(RecordReference::Name {
            name: name.into()
        });
        self
    }

    /// Identify the service instance by its node id.
    pub fn service_instance_id<I: Into<ID>>(mut self, id: I) -> Self {
        self.input.service_instance = InputField::Present(RecordReference::Id { id: id.into() });
        self
    }

    /// Identify the team by name.
    pub fn team<V: Into<String>>(mut self, name: V) -> Self {
        self.input.team = InputField::Present(RecordReference::Name { name: name.into() });
        self
    }

    /// Identify the team by its node id.
    pub fn team_id<I: Into<ID>>(mut self, id: I) -> Self {
        self.input.team = InputField::Present(RecordReference::Id { id: id.into() });
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

    pub fn client(mut self, handle: ClientHandle) -> Self {
        self.client = Some(handle);
        self
    }

    pub fn input(&self) -> &EventCreateInput {
        &self.input
    }

    pub async fn execute<T: Transport>(
        self,
        registry: &ClientRegistry<T>
    ) -> Result<Event, CommandError> {
        debug!(command = Self::NAME, "executing");
        let client = registry
            .resolve(self.client.as_ref())
            .map_err(|e| CommandError::new(Self::NAME, e))?;
        client
            .create_event(&self.input)
            .await
            .map_err(|e| CommandError::new(Self::NAME, e))
    }
}

#[cfg(test)]
mod test {
    use super::CreateEvent;

    #[test]
    fn alternative_identifications_write_the_same_slot() {
        // Both alternatives bound: the later call wins, without an error.
        let command = CreateEvent::new("CPU load high")
            .configuration_item("db-server-1")
            .configuration_item_id("ci-9");
        let json = serde_json::to_value(command.input()).unwrap();
        assert_eq!(json["configurationItem"], serde_json::json!({ "id": "ci-9" }));
    }

    #[test]
    fn source_pairs_serialize_both_halves() {
        let command =
            CreateEvent::new("Disk failure").configuration_item_source("zabbix", "10105");
        let json = serde_json::to_value(command.input()).unwrap();
        assert_eq!(
            json["configurationItem"],
            serde_json::json!({ "source": "zabbix", "sourceID": "10105" })
        );
    }

    #[test]
    fn unbound_targets_are_omitted() {
        let command = CreateEvent::new("Ping lost").team("Network Operations");
        let json = serde_json::to_value(command.input()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "subject": "Ping lost",
                "team": { "name": "Network Operations" }
            })
        );
    }
}
