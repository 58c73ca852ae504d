//! Commands for the ConfigurationItem entity.

use crate::{
    entity_query::{build_entity_query, EntityQueryOptions},
    error::CommandError,
    filter::FilterBuilder,
    invoke::{InvokeQuery, Queryable}
};
use chrono::NaiveDate;
use xurrent_graphql::{
    ClientHandle, ClientRegistry, CustomFilter, InputField, MutationInput, Query, QueryField,
    QueryFilter, SortOrder, Transport, ID
};

/// A configuration item as returned by the API.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ConfigurationItem {
    pub id: ID,
    pub name: Option<String>,
    pub label: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "serialNr")]
    pub serial_nr: Option<String>,
    #[serde(rename = "systemID")]
    pub system_id: Option<String>,
    #[serde(rename = "inUseSince")]
    pub in_use_since: Option<NaiveDate>,
    #[serde(rename = "warrantyExpiryDate")]
    pub warranty_expiry_date: Option<NaiveDate>,
    pub source: Option<String>,
    #[serde(rename = "sourceID")]
    pub source_id: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>
}

impl Queryable for ConfigurationItem {
    const COLLECTION: &'static str = "configurationItems";
    type Field = ConfigurationItemField;
}

/// The selectable, orderable and filterable fields of a configuration item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigurationItemField {
    Id,
    Name,
    Label,
    Status,
    SerialNr,
    SystemID,
    InUseSince,
    WarrantyExpiryDate,
    Source,
    SourceID,
    CreatedAt,
    UpdatedAt
}

impl QueryField for ConfigurationItemField {
    fn as_str(&self) -> &'static str {
        match self {
            ConfigurationItemField::Id => "id",
            ConfigurationItemField::Name => "name",
            ConfigurationItemField::Label => "label",
            ConfigurationItemField::Status => "status",
            ConfigurationItemField::SerialNr => "serialNr",
            ConfigurationItemField::SystemID => "systemID",
            ConfigurationItemField::InUseSince => "inUseSince",
            ConfigurationItemField::WarrantyExpiryDate => "warrantyExpiryDate",
            ConfigurationItemField::Source => "source",
            ConfigurationItemField::SourceID => "sourceID",
            ConfigurationItemField::CreatedAt => "createdAt",
            ConfigurationItemField::UpdatedAt => "updatedAt"
        }
    }
}

/// Builds filter conditions for configuration item queries.
pub type ConfigurationItemFilter = FilterBuilder<ConfigurationItemField>;
/// Executes a built configuration item query.
pub type InvokeConfigurationItemQuery = InvokeQuery<ConfigurationItem>;

#[derive(Serialize, Default)]
pub struct ConfigurationItemCreateInput {
    #[serde(skip_serializing_if = "InputField::is_absent")]
    name: InputField<String>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    label: InputField<String>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    status: InputField<String>,
    #[serde(rename = "productId", skip_serializing_if = "InputField::is_absent")]
    product_id: InputField<ID>,
    #[serde(rename = "serialNr", skip_serializing_if = "InputField::is_absent")]
    serial_nr: InputField<String>,
    #[serde(rename = "systemID", skip_serializing_if = "InputField::is_absent")]
    system_id: InputField<String>,
    #[serde(rename = "siteId", skip_serializing_if = "InputField::is_absent")]
    site_id: InputField<ID>,
    #[serde(rename = "ownerId", skip_serializing_if = "InputField::is_absent")]
    owner_id: InputField<ID>,
    #[serde(rename = "serviceId", skip_serializing_if = "InputField::is_absent")]
    service_id: InputField<ID>,
    #[serde(rename = "supplierId", skip_serializing_if = "InputField::is_absent")]
    supplier_id: InputField<ID>,
    #[serde(rename = "inUseSince", skip_serializing_if = "InputField::is_absent")]
    in_use_since: InputField<NaiveDate>,
    #[serde(
        rename = "warrantyExpiryDate",
        skip_serializing_if = "InputField::is_absent"
    )]
    warranty_expiry_date: InputField<NaiveDate>,
    #[serde(
        rename = "alternateNames",
        skip_serializing_if = "InputField::is_absent"
    )]
    alternate_names: InputField<Vec<String>>,
    #[serde(rename = "userIds", skip_serializing_if = "InputField::is_absent")]
    user_ids: InputField<Vec<ID>>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    source: InputField<String>,
    #[serde(rename = "sourceID", skip_serializing_if = "InputField::is_absent")]
    source_id: InputField<String>
}

impl MutationInput for ConfigurationItemCreateInput {
    const FIELD: &'static str = "configurationItemCreate";
}

/// Creates a configuration item. Only explicitly set attributes are
/// transmitted.
pub struct CreateConfigurationItem {
    input: ConfigurationItemCreateInput,
    response: Option<Query>,
    client: Option<ClientHandle>
}

impl CreateConfigurationItem {
    const NAME: &'static str = "create-configuration-item";

    pub fn new<N: Into<String>>(name: N) -> Self {
        let mut input = ConfigurationItemCreateInput::default();
        input.name = InputField::Present(name.into());
        CreateConfigurationItem {
            input,
            response: None,
            client: None
        }
    }

    pub fn label<V: Into<String>>(mut self, label: V) -> Self {
        self.input.label = InputField::Present(label.into());
        self
    }

    /// The lifecycle status, e.g. `in_production`.
    pub fn status<V: Into<String>>(mut self, status: V) -> Self {
        self.input.status = InputField::Present(status.into());
        self
    }

    pub fn product_id<I: Into<ID>>(mut self, product_id: I) -> Self {
        self.input.product_id = InputField::Present(product_id.into());
        self
    }

    pub fn serial_nr<V: Into<String>>(mut self, serial_nr: V) -> Self {
        self.input.serial_nr = InputField::Present(serial_nr.into());
        self
    }

    pub fn system_id<V: Into<String>>(mut self, system_id: V) -> Self {
        self.input.system_id = InputField::Present(system_id.into());
        self
    }

    pub fn site_id<I: Into<ID>>(mut self, site_id: I) -> Self {
        self.input.site_id = InputField::Present(site_id.into());
        self
    }

    pub fn owner_id<I: Into<ID>>(mut self, owner_id: I) -> Self {
        self.input.owner_id = InputField::Present(owner_id.into());
        self
    }

    pub fn service_id<I: Into<ID>>(mut self, service_id: I) -> Self {
        self.input.service_id = InputField::Present(service_id.into());
        self
    }

    pub fn supplier_id<I: Into<ID>>(mut self, supplier_id: I) -> Self {
        self.input.supplier_id = InputField::Present(supplier_id.into());
        self
    }

    pub fn in_use_since(mut self, date: NaiveDate) -> Self {
        self.input.in_use_since = InputField::Present(date);
        self
    }

    pub fn warranty_expiry_date(mut self, date: NaiveDate) -> Self {
        self.input.warranty_expiry_date = InputField::Present(date);
        self
    }

    /// Passing `None` clears the alternate names: the field is transmitted
    /// as an empty collection, not omitted.
    pub fn alternate_names<V: Into<Option<Vec<String>>>>(mut self, alternate_names: V) -> Self {
        self.input.alternate_names =
            InputField::Present(alternate_names.into().unwrap_or_default());
        self
    }

    /// Passing `None` clears the users: the field is transmitted as an empty
    /// collection, not omitted.
    pub fn user_ids<V: Into<Option<Vec<ID>>>>(mut self, user_ids: V) -> Self {
        self.input.user_ids = InputField::Present(user_ids.into().unwrap_or_default());
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

    pub fn input(&self) -> &ConfigurationItemCreateInput {
        &self.input
    }

    pub async fn execute<T: Transport>(
        self,
        registry: &ClientRegistry<T>
    ) -> Result<ConfigurationItem, CommandError> {
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
pub struct ConfigurationItemUpdateInput {
    id: ID,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    name: InputField<String>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    label: InputField<String>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    status: InputField<String>,
    #[serde(rename = "serialNr", skip_serializing_if = "InputField::is_absent")]
    serial_nr: InputField<String>,
    #[serde(rename = "systemID", skip_serializing_if = "InputField::is_absent")]
    system_id: InputField<String>,
    #[serde(rename = "ownerId", skip_serializing_if = "InputField::is_absent")]
    owner_id: InputField<ID>,
    #[serde(rename = "serviceId", skip_serializing_if = "InputField::is_absent")]
    service_id: InputField<ID>,
    #[serde(rename = "inUseSince", skip_serializing_if = "InputField::is_absent")]
    in_use_since: InputField<NaiveDate>,
    #[serde(
        rename = "warrantyExpiryDate",
        skip_serializing_if = "InputField::is_absent"
    )]
    warranty_expiry_date: InputField<NaiveDate>,
    #[serde(
        rename = "alternateNames",
        skip_serializing_if = "InputField::is_absent"
    )]
    alternate_names: InputField<Vec<String>>,
    #[serde(rename = "userIds", skip_serializing_if = "InputField::is_absent")]
    user_ids: InputField<Vec<ID>>,
    #[serde(skip_serializing_if = "InputField::is_absent")]
    source: InputField<String>,
    #[serde(rename = "sourceID", skip_serializing_if = "InputField::is_absent")]
    source_id: InputField<String>
}

impl MutationInput for ConfigurationItemUpdateInput {
    const FIELD: &'static str = "configurationItemUpdate";
}

/// Updates a configuration item. Attributes that were never set are left
/// untouched server-side.
pub struct UpdateConfigurationItem {
    input: ConfigurationItemUpdateInput,
    response: Option<Query>,
    client: Option<ClientHandle>
}

impl UpdateConfigurationItem {
    const NAME: &'static str = "update-configuration-item";

    pub fn new<I: Into<ID>>(id: I) -> Self {
        UpdateConfigurationItem {
            input: ConfigurationItemUpdateInput {
                id: id.into(),
                name: InputField::Absent,
                label: InputField::Absent,
                status: InputField::Absent,
                serial_nr: InputField::Absent,
                system_id: InputField::Absent,
                owner_id: InputField::Absent,
                service_id: InputField::Absent,
                in_use_since: InputField::Absent,
                warranty_expiry_date: InputField::Absent,
                alternate_names: InputField::Absent,
                user_ids: InputField::Absent,
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

    pub fn label<V: Into<String>>(mut self, label: V) -> Self {
        self.input.label = InputField::Present(label.into());
        self
    }

    pub fn status<V: Into<String>>(mut self, status: V) -> Self {
        self.input.status = InputField::Present(status.into());
        self
    }

    pub fn serial_nr<V: Into<String>>(mut self, serial_nr: V) -> Self {
        self.input.serial_nr = InputField::Present(serial_nr.into());
        self
    }

    pub fn system_id<V: Into<String>>(mut self, system_id: V) -> Self {
        self.input.system_id = InputField::Present(system_id.into());
        self
    }

    pub fn owner_id<I: Into<ID>>(mut self, owner_id: I) -> Self {
        self.input.owner_id = InputField::Present(owner_id.into());
        self
    }

    pub fn service_id<I: Into<ID>>(mut self, service_id: I) -> Self {
        self.input.service_id = InputField::Present(service_id.into());
        self
    }

    pub fn in_use_since(mut self, date: NaiveDate) -> Self {
        self.input.in_use_since = InputField::Present(date);
        self
    }

    pub fn warranty_expiry_date(mut self, date: NaiveDate) -> Self {
        self.input.warranty_expiry_date = InputField::Present(date);
        self
    }

    pub fn alternate_names<V: Into<Option<Vec<String>>>>(mut self, alternate_names: V) -> Self {
        self.input.alternate_names =
            InputField::Present(alternate_names.into().unwrap_or_default());
        self
    }

    pub fn user_ids<V: Into<Option<Vec<ID>>>>(mut self, user_ids: V) -> Self {
        self.input.user_ids = InputField::Present(user_ids.into().unwrap_or_default());
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

    pub fn input(&self) -> &ConfigurationItemUpdateInput {
        &self.input
    }

    pub async fn execute<T: Transport>(
        self,
        registry: &ClientRegistry<T>
    ) -> Result<ConfigurationItem, CommandError> {
        let client = registry
            .resolve(self.client.as_ref())
            .map_err(|e| CommandError::new(Self::NAME, e))?;
        client
            .mutation(&self.input, self.response.as_ref())
            .await
            .map_err(|e| CommandError::new(Self::NAME, e))
    }
}

/// Builds a configuration item query from bound parameters.
pub struct ConfigurationItemQuery {
    properties: Vec<ConfigurationItemField>,
    id: Option<ID>,
    view: Option<String>,
    order_by: Option<ConfigurationItemField>,
    sort_order: Option<SortOrder>,
    items_per_request: Option<u16>,
    service: Option<Query>,
    users: Option<Query>,
    filters: Vec<QueryFilter<ConfigurationItemField>>,
    search: Option<String>,
    custom_filters: Vec<CustomFilter>
}

impl ConfigurationItemQuery {
    const NAME: &'static str = "configuration-item-query";

    pub fn new(properties: Vec<ConfigurationItemField>) -> Self {
        ConfigurationItemQuery {
            properties,
            id: None,
            view: None,
            order_by: None,
            sort_order: None,
            items_per_request: None,
            service: None,
            users: None,
            filters: Vec::new(),
            search: None,
            custom_filters: Vec::new()
        }
    }

    /// Restrict the query to a single configuration item. Every other filter
    /// is ignored when an id is set.
    pub fn id<I: Into<ID>>(mut self, id: I) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn view<V: Into<String>>(mut self, view: V) -> Self {
        self.view = Some(view.into());
        self
    }

    pub fn order_by(mut self, field: ConfigurationItemField) -> Self {
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

    /// Nest a sub-selection for the item's service.
    pub fn service(mut self, query: Query) -> Self {
        self.service = Some(query);
        self
    }

    /// Nest a sub-selection for the item's users.
    pub fn users(mut self, query: Query) -> Self {
        self.users = Some(query);
        self
    }

    pub fn filters(mut self, filters: Vec<QueryFilter<ConfigurationItemField>>) -> Self {
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
        let mut nested = Vec::new();
        if let Some(query) = self.service {
            nested.push(("service", query));
        }
        if let Some(query) = self.users {
            nested.push(("users", query));
        }

        build_entity_query(
            Self::NAME,
            ConfigurationItem::COLLECTION,
            self.properties,
            EntityQueryOptions {
                id: self.id,
                view: self.view,
                order_by: self.order_by.map(|f| f.as_str()),
                sort_order: self.sort_order,
                items_per_request: self.items_per_request,
                nested,
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
    use super::{CreateConfigurationItem, UpdateConfigurationItem};
    use chrono::NaiveDate;

    #[test]
    fn dates_serialize_as_plain_dates() {
        let command = CreateConfigurationItem::new("db-server-1")
            .in_use_since(NaiveDate::from_ymd(2019, 7, 1));
        let json = serde_json::to_value(command.input()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "name": "db-server-1", "inUseSince": "2019-07-01" })
        );
    }

    #[test]
    fn clearing_both_collections_transmits_them_empty() {
        let command = UpdateConfigurationItem::new("ci-1")
            .alternate_names(None)
            .user_ids(None);
        let json = serde_json::to_value(command.input()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "ci-1",
                "alternateNames": [],
                "userIds": []
            })
        );
    }
}
