use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use xurrent_graphql::{
    ClientError, FilterOperator, InputField, MutationInput, Query, SortOrder
};
use xurrent_test::{data_response, error_response, fixtures, registry_with, FakeTransport};

#[derive(Clone, Debug, Deserialize, PartialEq)]
struct Team {
    id: String,
    name: String,
    disabled: Option<bool>
}

lazy_static! {
    static ref SERVICE_DESK: Team = Team {
        id: "NG1lLVRlYW0tMQ".to_string(),
        name: "Service Desk".to_string(),
        disabled: Some(false)
    };
}

#[derive(Serialize, Default)]
struct TeamCreateInput {
    #[serde(skip_serializing_if = "InputField::is_absent")]
    name: InputField<String>
}

impl MutationInput for TeamCreateInput {
    const FIELD: &'static str = "teamCreate";
}

#[tokio::test]
async fn get_returns_each_node() {
    let transport = FakeTransport::new();
    transport.push_response(data_response(serde_json::json!({
        "teams": { "nodes": [fixtures::team_node(), { "id": "2", "name": "Ops" }] }
    })));
    let (registry, handle) = registry_with(transport.clone());

    let query = Query::new("teams")
        .items_per_request(2)
        .unwrap()
        .order_by("name", SortOrder::Ascending)
        .select("id")
        .select("name")
        .select("disabled");
    let client = registry.resolve(Some(&handle)).unwrap();
    let teams: Vec<Team> = client.get(&query).await.unwrap();

    assert_eq!(teams.len(), 2);
    assert_eq!(teams[0], *SERVICE_DESK);
    assert_eq!(teams[1].name, "Ops");
    assert_eq!(
        transport.documents(),
        vec![
            "query { teams(first: 2, order: {field: name, direction: asc}) \
             { nodes { id name disabled } } }"
                .to_string()
        ]
    );
}

#[tokio::test]
async fn get_rejects_an_empty_selection() {
    let transport = FakeTransport::new();
    let (registry, handle) = registry_with(transport.clone());

    let query = Query::new("teams").filter_boolean("disabled", FilterOperator::Equals, false);
    let client = registry.resolve(Some(&handle)).unwrap();
    let result: Result<Vec<Team>, _> = client.get(&query).await;

    assert!(matches!(result, Err(ClientError::InvalidRequest(_))));
    assert!(transport.documents().is_empty(), "nothing should be sent");
}

#[tokio::test]
async fn mutation_returns_the_payload() {
    let transport = FakeTransport::new();
    transport.push_response(data_response(serde_json::json!({
        "teamCreate": fixtures::team_node()
    })));
    let (registry, handle) = registry_with(transport.clone());

    let input = TeamCreateInput {
        name: InputField::Present("Service Desk".to_string())
    };
    let response = Query::new("teams").select("id").select("name").select("disabled");
    let client = registry.resolve(Some(&handle)).unwrap();
    let team: Team = client.mutation(&input, Some(&response)).await.unwrap();

    assert_eq!(team.name, "Service Desk");
    assert_eq!(
        transport.documents(),
        vec![
            "mutation { teamCreate(input: {name: \"Service Desk\"}) { id name disabled } }"
                .to_string()
        ]
    );
}

#[tokio::test]
async fn api_errors_become_client_errors() {
    let transport = FakeTransport::new();
    transport.push_response(error_response(&["Record not found"]));
    let (registry, handle) = registry_with(transport);

    let query = Query::new("teams").select("id");
    let client = registry.resolve(Some(&handle)).unwrap();
    let result: Result<Vec<Team>, _> = client.get(&query).await;

    match result {
        Err(ClientError::Api(errors)) => assert_eq!(errors[0].message, "Record not found"),
        other => panic!("expected an api error, got {:?}", other.map(|_| ()))
    }
}

#[tokio::test]
async fn requests_carry_token_and_account_headers() {
    let transport = FakeTransport::new();
    transport.push_response(data_response(serde_json::json!({ "teams": { "nodes": [] } })));
    let (registry, handle) = registry_with(transport.clone());

    let query = Query::new("teams").select("id");
    let client = registry.resolve(Some(&handle)).unwrap();
    let _: Vec<Team> = client.get(&query).await.unwrap();

    let request = &transport.requests()[0];
    assert!(request
        .headers
        .contains(&("Authorization".to_string(), "Bearer test-token".to_string())));
    assert!(request
        .headers
        .contains(&("X-Xurrent-Account".to_string(), "test-account".to_string())));
}
