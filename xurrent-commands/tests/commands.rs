use xurrent_commands::{
    calendar::{CalendarField, CalendarQuery, CreateCalendar},
    event::CreateEvent,
    invoke::InvokeQuery,
    team::{CreateTeam, Team, TeamField, TeamQuery, UpdateTeam},
    webhook::DeleteWebhook
};
use xurrent_graphql::{Query, SortOrder};
use xurrent_test::{data_response, error_response, fixtures, registry_with, FakeTransport};

#[tokio::test]
async fn create_dispatches_only_bound_attributes() {
    let transport = FakeTransport::new();
    transport.push_response(data_response(serde_json::json!({
        "calendarCreate": fixtures::calendar_node()
    })));
    let (registry, _) = registry_with(transport.clone());

    let calendar = CreateCalendar::new("Business Hours")
        .time_zone("Europe/Amsterdam")
        .execute(&registry)
        .await
        .unwrap();

    assert_eq!(calendar.name.as_deref(), Some("Business Hours"));
    assert_eq!(
        transport.documents(),
        vec![
            "mutation { calendarCreate(input: {name: \"Business Hours\", \
             timeZone: \"Europe/Amsterdam\"}) { id } }"
                .to_string()
        ]
    );
}

#[tokio::test]
async fn a_response_query_shapes_the_mutation_payload() {
    let transport = FakeTransport::new();
    transport.push_response(data_response(serde_json::json!({
        "teamCreate": fixtures::team_node()
    })));
    let (registry, handle) = registry_with(transport.clone());

    let response = TeamQuery::new(vec![TeamField::Id, TeamField::Name, TeamField::Disabled])
        .build()
        .unwrap();
    let team = CreateTeam::new("Service Desk")
        .response(response)
        .client(handle)
        .execute(&registry)
        .await
        .unwrap();

    assert_eq!(team.name.as_deref(), Some("Service Desk"));
    assert_eq!(
        transport.documents(),
        vec![
            "mutation { teamCreate(input: {name: \"Service Desk\"}) { id name disabled } }"
                .to_string()
        ]
    );
}

#[tokio::test]
async fn api_failures_name_the_command_and_emit_nothing() {
    let transport = FakeTransport::new();
    transport.push_response(error_response(&["Name has already been taken"]));
    let (registry, _) = registry_with(transport);

    let error = CreateTeam::new("Service Desk")
        .execute(&registry)
        .await
        .unwrap_err();

    assert_eq!(error.command(), "create-team");
    assert!(error.to_string().contains("Name has already been taken"));
}

#[tokio::test]
async fn a_missing_client_names_the_command_too() {
    let registry: xurrent_graphql::ClientRegistry<FakeTransport> =
        xurrent_graphql::ClientRegistry::new();

    let error = UpdateTeam::new("team-1")
        .name("Ops")
        .execute(&registry)
        .await
        .unwrap_err();

    assert_eq!(error.command(), "update-team");
    assert!(error.to_string().contains("no clients registered"));
}

#[tokio::test]
async fn invoke_yields_each_record_individually() {
    let transport = FakeTransport::new();
    transport.push_response(data_response(serde_json::json!({
        "teams": { "nodes": [fixtures::team_node(), { "id": "2", "name": "Ops" }] }
    })));
    let (registry, _) = registry_with(transport);

    let query = TeamQuery::new(vec![TeamField::Id, TeamField::Name])
        .order_by(TeamField::Name)
        .sort_order(SortOrder::Descending)
        .items_per_request(10)
        .build()
        .unwrap();
    let teams: Vec<Team> = InvokeQuery::new(query).execute(&registry).await.unwrap();

    assert_eq!(teams.len(), 2);
    assert_eq!(teams[1].name.as_deref(), Some("Ops"));
}

#[tokio::test]
async fn invoke_failures_carry_the_collection_name() {
    let transport = FakeTransport::new();
    transport.push_response(error_response(&["Access denied"]));
    let (registry, _) = registry_with(transport);

    let query = TeamQuery::new(vec![TeamField::Id]).build().unwrap();
    let error = InvokeQuery::<Team>::new(query)
        .execute(&registry)
        .await
        .unwrap_err();

    assert_eq!(error.command(), "invoke-teams-query");
}

#[tokio::test]
async fn delete_dispatches_the_bare_id() {
    let transport = FakeTransport::new();
    transport.push_response(data_response(serde_json::json!({
        "webhookDelete": { "success": true }
    })));
    let (registry, _) = registry_with(transport.clone());

    let deleted = DeleteWebhook::new("hook-1").execute(&registry).await.unwrap();

    assert!(deleted.success);
    assert_eq!(
        transport.documents(),
        vec!["mutation { webhookDelete(input: {id: \"hook-1\"}) { success } }".to_string()]
    );
}

#[tokio::test]
async fn events_dispatch_through_the_event_operation() {
    let transport = FakeTransport::new();
    transport.push_response(data_response(serde_json::json!({
        "eventCreate": { "id": "evt-1", "subject": "CPU load high" }
    })));
    let (registry, _) = registry_with(transport.clone());

    let event = CreateEvent::new("CPU load high")
        .configuration_item("db-server-1")
        .configuration_item_id("ci-9")
        .team("Network Operations")
        .execute(&registry)
        .await
        .unwrap();

    assert_eq!(event.subject.as_deref(), Some("CPU load high"));
    // The later configuration item identification wins.
    assert_eq!(
        transport.documents(),
        vec![
            "mutation { eventCreate(input: {subject: \"CPU load high\", \
             configurationItem: {id: \"ci-9\"}, team: {name: \"Network Operations\"}}) \
             { id } }"
                .to_string()
        ]
    );
}

#[tokio::test]
async fn query_commands_compose_with_invoke_through_the_pipeline() {
    let transport = FakeTransport::new();
    transport.push_response(data_response(serde_json::json!({
        "calendars": { "nodes": [fixtures::calendar_node()] }
    })));
    let (registry, _) = registry_with(transport.clone());

    let holidays = Query::new("holidays").select("name");
    let query = CalendarQuery::new(vec![CalendarField::Id, CalendarField::Name])
        .items_per_request(50)
        .holidays(holidays)
        .build()
        .unwrap();
    let calendars = InvokeQuery::<xurrent_commands::calendar::Calendar>::new(query)
        .execute(&registry)
        .await
        .unwrap();

    assert_eq!(calendars.len(), 1);
    assert_eq!(
        transport.documents(),
        vec![
            "query { calendars(first: 50) { nodes { id name holidays { name } } } }".to_string()
        ]
    );
}
