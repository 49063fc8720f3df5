//! Room access and pagination driven by server configuration.

use super::helpers::{api_from_config, config, fields, principal, runtime};
use rstest::rstest;
use serde_json::json;
use slashgate::command::{error::CommandFault, ports::RoomAccessError};
use slashgate::config::ServerConfig;
use tokio::runtime::Runtime;

#[rstest]
#[case("alice", "ops")]
#[case("alice", "GENERAL")]
#[case("bob", "GENERAL")]
fn admitted_users_run_commands(
    runtime: std::io::Result<Runtime>,
    config: ServerConfig,
    #[case] user: &str,
    #[case] room: &str,
) {
    let rt = runtime.expect("runtime");
    let api = api_from_config(&config);

    let response = rt
        .block_on(api.run(
            &principal(user),
            &fields(json!({ "command": "shrug", "params": "ok", "roomId": room })),
        ))
        .expect("access should be granted");

    assert!(response.is_success());
}

#[rstest]
fn non_member_is_refused(runtime: std::io::Result<Runtime>, config: ServerConfig) {
    let rt = runtime.expect("runtime");
    let api = api_from_config(&config);

    let fault = rt
        .block_on(api.run(
            &principal("bob"),
            &fields(json!({ "command": "shrug", "roomId": "ops" })),
        ))
        .expect_err("bob is not a member of ops");

    assert!(matches!(
        fault,
        CommandFault::Access(RoomAccessError::NotAllowed { .. })
    ));
}

#[rstest]
fn unknown_room_is_refused(runtime: std::io::Result<Runtime>, config: ServerConfig) {
    let rt = runtime.expect("runtime");
    let api = api_from_config(&config);

    let fault = rt
        .block_on(api.preview(
            &principal("alice"),
            &fields(json!({ "command": "kaomoji", "roomId": "nowhere" })),
        ))
        .expect_err("room is not configured");

    assert!(matches!(
        fault,
        CommandFault::Access(RoomAccessError::RoomNotFound(_))
    ));
}

#[rstest]
#[case(json!({}), 2)]
#[case(json!({ "count": "10" }), 3)]
#[case(json!({ "count": "0" }), 2)]
#[case(json!({ "count": "1", "offset": "3" }), 1)]
fn list_applies_configured_limits(
    config: ServerConfig,
    #[case] query: serde_json::Value,
    #[case] expected_count: usize,
) {
    let api = api_from_config(&config);

    let response = api.list(&fields(query)).expect("registry should be readable");

    let payload = response.payload().expect("list should succeed");
    assert_eq!(payload.get("count"), Some(&json!(expected_count)));
    assert_eq!(payload.get("total"), Some(&json!(4)));
}
