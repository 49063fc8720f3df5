//! Built-in commands exercised through the request layer.

use super::helpers::{api_from_config, config, fields, principal, runtime};
use rstest::rstest;
use serde_json::json;
use slashgate::config::ServerConfig;
use tokio::runtime::Runtime;

#[rstest]
#[case("gimme", "snacks", "༼ つ ◕_◕ ༽つ snacks")]
#[case("Shrug", "", "¯\\_(ツ)_/¯")]
#[case("TABLEFLIP", "argh", "argh (╯°□°）╯︵ ┻━┻")]
#[case("kaomoji", "hi", "hi (ノ◕ヮ◕)ノ*:･ﾟ✧")]
fn builtins_decorate_params(
    runtime: std::io::Result<Runtime>,
    config: ServerConfig,
    #[case] command: &str,
    #[case] params: &str,
    #[case] expected: &str,
) {
    let rt = runtime.expect("runtime");
    let api = api_from_config(&config);

    let response = rt
        .block_on(api.run(
            &principal("bob"),
            &fields(json!({ "command": command, "params": params, "roomId": "GENERAL" })),
        ))
        .expect("access should be granted");

    assert_eq!(
        response.payload().and_then(|payload| payload.get("result")),
        Some(&json!(expected))
    );
}

#[rstest]
fn only_kaomoji_provides_previews(config: ServerConfig) {
    let api = api_from_config(&config);

    let response = api
        .list(&fields(json!({ "count": "3", "sort": "{\"providesPreview\":-1}" })))
        .expect("registry should be readable");

    let previewing: Vec<_> = response
        .payload()
        .and_then(|payload| payload.get("commands"))
        .and_then(serde_json::Value::as_array)
        .map(|commands| {
            commands
                .iter()
                .filter(|command| command.get("providesPreview") == Some(&json!(true)))
                .filter_map(|command| command.get("name").and_then(serde_json::Value::as_str))
                .collect()
        })
        .unwrap_or_default();
    assert_eq!(previewing, vec!["kaomoji"]);
}

#[rstest]
fn kaomoji_preview_item_round_trips(runtime: std::io::Result<Runtime>, config: ServerConfig) {
    let rt = runtime.expect("runtime");
    let api = api_from_config(&config);
    let alice = principal("alice");

    let preview = rt
        .block_on(api.preview(
            &alice,
            &fields(json!({ "command": "kaomoji", "params": "yo", "roomId": "ops" })),
        ))
        .expect("access should be granted");
    let item = preview
        .payload()
        .and_then(|payload| payload.get("preview"))
        .and_then(|body| body.pointer("/items/0"))
        .cloned()
        .expect("preview should offer an item");

    let executed = rt
        .block_on(api.execute_preview(
            &alice,
            &fields(json!({
                "command": "kaomoji",
                "params": "yo",
                "roomId": "ops",
                "previewItem": item,
            })),
        ))
        .expect("access should be granted");

    assert!(executed.is_success());
}
