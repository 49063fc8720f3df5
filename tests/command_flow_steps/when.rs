//! When steps for slash-command request scenarios.

use super::world::{CommandWorld, PreviewState, run_async};
use rstest_bdd_macros::when;
use serde_json::{Map, Value, json};
use slashgate::command::domain::{ActingPrincipal, PreviewItem, UserId};

fn body(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn principal(user: &str) -> ActingPrincipal {
    ActingPrincipal::new(UserId::new(user))
}

#[when(r#"user "{user}" runs "{command}" with params "{params}" in room "{room}""#)]
fn user_runs_command(
    world: &mut CommandWorld,
    user: String,
    command: String,
    params: String,
    room: String,
) -> Result<(), eyre::Report> {
    let api = world.api()?;
    let request = body(json!({ "command": command, "params": params, "roomId": room }));
    world.last_outcome = Some(run_async(api.run(&principal(&user), &request)));
    Ok(())
}

#[when("a user lists commands with count {count:usize}")]
fn user_lists_commands(world: &mut CommandWorld, count: usize) -> Result<(), eyre::Report> {
    let api = world.api()?;
    world.last_outcome = Some(api.list(&body(json!({ "count": count.to_string() }))));
    Ok(())
}

#[when(r#"user "{user}" previews "{command}" with params "{params}" in room "{room}""#)]
fn user_previews_command(
    world: &mut CommandWorld,
    user: String,
    command: String,
    params: String,
    room: String,
) -> Result<(), eyre::Report> {
    let api = world.api()?;
    let request = body(json!({ "command": command, "params": params, "roomId": room }));
    let outcome = run_async(api.preview(&principal(&user), &request));

    if let Ok(response) = &outcome {
        let items = response
            .payload()
            .and_then(|payload| payload.get("preview"))
            .and_then(|preview| preview.get("items"))
            .cloned()
            .map(serde_json::from_value::<Vec<PreviewItem>>)
            .transpose()?
            .unwrap_or_default();
        world.last_preview = Some(PreviewState {
            user,
            command,
            params,
            room,
            items,
        });
    }
    world.last_outcome = Some(outcome);
    Ok(())
}

#[when("the user executes the first preview item")]
fn user_executes_first_item(world: &mut CommandWorld) -> Result<(), eyre::Report> {
    let api = world.api()?;
    let preview = world
        .last_preview
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no preview in scenario world"))?;
    let item = preview
        .items
        .first()
        .ok_or_else(|| eyre::eyre!("preview offered no items"))?;
    let request = body(json!({
        "command": preview.command,
        "params": preview.params,
        "roomId": preview.room,
        "previewItem": item,
    }));
    let outcome = run_async(api.execute_preview(&principal(&preview.user), &request));
    world.last_outcome = Some(outcome);
    Ok(())
}
