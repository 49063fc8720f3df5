//! Then steps for slash-command request scenarios.

use super::world::CommandWorld;
use rstest_bdd_macros::then;
use serde_json::{Value, json};
use slashgate::command::error::CommandFault;

fn payload_field<'a>(world: &'a CommandWorld, key: &str) -> Result<&'a Value, eyre::Report> {
    let response = world.last_response()?;
    response
        .payload()
        .and_then(|payload| payload.get(key))
        .ok_or_else(|| eyre::eyre!("expected payload field '{key}', got {response:?}"))
}

#[then(r#"the request succeeds with result "{result}""#)]
fn request_succeeds_with_result(world: &CommandWorld, result: String) -> Result<(), eyre::Report> {
    let actual = payload_field(world, "result")?;
    if actual != &json!(result) {
        return Err(eyre::eyre!("expected result '{result}', found {actual}"));
    }
    Ok(())
}

#[then("the request succeeds")]
fn request_succeeds(world: &CommandWorld) -> Result<(), eyre::Report> {
    let response = world.last_response()?;
    if !response.is_success() {
        return Err(eyre::eyre!("expected success, got {response:?}"));
    }
    Ok(())
}

#[then("the page holds {count:usize} of {total:usize} commands")]
fn page_holds_commands(
    world: &CommandWorld,
    count: usize,
    total: usize,
) -> Result<(), eyre::Report> {
    let listed = payload_field(world, "commands")?
        .as_array()
        .map_or(0, Vec::len);
    let reported_count = payload_field(world, "count")?;
    let reported_total = payload_field(world, "total")?;
    if listed != count || reported_count != &json!(count) || reported_total != &json!(total) {
        return Err(eyre::eyre!(
            "expected {count} of {total}, got {listed} listed, count {reported_count}, total {reported_total}"
        ));
    }
    Ok(())
}

#[then("{count:usize} preview items are offered")]
fn preview_items_offered(world: &CommandWorld, count: usize) -> Result<(), eyre::Report> {
    world.last_response()?;
    let offered = world
        .last_preview
        .as_ref()
        .map_or(0, |preview| preview.items.len());
    if offered != count {
        return Err(eyre::eyre!("expected {count} preview items, found {offered}"));
    }
    Ok(())
}

#[then(r#"the request fails with message "{message}""#)]
fn request_fails_with_message(world: &CommandWorld, message: String) -> Result<(), eyre::Report> {
    let response = world.last_response()?;
    if response.failure_message() != Some(message.as_str()) {
        return Err(eyre::eyre!("expected failure '{message}', got {response:?}"));
    }
    Ok(())
}

#[then(r#"the request is refused with code "{code}""#)]
fn request_is_refused(world: &CommandWorld, code: String) -> Result<(), eyre::Report> {
    match world.last_outcome.as_ref() {
        Some(Err(CommandFault::Access(error))) if error.code() == code => Ok(()),
        other => Err(eyre::eyre!("expected access fault '{code}', got {other:?}")),
    }
}
