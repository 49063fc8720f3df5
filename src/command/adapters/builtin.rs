//! Built-in text decoration commands.
//!
//! These are registered by the server binary at startup. Each returns the
//! decorated text as its result; posting it is left to the caller.

use serde_json::{Value, json};
use tracing::info;

use crate::command::domain::{
    ActingPrincipal, CommandDescriptor, HandlerError, HandlerResult, MessageContext, PreviewItem,
    PreviewPayload, handler_fn, preview_execute_fn, preview_fn,
};

const KAOMOJI_FACES: [&str; 3] = ["(ノ◕ヮ◕)ノ*:･ﾟ✧", "ʕ•ᴥ•ʔ", "(•_•)"];

/// Returns the built-in command set.
#[must_use]
pub fn builtin_commands() -> Vec<CommandDescriptor> {
    vec![
        decorator("gimme", "༼ つ ◕_◕ ༽つ", Placement::Before),
        decorator("shrug", "¯\\_(ツ)_/¯", Placement::After),
        decorator("tableflip", "(╯°□°）╯︵ ┻━┻", Placement::After),
        kaomoji(),
    ]
}

#[derive(Clone, Copy)]
enum Placement {
    Before,
    After,
}

fn decorate(art: &str, params: &str, placement: Placement) -> String {
    let text = match placement {
        Placement::Before => format!("{art} {params}"),
        Placement::After => format!("{params} {art}"),
    };
    text.trim().to_owned()
}

fn decorator(name: &'static str, art: &'static str, placement: Placement) -> CommandDescriptor {
    CommandDescriptor::new(
        name,
        handler_fn(move |_: &ActingPrincipal, params: &str, _: &MessageContext| {
            Ok(Value::String(decorate(art, params, placement)))
        }),
    )
    .with_description(format!("Slash_{name}_Description"))
    .with_params_hint("your_message_optional")
}

fn kaomoji() -> CommandDescriptor {
    CommandDescriptor::new(
        "kaomoji",
        handler_fn(|_: &ActingPrincipal, params: &str, _: &MessageContext| {
            let face = KAOMOJI_FACES.first().copied().unwrap_or_default();
            Ok(Value::String(decorate(face, params, Placement::After)))
        }),
    )
    .with_description("Slash_kaomoji_Description")
    .with_params_hint("your_message_optional")
    .with_preview(preview_fn(kaomoji_preview))
    .with_preview_execute(preview_execute_fn(kaomoji_execute))
}

fn kaomoji_preview(
    _: &ActingPrincipal,
    params: &str,
    _: &MessageContext,
) -> HandlerResult<PreviewPayload> {
    Ok(KAOMOJI_FACES
        .iter()
        .enumerate()
        .fold(PreviewPayload::new("Kaomoji"), |payload, (index, face)| {
            payload.with_item(PreviewItem::new(
                index.to_string(),
                "text",
                json!(decorate(face, params, Placement::After)),
            ))
        }))
}

fn kaomoji_execute(
    principal: &ActingPrincipal,
    _: &str,
    context: &MessageContext,
    item: &PreviewItem,
) -> HandlerResult<()> {
    let text = item
        .value
        .as_str()
        .ok_or_else(|| HandlerError::Rejected("kaomoji items carry text values".to_owned()))?;
    info!(
        user_id = %principal.user_id(),
        room_id = %context.room_id(),
        text,
        "kaomoji selected"
    );
    Ok(())
}
