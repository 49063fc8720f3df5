//! Given steps for slash-command request scenarios.

use super::world::CommandWorld;
use eyre::WrapErr;
use rstest_bdd_macros::given;
use slashgate::command::{
    adapters::{builtin::builtin_commands, memory::InMemoryCommandRegistry, memory::RoomPolicy},
    domain::{RoomId, UserId},
};

#[given("a command service with the built-in commands")]
fn builtin_command_service(world: &mut CommandWorld) -> Result<(), eyre::Report> {
    let registry = InMemoryCommandRegistry::with_commands(builtin_commands())
        .wrap_err("register built-in commands")?;
    world.registry = Some(registry);
    world.last_outcome = None;
    world.last_preview = None;
    Ok(())
}

#[given(r#"a public room "{room}""#)]
fn public_room(world: &mut CommandWorld, room: String) {
    world.gate = std::mem::take(&mut world.gate).with_room(RoomId::new(room), RoomPolicy::public());
}

#[given(r#"a private room "{room}" for member "{member}""#)]
fn private_room(world: &mut CommandWorld, room: String, member: String) {
    world.gate = std::mem::take(&mut world.gate).with_room(
        RoomId::new(room),
        RoomPolicy::private([UserId::new(member)]),
    );
}
