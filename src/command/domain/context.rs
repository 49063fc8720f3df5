//! Invocation context handed to command handlers.

use serde::Serialize;

use super::{MessageId, RoomId, UserId};

/// The authenticated identity on whose behalf a command executes.
///
/// Every handler invocation receives the principal explicitly, so any side
/// effect a handler performs is attributed to this user rather than to the
/// service itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ActingPrincipal {
    user_id: UserId,
}

impl ActingPrincipal {
    /// Creates a principal for the given user.
    #[must_use]
    pub const fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }
}

/// Synthetic message a command is attached to for a single invocation.
///
/// Contexts are built immediately before an invocation and dropped after it;
/// they are never persisted. Preview stages only carry the room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageContext {
    id: Option<MessageId>,
    room_id: RoomId,
    rendered_text: Option<String>,
}

impl MessageContext {
    /// Builds the context for a full command run.
    ///
    /// The rendered text reconstructs the invocation as `/{command} {params}`.
    #[must_use]
    pub fn for_run(room_id: RoomId, command: &str, params: &str) -> Self {
        Self {
            id: Some(MessageId::new()),
            room_id,
            rendered_text: Some(format!("/{command} {params}")),
        }
    }

    /// Builds the room-only context used by preview generation and execution.
    #[must_use]
    pub const fn for_room(room_id: RoomId) -> Self {
        Self {
            id: None,
            room_id,
            rendered_text: None,
        }
    }

    /// Returns the synthetic message identifier, when one was generated.
    #[must_use]
    pub const fn id(&self) -> Option<MessageId> {
        self.id
    }

    /// Returns the target room.
    #[must_use]
    pub const fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    /// Returns the reconstructed invocation text, when present.
    #[must_use]
    pub fn rendered_text(&self) -> Option<&str> {
        self.rendered_text.as_deref()
    }
}
