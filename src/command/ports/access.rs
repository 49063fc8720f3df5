//! Room access gate port.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::command::domain::{ActingPrincipal, RoomId, UserId};

/// Result type for access checks.
pub type RoomAccessResult<T> = Result<T, RoomAccessError>;

/// Authorisation check for principal-to-room access.
///
/// Implementations fail rather than return a boolean: a denied or unknown
/// room is an error that callers propagate without converting.
#[async_trait]
pub trait RoomAccessGate: Send + Sync {
    /// Succeeds when `principal` may operate on `room_id`.
    ///
    /// # Errors
    ///
    /// Returns [`RoomAccessError`] when the room does not exist or the
    /// principal may not access it.
    async fn check_access(
        &self,
        principal: &ActingPrincipal,
        room_id: &RoomId,
    ) -> RoomAccessResult<()>;
}

/// Reasons an access check fails.
#[derive(Debug, Clone, Error)]
pub enum RoomAccessError {
    /// The principal is not a valid user.
    #[error("invalid user")]
    InvalidUser,

    /// The room does not exist.
    #[error("room {0} does not exist")]
    RoomNotFound(RoomId),

    /// The principal may not access the room.
    #[error("user {user_id} may not access room {room_id}")]
    NotAllowed {
        /// Rejected user.
        user_id: UserId,
        /// Target room.
        room_id: RoomId,
    },

    /// The access backend failed.
    #[error("room access check unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl RoomAccessError {
    /// Wraps a backend failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }

    /// Returns the stable client-facing error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidUser => "error-invalid-user",
            Self::RoomNotFound(_) => "error-invalid-room",
            Self::NotAllowed { .. } => "error-not-allowed",
            Self::Unavailable(_) => "error-access-unavailable",
        }
    }
}
