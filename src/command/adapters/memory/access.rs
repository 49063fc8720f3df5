//! Static, configuration-driven room access gate.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};

use crate::command::domain::{ActingPrincipal, RoomId, UserId};
use crate::command::ports::{RoomAccessError, RoomAccessGate, RoomAccessResult};
use crate::config::RoomConfig;

/// Access rules for one room.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomPolicy {
    public: bool,
    members: HashSet<UserId>,
}

impl RoomPolicy {
    /// A room any authenticated user may access.
    #[must_use]
    pub fn public() -> Self {
        Self {
            public: true,
            members: HashSet::new(),
        }
    }

    /// A room restricted to `members`.
    #[must_use]
    pub fn private(members: impl IntoIterator<Item = UserId>) -> Self {
        Self {
            public: false,
            members: members.into_iter().collect(),
        }
    }

    fn admits(&self, user_id: &UserId) -> bool {
        self.public || self.members.contains(user_id)
    }
}

impl From<&RoomConfig> for RoomPolicy {
    fn from(config: &RoomConfig) -> Self {
        Self {
            public: config.public,
            members: config.members.iter().map(UserId::new).collect(),
        }
    }
}

/// Room access gate backed by a fixed room table.
#[derive(Debug, Clone, Default)]
pub struct StaticRoomAccessGate {
    rooms: HashMap<RoomId, RoomPolicy>,
}

impl StaticRoomAccessGate {
    /// Creates a gate that knows no rooms.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a room.
    #[must_use]
    pub fn with_room(mut self, room_id: RoomId, policy: RoomPolicy) -> Self {
        self.rooms.insert(room_id, policy);
        self
    }

    /// Builds the gate from configured rooms.
    #[must_use]
    pub fn from_config<'a>(rooms: impl IntoIterator<Item = (&'a String, &'a RoomConfig)>) -> Self {
        Self {
            rooms: rooms
                .into_iter()
                .map(|(room_id, config)| (RoomId::new(room_id.as_str()), RoomPolicy::from(config)))
                .collect(),
        }
    }
}

#[async_trait]
impl RoomAccessGate for StaticRoomAccessGate {
    async fn check_access(
        &self,
        principal: &ActingPrincipal,
        room_id: &RoomId,
    ) -> RoomAccessResult<()> {
        let user_id = principal.user_id();
        if user_id.as_str().is_empty() {
            return Err(RoomAccessError::InvalidUser);
        }
        let policy = self
            .rooms
            .get(room_id)
            .ok_or_else(|| RoomAccessError::RoomNotFound(room_id.clone()))?;
        if policy.admits(user_id) {
            Ok(())
        } else {
            Err(RoomAccessError::NotAllowed {
                user_id: user_id.clone(),
                room_id: room_id.clone(),
            })
        }
    }
}
