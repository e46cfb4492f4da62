use dashmap::DashMap;

use crate::config::rules::RulesConfig;
use crate::room::actor::RoomHandle;

/// Concurrent map of room id to running room.
#[derive(Debug)]
pub struct RoomRegistry {
    rooms: DashMap<String, RoomHandle>,
    config: RulesConfig,
}

impl RoomRegistry {
    pub fn new(config: RulesConfig) -> Self {
        Self {
            rooms: DashMap::new(),
            config,
        }
    }

    /// Handle for `room_id`, starting the room on first use. Must be called
    /// from within a tokio runtime.
    pub fn get_or_create(&self, room_id: &str) -> RoomHandle {
        self.rooms
            .entry(room_id.to_owned())
            .or_insert_with(|| {
                RoomHandle::spawn(room_id, self.config.table_settings(), self.config.room_mailbox)
            })
            .clone()
    }

    pub fn get(&self, room_id: &str) -> Option<RoomHandle> {
        self.rooms.get(room_id).map(|r| r.clone())
    }

    /// Forget a room. Its task ends once every handle is dropped.
    pub fn remove(&self, room_id: &str) -> Option<RoomHandle> {
        self.rooms.remove(room_id).map(|(_, handle)| handle)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
