// Presence bookkeeping - who is in the room and how fresh they are
// Heartbeats refresh an entry; anything silent too long gets evicted

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::room::state::PRESENCE_KEY;
use crate::room::store::RoomStore;

/// How often participants should refresh their entry
pub const HEARTBEAT_INTERVAL_MS: u64 = 5_000;

/// Entries older than this are considered gone
pub const STALE_AFTER_MS: u64 = 15_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Instructor,
    Student,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceEntry {
    pub user_id: String,
    pub role: Role,
    pub timestamp: u64,
}

/// The room's presence map, keyed by user id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PresenceTable {
    entries: HashMap<String, PresenceEntry>,
}

impl PresenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or refresh a participant's heartbeat
    pub fn touch(&mut self, user_id: &str, role: Role, now_ms: u64) {
        self.entries.insert(
            user_id.to_string(),
            PresenceEntry {
                user_id: user_id.to_string(),
                role,
                timestamp: now_ms,
            },
        );
    }

    pub fn remove(&mut self, user_id: &str) -> Option<PresenceEntry> {
        self.entries.remove(user_id)
    }

    /// Evict entries whose heartbeat is older than [`STALE_AFTER_MS`].
    /// Returns how many were removed.
    pub fn prune_stale(&mut self, now_ms: u64) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| now_ms.saturating_sub(entry.timestamp) <= STALE_AFTER_MS);
        before - self.entries.len()
    }

    pub fn is_present(&self, user_id: &str) -> bool {
        self.entries.contains_key(user_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &PresenceEntry> {
        self.entries.values()
    }

    pub fn count_role(&self, role: Role) -> usize {
        self.entries.values().filter(|e| e.role == role).count()
    }
}

/// Current wall-clock time as unix milliseconds
pub fn now_unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

pub fn publish_presence(
    store: &dyn RoomStore,
    room: &str,
    table: &PresenceTable,
) -> serde_json::Result<()> {
    store.set(room, PRESENCE_KEY, serde_json::to_value(table)?);
    Ok(())
}

pub fn load_presence(store: &dyn RoomStore, room: &str) -> PresenceTable {
    store
        .get(room, PRESENCE_KEY)
        .and_then(|value| serde_json::from_value(value).ok())
        .unwrap_or_default()
}
