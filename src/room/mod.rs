// Room module - shared key-value state between instructor and student
// The store itself is an injected collaborator; replication is not ours

pub mod presence;
pub mod state;
pub mod store;

pub use presence::{PresenceEntry, PresenceTable, Role};
pub use state::{InstructorState, RoomSettings, StudentPlaybackState};
pub use store::{MemoryStore, RoomStore, StoreValue, SubscriptionId};
