// Room state store - injected get/set/subscribe interface
// Values are whole JSON documents; a set replaces the previous value,
// there is no field-level merge

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub type StoreValue = serde_json::Value;
pub type SubscriptionId = u64;

/// Change callback, invoked with the new value after every set
pub type Subscriber = Arc<dyn Fn(&StoreValue) + Send + Sync>;

/// Key-value mechanism shared by everyone in a room.
///
/// Reads are eventually-consistent snapshots; writes replace the full
/// value. The real backend lives outside this crate — cores are written
/// against this trait so they can be tested without one.
pub trait RoomStore {
    fn get(&self, room: &str, key: &str) -> Option<StoreValue>;
    fn set(&self, room: &str, key: &str, value: StoreValue);
    fn subscribe(&self, room: &str, key: &str, subscriber: Subscriber) -> SubscriptionId;
    fn unsubscribe(&self, id: SubscriptionId);
}

struct Subscription {
    room: String,
    key: String,
    subscriber: Subscriber,
}

#[derive(Default)]
struct Inner {
    values: HashMap<(String, String), StoreValue>,
    subscriptions: HashMap<SubscriptionId, Subscription>,
    next_id: SubscriptionId,
}

/// In-memory store backend for tests and single-process hosts
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RoomStore for MemoryStore {
    fn get(&self, room: &str, key: &str) -> Option<StoreValue> {
        let inner = self.inner.lock().unwrap();
        inner.values.get(&(room.to_string(), key.to_string())).cloned()
    }

    fn set(&self, room: &str, key: &str, value: StoreValue) {
        // collect matching subscribers under the lock, notify outside it,
        // so a subscriber may touch the store again
        let subscribers: Vec<Subscriber> = {
            let mut inner = self.inner.lock().unwrap();
            inner
                .values
                .insert((room.to_string(), key.to_string()), value.clone());
            inner
                .subscriptions
                .values()
                .filter(|s| s.room == room && s.key == key)
                .map(|s| Arc::clone(&s.subscriber))
                .collect()
        };

        log::debug!("store set: {room}/{key} ({} subscribers)", subscribers.len());
        for subscriber in subscribers {
            subscriber(&value);
        }
    }

    fn subscribe(&self, room: &str, key: &str, subscriber: Subscriber) -> SubscriptionId {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscriptions.insert(
            id,
            Subscription {
                room: room.to_string(),
                key: key.to_string(),
                subscriber,
            },
        );
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        let mut inner = self.inner.lock().unwrap();
        inner.subscriptions.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_get_returns_latest_full_value() {
        let store = MemoryStore::new();

        assert_eq!(store.get("room-1", "settings"), None);

        store.set("room-1", "settings", json!({"bpm": 120}));
        store.set("room-1", "settings", json!({"bpm": 90}));

        assert_eq!(store.get("room-1", "settings"), Some(json!({"bpm": 90})));
    }

    #[test]
    fn test_rooms_are_isolated() {
        let store = MemoryStore::new();

        store.set("room-1", "k", json!(1));
        store.set("room-2", "k", json!(2));

        assert_eq!(store.get("room-1", "k"), Some(json!(1)));
        assert_eq!(store.get("room-2", "k"), Some(json!(2)));
    }

    #[test]
    fn test_subscribers_see_matching_sets_only() {
        let store = MemoryStore::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let hits_clone = Arc::clone(&hits);
        store.subscribe(
            "room-1",
            "sequence",
            Arc::new(move |_| {
                hits_clone.fetch_add(1, Ordering::SeqCst);
            }),
        );

        store.set("room-1", "sequence", json!("a"));
        store.set("room-1", "other", json!("b"));
        store.set("room-2", "sequence", json!("c"));

        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let store = MemoryStore::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let hits_clone = Arc::clone(&hits);
        let id = store.subscribe(
            "room-1",
            "k",
            Arc::new(move |_| {
                hits_clone.fetch_add(1, Ordering::SeqCst);
            }),
        );

        store.set("room-1", "k", json!(1));
        store.unsubscribe(id);
        store.set("room-1", "k", json!(2));

        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_subscriber_may_reenter_the_store() {
        let store = Arc::new(MemoryStore::new());

        let store_clone = Arc::clone(&store);
        store.subscribe(
            "room-1",
            "ping",
            Arc::new(move |value| {
                store_clone.set("room-1", "pong", value.clone());
            }),
        );

        store.set("room-1", "ping", json!(42));
        assert_eq!(store.get("room-1", "pong"), Some(json!(42)));
    }
}
