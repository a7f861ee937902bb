// Timer queue - delayed, cancelable one-shot events on a monotonic clock
// One logical thread: the host polls with `pop_due`, nothing blocks

use std::collections::BinaryHeap;
use std::time::Instant;

/// Play-run identifier. Bumping it invalidates every pending event, so a
/// stale callback from a previous run can never touch current state.
pub type Generation = u64;

struct Entry<E> {
    fire_at: Instant,
    /// Insertion order, breaks ties so equal deadlines fire FIFO
    seq: u64,
    generation: Generation,
    event: E,
}

impl<E> PartialEq for Entry<E> {
    fn eq(&self, other: &Self) -> bool {
        self.fire_at == other.fire_at && self.seq == other.seq
    }
}

impl<E> Eq for Entry<E> {}

impl<E> Ord for Entry<E> {
    // Reversed so the BinaryHeap pops the earliest deadline first
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .fire_at
            .cmp(&self.fire_at)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<E> PartialOrd for Entry<E> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-heap of pending one-shot events for the active play run.
pub struct TimerQueue<E> {
    entries: BinaryHeap<Entry<E>>,
    next_seq: u64,
    generation: Generation,
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self {
            entries: BinaryHeap::new(),
            next_seq: 0,
            generation: 0,
        }
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Cancel every pending event and start a new run.
    ///
    /// Entries are dropped eagerly; the generation stamp is still checked
    /// on pop as a second line against anything that survives.
    pub fn cancel_all(&mut self) -> Generation {
        self.entries.clear();
        self.generation += 1;
        self.generation
    }

    /// Schedule an event for the current run
    pub fn schedule(&mut self, fire_at: Instant, event: E) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Entry {
            fire_at,
            seq,
            generation: self.generation,
            event,
        });
    }

    /// Pop the next event whose deadline has passed, skipping stale ones
    pub fn pop_due(&mut self, now: Instant) -> Option<E> {
        while let Some(head) = self.entries.peek() {
            if head.fire_at > now {
                return None;
            }
            let entry = self.entries.pop().unwrap();
            if entry.generation == self.generation {
                return Some(entry.event);
            }
            // stale entry from a cancelled run, drop it
        }
        None
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}
