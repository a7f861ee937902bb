// Sequence step - one timed note within an exercise

use serde::{Deserialize, Serialize};

use crate::pitch::Note;

/// A single timed note in a sequence.
///
/// `timestamp_ms` is relative to the start of the sequence (or, for
/// cycle-relative step lists, to the start of the cycle). The sounding
/// duration is kept in seconds to match the tone collaborator's contract.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SequenceStep {
    pub note: Note,

    /// Milliseconds from sequence start
    pub timestamp_ms: f64,

    /// Sounding duration in seconds
    pub duration_secs: f64,
}

impl SequenceStep {
    /// Creates a new step
    pub fn new(note: Note, timestamp_ms: f64, duration_secs: f64) -> Self {
        assert!(timestamp_ms >= 0.0, "Step timestamp must be >= 0");
        assert!(duration_secs > 0.0, "Step duration must be > 0");

        Self {
            note,
            timestamp_ms,
            duration_secs,
        }
    }

    /// Instant at which this step stops sounding, in ms from sequence start
    pub fn end_ms(&self) -> f64 {
        self.timestamp_ms + self.duration_secs * 1000.0
    }
}
