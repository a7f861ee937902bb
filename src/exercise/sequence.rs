// Sequence - the immutable exercise artifact transmitted to the student

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::exercise::step::SequenceStep;
use crate::pitch::Note;

/// Oscillator waveform used when sounding the exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

impl Default for Waveform {
    fn default() -> Self {
        Waveform::Sine
    }
}

/// Whether the exercise walks the vocal range once or up-and-back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TranspositionDirection {
    OneWay,
    BothWays,
}

impl Default for TranspositionDirection {
    fn default() -> Self {
        TranspositionDirection::OneWay
    }
}

/// A complete vocal exercise, created once per transmit.
///
/// The step list is the fully transposed walk across the singer's range.
/// Consumers treat the whole value as read-only; a new transmit replaces
/// it wholesale rather than mutating fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sequence {
    pub id: Uuid,
    pub steps: Vec<SequenceStep>,
    pub root_note: Note,
    pub min_note: Note,
    pub max_note: Note,
    pub waveform: Waveform,
    pub bpm: f64,

    /// Duration of the full step list in milliseconds
    pub total_duration_ms: f64,

    /// Silence between loop repetitions, in seconds
    pub rest_duration_secs: f64,

    pub direction: TranspositionDirection,

    /// Number of slots in the grid (or captured notes) the exercise was
    /// authored from
    pub step_count: usize,
}

impl Sequence {
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn last_step(&self) -> Option<&SequenceStep> {
        self.steps.last()
    }
}
