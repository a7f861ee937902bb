// Exercise authoring - step grid, real-time capture and transmit validation
// The instructor-side path that turns a base pattern into a Sequence

use std::time::Instant;

use uuid::Uuid;

use crate::exercise::generator::{
    base_cycle_duration_ms, generate_cycle_relative_steps, generate_transposed_steps,
    transposition_offsets,
};
use crate::exercise::sequence::{Sequence, TranspositionDirection, Waveform};
use crate::exercise::step::SequenceStep;
use crate::pitch::{semitone_distance, Note};

/// Default number of slots in the step grid
pub const DEFAULT_SLOT_COUNT: usize = 16;

/// Note duration used for grid slots and captured key presses, in seconds
pub const DEFAULT_NOTE_DURATION_SECS: f64 = 0.3;

/// Validation errors surfaced to the instructor before generation runs
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExerciseError {
    #[error("cannot transmit an empty pattern")]
    EmptyPattern,

    #[error("vocal range is inverted: {min} is above {max}")]
    InvertedRange { min: Note, max: Note },
}

/// Step-grid authoring mode: a fixed number of sixteenth-note slots,
/// each empty or holding one note.
#[derive(Debug, Clone)]
pub struct StepGrid {
    slots: Vec<Option<Note>>,
    bpm: f64,
}

impl StepGrid {
    /// Create a grid with the default slot count
    pub fn new(bpm: f64) -> Self {
        Self::with_slot_count(DEFAULT_SLOT_COUNT, bpm)
    }

    /// Create a grid with a custom slot count
    pub fn with_slot_count(slot_count: usize, bpm: f64) -> Self {
        assert!(slot_count > 0, "Grid must have at least one slot");
        assert!(bpm > 0.0, "BPM must be > 0");

        Self {
            slots: vec![None; slot_count],
            bpm,
        }
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[Option<Note>] {
        &self.slots
    }

    pub fn bpm(&self) -> f64 {
        self.bpm
    }

    pub fn set_bpm(&mut self, bpm: f64) {
        assert!(bpm > 0.0, "BPM must be > 0");
        self.bpm = bpm;
    }

    /// Assign a note to a slot (replacing any previous one)
    pub fn set_slot(&mut self, index: usize, note: Note) {
        self.slots[index] = Some(note);
    }

    /// Empty a single slot
    pub fn clear_slot(&mut self, index: usize) {
        self.slots[index] = None;
    }

    /// Empty the whole grid
    pub fn clear(&mut self) {
        self.slots.fill(None);
    }

    /// Duration of one slot in milliseconds: a sixteenth note at the
    /// grid's tempo
    pub fn slot_duration_ms(&self) -> f64 {
        (60.0 / self.bpm) * 1000.0 / 4.0
    }

    /// The base pattern: filled slots in grid order, empty slots skipped
    pub fn base_steps(&self) -> Vec<SequenceStep> {
        let slot_duration = self.slot_duration_ms();

        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| {
                slot.map(|note| SequenceStep {
                    note,
                    timestamp_ms: index as f64 * slot_duration,
                    duration_secs: DEFAULT_NOTE_DURATION_SECS,
                })
            })
            .collect()
    }
}

/// Real-time authoring mode: key presses captured with timestamps
/// relative to when recording started.
#[derive(Debug, Default)]
pub struct RealtimeRecorder {
    record_start: Option<Instant>,
    steps: Vec<SequenceStep>,
}

impl RealtimeRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new capture, discarding any previous one
    pub fn start(&mut self, now: Instant) {
        self.steps.clear();
        self.record_start = Some(now);
    }

    pub fn is_recording(&self) -> bool {
        self.record_start.is_some()
    }

    /// Capture a key press. Ignored when not recording; returns whether
    /// the press was captured.
    pub fn note_pressed(&mut self, note: Note, now: Instant) -> bool {
        let Some(start) = self.record_start else {
            return false;
        };

        let timestamp_ms = now.duration_since(start).as_secs_f64() * 1000.0;
        self.steps.push(SequenceStep {
            note,
            timestamp_ms,
            duration_secs: DEFAULT_NOTE_DURATION_SECS,
        });
        true
    }

    /// Finish the capture, returning how many notes were recorded
    pub fn stop(&mut self) -> usize {
        self.record_start = None;
        self.steps.len()
    }

    pub fn steps(&self) -> &[SequenceStep] {
        &self.steps
    }
}

/// Exercise parameters chosen by the instructor
#[derive(Debug, Clone)]
pub struct ExerciseConfig {
    pub root_note: Note,
    pub min_note: Note,
    pub max_note: Note,
    pub waveform: Waveform,
    pub bpm: f64,
    pub direction: TranspositionDirection,
    pub rest_duration_secs: f64,
}

impl Default for ExerciseConfig {
    fn default() -> Self {
        Self {
            root_note: Note::parse_or_default("C3"),
            min_note: Note::parse_or_default("E3"),
            max_note: Note::parse_or_default("E5"),
            waveform: Waveform::Sine,
            bpm: 120.0,
            direction: TranspositionDirection::OneWay,
            rest_duration_secs: 0.0,
        }
    }
}

impl ExerciseConfig {
    /// Build a transmittable sequence with absolute step timestamps,
    /// suited to continuous playback.
    pub fn transmit(
        &self,
        base: &[SequenceStep],
        step_count: usize,
    ) -> Result<Sequence, ExerciseError> {
        self.assemble(base, step_count, false)
    }

    /// Build a transmittable sequence whose step timestamps reset at every
    /// transposition cycle, suited to cycle-by-cycle playback.
    pub fn transmit_cycle_aware(
        &self,
        base: &[SequenceStep],
        step_count: usize,
    ) -> Result<Sequence, ExerciseError> {
        self.assemble(base, step_count, true)
    }

    fn assemble(
        &self,
        base: &[SequenceStep],
        step_count: usize,
        cycle_relative: bool,
    ) -> Result<Sequence, ExerciseError> {
        if base.is_empty() {
            return Err(ExerciseError::EmptyPattern);
        }
        if self.min_note > self.max_note {
            return Err(ExerciseError::InvertedRange {
                min: self.min_note,
                max: self.max_note,
            });
        }

        let steps = if cycle_relative {
            generate_cycle_relative_steps(
                base,
                self.root_note,
                self.min_note,
                self.max_note,
                self.direction,
            )
        } else {
            generate_transposed_steps(
                base,
                self.root_note,
                self.min_note,
                self.max_note,
                self.direction,
            )
        };

        let cycle_count = transposition_offsets(
            semitone_distance(self.root_note, self.min_note),
            semitone_distance(self.root_note, self.max_note),
            self.direction,
        )
        .len();
        let total_duration_ms = cycle_count as f64 * base_cycle_duration_ms(base);

        let sequence = Sequence {
            id: Uuid::new_v4(),
            steps,
            root_note: self.root_note,
            min_note: self.min_note,
            max_note: self.max_note,
            waveform: self.waveform,
            bpm: self.bpm,
            total_duration_ms,
            rest_duration_secs: self.rest_duration_secs,
            direction: self.direction,
            step_count,
        };

        log::info!(
            "transmitting sequence {} ({} steps over {} cycles, {:.0} ms)",
            sequence.id,
            sequence.steps.len(),
            cycle_count,
            sequence.total_duration_ms
        );

        Ok(sequence)
    }
}
