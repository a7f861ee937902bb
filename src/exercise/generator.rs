// Transposition generator - expands a base pattern into the full exercise
// Walks the pattern semitone by semitone across the singer's range

use crate::exercise::sequence::TranspositionDirection;
use crate::exercise::step::SequenceStep;
use crate::pitch::{semitone_distance, Note};

/// The ordered semitone offsets visited by the exercise.
///
/// One-way climbs `start..=end`. Both-ways climbs the same run, then walks
/// back down through the interior offsets, so both endpoints are visited
/// exactly once and every interior offset exactly twice.
pub fn transposition_offsets(
    start: i32,
    end: i32,
    direction: TranspositionDirection,
) -> Vec<i32> {
    let mut offsets: Vec<i32> = (start..=end).collect();

    if direction == TranspositionDirection::BothWays {
        let mut i = end - 1;
        while i > start {
            offsets.push(i);
            i -= 1;
        }
    }

    offsets
}

/// Duration of one pass over the base pattern, in milliseconds
pub fn base_cycle_duration_ms(base: &[SequenceStep]) -> f64 {
    base.last().map(SequenceStep::end_ms).unwrap_or(0.0)
}

/// Generate the full exercise with absolute timestamps.
///
/// Each visited offset contributes one cycle: every base step transposed by
/// the offset, shifted in time by `cycle_index * base_cycle_duration`. The
/// output is globally non-decreasing in timestamp. Empty `base` yields an
/// empty output; validating against that is the caller's concern.
pub fn generate_transposed_steps(
    base: &[SequenceStep],
    root: Note,
    range_min: Note,
    range_max: Note,
    direction: TranspositionDirection,
) -> Vec<SequenceStep> {
    expand(base, root, range_min, range_max, direction, true)
}

/// Generate the full exercise with cycle-relative timestamps.
///
/// Same walk as [`generate_transposed_steps`], but each cycle keeps the
/// base pattern's own timestamps. This is the form consumed by
/// cycle-by-cycle playback, whose boundary detection relies on the
/// timestamp resetting at the start of every cycle.
pub fn generate_cycle_relative_steps(
    base: &[SequenceStep],
    root: Note,
    range_min: Note,
    range_max: Note,
    direction: TranspositionDirection,
) -> Vec<SequenceStep> {
    expand(base, root, range_min, range_max, direction, false)
}

fn expand(
    base: &[SequenceStep],
    root: Note,
    range_min: Note,
    range_max: Note,
    direction: TranspositionDirection,
    absolute_timestamps: bool,
) -> Vec<SequenceStep> {
    let start = semitone_distance(root, range_min);
    let end = semitone_distance(root, range_max);
    let offsets = transposition_offsets(start, end, direction);

    let cycle_duration = base_cycle_duration_ms(base);
    let mut steps = Vec::with_capacity(offsets.len() * base.len());

    for (cycle_index, &offset) in offsets.iter().enumerate() {
        for step in base {
            let timestamp_ms = if absolute_timestamps {
                cycle_index as f64 * cycle_duration + step.timestamp_ms
            } else {
                step.timestamp_ms
            };

            steps.push(SequenceStep {
                note: step.note.transpose(offset),
                timestamp_ms,
                duration_secs: step.duration_secs,
            });
        }
    }

    steps
}
