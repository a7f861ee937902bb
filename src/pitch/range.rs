// Range helpers - chromatic enumeration and semitone distances

use super::note::Note;

/// Every chromatic note from `low` to `high`, inclusive at both ends.
/// Returns an empty list when `low` is above `high`.
pub fn notes_between(low: Note, high: Note) -> Vec<Note> {
    (low.pitch_position()..=high.pitch_position())
        .map(Note::from_pitch_position)
        .collect()
}

/// Signed semitone distance from `a` to `b` (positive when `b` is higher)
pub fn semitone_distance(a: Note, b: Note) -> i32 {
    b.pitch_position() - a.pitch_position()
}
