// Pitch module - Note names, pitch positions and frequencies
// Pure arithmetic shared by the exercise generator and the playback engine

pub mod note;
pub mod range;

pub use note::{Note, NoteError};
pub use range::{notes_between, semitone_distance};
