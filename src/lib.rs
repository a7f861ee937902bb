// Vocal Trainer - Library exports for tests and benchmarks

pub mod audio;
pub mod exercise;
pub mod messaging;
pub mod pitch;
pub mod playback;
pub mod room;

// Re-export commonly used types for convenience
pub use audio::synth::{BufferedTonePlayer, ToneSynth, WaveOscillator};
pub use audio::tone::{NullTonePlayer, TonePlayer};
pub use exercise::builder::{ExerciseConfig, ExerciseError, RealtimeRecorder, StepGrid};
pub use exercise::generator::generate_transposed_steps;
pub use exercise::sequence::{Sequence, TranspositionDirection, Waveform};
pub use exercise::step::SequenceStep;
pub use messaging::channels::{create_command_channel, create_notification_channel};
pub use messaging::command::TransportCommand;
pub use pitch::note::{Note, NoteError};
pub use playback::engine::{PlayMode, PlaybackEngine, PlaybackError};
pub use playback::state::{PlaybackPhase, PlaybackState};
pub use room::store::{MemoryStore, RoomStore};
