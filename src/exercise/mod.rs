// Exercise module - Sequence data model, transposition generator and
// instructor-side authoring

pub mod builder;
pub mod generator;
pub mod sequence;
pub mod step;

pub use builder::{ExerciseConfig, ExerciseError, RealtimeRecorder, StepGrid};
pub use generator::{generate_cycle_relative_steps, generate_transposed_steps};
pub use sequence::{Sequence, TranspositionDirection, Waveform};
pub use step::SequenceStep;
