// Playback module - timed note-firing for generated exercises
// Timer queue, cycle partitioning and the transport state machine

pub mod cycles;
pub mod engine;
pub mod state;
pub mod timer;

pub use cycles::detect_cycles;
pub use engine::{PlayMode, PlaybackEngine, PlaybackError};
pub use state::{PlaybackPhase, PlaybackState};
pub use timer::TimerQueue;
