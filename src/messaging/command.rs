// Commandes de transport - Communication UI → moteur de lecture

use crate::playback::engine::PlayMode;

/// Transport commands entering the playback state machine.
///
/// A command that is invalid for the current phase is silently ignored,
/// never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportCommand {
    Play { mode: PlayMode },
    Pause,
    Resume,
    Stop,
    Skip,
    RepeatCycle,
    PreviousCycle,
    NextCycle,
}
