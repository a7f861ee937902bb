// Playback state - the single struct mutated by the engine
// Consolidates what used to be scattered view flags into one state machine

use crate::pitch::Note;

/// Transport phase of the playback state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackPhase {
    Idle,
    Playing,
    Paused,
    WaitingForNextCycle,
}

impl PlaybackPhase {
    /// Check if timers are currently live
    pub fn is_playing(&self) -> bool {
        matches!(self, PlaybackPhase::Playing)
    }

    pub fn is_paused(&self) -> bool {
        matches!(self, PlaybackPhase::Paused)
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, PlaybackPhase::Idle)
    }

    /// Check if the engine is holding between cycles, awaiting a
    /// repeat/previous/next command
    pub fn is_waiting_for_next_cycle(&self) -> bool {
        matches!(self, PlaybackPhase::WaitingForNextCycle)
    }
}

impl Default for PlaybackPhase {
    fn default() -> Self {
        PlaybackPhase::Idle
    }
}

/// Ephemeral playback state, owned and mutated exclusively by the engine.
///
/// Reset on stop and whenever the sequence is replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub phase: PlaybackPhase,

    /// Index of the step most recently fired, if any
    pub current_step: Option<usize>,

    /// Note currently sounding (cleared once its duration elapses)
    pub current_note: Option<Note>,

    /// Continuous mode: elapsed/total. Cycle mode: cycles completed/total.
    pub progress_percent: f64,

    /// Cycle-by-cycle mode only
    pub current_cycle: usize,
    pub total_cycles: usize,
}

impl PlaybackState {
    pub fn idle() -> Self {
        Self {
            phase: PlaybackPhase::Idle,
            current_step: None,
            current_note: None,
            progress_percent: 0.0,
            current_cycle: 0,
            total_cycles: 0,
        }
    }

    /// Return every field to its idle default
    pub fn reset(&mut self) {
        *self = Self::idle();
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::idle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_predicates() {
        assert!(PlaybackPhase::Idle.is_idle());
        assert!(PlaybackPhase::Playing.is_playing());
        assert!(PlaybackPhase::Paused.is_paused());
        assert!(PlaybackPhase::WaitingForNextCycle.is_waiting_for_next_cycle());
        assert!(!PlaybackPhase::Paused.is_playing());
    }

    #[test]
    fn test_reset_returns_to_idle_defaults() {
        let mut state = PlaybackState {
            phase: PlaybackPhase::Playing,
            current_step: Some(3),
            current_note: Some("C4".parse().unwrap()),
            progress_percent: 42.0,
            current_cycle: 2,
            total_cycles: 8,
        };

        state.reset();
        assert_eq!(state, PlaybackState::idle());
        assert_eq!(state.current_step, None);
    }
}
