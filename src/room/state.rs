// Typed room snapshots and the well-known key scheme
// Wire field names stay camelCase for compatibility with existing rooms

use serde::{Deserialize, Serialize};

use crate::exercise::sequence::{Sequence, Waveform};
use crate::playback::state::PlaybackState;
use crate::room::store::RoomStore;

pub const SEQUENCE_KEY: &str = "current-sequence";
pub const STUDENT_STATE_KEY: &str = "student-state";
pub const INSTRUCTOR_STATE_KEY: &str = "instructor-state";
pub const PRESENCE_KEY: &str = "presence";
pub const SETTINGS_KEY: &str = "settings";

/// What the student's playback looks like right now, mirrored into the
/// room so the instructor can follow along
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPlaybackState {
    pub is_playing: bool,
    pub is_paused: bool,
    /// -1 when no step is active, matching the wire format
    pub current_step: i64,
    pub progress: f64,
    pub timestamp: u64,
}

impl StudentPlaybackState {
    pub fn snapshot(state: &PlaybackState, timestamp: u64) -> Self {
        Self {
            is_playing: state.phase.is_playing(),
            is_paused: state.phase.is_paused(),
            current_step: state.current_step.map(|i| i as i64).unwrap_or(-1),
            progress: state.progress_percent,
            timestamp,
        }
    }
}

/// The instructor's authoring state, mirrored for the student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructorState {
    pub is_recording: bool,
    pub is_playing: bool,
    pub current_step: i64,
    pub timestamp: u64,
}

/// Room-wide settings everyone should agree on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSettings {
    pub bpm: f64,
    pub waveform: Waveform,
}

pub fn publish_sequence(
    store: &dyn RoomStore,
    room: &str,
    sequence: &Sequence,
) -> serde_json::Result<()> {
    store.set(room, SEQUENCE_KEY, serde_json::to_value(sequence)?);
    Ok(())
}

pub fn load_sequence(store: &dyn RoomStore, room: &str) -> Option<Sequence> {
    store
        .get(room, SEQUENCE_KEY)
        .and_then(|value| serde_json::from_value(value).ok())
}

pub fn publish_student_state(
    store: &dyn RoomStore,
    room: &str,
    snapshot: &StudentPlaybackState,
) -> serde_json::Result<()> {
    store.set(room, STUDENT_STATE_KEY, serde_json::to_value(snapshot)?);
    Ok(())
}

pub fn load_student_state(store: &dyn RoomStore, room: &str) -> Option<StudentPlaybackState> {
    store
        .get(room, STUDENT_STATE_KEY)
        .and_then(|value| serde_json::from_value(value).ok())
}

pub fn publish_instructor_state(
    store: &dyn RoomStore,
    room: &str,
    snapshot: &InstructorState,
) -> serde_json::Result<()> {
    store.set(room, INSTRUCTOR_STATE_KEY, serde_json::to_value(snapshot)?);
    Ok(())
}

pub fn load_instructor_state(store: &dyn RoomStore, room: &str) -> Option<InstructorState> {
    store
        .get(room, INSTRUCTOR_STATE_KEY)
        .and_then(|value| serde_json::from_value(value).ok())
}

pub fn publish_settings(
    store: &dyn RoomStore,
    room: &str,
    settings: &RoomSettings,
) -> serde_json::Result<()> {
    store.set(room, SETTINGS_KEY, serde_json::to_value(settings)?);
    Ok(())
}

pub fn load_settings(store: &dyn RoomStore, room: &str) -> Option<RoomSettings> {
    store
        .get(room, SETTINGS_KEY)
        .and_then(|value| serde_json::from_value(value).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::state::PlaybackPhase;

    #[test]
    fn test_student_snapshot_maps_missing_step_to_minus_one() {
        let mut state = PlaybackState::idle();
        let snap = StudentPlaybackState::snapshot(&state, 1_000);

        assert!(!snap.is_playing);
        assert_eq!(snap.current_step, -1);

        state.phase = PlaybackPhase::Playing;
        state.current_step = Some(4);
        state.progress_percent = 37.5;
        let snap = StudentPlaybackState::snapshot(&state, 2_000);

        assert!(snap.is_playing);
        assert_eq!(snap.current_step, 4);
        assert_eq!(snap.progress, 37.5);
    }

    #[test]
    fn test_snapshot_wire_format_is_camel_case() {
        let snap = StudentPlaybackState {
            is_playing: true,
            is_paused: false,
            current_step: 2,
            progress: 50.0,
            timestamp: 123,
        };
        let json = serde_json::to_value(&snap).unwrap();

        assert!(json.get("isPlaying").is_some());
        assert!(json.get("currentStep").is_some());
        assert!(json.get("is_playing").is_none());
    }

    #[test]
    fn test_instructor_state_round_trip_through_store() {
        use crate::room::store::MemoryStore;

        let store = MemoryStore::new();
        let snapshot = InstructorState {
            is_recording: true,
            is_playing: false,
            current_step: -1,
            timestamp: 55,
        };

        publish_instructor_state(&store, "room-3", &snapshot).unwrap();
        assert_eq!(load_instructor_state(&store, "room-3"), Some(snapshot));
    }

    #[test]
    fn test_settings_round_trip_through_store() {
        use crate::room::store::MemoryStore;

        let store = MemoryStore::new();
        let settings = RoomSettings {
            bpm: 96.0,
            waveform: Waveform::Triangle,
        };

        publish_settings(&store, "room-7", &settings).unwrap();
        assert_eq!(load_settings(&store, "room-7"), Some(settings));
        assert_eq!(load_settings(&store, "room-8"), None);
    }
}
