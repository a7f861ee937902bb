//! Edge case tests and robustness validation
//!
//! Degenerate ranges, malformed notes, empty patterns and hostile command
//! orderings must degrade to no-ops or typed errors, never panic.

use std::time::{Duration, Instant};

use vocal_trainer::exercise::builder::{ExerciseConfig, ExerciseError, StepGrid};
use vocal_trainer::exercise::generator::generate_transposed_steps;
use vocal_trainer::exercise::sequence::TranspositionDirection;
use vocal_trainer::exercise::step::SequenceStep;
use vocal_trainer::pitch::{notes_between, Note, NoteError};
use vocal_trainer::playback::engine::{PlayMode, PlaybackEngine};
use vocal_trainer::NullTonePlayer;

fn note(s: &str) -> Note {
    s.parse().unwrap()
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn test_malformed_notes_give_typed_errors() {
    for input in ["", "X3", "C#", "Cb4", "c3", "C4 ", "4C"] {
        match input.parse::<Note>() {
            Err(NoteError::InvalidFormat(s)) => assert_eq!(s, input),
            Ok(n) => panic!("{:?} parsed as {}", input, n),
        }
    }
}

#[test]
fn test_generator_with_root_far_outside_range() {
    // root two octaves above the range: offsets are strongly negative
    let base = vec![SequenceStep::new(note("C5"), 0.0, 0.3)];
    let steps = generate_transposed_steps(
        &base,
        note("C5"),
        note("C3"),
        note("E3"),
        TranspositionDirection::OneWay,
    );

    assert_eq!(steps.len(), 5);
    assert_eq!(steps[0].note.to_string(), "C3");
    assert_eq!(steps[4].note.to_string(), "E3");
}

#[test]
fn test_generator_inverted_range_is_empty_not_panicking() {
    let base = vec![SequenceStep::new(note("C3"), 0.0, 0.3)];
    for direction in [TranspositionDirection::OneWay, TranspositionDirection::BothWays] {
        let steps =
            generate_transposed_steps(&base, note("C3"), note("E5"), note("E3"), direction);
        assert!(steps.is_empty());
    }
}

#[test]
fn test_builder_surfaces_validation_before_generation() {
    let grid = StepGrid::new(120.0);

    // untouched grid: no notes at all
    let err = ExerciseConfig::default()
        .transmit(&grid.base_steps(), grid.slot_count())
        .unwrap_err();
    assert_eq!(err, ExerciseError::EmptyPattern);

    // inverted range is rejected up front, not turned into silence
    let mut grid = grid;
    grid.set_slot(0, note("C3"));
    let config = ExerciseConfig {
        min_note: note("E5"),
        max_note: note("E3"),
        ..ExerciseConfig::default()
    };
    let err = config
        .transmit(&grid.base_steps(), grid.slot_count())
        .unwrap_err();
    assert!(matches!(err, ExerciseError::InvertedRange { .. }));
}

#[test]
fn test_transport_commands_on_empty_engine_never_panic() {
    let mut engine = PlaybackEngine::new();
    let mut player = NullTonePlayer;
    let t0 = Instant::now();

    engine.pause(t0);
    engine.resume(t0);
    engine.stop();
    engine.skip(t0);
    engine.repeat_cycle(t0);
    engine.previous_cycle(t0);
    engine.next_cycle(t0);
    engine.tick(t0 + ms(1_000), &mut player);

    assert!(engine.state().phase.is_idle());
}

#[test]
fn test_rapid_restart_storm_keeps_a_single_run() {
    let mut grid = StepGrid::new(120.0);
    grid.set_slot(0, note("C3"));
    let sequence = ExerciseConfig {
        root_note: note("C3"),
        min_note: note("C3"),
        max_note: note("E3"),
        ..ExerciseConfig::default()
    }
    .transmit(&grid.base_steps(), 16)
    .unwrap();

    let mut engine = PlaybackEngine::new();
    engine.set_sequence(Some(sequence));

    // hammer play: every call must invalidate the run before it
    let t0 = Instant::now();
    for i in 0..20 {
        engine
            .play(PlayMode::Continuous { looped: false }, t0 + ms(i))
            .unwrap();
    }

    struct Counter(usize);
    impl vocal_trainer::TonePlayer for Counter {
        fn play_tone(
            &mut self,
            _note: Note,
            _duration: f64,
            _waveform: vocal_trainer::Waveform,
            _volume: f32,
        ) {
            self.0 += 1;
        }
    }

    let mut counter = Counter(0);
    engine.tick(t0 + ms(2_000), &mut counter);

    // exactly one run's worth of notes, from the last play call
    assert_eq!(counter.0, 5);
    assert!(engine.state().phase.is_idle());
}

#[test]
fn test_notes_between_span_is_consistent_with_transposition() {
    let notes = notes_between(note("A2"), note("A5"));
    assert_eq!(notes.len(), 37);

    for (i, n) in notes.iter().enumerate() {
        assert_eq!(*n, note("A2").transpose(i as i32));
    }
}

#[test]
fn test_single_slot_grid() {
    let mut grid = StepGrid::with_slot_count(1, 240.0);
    grid.set_slot(0, note("G4"));

    let steps = grid.base_steps();
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].timestamp_ms, 0.0);
    // 240 BPM: sixteenth = 62.5 ms
    assert_eq!(grid.slot_duration_ms(), 62.5);
}
