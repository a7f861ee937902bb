// Playback engine - drives timed note-firing for a sequence
// Two disciplines: continuous (straight through, optional loop + rest) and
// cycle-by-cycle (hold after each transposition awaiting a user command)

use std::time::{Duration, Instant};

use crate::audio::tone::TonePlayer;
use crate::exercise::sequence::Sequence;
use crate::messaging::command::TransportCommand;
use crate::playback::cycles::detect_cycles;
use crate::playback::state::{PlaybackPhase, PlaybackState};
use crate::playback::timer::TimerQueue;

/// Peak gain handed to the tone collaborator
pub const DEFAULT_VOLUME: f32 = 0.3;

/// Scheduling discipline for one play invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayMode {
    /// Play straight through; optionally restart after the rest gap
    Continuous { looped: bool },
    /// Play one transposition cycle, then wait for repeat/previous/next
    CycleByCycle { looped: bool },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaybackError {
    #[error("no sequence available to play")]
    NoSequence,
}

/// Internal timer events. Every event belongs to the run that scheduled
/// it; the queue's generation stamp keeps stale ones from firing.
#[derive(Debug, Clone, Copy)]
enum PlaybackEvent {
    NoteOn { step: usize },
    ClearNote { step: usize },
    SequenceEnd,
    RestOver,
    CycleEnd,
}

/// The playback state machine.
///
/// Single logical thread of control: the host calls transport methods and
/// polls [`tick`](Self::tick) with the current instant; nothing here
/// blocks or spawns. Starting any run cancels the previous one, so no two
/// runs ever mutate state concurrently.
pub struct PlaybackEngine {
    sequence: Option<Sequence>,
    state: PlaybackState,
    timers: TimerQueue<PlaybackEvent>,
    mode: PlayMode,
    run_start: Option<Instant>,

    /// Elapsed milliseconds already consumed before the current run
    /// started (non-zero only after a pause/resume)
    resume_offset_ms: f64,

    /// Step-index groups for the active cycle-by-cycle run
    cycles: Vec<Vec<usize>>,

    volume: f32,
}

impl PlaybackEngine {
    pub fn new() -> Self {
        Self {
            sequence: None,
            state: PlaybackState::idle(),
            timers: TimerQueue::new(),
            mode: PlayMode::Continuous { looped: false },
            run_start: None,
            resume_offset_ms: 0.0,
            cycles: Vec::new(),
            volume: DEFAULT_VOLUME,
        }
    }

    /// Replace the sequence wholesale. Any active run is stopped first.
    pub fn set_sequence(&mut self, sequence: Option<Sequence>) {
        self.stop();
        self.sequence = sequence;
    }

    pub fn sequence(&self) -> Option<&Sequence> {
        self.sequence.as_ref()
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    /// Start a run. Always cancels whatever was playing before.
    pub fn play(&mut self, mode: PlayMode, now: Instant) -> Result<(), PlaybackError> {
        if self.sequence.as_ref().is_none_or(Sequence::is_empty) {
            return Err(PlaybackError::NoSequence);
        }

        self.mode = mode;
        self.resume_offset_ms = 0.0;
        self.state.reset();

        match mode {
            PlayMode::Continuous { .. } => {
                self.cycles.clear();
                self.start_continuous_run(now);
            }
            PlayMode::CycleByCycle { .. } => {
                let steps = &self.sequence.as_ref().unwrap().steps;
                self.cycles = detect_cycles(steps);
                self.state.total_cycles = self.cycles.len();
                self.start_cycle(0, now);
            }
        }

        log::debug!("playback started: {:?}", mode);
        Ok(())
    }

    /// Pause a continuous run, keeping the consumed-time offset for
    /// resumption. No-op in any other state (cycle-by-cycle holds via
    /// its waiting state instead).
    pub fn pause(&mut self, _now: Instant) {
        let continuous = matches!(self.mode, PlayMode::Continuous { .. });
        if !self.state.phase.is_playing() || !continuous {
            return;
        }

        let total = self.total_duration_ms();
        self.resume_offset_ms = self.state.progress_percent / 100.0 * total;
        self.timers.cancel_all();
        self.state.phase = PlaybackPhase::Paused;
        log::debug!("paused at {:.0} ms", self.resume_offset_ms);
    }

    /// Resume a paused continuous run. Steps that already fell before the
    /// recorded offset are dropped, not replayed.
    pub fn resume(&mut self, now: Instant) {
        if !self.state.phase.is_paused() {
            return;
        }
        self.start_continuous_run(now);
    }

    /// Cancel everything and return to idle. Safe from any state.
    pub fn stop(&mut self) {
        self.timers.cancel_all();
        self.state.reset();
        self.run_start = None;
        self.resume_offset_ms = 0.0;
        self.cycles.clear();
    }

    /// Continuous mode: restart from the top. Cycle mode: advance to the
    /// next cycle when holding. No-op otherwise.
    pub fn skip(&mut self, now: Instant) {
        match self.mode {
            PlayMode::Continuous { .. } => {
                if self.state.phase.is_playing() || self.state.phase.is_paused() {
                    self.resume_offset_ms = 0.0;
                    let total_cycles = self.state.total_cycles;
                    self.state.reset();
                    self.state.total_cycles = total_cycles;
                    self.start_continuous_run(now);
                }
            }
            PlayMode::CycleByCycle { .. } => self.next_cycle(now),
        }
    }

    /// Replay the cycle that just finished
    pub fn repeat_cycle(&mut self, now: Instant) {
        if self.state.phase.is_waiting_for_next_cycle() {
            self.start_cycle(self.state.current_cycle, now);
        }
    }

    /// Go back one cycle; no-op at the first
    pub fn previous_cycle(&mut self, now: Instant) {
        if self.state.phase.is_waiting_for_next_cycle() && self.state.current_cycle > 0 {
            self.start_cycle(self.state.current_cycle - 1, now);
        }
    }

    /// Advance to the next cycle; wraps to the first when looping, ends
    /// the run otherwise
    pub fn next_cycle(&mut self, now: Instant) {
        if !self.state.phase.is_waiting_for_next_cycle() {
            return;
        }

        let next = self.state.current_cycle + 1;
        if next < self.state.total_cycles {
            self.start_cycle(next, now);
        } else if matches!(self.mode, PlayMode::CycleByCycle { looped: true }) {
            self.start_cycle(0, now);
        } else {
            self.stop();
        }
    }

    /// Dispatch one transport command. Only `Play` can fail (missing or
    /// empty sequence); every other command degrades to a no-op when it
    /// does not apply to the current phase.
    pub fn handle_command(
        &mut self,
        command: TransportCommand,
        now: Instant,
    ) -> Result<(), PlaybackError> {
        match command {
            TransportCommand::Play { mode } => self.play(mode, now)?,
            TransportCommand::Pause => self.pause(now),
            TransportCommand::Resume => self.resume(now),
            TransportCommand::Stop => self.stop(),
            TransportCommand::Skip => self.skip(now),
            TransportCommand::RepeatCycle => self.repeat_cycle(now),
            TransportCommand::PreviousCycle => self.previous_cycle(now),
            TransportCommand::NextCycle => self.next_cycle(now),
        }
        Ok(())
    }

    /// Fire every due timer event. The host drives this from its own
    /// loop; events are handled in deadline order.
    pub fn tick(&mut self, now: Instant, tone: &mut dyn TonePlayer) {
        while let Some(event) = self.timers.pop_due(now) {
            match event {
                PlaybackEvent::NoteOn { step } => self.fire_note(step, now, tone),
                PlaybackEvent::ClearNote { step } => {
                    if self.state.current_step == Some(step) {
                        self.state.current_note = None;
                    }
                }
                PlaybackEvent::SequenceEnd => self.finish_continuous_pass(now),
                PlaybackEvent::RestOver => {
                    self.resume_offset_ms = 0.0;
                    self.start_continuous_run(now);
                }
                PlaybackEvent::CycleEnd => {
                    self.state.phase = PlaybackPhase::WaitingForNextCycle;
                    self.state.current_step = None;
                    self.state.current_note = None;
                }
            }
        }
    }

    fn total_duration_ms(&self) -> f64 {
        self.sequence
            .as_ref()
            .map(|s| s.total_duration_ms)
            .unwrap_or(0.0)
    }

    /// Schedule a continuous pass over the whole step list, shifted back
    /// by the resume offset. Steps whose adjusted timestamp is negative
    /// have already sounded and are skipped.
    fn start_continuous_run(&mut self, now: Instant) {
        let offset = self.resume_offset_ms;
        let (timings, end_ms) = {
            let seq = self.sequence.as_ref().expect("run without sequence");
            let timings: Vec<(usize, f64)> = seq
                .steps
                .iter()
                .enumerate()
                .map(|(index, step)| (index, step.timestamp_ms))
                .collect();
            let end_ms = seq.last_step().map(|s| s.end_ms()).unwrap_or(0.0);
            (timings, end_ms)
        };

        self.timers.cancel_all();
        self.run_start = Some(now);
        self.state.phase = PlaybackPhase::Playing;

        for (index, timestamp_ms) in timings {
            let adjusted = timestamp_ms - offset;
            if adjusted < 0.0 {
                continue;
            }
            self.timers
                .schedule(now + millis(adjusted), PlaybackEvent::NoteOn { step: index });
        }
        self.timers
            .schedule(now + millis(end_ms - offset), PlaybackEvent::SequenceEnd);
    }

    /// Schedule one cycle, using the steps' own timestamps as offsets
    /// within the cycle.
    fn start_cycle(&mut self, cycle_index: usize, now: Instant) {
        let (timings, cycle_end_ms) = {
            let seq = self.sequence.as_ref().expect("run without sequence");
            let cycle = &self.cycles[cycle_index];
            let timings: Vec<(usize, f64)> = cycle
                .iter()
                .map(|&index| (index, seq.steps[index].timestamp_ms))
                .collect();
            let cycle_end_ms = cycle
                .last()
                .map(|&index| seq.steps[index].end_ms())
                .unwrap_or(0.0);
            (timings, cycle_end_ms)
        };

        self.timers.cancel_all();
        self.run_start = Some(now);
        self.state.phase = PlaybackPhase::Playing;
        self.state.current_cycle = cycle_index;
        self.state.current_step = None;
        self.state.current_note = None;
        self.state.progress_percent =
            (cycle_index + 1) as f64 / self.state.total_cycles as f64 * 100.0;

        for (index, timestamp_ms) in timings {
            self.timers
                .schedule(now + millis(timestamp_ms), PlaybackEvent::NoteOn { step: index });
        }
        self.timers
            .schedule(now + millis(cycle_end_ms), PlaybackEvent::CycleEnd);
    }

    fn fire_note(&mut self, index: usize, now: Instant, tone: &mut dyn TonePlayer) {
        let Some(seq) = self.sequence.as_ref() else {
            return;
        };
        let step = seq.steps[index];
        let waveform = seq.waveform;
        let total = seq.total_duration_ms;

        tone.play_tone(step.note, step.duration_secs, waveform, self.volume);

        self.state.current_step = Some(index);
        self.state.current_note = Some(step.note);

        if matches!(self.mode, PlayMode::Continuous { .. }) {
            if let Some(run_start) = self.run_start {
                if total > 0.0 {
                    let elapsed_ms = now.duration_since(run_start).as_secs_f64() * 1000.0
                        + self.resume_offset_ms;
                    self.state.progress_percent = (elapsed_ms / total * 100.0).clamp(0.0, 100.0);
                }
            }
        }

        // the sounding-note indicator clears on its own once the note ends
        self.timers.schedule(
            now + Duration::from_secs_f64(step.duration_secs),
            PlaybackEvent::ClearNote { step: index },
        );
    }

    /// One continuous pass is over: loop (immediately or after the rest
    /// gap) or fall back to idle.
    fn finish_continuous_pass(&mut self, now: Instant) {
        if !matches!(self.mode, PlayMode::Continuous { looped: true }) {
            self.stop();
            return;
        }

        let rest_secs = self
            .sequence
            .as_ref()
            .map(|s| s.rest_duration_secs)
            .unwrap_or(0.0);

        if rest_secs > 0.0 {
            // no step sounds during the rest
            self.state.current_step = None;
            self.state.current_note = None;
            self.timers.schedule(
                now + Duration::from_secs_f64(rest_secs),
                PlaybackEvent::RestOver,
            );
        } else {
            self.resume_offset_ms = 0.0;
            self.start_continuous_run(now);
        }
    }
}

impl Default for PlaybackEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn millis(ms: f64) -> Duration {
    Duration::from_secs_f64(ms.max(0.0) / 1000.0)
}
