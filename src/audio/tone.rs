// Tone collaborator seam
// The playback engine fires tones through this trait and never awaits them

use crate::exercise::sequence::Waveform;
use crate::pitch::Note;

/// Fire-and-forget tone sink invoked by the playback engine.
///
/// Implementations are expected to return quickly; actual sound scheduling
/// is their own concern. The engine does not observe completion.
pub trait TonePlayer {
    fn play_tone(&mut self, note: Note, duration_secs: f64, waveform: Waveform, volume: f32);
}

/// Discards every tone. Useful for silent hosts and tests that only care
/// about scheduling behavior.
#[derive(Debug, Default)]
pub struct NullTonePlayer;

impl TonePlayer for NullTonePlayer {
    fn play_tone(&mut self, note: Note, duration_secs: f64, _waveform: Waveform, _volume: f32) {
        log::trace!("tone dropped: {note} for {duration_secs}s");
    }
}
