// Oscillateurs - Générateurs de formes d'onde
// Renders exercise tones as sample buffers: phase-accumulator oscillator
// plus the attack/decay gain envelope applied to every note

use std::f32::consts::PI;

use crate::audio::tone::TonePlayer;
use crate::exercise::sequence::Waveform;
use crate::pitch::Note;

pub struct WaveOscillator {
    waveform: Waveform,
    phase: f32,
    phase_increment: f32,
    sample_rate: f32,
}

impl WaveOscillator {
    pub fn new(waveform: Waveform, sample_rate: f32) -> Self {
        Self {
            waveform,
            phase: 0.0,
            phase_increment: 0.0,
            sample_rate,
        }
    }

    pub fn set_frequency(&mut self, freq: f32) {
        self.phase_increment = freq / self.sample_rate;
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    pub fn next_sample(&mut self) -> f32 {
        let sample = match self.waveform {
            Waveform::Sine => (self.phase * 2.0 * PI).sin(),
            Waveform::Square => {
                if self.phase < 0.5 { 1.0 } else { -1.0 }
            }
            Waveform::Sawtooth => (self.phase * 2.0) - 1.0,
            Waveform::Triangle => {
                if self.phase < 0.5 {
                    (self.phase * 4.0) - 1.0
                } else {
                    3.0 - (self.phase * 4.0)
                }
            }
        };

        self.phase += self.phase_increment;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }

        sample
    }
}

/// Renders a note into a sample buffer: oscillator shaped by a short
/// linear attack and an exponential decay down to near-silence.
pub struct ToneSynth {
    sample_rate: f32,
}

impl ToneSynth {
    /// Attack ramp length in seconds
    const ATTACK_SECS: f32 = 0.01;

    /// Gain the decay converges to at the end of the note
    const DECAY_FLOOR: f32 = 0.01;

    pub fn new(sample_rate: f32) -> Self {
        assert!(sample_rate > 0.0, "Sample rate must be > 0");
        Self { sample_rate }
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Render one tone. Volume is the peak gain reached after the attack.
    pub fn render(
        &self,
        note: Note,
        duration_secs: f64,
        waveform: Waveform,
        volume: f32,
    ) -> Vec<f32> {
        let num_samples = (duration_secs as f32 * self.sample_rate) as usize;
        let mut osc = WaveOscillator::new(waveform, self.sample_rate);
        osc.set_frequency(note.frequency_hz() as f32);

        let mut samples = Vec::with_capacity(num_samples);
        for i in 0..num_samples {
            let t = i as f32 / self.sample_rate;
            samples.push(osc.next_sample() * self.gain_at(t, duration_secs as f32, volume));
        }

        samples
    }

    fn gain_at(&self, t: f32, duration_secs: f32, volume: f32) -> f32 {
        if volume <= Self::DECAY_FLOOR || duration_secs <= Self::ATTACK_SECS {
            return volume;
        }

        if t < Self::ATTACK_SECS {
            // Linear ramp from silence to the target volume
            volume * (t / Self::ATTACK_SECS)
        } else {
            // Exponential decay from the target volume to the floor
            let progress = (t - Self::ATTACK_SECS) / (duration_secs - Self::ATTACK_SECS);
            volume * (Self::DECAY_FLOOR / volume).powf(progress)
        }
    }
}

/// [`TonePlayer`] backed by [`ToneSynth`]: every tone is rendered on the
/// spot and appended to an output buffer the host drains toward its device.
pub struct BufferedTonePlayer {
    synth: ToneSynth,
    buffer: Vec<f32>,
}

impl BufferedTonePlayer {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            synth: ToneSynth::new(sample_rate),
            buffer: Vec::new(),
        }
    }

    pub fn pending_samples(&self) -> usize {
        self.buffer.len()
    }

    /// Take everything rendered since the last drain
    pub fn drain(&mut self) -> Vec<f32> {
        std::mem::take(&mut self.buffer)
    }
}

impl TonePlayer for BufferedTonePlayer {
    fn play_tone(&mut self, note: Note, duration_secs: f64, waveform: Waveform, volume: f32) {
        let samples = self.synth.render(note, duration_secs, waveform, volume);
        self.buffer.extend(samples);
    }
}
