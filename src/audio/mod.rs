// Audio module - the tone-playing collaborator boundary

pub mod synth;
pub mod tone;

pub use synth::{BufferedTonePlayer, ToneSynth, WaveOscillator};
pub use tone::{NullTonePlayer, TonePlayer};
