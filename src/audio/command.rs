//! Commands sent from the control thread to the audio thread via ring buffer.

use crate::sfx::stage::StageVoice;

/// Commands drained by the audio callback.
#[derive(Debug)]
pub enum AudioCommand {
    /// Start mixing a newly scheduled stage voice.
    Spawn(StageVoice),

    /// Set master volume (clamped to 0.0..=1.0 on the audio thread).
    SetVolume(f32),
}
