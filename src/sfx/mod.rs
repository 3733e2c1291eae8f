//! Sound effect player — the public synthesis boundary.
//!
//! [`SfxPlayer`] maps a [`SoundEffect`] to its recipe, schedules one voice
//! per stage against the audio clock, and returns immediately. Failures
//! degrade to silent no-ops: a failed device probe disables the player for
//! the life of the process, and a failed spawn affects only that one call.

pub mod effect;
pub mod filter;
pub mod oscillator;
pub mod recipe;
pub mod render;
pub mod stage;

pub use effect::SoundEffect;
pub use oscillator::Waveform;
pub use recipe::{recipe, SignalStage, SynthesisRecipe};

use ringbuf::traits::Producer;
use tracing::{debug, warn};

use crate::audio::{AudioCommand, AudioEngine};
use stage::build_voices;

/// Result of the one-shot output probe. Once `Unavailable`, a player never
/// re-probes.
enum Backend {
    /// Probe succeeded — commands flow into the device mixer. The engine is
    /// kept here because dropping it would close the output stream.
    Device(AudioEngine),
    /// Caller-owned command queue; no device ownership (embedding, tests).
    Queue {
        producer: ringbuf::HeapProd<AudioCommand>,
        sample_rate: u32,
    },
    /// Probe failed — every play call is a silent no-op.
    Unavailable,
}

/// Plays trycorder sound effects.
pub struct SfxPlayer {
    backend: Backend,
    enabled: bool,
}

impl SfxPlayer {
    /// Probe the default output device and build a player around it.
    ///
    /// On probe failure the player is constructed in the disabled state:
    /// the error is logged once and every later [`play`](Self::play) call
    /// is a no-op. No retries.
    pub fn new() -> Self {
        match AudioEngine::start() {
            Ok(engine) => Self {
                backend: Backend::Device(engine),
                enabled: true,
            },
            Err(e) => {
                warn!("audio output unavailable, sound effects disabled: {e}");
                Self {
                    backend: Backend::Unavailable,
                    enabled: true,
                }
            }
        }
    }

    /// Attach to an existing command queue instead of opening a device.
    ///
    /// The caller owns the consumer half and is responsible for draining it
    /// into a mixer.
    pub fn with_queue(producer: ringbuf::HeapProd<AudioCommand>, sample_rate: u32) -> Self {
        Self {
            backend: Backend::Queue {
                producer,
                sample_rate,
            },
            enabled: true,
        }
    }

    /// Build a player with no output at all. Useful for hosts that know up
    /// front that audio is unavailable.
    pub fn disabled() -> Self {
        Self {
            backend: Backend::Unavailable,
            enabled: true,
        }
    }

    /// Process-wide mute toggle. Does not touch the output stream.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Current mute-toggle state.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// True when the probe found a working output.
    pub fn is_available(&self) -> bool {
        !matches!(self.backend, Backend::Unavailable)
    }

    /// Set master volume on the audio-thread mixer.
    pub fn set_volume(&mut self, volume: f32) {
        if !self.is_available() {
            return;
        }
        if !self.push(AudioCommand::SetVolume(volume)) {
            warn!("audio command queue full, volume change dropped");
        }
    }

    fn push(&mut self, cmd: AudioCommand) -> bool {
        match &mut self.backend {
            Backend::Device(engine) => match cmd {
                AudioCommand::Spawn(voice) => engine.spawn(voice).is_ok(),
                AudioCommand::SetVolume(v) => engine.set_volume(v).is_ok(),
            },
            Backend::Queue { producer, .. } => producer.try_push(cmd).is_ok(),
            Backend::Unavailable => false,
        }
    }

    /// Schedule `effect` for immediate playback and return.
    ///
    /// No-op when muted or when the probe failed. Each call schedules an
    /// independent set of voices; concurrent calls overlap freely and
    /// nothing is queued or cancelled.
    pub fn play(&mut self, effect: SoundEffect) {
        if !self.enabled {
            return;
        }
        let sample_rate = match &self.backend {
            Backend::Device(engine) => engine.sample_rate(),
            Backend::Queue { sample_rate, .. } => *sample_rate,
            Backend::Unavailable => return,
        };

        for voice in build_voices(effect, sample_rate) {
            if !self.push(AudioCommand::Spawn(voice)) {
                warn!("audio command queue full, dropping {effect}");
                return;
            }
        }
        debug!("scheduled {effect}");
    }
}
