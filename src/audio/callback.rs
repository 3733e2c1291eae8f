//! Audio callback — runs on the cpal audio thread.
//!
//! Drains commands from the ring buffer, pulls one sample per frame from
//! every active stage voice, mixes them additively, applies master volume,
//! and hard-clamps the result. Finished voices are dropped after each block.

use ringbuf::traits::Consumer;
use ringbuf::HeapCons;

use super::command::AudioCommand;
use crate::sfx::stage::StageVoice;

/// Clamp ceiling for the mixed output. Overlapping effects may sum past
/// full scale; the clamp keeps the stream from wrapping.
const CLAMP_CEILING: f32 = 0.95;

/// Mixer state that lives on the audio thread. Accessed only from the cpal
/// callback.
pub struct SfxMixer {
    consumer: HeapCons<AudioCommand>,
    voices: Vec<StageVoice>,
    volume: f32,
    channels: u16,
    sample_rate: u32,
}

impl SfxMixer {
    /// Create a mixer draining the given command queue.
    pub fn new(consumer: HeapCons<AudioCommand>, channels: u16, sample_rate: u32) -> Self {
        Self {
            consumer,
            voices: Vec::new(),
            volume: 1.0,
            channels,
            sample_rate,
        }
    }

    /// Called by cpal for each output block. Fills `output` with interleaved
    /// samples, the same mono mix on every channel.
    pub fn process(&mut self, output: &mut [f32]) {
        while let Some(cmd) = self.consumer.try_pop() {
            match cmd {
                AudioCommand::Spawn(voice) => self.voices.push(voice),
                AudioCommand::SetVolume(v) => self.volume = v.clamp(0.0, 1.0),
            }
        }

        let channels = self.channels.max(1) as usize;
        for frame in output.chunks_mut(channels) {
            let mix: f32 = self.voices.iter_mut().map(|v| v.next_sample()).sum();
            let sample = (mix * self.volume).clamp(-CLAMP_CEILING, CLAMP_CEILING);
            for out in frame.iter_mut() {
                *out = sample;
            }
        }

        self.voices.retain(|v| !v.finished());
    }

    /// Number of voices currently sounding or scheduled.
    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }

    /// Returns the sample rate.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Returns the channel count.
    pub fn channels(&self) -> u16 {
        self.channels
    }
}
