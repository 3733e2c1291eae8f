//! Audio engine — cpal output stream fed through a lock-free command queue.
//!
//! The engine owns the output stream and the producer half of an SPSC ring
//! buffer. The control thread pushes [`AudioCommand`]s; the audio-thread
//! callback drains them and mixes the active stage voices into the output.

pub mod callback;
pub mod command;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use ringbuf::{
    traits::{Producer, Split},
    HeapRb,
};

pub use command::AudioCommand;

use callback::SfxMixer;
use crate::sfx::stage::StageVoice;

/// Ring buffer capacity (number of commands).
const RING_BUFFER_CAPACITY: usize = 256;

/// Audio engine errors.
#[derive(Debug)]
pub enum AudioError {
    /// No audio output device found.
    NoOutputDevice,
    /// Failed to query device configuration.
    DeviceConfig(String),
    /// Failed to build the audio stream.
    StreamBuild(String),
    /// Failed to start the audio stream.
    StreamPlay(String),
    /// Ring buffer is full — the audio thread is not draining fast enough.
    QueueFull,
}

impl std::fmt::Display for AudioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AudioError::NoOutputDevice => write!(f, "no audio output device found"),
            AudioError::DeviceConfig(e) => write!(f, "device config error: {e}"),
            AudioError::StreamBuild(e) => write!(f, "stream build error: {e}"),
            AudioError::StreamPlay(e) => write!(f, "stream play error: {e}"),
            AudioError::QueueFull => write!(f, "audio command queue is full"),
        }
    }
}

impl std::error::Error for AudioError {}

/// The audio engine. Owns the cpal stream and the command queue producer.
///
/// Constructed once per player by the capability probe; there is no retry
/// path — a failed probe leaves the owning player permanently disabled.
pub struct AudioEngine {
    _stream: cpal::Stream,
    producer: ringbuf::HeapProd<AudioCommand>,
    sample_rate: u32,
    channels: u16,
}

impl AudioEngine {
    /// Open the default output device and start the stream.
    pub fn start() -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(AudioError::NoOutputDevice)?;

        let config = device
            .default_output_config()
            .map_err(|e| AudioError::DeviceConfig(e.to_string()))?;

        let sample_rate = config.sample_rate().0;
        let channels = config.channels();

        let rb = HeapRb::<AudioCommand>::new(RING_BUFFER_CAPACITY);
        let (producer, consumer) = rb.split();
        let mut mixer = SfxMixer::new(consumer, channels, sample_rate);

        let stream_config = cpal::StreamConfig {
            channels,
            sample_rate: cpal::SampleRate(sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        let err_fn = |err: cpal::StreamError| {
            eprintln!("audio stream error: {err}");
        };

        let stream = device
            .build_output_stream(
                &stream_config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    mixer.process(data);
                },
                err_fn,
                None,
            )
            .map_err(|e| AudioError::StreamBuild(e.to_string()))?;

        stream
            .play()
            .map_err(|e| AudioError::StreamPlay(e.to_string()))?;

        Ok(Self {
            _stream: stream,
            producer,
            sample_rate,
            channels,
        })
    }

    /// Hand a scheduled stage voice to the audio thread.
    pub fn spawn(&mut self, voice: StageVoice) -> Result<(), AudioError> {
        self.producer
            .try_push(AudioCommand::Spawn(voice))
            .map_err(|_| AudioError::QueueFull)
    }

    /// Set master volume (clamped to 0.0..=1.0 on the audio thread).
    pub fn set_volume(&mut self, volume: f32) -> Result<(), AudioError> {
        self.producer
            .try_push(AudioCommand::SetVolume(volume))
            .map_err(|_| AudioError::QueueFull)
    }

    /// Sample rate of the output stream.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Output channel count.
    pub fn channels(&self) -> u16 {
        self.channels
    }
}
