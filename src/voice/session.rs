//! Recognition session — lifecycle and listener management around the
//! host platform's continuous speech recognizer.
//!
//! The session never talks to a microphone itself. The host supplies a
//! [`SpeechStream`] adapter for its platform recognizer (or reports that
//! none exists), then feeds transcript events in; the session classifies
//! them and delivers results to the registered listener channel.

use tracing::{error, warn};

use super::channel::CommandSender;
use super::classify::classify;
use super::command::{CommandResult, TranscriptEvent};

/// Platform adapter for a continuous speech recognition stream.
///
/// Implementations wrap whatever native capability the host has. `start`
/// and `stop` are expected to log their own failures; the session treats
/// both as fire-and-forget.
pub trait SpeechStream: Send {
    fn start(&mut self);
    fn stop(&mut self);
}

/// Result of the capability probe the host performs at startup.
pub enum RecognitionBackend {
    Available(Box<dyn SpeechStream>),
    Unavailable,
}

/// Settings applied to the platform recognizer.
///
/// `continuous` and `language` are read by host adapters when they build
/// their native stream; `interim_results` controls whether the session
/// classifies non-final transcript events.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RecognitionConfig {
    #[serde(default = "default_true")]
    pub continuous: bool,
    #[serde(default = "default_true")]
    pub interim_results: bool,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_true() -> bool {
    true
}

fn default_language() -> String {
    "en-US".to_string()
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            continuous: true,
            interim_results: true,
            language: default_language(),
        }
    }
}

/// Session lifecycle. Construction covers the probe, so a freshly built
/// session is already `Ready` (or permanently degraded if the probe failed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Ready,
    Listening,
    TornDown,
}

/// Classifies transcripts from the platform recognizer and delivers results
/// to a single registered listener.
pub struct VoiceCommandRecognizer {
    backend: RecognitionBackend,
    state: SessionState,
    listener: Option<CommandSender>,
    config: RecognitionConfig,
}

impl VoiceCommandRecognizer {
    /// Build a session around a probed backend with default settings.
    pub fn new(backend: RecognitionBackend) -> Self {
        Self::with_config(backend, RecognitionConfig::default())
    }

    /// Build a session with explicit recognizer settings.
    pub fn with_config(backend: RecognitionBackend, config: RecognitionConfig) -> Self {
        if matches!(backend, RecognitionBackend::Unavailable) {
            warn!("speech recognition unavailable, voice commands disabled");
        }
        Self {
            backend,
            state: SessionState::Ready,
            listener: None,
            config,
        }
    }

    /// Recognizer settings, for host adapters building their native stream.
    pub fn config(&self) -> &RecognitionConfig {
        &self.config
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// True while the session is listening.
    pub fn is_active(&self) -> bool {
        self.state == SessionState::Listening
    }

    /// Register `listener` and start the platform stream.
    ///
    /// With no recognition capability this logs a warning and returns —
    /// degraded no-op, never an error. Registering while already listening
    /// re-arms the stream (stop, then start) and replaces the listener;
    /// the previous listener's channel disconnects and receives nothing
    /// further.
    pub fn start_listening(&mut self, listener: CommandSender) {
        if self.state == SessionState::TornDown {
            warn!("recognition session is torn down, ignoring start");
            return;
        }
        let stream = match &mut self.backend {
            RecognitionBackend::Available(stream) => stream,
            RecognitionBackend::Unavailable => {
                warn!("speech recognition not available");
                return;
            }
        };

        if self.state == SessionState::Listening {
            stream.stop();
        }
        self.listener = Some(listener);
        stream.start();
        self.state = SessionState::Listening;
    }

    /// Stop the platform stream. Idempotent; safe to call when already
    /// stopped.
    pub fn stop_listening(&mut self) {
        if self.state != SessionState::Listening {
            return;
        }
        if let RecognitionBackend::Available(stream) = &mut self.backend {
            stream.stop();
        }
        self.state = SessionState::Ready;
    }

    /// Feed one transcript event from the platform recognizer.
    ///
    /// Ignored unless the session is listening. Interim events are dropped
    /// when `interim_results` is off. Classification is deterministic; the
    /// upstream confidence passes through untouched. Delivery to a dropped
    /// receiver is silently discarded.
    pub fn handle_transcript(&mut self, event: TranscriptEvent) {
        if self.state != SessionState::Listening {
            return;
        }
        if !event.is_final && !self.config.interim_results {
            return;
        }
        let result = CommandResult {
            command: classify(&event.transcript),
            confidence: event.confidence,
            transcript: event.transcript,
        };
        if let Some(listener) = &self.listener {
            let _ = listener.send(result);
        }
    }

    /// Record a platform-level recognition error.
    ///
    /// Logged only; the session stays in whatever state the platform left
    /// it, and listening is neither stopped nor restarted.
    pub fn handle_stream_error(&mut self, message: &str) {
        error!("speech recognition error: {message}");
    }

    /// Tear the session down permanently: stop the stream, drop the
    /// platform handle and listener. Subsequent starts are no-ops.
    pub fn shutdown(&mut self) {
        self.stop_listening();
        self.backend = RecognitionBackend::Unavailable;
        self.listener = None;
        self.state = SessionState::TornDown;
    }
}

impl Drop for VoiceCommandRecognizer {
    fn drop(&mut self) {
        if self.state == SessionState::Listening {
            self.stop_listening();
        }
    }
}
