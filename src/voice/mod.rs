//! Voice command recognition — transcript classification and session
//! lifecycle.
//!
//! The host platform's speech recognizer (out of scope here) transcribes
//! audio and feeds [`TranscriptEvent`]s into a [`VoiceCommandRecognizer`],
//! which classifies each transcript and delivers a [`CommandResult`] to the
//! registered listener channel.

pub mod channel;
pub mod classify;
pub mod command;
pub mod session;

pub use channel::{command_channel, CommandReceiver, CommandSender};
pub use classify::classify;
pub use command::{CommandResult, TranscriptEvent, VoiceCommand};
pub use session::{
    RecognitionBackend, RecognitionConfig, SessionState, SpeechStream, VoiceCommandRecognizer,
};
