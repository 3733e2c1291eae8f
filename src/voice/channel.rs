//! Command result channel — mpsc bridge between the recognizer and its host.
//!
//! The sender half is registered as the session listener; the receiver half
//! is polled by the host's event loop. Registering a new listener drops the
//! old sender, which disconnects the old receiver.

use std::sync::mpsc;

use super::command::CommandResult;

/// Sender half — registered with
/// [`start_listening`](super::VoiceCommandRecognizer::start_listening).
pub type CommandSender = mpsc::Sender<CommandResult>;

/// Receiver half — held by the host event loop.
pub struct CommandReceiver {
    rx: mpsc::Receiver<CommandResult>,
}

impl CommandReceiver {
    /// Non-blocking poll for the next result.
    pub fn poll(&self) -> Option<CommandResult> {
        self.rx.try_recv().ok()
    }

    /// Drain all pending results.
    pub fn drain(&self) -> Vec<CommandResult> {
        let mut results = Vec::new();
        while let Ok(result) = self.rx.try_recv() {
            results.push(result);
        }
        results
    }

    /// True once the sender side has been dropped or replaced.
    pub fn is_disconnected(&self) -> bool {
        matches!(self.rx.try_recv(), Err(mpsc::TryRecvError::Disconnected))
    }
}

/// Create a new command result channel pair.
pub fn command_channel() -> (CommandSender, CommandReceiver) {
    let (tx, rx) = mpsc::channel();
    (tx, CommandReceiver { rx })
}
