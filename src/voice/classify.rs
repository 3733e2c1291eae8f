//! Transcript classification — a pure function from free text to a command.
//!
//! The transcript is lowercased, at most one leading wake-phrase is
//! stripped, and the result is tested against an ordered keyword table.
//! The first matching rule wins; rule order is load-bearing and must not
//! be reordered.

use super::command::VoiceCommand;

/// Wake-phrases stripped from the start of a transcript, at most one,
/// and only when followed by whitespace.
const WAKE_PHRASES: [&str; 2] = ["computer", "trycorder"];

struct Rule {
    keywords: &'static [&'static str],
    command: VoiceCommand,
}

/// Ordered rule table. Earlier rules shadow later ones; the multi-word
/// alert phrases are matched whole.
const RULES: &[Rule] = &[
    Rule {
        keywords: &["fire", "phasor"],
        command: VoiceCommand::Fire,
    },
    Rule {
        keywords: &["beam", "transport"],
        command: VoiceCommand::Beam,
    },
    Rule {
        keywords: &["shield"],
        command: VoiceCommand::Shields,
    },
    Rule {
        keywords: &["warp"],
        command: VoiceCommand::Warp,
    },
    Rule {
        keywords: &["scan"],
        command: VoiceCommand::Scan,
    },
    Rule {
        keywords: &["hail", "call"],
        command: VoiceCommand::Hail,
    },
    Rule {
        keywords: &["yellow alert"],
        command: VoiceCommand::YellowAlert,
    },
    Rule {
        keywords: &["red alert"],
        command: VoiceCommand::RedAlert,
    },
    Rule {
        keywords: &["cloak"],
        command: VoiceCommand::Cloak,
    },
];

/// Classify a transcript into a [`VoiceCommand`].
///
/// Deterministic and case-insensitive; unmatched transcripts map to
/// [`VoiceCommand::Unknown`].
pub fn classify(transcript: &str) -> VoiceCommand {
    let lower = transcript.to_lowercase();
    let cleaned = strip_wake_phrase(&lower);

    for rule in RULES {
        if rule.keywords.iter().any(|k| cleaned.contains(k)) {
            return rule.command;
        }
    }
    VoiceCommand::Unknown
}

/// Strip one leading wake-phrase followed by whitespace.
fn strip_wake_phrase(text: &str) -> &str {
    for wake in WAKE_PHRASES {
        if let Some(rest) = text.strip_prefix(wake) {
            let trimmed = rest.trim_start();
            if trimmed.len() < rest.len() {
                return trimmed;
            }
        }
    }
    text
}
