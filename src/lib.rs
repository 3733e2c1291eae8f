//! Trycorder core — procedural sound effects and voice command recognition
//! for an LCARS-style trycorder.
//!
//! Two loosely coupled pipelines: [`sfx::SfxPlayer`] synthesizes sound
//! effects from a static recipe table against a shared audio clock, and
//! [`voice::VoiceCommandRecognizer`] classifies host-transcribed speech into
//! a fixed command set. Both degrade to logged no-ops when their platform
//! resource is missing.

pub mod audio;
pub mod config;
pub mod sfx;
pub mod voice;
