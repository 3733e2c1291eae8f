//! Application configuration — sound and recognizer defaults loaded from
//! ~/.trycorder/config.yaml.

use serde::{Deserialize, Serialize};

use crate::voice::RecognitionConfig;

/// Sound effect defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundConfig {
    /// Process-wide mute toggle applied at startup.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Master volume, 0.0..=1.0.
    #[serde(default = "default_volume")]
    pub master_volume: f32,
}

fn default_enabled() -> bool {
    true
}

fn default_volume() -> f32 {
    1.0
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            master_volume: default_volume(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrycorderConfig {
    #[serde(default)]
    pub sound: SoundConfig,
    #[serde(default)]
    pub recognition: RecognitionConfig,
}

impl TrycorderConfig {
    /// Load config from the standard path (~/.trycorder/config.yaml).
    /// Returns None if the file doesn't exist or fails to parse (graceful
    /// fallback to defaults).
    pub fn load() -> Option<Self> {
        let home = dirs::home_dir()?;
        let path = home.join(".trycorder").join("config.yaml");
        let content = std::fs::read_to_string(path).ok()?;
        serde_yaml::from_str(&content).ok()
    }
}
