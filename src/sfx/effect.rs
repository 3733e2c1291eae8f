//! Sound effect identifiers — symbolic selectors into the recipe table.

/// The closed set of trycorder sound effects.
///
/// An effect carries no state of its own; it selects a [`SynthesisRecipe`]
/// from the static table in [`recipe`](super::recipe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    Beep,
    Alert,
    Phaser,
    Transporter,
    Shield,
    Warp,
    Scan,
    Error,
    Success,
}

impl SoundEffect {
    /// All effects, in recipe-table order.
    pub const ALL: [SoundEffect; 9] = [
        SoundEffect::Beep,
        SoundEffect::Alert,
        SoundEffect::Phaser,
        SoundEffect::Transporter,
        SoundEffect::Shield,
        SoundEffect::Warp,
        SoundEffect::Scan,
        SoundEffect::Error,
        SoundEffect::Success,
    ];

    /// Stable lowercase name, used by the CLI and config files.
    pub fn name(self) -> &'static str {
        match self {
            SoundEffect::Beep => "beep",
            SoundEffect::Alert => "alert",
            SoundEffect::Phaser => "phaser",
            SoundEffect::Transporter => "transporter",
            SoundEffect::Shield => "shield",
            SoundEffect::Warp => "warp",
            SoundEffect::Scan => "scan",
            SoundEffect::Error => "error",
            SoundEffect::Success => "success",
        }
    }

    /// Look up an effect by its [`name`](Self::name). Case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        Self::ALL.into_iter().find(|e| e.name() == lower)
    }
}

impl std::fmt::Display for SoundEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
