//! Voice and tone selection.
//!
//! A tone is chosen once per request and resolved into a plain optional string
//! before any generation client sees it.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TonePreset {
    Professional,
    Casual,
    Witty,
    Inspirational,
    Educational,
    Bold,
    Empathetic,
    Humorous,
}

impl TonePreset {
    pub const ALL: [TonePreset; 8] = [
        TonePreset::Professional,
        TonePreset::Casual,
        TonePreset::Witty,
        TonePreset::Inspirational,
        TonePreset::Educational,
        TonePreset::Bold,
        TonePreset::Empathetic,
        TonePreset::Humorous,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TonePreset::Professional => "Professional",
            TonePreset::Casual => "Casual",
            TonePreset::Witty => "Witty",
            TonePreset::Inspirational => "Inspirational",
            TonePreset::Educational => "Educational",
            TonePreset::Bold => "Bold",
            TonePreset::Empathetic => "Empathetic",
            TonePreset::Humorous => "Humorous",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|preset| preset.label().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for TonePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Tone {
    #[default]
    None,
    Preset(TonePreset),
    Custom(String),
}

impl Tone {
    /// Interpret user input: preset names map to presets, blank input to no tone.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Tone::None;
        }
        match TonePreset::from_label(trimmed) {
            Some(preset) => Tone::Preset(preset),
            None => Tone::Custom(trimmed.to_string()),
        }
    }

    pub fn resolve(&self) -> Option<String> {
        match self {
            Tone::None => None,
            Tone::Preset(preset) => Some(preset.label().to_string()),
            Tone::Custom(description) => {
                let description = description.trim();
                (!description.is_empty()).then(|| description.to_string())
            }
        }
    }
}
