//! The closed set of layout presets and the model's choice among them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the three fixed 3D room presets the front end can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayoutId {
    Energetic,
    Calm,
    Sample,
}

impl LayoutId {
    pub const ALL: [Self; 3] = [Self::Energetic, Self::Calm, Self::Sample];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Energetic => "Energetic",
            Self::Calm => "Calm",
            Self::Sample => "Sample",
        }
    }

    /// Human-readable preset name shown to the model.
    pub fn alias(self) -> &'static str {
        match self {
            Self::Energetic => "Kinetic Studio",
            Self::Calm => "Grounded Retreat",
            Self::Sample => "Balanced Standard",
        }
    }

    /// Short style tags describing the preset.
    pub fn tags(self) -> &'static str {
        match self {
            Self::Energetic => "Creative, Orange/Green, curved shapes, movement",
            Self::Calm => "Calm, Wood tones, low profile, neutrals",
            Self::Sample => "Practical, symmetrical, generic pieces",
        }
    }
}

impl fmt::Display for LayoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The model's chosen preset plus its reasoning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDecision {
    #[serde(alias = "layout_id")]
    pub layout_id: LayoutId,
    pub explanation: String,
}
