//! User style preferences and their natural-language encoding.
//!
//! Unknown enum values are rejected by serde when the request body is
//! decoded, so [`describe`] only ever sees valid combinations.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductivityGoal {
    Focused,
    Creative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mood {
    Calm,
    Energetic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lighting {
    Warm,
    Neutral,
    Cool,
}

impl ProductivityGoal {
    pub const ALL: [Self; 2] = [Self::Focused, Self::Creative];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Focused => "Focused",
            Self::Creative => "Creative",
        }
    }
}

impl Mood {
    pub const ALL: [Self; 2] = [Self::Calm, Self::Energetic];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Calm => "Calm",
            Self::Energetic => "Energetic",
        }
    }
}

impl Lighting {
    pub const ALL: [Self; 3] = [Self::Warm, Self::Neutral, Self::Cool];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Warm => "Warm",
            Self::Neutral => "Neutral",
            Self::Cool => "Cool",
        }
    }
}

impl fmt::Display for ProductivityGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Lighting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user's stated workspace style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub productivity_goal: ProductivityGoal,
    pub mood: Mood,
    pub lighting: Lighting,
}

/// Render preferences as the fixed sentence sent to the model as user content.
///
/// All three values are always present; the selection prompt reasons over
/// each of them.
pub fn describe(prefs: &Preferences) -> String {
    format!(
        "Between being focused and creative, my productivity style is {}. \
         Between being calm and energetic, my energy level is {}. \
         And I prefer {} lighting in my workspace.",
        prefs.productivity_goal, prefs.mood, prefs.lighting
    )
}
