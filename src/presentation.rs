//! Presentation variants
//!
//! The same simulation ships under two skins that differ only in text and
//! styling. The variant never influences gameplay, so it lives outside the
//! sim module and is not part of session state.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PresentationVariant {
    #[default]
    Classic,
    Mugunghwa,
}

impl PresentationVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Mugunghwa => "mugunghwa",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "classic" => Some(Self::Classic),
            "mugunghwa" => Some(Self::Mugunghwa),
            _ => None,
        }
    }

    pub fn window_title(&self) -> &'static str {
        match self {
            Self::Classic => "Red Light, Green Light",
            Self::Mugunghwa => "Red Light, Green Light - Multiplayer",
        }
    }

    pub fn controls_hint(&self) -> &'static str {
        match self {
            Self::Classic => "Controls: WASD to move, V to toggle view",
            Self::Mugunghwa => "Controls: WASD to move",
        }
    }

    pub fn caught_message(&self) -> &'static str {
        "You were caught by the spotter!"
    }

    pub fn restart_hint(&self) -> &'static str {
        "Press \"R\" to restart"
    }
}
