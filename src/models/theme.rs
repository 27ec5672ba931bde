// file: src/models/theme.rs
// description: closed set of verse themes used for routing questions
// reference: internal data structures

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Routing category for a question and for the verses that answer it.
///
/// `Default` is the catch-all bucket consulted when neither a theme nor a
/// document produced an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Creation,
    Hell,
    Love,
    Mercy,
    Default,
}

impl Theme {
    pub const ALL: [Theme; 5] = [
        Theme::Creation,
        Theme::Hell,
        Theme::Love,
        Theme::Mercy,
        Theme::Default,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Creation => "creation",
            Theme::Hell => "hell",
            Theme::Love => "love",
            Theme::Mercy => "mercy",
            Theme::Default => "default",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Theme::ALL
            .into_iter()
            .find(|theme| theme.as_str() == lowered)
            .ok_or_else(|| EngineError::Validation(format!("Unknown theme: {}", s)))
    }
}
