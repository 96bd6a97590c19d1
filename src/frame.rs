//! Advancement frame classification

use serde::{Deserialize, Serialize};
use std::fmt;

/// Visual style of an advancement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Frame {
    #[default]
    Unknown,
    Task,
    Goal,
    Challenge,
}

impl Frame {
    pub const ALL: [Frame; 4] = [Frame::Unknown, Frame::Task, Frame::Goal, Frame::Challenge];

    /// Enumerator name, upper case
    pub fn name(self) -> &'static str {
        match self {
            Frame::Unknown => "UNKNOWN",
            Frame::Task => "TASK",
            Frame::Goal => "GOAL",
            Frame::Challenge => "CHALLENGE",
        }
    }

    /// Case-insensitive lookup by name; anything unrecognised is `Unknown`
    pub fn from_name(name: Option<&str>) -> Frame {
        let Some(name) = name.filter(|n| !n.is_empty()) else {
            return Frame::Unknown;
        };

        Frame::ALL
            .into_iter()
            .find(|frame| frame.name().eq_ignore_ascii_case(name))
            .unwrap_or(Frame::Unknown)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
