//! Streak models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Direction of a streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StreakType {
    Win,
    Loss,
    None,
}

impl std::fmt::Display for StreakType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StreakType::Win => write!(f, "W"),
            StreakType::Loss => write!(f, "L"),
            StreakType::None => write!(f, "-"),
        }
    }
}

/// A run of consecutive results of one type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    #[serde(rename = "type")]
    pub streak_type: StreakType,
    pub count: u32,
    /// Start of the oldest element in the run
    pub start_date: Option<NaiveDate>,
    /// End of the most recent element in the run
    pub end_date: Option<NaiveDate>,
}

impl Streak {
    /// The empty streak.
    pub fn none() -> Self {
        Self {
            streak_type: StreakType::None,
            count: 0,
            start_date: None,
            end_date: None,
        }
    }

    /// An empty streak of the given type (used for "longest" results with no run).
    pub fn empty(streak_type: StreakType) -> Self {
        Self {
            streak_type,
            ..Self::none()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl std::fmt::Display for Streak {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count == 0 {
            write!(f, "-")
        } else {
            write!(f, "{}{}", self.streak_type, self.count)
        }
    }
}

/// Current and longest streaks for one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakSummary {
    pub current: Streak,
    pub longest_win: Streak,
    pub longest_loss: Streak,
}

impl Default for StreakSummary {
    fn default() -> Self {
        Self {
            current: Streak::none(),
            longest_win: Streak::empty(StreakType::Win),
            longest_loss: Streak::empty(StreakType::Loss),
        }
    }
}
