//! Sweep highlight and weekly performance models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::StreakType;

/// A completed sweep, from the perspective of `team`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepHighlight {
    pub team: String,
    pub opponent: String,
    /// WIN when `team` swept, LOSS when `team` was swept
    #[serde(rename = "type")]
    pub sweep_type: StreakType,
    pub game_count: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub scores: Vec<String>,
}

/// Sweep totals for one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepRanking {
    pub team: String,
    pub sweep_wins: u32,
    pub sweep_losses: u32,
    pub sweep_difference: i64,
}

/// League-wide sweep view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepHighlights {
    /// Newest first
    pub recent_sweeps: Vec<SweepHighlight>,
    /// Ordered by sweep difference, descending
    pub rankings: Vec<SweepRanking>,
}

/// One team's totals within one week.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklyTeamStats {
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub runs_scored: u32,
    pub runs_allowed: u32,
    pub win_pct: f64,
    pub run_differential: i64,
}

/// All teams' totals for one ISO week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyStats {
    /// "YYYY-Www"
    pub week: String,
    /// Monday
    pub start_date: NaiveDate,
    /// Sunday
    pub end_date: NaiveDate,
    pub teams: std::collections::BTreeMap<String, WeeklyTeamStats>,
}
