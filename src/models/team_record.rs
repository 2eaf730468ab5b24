//! Per-team season record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{OpponentRecord, Series, SeriesSummary, StreakSummary};

/// Everything derived from one team's game log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSeasonRecord {
    pub team: String,

    /// Series in chronological order
    pub series: Vec<Series>,

    pub summary: SeriesSummary,

    /// Streaks counted in series
    pub series_streaks: StreakSummary,

    /// Streaks counted in individual games (draws break a run)
    pub game_streaks: StreakSummary,

    /// Series totals keyed by opponent
    pub per_opponent: BTreeMap<String, OpponentRecord>,
}

impl TeamSeasonRecord {
    /// The current series streak.
    pub fn current_streak(&self) -> &crate::models::Streak {
        &self.series_streaks.current
    }
}
