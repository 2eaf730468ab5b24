//! Head-to-head series models.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Series totals for one team against one opponent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpponentRecord {
    pub total_series: u32,
    pub wins: u32,
    pub losses: u32,
    pub splits: u32,
    pub sweep_wins: u32,
    pub sweep_losses: u32,
}

impl OpponentRecord {
    /// Series win rate as a percentage rounded to one decimal.
    pub fn win_rate_pct(&self) -> f64 {
        if self.total_series == 0 {
            return 0.0;
        }
        let pct = self.wins as f64 / self.total_series as f64 * 100.0;
        (pct * 10.0).round() / 10.0
    }
}

/// One cell of the head-to-head matrix, from the row team's point of view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadToHeadCell {
    /// "W-L-S"
    pub record: String,
    pub win_rate_pct: f64,
    /// "sweepWins-sweepLosses"
    pub sweeps: String,
    pub total_series: u32,
}

impl From<&OpponentRecord> for HeadToHeadCell {
    fn from(r: &OpponentRecord) -> Self {
        Self {
            record: format!("{}-{}-{}", r.wins, r.losses, r.splits),
            win_rate_pct: r.win_rate_pct(),
            sweeps: format!("{}-{}", r.sweep_wins, r.sweep_losses),
            total_series: r.total_series,
        }
    }
}

/// Pairwise series matrix. `cells[a][b]` is A's record against B;
/// the diagonal is `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeadToHeadMatrix {
    pub teams: Vec<String>,
    pub cells: BTreeMap<String, BTreeMap<String, Option<HeadToHeadCell>>>,
}

impl HeadToHeadMatrix {
    /// Look up A's record against B.
    pub fn get(&self, team: &str, opponent: &str) -> Option<&HeadToHeadCell> {
        self.cells.get(team)?.get(opponent)?.as_ref()
    }
}
