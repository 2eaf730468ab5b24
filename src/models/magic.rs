//! Magic number / clinch models.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Where a team stands with respect to one target rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClinchStatus {
    InContention,
    Clinched,
    Eliminated,
}

/// Clinch threshold for one team and one target rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MagicNumberEntry {
    pub team: String,
    /// 1 = championship, K = top-K cutoff
    pub target_rank: u32,
    /// Wins still needed to guarantee the rank; 0 once clinched,
    /// `None` when the team cannot get there on its own
    pub magic_number: Option<u32>,
    pub eliminated: bool,
    /// Further losses before the rank is out of reach regardless of other results
    pub tragic_number: Option<u32>,
    pub status: ClinchStatus,
}

impl MagicNumberEntry {
    pub fn is_clinched(&self) -> bool {
        self.status == ClinchStatus::Clinched
    }
}

/// Colour band of a magic matrix cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MagicCellKind {
    Clinched,
    /// Within five wins
    Magic,
    /// Within half of the remaining schedule
    Competitive,
    Tragic,
    Eliminated,
}

/// One (team, target rank) cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MagicMatrixCell {
    pub value: Option<u32>,
    pub tragic_number: Option<u32>,
    pub kind: MagicCellKind,
}

/// One team's row of the matrix, keyed by target rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MagicMatrixRow {
    pub team: String,
    pub current_rank: u32,
    pub remaining_games: u32,
    pub cells: BTreeMap<u32, MagicMatrixCell>,
}

/// Magic numbers for every team and every target rank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MagicMatrix {
    pub rows: Vec<MagicMatrixRow>,
}

impl MagicMatrix {
    pub fn row(&self, team: &str) -> Option<&MagicMatrixRow> {
        self.rows.iter().find(|r| r.team == team)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&ClinchStatus::InContention).unwrap(),
            "\"IN_CONTENTION\""
        );
        assert_eq!(
            serde_json::to_string(&MagicCellKind::Competitive).unwrap(),
            "\"competitive\""
        );
    }
}
