//! Head-to-head series aggregation.

use std::collections::BTreeMap;

use crate::models::{HeadToHeadCell, HeadToHeadMatrix, OpponentRecord, Series, SeriesResult};

/// Roll one team's series up per opponent.
///
/// `total_series` counts every series, ongoing ones included. An ongoing
/// series adds nothing to wins, losses, splits or sweeps until it closes.
pub fn opponent_records(series: &[Series]) -> BTreeMap<String, OpponentRecord> {
    let mut records: BTreeMap<String, OpponentRecord> = BTreeMap::new();

    for s in series {
        let record = records.entry(s.opponent.clone()).or_default();
        record.total_series += 1;
        match s.result {
            SeriesResult::Win => record.wins += 1,
            SeriesResult::Loss => record.losses += 1,
            SeriesResult::Split => record.splits += 1,
            SeriesResult::Ongoing => {}
        }
        if s.is_winning_sweep {
            record.sweep_wins += 1;
        }
        if s.is_losing_sweep {
            record.sweep_losses += 1;
        }
    }
    records
}

/// Build the pairwise matrix.
///
/// Each row comes from that team's own series; nothing is derived by
/// inverting the opponent's row. Pairs that never met get a 0-0-0 cell.
pub fn build_matrix(
    teams: &[String],
    per_team: &BTreeMap<String, BTreeMap<String, OpponentRecord>>,
) -> HeadToHeadMatrix {
    let empty = OpponentRecord::default();
    let mut cells = BTreeMap::new();

    for team in teams {
        let row: BTreeMap<String, Option<HeadToHeadCell>> = teams
            .iter()
            .map(|opponent| {
                let cell = if opponent == team {
                    None
                } else {
                    let record = per_team
                        .get(team)
                        .and_then(|r| r.get(opponent))
                        .unwrap_or(&empty);
                    Some(HeadToHeadCell::from(record))
                };
                (opponent.clone(), cell)
            })
            .collect();
        cells.insert(team.clone(), row);
    }

    HeadToHeadMatrix {
        teams: teams.to_vec(),
        cells,
    }
}
