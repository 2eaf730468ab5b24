//! Magic number, tragic number and clinch status.
//!
//! Everything is recomputed from the current standings: a team is
//! IN_CONTENTION until a recomputation finds it CLINCHED or ELIMINATED.
//!
//! For team T and target rank R, `cutoff` is the R-th highest maximum win
//! total (wins + remaining games) among T's competitors. T clinches once
//! fewer than R competitors can still finish level with or above it.

use std::collections::BTreeMap;

use tracing::warn;

use crate::calculate::standings::TieBreaker;
use crate::models::{
    ClinchStatus, MagicCellKind, MagicMatrix, MagicMatrixCell, MagicMatrixRow, MagicNumberEntry,
    StandingsEntry,
};

/// Magic numbers at or below this are highlighted in the matrix.
pub const MAGIC_HIGHLIGHT: u32 = 5;

/// Whether `team` finishing with `wins` is guaranteed to stay within the top `rank`.
fn secures(
    team: &StandingsEntry,
    wins: u32,
    competitors: &[&StandingsEntry],
    rank: usize,
    tie_breaker: &dyn TieBreaker,
) -> bool {
    let threats = competitors
        .iter()
        .filter(|rival| {
            let max = rival.max_wins();
            max > wins || (max == wins && !tie_breaker.holds_tie(team, rival))
        })
        .count();
    threats < rank
}

/// Magic/tragic numbers for one team and one target rank.
pub fn magic_number(
    team: &StandingsEntry,
    standings: &[StandingsEntry],
    target_rank: u32,
    tie_breaker: &dyn TieBreaker,
) -> MagicNumberEntry {
    let rank = target_rank.max(1) as usize;
    let competitors: Vec<&StandingsEntry> =
        standings.iter().filter(|e| e.team != team.team).collect();

    if competitors.len() < rank {
        warn!(
            "League too small for rank {} ({} competitors of {}); magic number defaults to 1",
            rank,
            competitors.len(),
            team.team
        );
        return MagicNumberEntry {
            team: team.team.clone(),
            target_rank: rank as u32,
            magic_number: Some(1),
            eliminated: false,
            tragic_number: None,
            status: ClinchStatus::InContention,
        };
    }

    let mut max_wins: Vec<u32> = competitors.iter().map(|c| c.max_wins()).collect();
    max_wins.sort_unstable_by(|a, b| b.cmp(a));
    let cutoff = max_wins[rank - 1];

    let mut current_wins: Vec<u32> = competitors.iter().map(|c| c.wins).collect();
    current_wins.sort_unstable_by(|a, b| b.cmp(a));
    let tragic = (team.max_wins() + 1).saturating_sub(current_wins[rank - 1]);

    let (magic, eliminated, status) =
        if secures(team, team.wins, &competitors, rank, tie_breaker) {
            (Some(0), false, ClinchStatus::Clinched)
        } else if !secures(team, team.max_wins(), &competitors, rank, tie_breaker) {
            (None, true, ClinchStatus::Eliminated)
        } else {
            let target = if secures(team, cutoff, &competitors, rank, tie_breaker) {
                cutoff
            } else {
                cutoff + 1
            };
            (
                Some(target.saturating_sub(team.wins).max(1)),
                false,
                ClinchStatus::InContention,
            )
        };

    MagicNumberEntry {
        team: team.team.clone(),
        target_rank: rank as u32,
        magic_number: magic,
        eliminated,
        tragic_number: Some(tragic),
        status,
    }
}

/// Magic numbers for every team at one target rank, in standings order.
pub fn magic_numbers(
    standings: &[StandingsEntry],
    target_rank: u32,
    tie_breaker: &dyn TieBreaker,
) -> Vec<MagicNumberEntry> {
    standings
        .iter()
        .map(|team| magic_number(team, standings, target_rank, tie_breaker))
        .collect()
}

/// Colour band for a matrix cell.
pub fn classify_cell(entry: &MagicNumberEntry, remaining_games: u32) -> MagicCellKind {
    match entry.magic_number {
        _ if entry.eliminated => MagicCellKind::Eliminated,
        Some(0) => MagicCellKind::Clinched,
        Some(n) if n <= MAGIC_HIGHLIGHT => MagicCellKind::Magic,
        Some(n) if (n as f64) <= remaining_games as f64 * 0.5 => MagicCellKind::Competitive,
        _ => MagicCellKind::Tragic,
    }
}

/// Magic numbers for every team at every target rank from 1 to N-1.
pub fn magic_matrix(standings: &[StandingsEntry], tie_breaker: &dyn TieBreaker) -> MagicMatrix {
    let max_rank = standings.len().saturating_sub(1) as u32;

    let rows = standings
        .iter()
        .map(|team| {
            let cells: BTreeMap<u32, MagicMatrixCell> = (1..=max_rank)
                .map(|rank| {
                    let entry = magic_number(team, standings, rank, tie_breaker);
                    let kind = classify_cell(&entry, team.remaining_games);
                    (
                        rank,
                        MagicMatrixCell {
                            value: entry.magic_number,
                            tragic_number: entry.tragic_number,
                            kind,
                        },
                    )
                })
                .collect();
            MagicMatrixRow {
                team: team.team.clone(),
                current_rank: team.rank,
                remaining_games: team.remaining_games,
                cells,
            }
        })
        .collect();

    MagicMatrix { rows }
}
