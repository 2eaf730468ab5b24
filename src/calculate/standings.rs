//! Standings table and tie-break policies.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::{GameLog, StandingsEntry, TeamTotals};

/// Ordering between teams the win percentage cannot separate.
///
/// Upstream never fixed a tie-break rule, so the rule is injected.
pub trait TieBreaker: Send + Sync {
    /// Order two teams with equal win percentage. `Less` puts `a` first.
    fn compare(&self, _a: &StandingsEntry, _b: &StandingsEntry) -> Ordering {
        Ordering::Equal
    }

    /// Whether `team` keeps a position it finishes level on wins with `rival`.
    fn holds_tie(&self, _team: &StandingsEntry, _rival: &StandingsEntry) -> bool {
        false
    }
}

/// Leaves ties in input order and never awards a tied position.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTieBreak;

impl TieBreaker for NoTieBreak {}

/// Co-equal teams share the position.
#[derive(Debug, Clone, Copy, Default)]
pub struct SharedPosition;

impl TieBreaker for SharedPosition {
    fn holds_tie(&self, _team: &StandingsEntry, _rival: &StandingsEntry) -> bool {
        true
    }
}

/// Orders ties by run differential, then runs scored.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunDifferential;

impl TieBreaker for RunDifferential {
    fn compare(&self, a: &StandingsEntry, b: &StandingsEntry) -> Ordering {
        b.run_differential
            .cmp(&a.run_differential)
            .then_with(|| b.runs_scored.cmp(&a.runs_scored))
    }
}

/// Named tie-break policies selectable from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreakPolicy {
    #[default]
    None,
    Shared,
    RunDifferential,
}

impl TieBreakPolicy {
    pub fn tie_breaker(self) -> Box<dyn TieBreaker> {
        match self {
            TieBreakPolicy::None => Box::new(NoTieBreak),
            TieBreakPolicy::Shared => Box::new(SharedPosition),
            TieBreakPolicy::RunDifferential => Box::new(RunDifferential),
        }
    }
}

/// wins / (wins + losses); draws do not count. 0 with no decisions.
pub fn calculate_win_pct(wins: u32, losses: u32) -> f64 {
    let decisions = wins + losses;
    if decisions == 0 {
        0.0
    } else {
        wins as f64 / decisions as f64
    }
}

/// Half-game distance between a team and the leader.
pub fn calculate_games_behind(leader: &StandingsEntry, team: &StandingsEntry) -> f64 {
    let wins_gap = leader.wins as i64 - team.wins as i64;
    let losses_gap = team.losses as i64 - leader.losses as i64;
    (wins_gap + losses_gap) as f64 / 2.0
}

/// Rank teams by win percentage.
///
/// Ties go to `tie_breaker`, then stay in input order (the sort is stable).
pub fn calculate_standings(
    totals: &[TeamTotals],
    total_games_per_team: u32,
    tie_breaker: &dyn TieBreaker,
) -> Vec<StandingsEntry> {
    let mut entries: Vec<StandingsEntry> = totals
        .iter()
        .map(|t| {
            let games_played = t.games_played();
            StandingsEntry {
                rank: 0,
                team: t.team.clone(),
                wins: t.wins,
                losses: t.losses,
                draws: t.draws,
                games_played,
                win_pct: calculate_win_pct(t.wins, t.losses),
                games_behind: 0.0,
                remaining_games: total_games_per_team.saturating_sub(games_played),
                runs_scored: t.runs_scored,
                runs_allowed: t.runs_allowed,
                run_differential: t.runs_scored as i64 - t.runs_allowed as i64,
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.win_pct
            .partial_cmp(&a.win_pct)
            .unwrap_or(Ordering::Equal)
            .then_with(|| tie_breaker.compare(a, b))
    });

    let Some(leader) = entries.first().cloned() else {
        return entries;
    };
    for (i, entry) in entries.iter_mut().enumerate() {
        entry.rank = i as u32 + 1;
        entry.games_behind = if i == 0 {
            0.0
        } else {
            calculate_games_behind(&leader, entry)
        };
    }
    entries
}

/// Standings for every team in the log, including teams with no games.
pub fn standings_from_log(
    log: &GameLog,
    total_games_per_team: u32,
    tie_breaker: &dyn TieBreaker,
) -> Vec<StandingsEntry> {
    let totals: Vec<TeamTotals> = log
        .iter()
        .map(|(team, games)| TeamTotals::from_games(team, games))
        .collect();
    calculate_standings(&totals, total_games_per_team, tie_breaker)
}
