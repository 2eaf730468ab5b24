//! Season analytics engine.
//!
//! Computes derived metrics from a validated game log:
//! - Series grouping, classification and sweeps
//! - Series and game streaks
//! - Head-to-head series matrix
//! - Standings and games behind
//! - Magic / tragic numbers and the clinch matrix
//! - Weekly performance
//!
//! Every stage is a pure function; a report is rebuilt from scratch on
//! each run.

pub mod head_to_head;
pub mod magic;
pub mod series;
pub mod standings;
pub mod streak;
pub mod sweeps;
pub mod weekly;

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::models::{
    GameLog, HeadToHeadMatrix, MagicMatrix, MagicNumberEntry, SnapshotId, StandingsEntry,
    SweepHighlights, TeamSeasonRecord, WeeklyStats,
};

pub use standings::{TieBreakPolicy, TieBreaker};

/// Inputs that are not part of the game log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonSettings {
    /// Date the analysis is run "as of"; decides whether the latest series is ongoing
    pub as_of: NaiveDate,
    pub total_games_per_team: u32,
    /// Number of teams that make the playoffs
    pub playoff_cutoff: u32,
}

/// Everything derived from one game log snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonReport {
    pub snapshot: SnapshotId,
    pub as_of: NaiveDate,
    /// Date of the most recent game in the log
    pub last_game_date: Option<NaiveDate>,
    pub computed_at: DateTime<Utc>,
    pub teams: BTreeMap<String, TeamSeasonRecord>,
    pub head_to_head: HeadToHeadMatrix,
    pub standings: Vec<StandingsEntry>,
    /// Target rank 1
    pub championship: Vec<MagicNumberEntry>,
    /// Target rank = playoff cutoff
    pub playoff: Vec<MagicNumberEntry>,
    pub magic_matrix: MagicMatrix,
    pub sweeps: SweepHighlights,
    pub weekly: Vec<WeeklyStats>,
}

impl SeasonReport {
    pub fn team(&self, team: &str) -> Option<&TeamSeasonRecord> {
        self.teams.get(team)
    }

    pub fn standing(&self, team: &str) -> Option<&StandingsEntry> {
        self.standings.iter().find(|e| e.team == team)
    }
}

/// Derive one team's record from its games.
pub fn analyze_team(team: &str, log: &GameLog, as_of: NaiveDate) -> TeamSeasonRecord {
    let games = log.games(team);
    let series = series::analyze_series(team, games, as_of);
    debug!("{}: {} games in {} series", team, games.len(), series.len());

    TeamSeasonRecord {
        team: team.to_string(),
        summary: series::summarize_series(&series),
        series_streaks: streak::series_streaks(&series),
        game_streaks: streak::game_streaks(games),
        per_opponent: head_to_head::opponent_records(&series),
        series,
    }
}

/// Run the full pipeline over a game log.
pub fn analyze_season(
    log: &GameLog,
    settings: &SeasonSettings,
    tie_breaker: &dyn TieBreaker,
) -> SeasonReport {
    let teams: BTreeMap<String, TeamSeasonRecord> = log
        .teams()
        .map(|team| (team.to_string(), analyze_team(team, log, settings.as_of)))
        .collect();

    let team_codes: Vec<String> = teams.keys().cloned().collect();
    let per_opponent: BTreeMap<String, _> = teams
        .iter()
        .map(|(team, record)| (team.clone(), record.per_opponent.clone()))
        .collect();
    let series_by_team: BTreeMap<String, _> = teams
        .iter()
        .map(|(team, record)| (team.clone(), record.series.clone()))
        .collect();

    let standings =
        standings::standings_from_log(log, settings.total_games_per_team, tie_breaker);
    let championship = magic::magic_numbers(&standings, 1, tie_breaker);
    let playoff = magic::magic_numbers(&standings, settings.playoff_cutoff, tie_breaker);

    let report = SeasonReport {
        snapshot: log.fingerprint(),
        as_of: settings.as_of,
        last_game_date: log.last_date(),
        computed_at: Utc::now(),
        head_to_head: head_to_head::build_matrix(&team_codes, &per_opponent),
        magic_matrix: magic::magic_matrix(&standings, tie_breaker),
        sweeps: sweeps::sweep_highlights(&series_by_team),
        weekly: weekly::weekly_performance(log),
        teams,
        standings,
        championship,
        playoff,
    };

    info!(
        "Analyzed snapshot {} as of {}: {} teams, {} games",
        report.snapshot,
        report.as_of,
        report.teams.len(),
        log.total_games()
    );
    report
}
