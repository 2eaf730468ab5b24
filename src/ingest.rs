//! Game log ingestion.
//!
//! Validates upstream per-team records (or league schedule lines) into a
//! [`GameLog`]. Bad records are skipped and logged; ingestion never fails.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::{Game, GameLog, GameResult, LeagueGame, TeamGameRecord};

/// Why a record was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameRecordError {
    #[error("invalid date: {0:?}")]
    InvalidDate(String),

    #[error("unknown team code: {0:?}")]
    UnknownTeam(String),

    #[error("team {0:?} listed as its own opponent")]
    SelfOpponent(String),

    #[error("invalid result code: {0:?}")]
    InvalidResult(String),

    #[error("invalid score: {0:?}")]
    InvalidScore(String),

    #[error("result {result} contradicts score {score}")]
    ResultScoreMismatch { result: String, score: String },
}

/// A record that did not make it into the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRecord {
    /// Position in the input list
    pub index: usize,
    pub team: String,
    pub reason: String,
}

/// Outcome of building a game log.
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    pub log: GameLog,
    pub accepted: usize,
    pub skipped: Vec<SkippedRecord>,
}

/// Largest run count accepted for one side of a game.
pub const MAX_RUNS: u32 = 999;

fn score_regex() -> &'static Regex {
    static SCORE: OnceLock<Regex> = OnceLock::new();
    SCORE.get_or_init(|| Regex::new(r"^\s*(\d+)\s*:\s*(\d+)\s*$").expect("score pattern is valid"))
}

/// Parse "runsFor:runsAgainst". Either side above [`MAX_RUNS`] is rejected.
pub fn parse_score(score: &str) -> Result<(u32, u32), GameRecordError> {
    let invalid = || GameRecordError::InvalidScore(score.to_string());
    let caps = score_regex().captures(score).ok_or_else(invalid)?;
    let runs = |s: &str| {
        s.parse::<u32>()
            .ok()
            .filter(|r| *r <= MAX_RUNS)
            .ok_or_else(invalid)
    };
    Ok((runs(&caps[1])?, runs(&caps[2])?))
}

/// Validate one record into a [`Game`].
///
/// `known_teams` empty means every non-empty code is accepted.
pub fn validate_record(
    record: &TeamGameRecord,
    known_teams: &BTreeSet<String>,
) -> Result<Game, GameRecordError> {
    if !is_allowed(&record.team, known_teams) {
        return Err(GameRecordError::UnknownTeam(record.team.clone()));
    }
    if !is_allowed(&record.opponent, known_teams) {
        return Err(GameRecordError::UnknownTeam(record.opponent.clone()));
    }
    if record.team == record.opponent {
        return Err(GameRecordError::SelfOpponent(record.team.clone()));
    }

    let date = NaiveDate::parse_from_str(record.date.trim(), "%Y-%m-%d")
        .map_err(|_| GameRecordError::InvalidDate(record.date.clone()))?;

    let result = GameResult::from_code(&record.result)
        .ok_or_else(|| GameRecordError::InvalidResult(record.result.clone()))?;

    let (runs_for, runs_against) = parse_score(&record.score)?;
    if GameResult::from_score(runs_for, runs_against) != result {
        return Err(GameRecordError::ResultScoreMismatch {
            result: record.result.clone(),
            score: record.score.clone(),
        });
    }

    Ok(Game {
        date,
        opponent: record.opponent.clone(),
        is_home: record.is_home,
        result,
        runs_for,
        runs_against,
    })
}

fn is_allowed(code: &str, known: &BTreeSet<String>) -> bool {
    !code.trim().is_empty() && (known.is_empty() || known.contains(code))
}

/// Build a game log from per-team records.
///
/// Every known team appears in the log, with an empty list if none of its
/// records survived validation. So does any allowed code named as a team
/// or opponent in the input, even on a rejected record. Each team's games
/// are sorted by date; the sort is stable so same-day doubleheaders keep
/// their input order.
pub fn build_game_log(records: &[TeamGameRecord], known_teams: &[String]) -> IngestReport {
    let known: BTreeSet<String> = known_teams.iter().cloned().collect();
    let mut teams: BTreeMap<String, Vec<Game>> = known
        .iter()
        .map(|team| (team.clone(), Vec::new()))
        .collect();
    let mut report = IngestReport::default();

    for (index, record) in records.iter().enumerate() {
        for code in [&record.team, &record.opponent] {
            if is_allowed(code, &known) && !teams.contains_key(code.as_str()) {
                teams.insert(code.clone(), Vec::new());
            }
        }

        match validate_record(record, &known) {
            Ok(game) => {
                teams.entry(record.team.clone()).or_default().push(game);
                report.accepted += 1;
            }
            Err(e) => {
                warn!(
                    "Skipping game record #{} for {:?}: {}",
                    index, record.team, e
                );
                report.skipped.push(SkippedRecord {
                    index,
                    team: record.team.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    report.log = GameLog::from_teams(teams);
    info!(
        "Built game log: {} teams, {} games accepted, {} skipped",
        report.log.team_count(),
        report.accepted,
        report.skipped.len()
    );
    report
}

/// Build a game log from league schedule lines (one line per played game).
pub fn build_from_league_games(games: &[LeagueGame], known_teams: &[String]) -> IngestReport {
    let records: Vec<TeamGameRecord> = games
        .iter()
        .flat_map(|g| g.to_team_records())
        .collect();
    build_game_log(&records, known_teams)
}

impl GameLog {
    /// Validate per-team records into a log. See [`build_game_log`].
    pub fn from_records(records: &[TeamGameRecord], known_teams: &[String]) -> IngestReport {
        build_game_log(records, known_teams)
    }
}
